//! Laptop category crawler and product spec extractor.
//!
//! The extraction core lives in [`parsers`]: it turns one product page into a
//! [`models::ProductRecord`] without any I/O. [`scrapers`] and [`utils::http`]
//! are the thin crawl loop that feeds it pages.

pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod utils;

pub use models::{ProductId, ProductRecord};
pub use parsers::{extract_listing_links, extract_record};
