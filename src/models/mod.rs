pub mod field;
pub mod record;

pub use field::*;
pub use record::*;
