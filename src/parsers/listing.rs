use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::warn;
use url::Url;

static PRODUCT_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/product/\d+/.+\.html$")
        .expect("Invalid product path regex")
});

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Invalid link selector"));

/// Product page URLs on a listing page, de-duplicated in order of first appearance.
///
/// Only links on the listing's own host whose path looks like
/// `/product/<id>/<slug>.html` are kept, with query and fragment removed.
pub fn extract_listing_links(html: &str, base_url: &str) -> Vec<String> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!("Invalid listing base URL {}: {}", base_url, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&LINK_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(mut url) = base.join(href.trim()) else {
            continue;
        };
        if url.host_str() != base.host_str() || !PRODUCT_PATH_REGEX.is_match(url.path()) {
            continue;
        }
        // Tracking parameters and anchors point at the same product page.
        url.set_query(None);
        url.set_fragment(None);

        let url = url.to_string();
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}
