pub mod brand;
pub mod listing;
pub mod numeric;
pub mod page;
pub mod price;
pub mod record;
pub mod spec_table;
pub mod title;

pub use brand::*;
pub use listing::*;
pub use numeric::*;
pub use page::*;
pub use price::*;
pub use record::*;
pub use spec_table::*;
pub use title::*;

use scraper::ElementRef;

/// Collapse every whitespace run to a single space and trim the ends.
/// `None` yields an empty string.
pub fn clean_text(text: Option<&str>) -> String {
    text.unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of an element and all its descendants, text nodes joined by a space.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let joined = element.text().collect::<Vec<_>>().join(" ");
    clean_text(Some(&joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_text_collapses_runs() {
        assert_eq!(clean_text(Some("  Lenovo\n\tIdeaPad \u{a0} Slim  ")), "Lenovo IdeaPad Slim");
    }

    #[test]
    fn test_clean_text_absent_is_empty() {
        assert_eq!(clean_text(None), "");
        assert_eq!(clean_text(Some(" \n ")), "");
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let once = clean_text(Some("15,3''   WUXGA |\n16GB"));
        assert_eq!(clean_text(Some(&once)), once);
    }
}
