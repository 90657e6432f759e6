use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{element_text, parse_float, parse_int, parse_price};

static RATING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+[.,]\d+)")
        .expect("Invalid rating regex")
});

static REVIEWS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*(?:opini|recenz|ocen)")
        .expect("Invalid reviews regex")
});

const AVAILABILITY_KEYWORDS: [&str; 2] = ["dostęp", "magazyn"];
const RATING_KEYWORDS: [&str; 2] = ["gwiaz", "ocen"];

/// A selector and how to read a value from its first match.
pub struct Strategy<T> {
    pub selector: &'static str,
    pub extract: fn(ElementRef<'_>) -> Option<T>,
}

/// Try each strategy in order; the first one that yields a value wins.
pub fn first_success<T>(document: &Html, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| {
        let selector = Selector::parse(strategy.selector).ok()?;
        let element = document.select(&selector).next()?;
        (strategy.extract)(element)
    })
}

fn non_empty_text(element: ElementRef<'_>) -> Option<String> {
    let text = element_text(element);
    (!text.is_empty()).then_some(text)
}

fn price_text(element: ElementRef<'_>) -> Option<f64> {
    parse_price(Some(&element_text(element)))
}

fn content_or_text(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("content")
        .map(str::to_string)
        .unwrap_or_else(|| element_text(element))
}

pub const NAME_STRATEGIES: &[Strategy<String>] = &[
    Strategy { selector: "h1[data-testid='product-name']", extract: non_empty_text },
    Strategy { selector: "h1.product-name", extract: non_empty_text },
    Strategy { selector: "h1", extract: non_empty_text },
];

pub const PRICE_STRATEGIES: &[Strategy<f64>] = &[
    Strategy { selector: "[data-price-type='final']", extract: price_text },
    Strategy { selector: "[data-testid='product-price']", extract: price_text },
    Strategy { selector: ".price, .price-final, .product-price", extract: price_text },
    Strategy { selector: "[class*='price']", extract: price_text },
];

fn float_content(element: ElementRef<'_>) -> Option<f64> {
    parse_float(Some(&content_or_text(element)))
}

fn int_content(element: ElementRef<'_>) -> Option<u32> {
    parse_int(Some(&content_or_text(element)))
}

pub const RATING_STRATEGIES: &[Strategy<f64>] = &[
    Strategy { selector: "[itemprop='ratingValue']", extract: float_content },
];

pub const REVIEWS_STRATEGIES: &[Strategy<u32>] = &[
    Strategy { selector: "[itemprop='reviewCount']", extract: int_content },
    Strategy { selector: "[itemprop='ratingCount']", extract: int_content },
];

/// Fields read from the page itself rather than from the spec table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageFields {
    pub name: Option<String>,
    pub price_pln: Option<f64>,
    pub availability: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<u32>,
}

/// First element in document order matching `selector` whose text contains a
/// keyword and which has no matching descendant of its own.
fn innermost_with_keyword<'a>(
    document: &'a Html,
    selector: &str,
    keywords: &[&str],
) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    let mut current: Option<ElementRef<'a>> = None;

    for element in document.select(&selector) {
        let text = element.text().collect::<String>().to_lowercase();
        if !keywords.iter().any(|kw| text.contains(kw)) {
            continue;
        }
        match current {
            Some(found) if !element.ancestors().any(|a| a.id() == found.id()) => {
                // Past the subtree of `found`, so it has no matching descendant.
                return Some(found);
            }
            _ => current = Some(element),
        }
    }

    current
}

fn availability_text(document: &Html) -> Option<String> {
    innermost_with_keyword(document, "div, span, p", &AVAILABILITY_KEYWORDS)
        .and_then(non_empty_text)
}

fn rating_from_text(text: &str) -> (Option<f64>, Option<u32>) {
    let rating = RATING_REGEX
        .captures(text)
        .and_then(|caps| parse_float(Some(&caps[1])));
    let reviews = REVIEWS_REGEX
        .captures(&text.to_lowercase())
        .and_then(|caps| parse_int(Some(&caps[1])));
    (rating, reviews)
}

/// Rating and review count from the first element mentioning stars or reviews,
/// widening to its parent when the element holds only part of the widget.
fn rating_and_reviews(document: &Html) -> (Option<f64>, Option<u32>) {
    let Some(element) = innermost_with_keyword(document, "div, span", &RATING_KEYWORDS) else {
        return (None, None);
    };

    let (mut rating, mut reviews) = rating_from_text(&element_text(element));
    if rating.is_none() || reviews.is_none() {
        if let Some(parent) = element.parent().and_then(ElementRef::wrap) {
            let (parent_rating, parent_reviews) = rating_from_text(&element_text(parent));
            rating = rating.or(parent_rating);
            reviews = reviews.or(parent_reviews);
        }
    }
    (rating, reviews)
}

pub fn extract_page_fields(document: &Html) -> PageFields {
    let (heuristic_rating, heuristic_reviews) = rating_and_reviews(document);

    PageFields {
        name: first_success(document, NAME_STRATEGIES),
        price_pln: first_success(document, PRICE_STRATEGIES),
        availability: availability_text(document),
        rating: first_success(document, RATING_STRATEGIES).or(heuristic_rating),
        reviews_count: first_success(document, REVIEWS_STRATEGIES).or(heuristic_reviews),
    }
}
