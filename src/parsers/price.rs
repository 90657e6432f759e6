use once_cell::sync::Lazy;
use regex::Regex;

static NON_NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9,.\s]")
        .expect("Invalid non-numeric regex")
});

static PRICE_FALLBACK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)")
        .expect("Invalid price fallback regex")
});

const CURRENCY_MARKERS: [&str; 3] = ["pln", "zł", "zl"];

/// Parse a Polish-formatted price ("3 499,00 zł", "3.499,00 PLN") into a number.
///
/// `None` when the text holds no recoverable number.
pub fn parse_price(price_text: Option<&str>) -> Option<f64> {
    let text = price_text?.to_lowercase();

    let mut stripped = text;
    for marker in CURRENCY_MARKERS {
        stripped = stripped.replace(marker, "");
    }

    let numeric = NON_NUMERIC_REGEX.replace_all(&stripped, "");
    // Whitespace (including NBSP) only ever serves as a thousands separator here
    let mut compact: String = numeric.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.contains(',') && compact.contains('.') {
        compact = compact.replace('.', "").replace(',', ".");
    } else if compact.contains(',') {
        compact = compact.replace(',', ".");
    }

    if let Ok(value) = compact.parse::<f64>() {
        return Some(value);
    }

    PRICE_FALLBACK_REGEX
        .captures(&compact)
        .and_then(|caps| caps[1].replace(',', ".").parse::<f64>().ok())
}
