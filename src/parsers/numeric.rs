use once_cell::sync::Lazy;
use regex::Regex;

static FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)")
        .expect("Invalid float regex")
});

static INT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)")
        .expect("Invalid int regex")
});

static TERABYTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*TB\b")
        .expect("Invalid terabyte regex")
});

/// First decimal number in the text, with a comma accepted as decimal separator.
pub fn parse_float(text: Option<&str>) -> Option<f64> {
    let normalized = text?.replace(',', ".");
    FLOAT_REGEX
        .captures(&normalized)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

/// First digit run in the text. Runs too large for `u32` are treated as absent.
pub fn parse_int(text: Option<&str>) -> Option<u32> {
    INT_REGEX
        .captures(text?)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

/// Storage capacity in GB; "1 TB" style values are scaled by 1000.
pub fn parse_capacity_gb(text: Option<&str>) -> Option<u32> {
    let text = text?;
    if let Some(caps) = TERABYTE_REGEX.captures(text) {
        let terabytes = caps[1].replace(',', ".").parse::<f64>().ok()?;
        return Some((terabytes * 1000.0).round() as u32);
    }
    parse_int(Some(text))
}
