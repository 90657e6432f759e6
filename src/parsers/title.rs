use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Field, FieldMap};

// The size must end at an inch mark or a plain delimiter, so "2.8K" is skipped.
static SCREEN_SIZE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(\d{1,2}[.,]\d)(?:\s*(?:''|"|”|″|cali\b|inch\b)|\s|[|,;)]|$)"#)
        .expect("Invalid screen size regex")
});

static RAM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)\s?GB\b")
        .expect("Invalid RAM regex")
});

// Same shape as RAM_REGEX restricted to 3-4 digits; only a fallback source.
static STORAGE_GB_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{3,4})\s?GB\b")
        .expect("Invalid storage regex")
});

static STORAGE_TB_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s?TB\b")
        .expect("Invalid storage TB regex")
});

/// Resolution keywords, most specific first so "WUXGA" is not read as "HD".
const RESOLUTION_KEYWORDS: [&str; 16] = [
    "WQUXGA", "WQXGA", "WUXGA", "WQHD+", "WQHD", "QHD+", "QHD", "UHD+", "UHD", "4K", "3K",
    "2.8K", "2.5K", "2K", "FHD+", "FHD",
];

const PANEL_KEYWORDS: [(&str, &str); 6] = [
    ("AMOLED", "AMOLED"),
    ("OLED", "OLED"),
    ("MINI LED", "Mini LED"),
    ("MINI-LED", "Mini LED"),
    ("IPS", "IPS"),
    ("TN", "TN"),
];

static RESOLUTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> =
    Lazy::new(|| keyword_patterns(RESOLUTION_KEYWORDS.iter().map(|kw| (*kw, *kw))));

static PANEL_PATTERNS: Lazy<Vec<(Regex, &'static str)>> =
    Lazy::new(|| keyword_patterns(PANEL_KEYWORDS.iter().copied()));

// Tiered: the first tier that matches wins.
static OS_TIERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\b(?:windows\s*11|win\s*11|w11)\b", "Windows 11"),
        (r"(?i)\b(?:windows\s*10|win\s*10|w10)\b", "Windows 10"),
        (r"(?i)\b(?:linux|ubuntu)\b", "Linux"),
    ]
    .into_iter()
    .map(|(pattern, os)| (Regex::new(pattern).expect("Invalid OS regex"), os))
    .collect()
});

const BACKLIGHT_KEYWORDS: [&str; 5] = ["podświetl", "podswietl", "backlit", "backlight", "rgb"];

/// Word stem and the color it stands for, scanned in order.
const COLOR_STEMS: [(&str, &str); 17] = [
    ("czarn", "czarny"),
    ("black", "czarny"),
    ("srebr", "srebrny"),
    ("silver", "srebrny"),
    ("szar", "szary"),
    ("gray", "szary"),
    ("grey", "szary"),
    ("grafit", "grafitowy"),
    ("biał", "biały"),
    ("bial", "biały"),
    ("white", "biały"),
    ("niebiesk", "niebieski"),
    ("blue", "niebieski"),
    ("zielon", "zielony"),
    ("czerwon", "czerwony"),
    ("złot", "złoty"),
    ("gold", "złoty"),
];

static COLOR_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    COLOR_STEMS
        .iter()
        .map(|(stem, color)| {
            let pattern = format!(r"(?i)\b{}", regex::escape(stem));
            (Regex::new(&pattern).expect("Invalid color regex"), *color)
        })
        .collect()
});

/// Keyword regexes that refuse to match inside a longer alphanumeric token.
fn keyword_patterns<'a>(
    keywords: impl Iterator<Item = (&'a str, &'static str)>,
) -> Vec<(Regex, &'static str)> {
    keywords
        .map(|(keyword, value)| {
            let pattern = format!(r"(?i)(?:^|[^\w+]){}(?:[^\w+]|$)", regex::escape(keyword));
            (Regex::new(&pattern).expect("Invalid keyword regex"), value)
        })
        .collect()
}

fn first_match(patterns: &[(Regex, &'static str)], text: &str) -> Option<&'static str> {
    patterns
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, value)| *value)
}

/// Attributes that can be read off a product title with reasonable confidence.
///
/// The storage value shares the RAM pattern's shape, so callers must treat
/// this map as a fallback source only.
pub fn extract_specs_from_title(title: &str) -> FieldMap {
    let mut specs = FieldMap::new();
    if title.trim().is_empty() {
        return specs;
    }

    if let Some(caps) = SCREEN_SIZE_REGEX.captures(title) {
        specs.set_if_absent(Field::ScreenSizeInches, caps[1].replace(',', "."));
    }

    if let Some(resolution) = first_match(&RESOLUTION_PATTERNS, title) {
        specs.set_if_absent(Field::ScreenResolution, resolution);
    }

    if let Some(panel) = first_match(&PANEL_PATTERNS, title) {
        specs.set_if_absent(Field::PanelType, panel);
    }

    if let Some(caps) = RAM_REGEX.captures(title) {
        specs.set_if_absent(Field::RamGb, &caps[1]);
    }

    if let Some(caps) = STORAGE_GB_REGEX.captures(title) {
        specs.set_if_absent(Field::StorageCapacityGb, &caps[1]);
    } else if let Some(caps) = STORAGE_TB_REGEX.captures(title) {
        specs.set_if_absent(Field::StorageCapacityGb, format!("{} TB", &caps[1]));
    }

    if let Some(os) = first_match(&OS_TIERS, title) {
        specs.set_if_absent(Field::Os, os);
    }

    let lower = title.to_lowercase();
    if BACKLIGHT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        specs.set_if_absent(Field::KeyboardBacklight, "tak");
    }

    if let Some(color) = first_match(&COLOR_PATTERNS, title) {
        specs.set_if_absent(Field::Color, color);
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IDEAPAD: &str =
        "Lenovo IdeaPad Slim 3-15 - Core i5-13420H | 15,3'' WUXGA | 16GB | 512GB | Win11";

    #[test]
    fn test_ideapad_title() {
        let specs = extract_specs_from_title(IDEAPAD);
        assert_eq!(specs.get(Field::ScreenSizeInches), Some("15.3"));
        assert_eq!(specs.get(Field::ScreenResolution), Some("WUXGA"));
        assert_eq!(specs.get(Field::RamGb), Some("16"));
        assert_eq!(specs.get(Field::StorageCapacityGb), Some("512"));
        assert_eq!(specs.get(Field::Os), Some("Windows 11"));
        assert_eq!(specs.get(Field::KeyboardBacklight), None);
        assert_eq!(specs.get(Field::Color), None);
    }

    #[test]
    fn test_specific_resolution_not_shadowed() {
        let specs = extract_specs_from_title("ASUS Zenbook 14 OLED 2.8K 120Hz 16GB 1TB");
        assert_eq!(specs.get(Field::ScreenResolution), Some("2.8K"));
        assert_eq!(specs.get(Field::PanelType), Some("OLED"));
        assert_eq!(specs.get(Field::ScreenSizeInches), None);

        let specs = extract_specs_from_title("HP 15s FHD+ IPS");
        assert_eq!(specs.get(Field::ScreenResolution), Some("FHD+"));
        assert_eq!(specs.get(Field::PanelType), Some("IPS"));
    }

    #[test]
    fn test_amoled_before_oled() {
        let specs = extract_specs_from_title("Samsung Galaxy Book4 Pro 14 AMOLED");
        assert_eq!(specs.get(Field::PanelType), Some("AMOLED"));
    }

    #[test]
    fn test_os_tiers() {
        let specs = extract_specs_from_title("Dell Vostro 3520 Windows 10 Pro / Windows 11 ready");
        assert_eq!(specs.get(Field::Os), Some("Windows 11"));

        let specs = extract_specs_from_title("Lenovo V15 Ubuntu");
        assert_eq!(specs.get(Field::Os), Some("Linux"));

        let specs = extract_specs_from_title("Lenovo V15 FreeDOS");
        assert_eq!(specs.get(Field::Os), None);
    }

    #[test]
    fn test_terabyte_storage_fallback() {
        let specs = extract_specs_from_title("Acer Nitro V 15 | 32GB | 1TB SSD");
        assert_eq!(specs.get(Field::RamGb), Some("32"));
        assert_eq!(specs.get(Field::StorageCapacityGb), Some("1 TB"));
    }

    #[test]
    fn test_backlight_and_color() {
        let specs = extract_specs_from_title("HP Pavilion 15 podświetlana klawiatura srebrny");
        assert_eq!(specs.get(Field::KeyboardBacklight), Some("tak"));
        assert_eq!(specs.get(Field::Color), Some("srebrny"));
    }

    #[test]
    fn test_color_table_order() {
        // "czarn" precedes "srebr" in the table regardless of title position.
        let specs = extract_specs_from_title("Laptop srebrno-czarny");
        assert_eq!(specs.get(Field::Color), Some("czarny"));
    }

    #[test]
    fn test_empty_title() {
        assert!(extract_specs_from_title("  ").is_empty());
    }
}
