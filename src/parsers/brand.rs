use once_cell::sync::Lazy;
use regex::Regex;

use super::clean_text;

/// Uppercase brand token and its display form. Earlier entries win ties.
const KNOWN_BRANDS: [(&str, &str); 16] = [
    ("LENOVO", "Lenovo"),
    ("HP", "HP"),
    ("APPLE", "Apple"),
    ("DELL", "Dell"),
    ("ASUS", "ASUS"),
    ("ACER", "Acer"),
    ("MSI", "MSI"),
    ("HUAWEI", "Huawei"),
    ("LG", "LG"),
    ("MICROSOFT", "Microsoft"),
    ("SAMSUNG", "Samsung"),
    ("TOSHIBA", "Toshiba"),
    ("RAZER", "Razer"),
    ("GIGABYTE", "Gigabyte"),
    ("CHUWI", "Chuwi"),
    ("XIAOMI", "Xiaomi"),
];

static BRAND_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    KNOWN_BRANDS
        .iter()
        .map(|(raw, canonical)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(raw));
            (Regex::new(&pattern).expect("Invalid brand regex"), *canonical)
        })
        .collect()
});

static CATEGORY_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:laptop|notebook|ultrabook)\b\s*")
        .expect("Invalid category word regex")
});

// A hyphen only separates when spaced out; "3-15" stays inside the model.
static MODEL_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+-\s+|\s*[–—]\s*|\s*\|\s*|,|\(")
        .expect("Invalid model separator regex")
});

static MODEL_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9]+(?:[-_/][A-Za-z0-9]+)*")
        .expect("Invalid model token regex")
});

static MODEL_FALLBACK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z][A-Za-z0-9]+")
        .expect("Invalid model fallback regex")
});

// Processor families and part numbers: "Core", "i5-13420H", "Ryzen", "R7-7840HS",
// "N100", bare suffixed part numbers like "7530U", Apple "M2".
static CPU_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:intel|amd|core|ryzen|celeron|pentium|athlon|snapdragon|i[3579](?:-\d{4,5}[a-z]{0,2})?|r[3579](?:-\d{4}[a-z]{0,2})?|n\d{2,4}|\d{4,5}[a-z]{1,2}|m[1-4])$",
    )
    .expect("Invalid CPU token regex")
});

// Memory and disk sizes: "16GB", "512GB", "1TB".
static MEMORY_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d{1,4}(?:gb|tb)$")
        .expect("Invalid memory token regex")
});

// Named display resolutions and "1920x1080" style sizes.
static RESOLUTION_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:hd|fhd|uhd|qhd|wqhd|wxga|wuxga|wqxga|wquxga|[1-8]k|\d{3,4}x\d{3,4})$")
        .expect("Invalid resolution token regex")
});

// Operating systems as they appear in titles: "Win11", "W11", "Windows", "FreeDOS".
static OS_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:win\d{0,2}|w1[01]|windows|linux|ubuntu|freedos|dos|macos|chromeos|noos)$")
        .expect("Invalid OS token regex")
});

// Marketing adjectives that never name a model line on their own.
static MARKETING_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:gaming|gamingowy|business|biznesowy|biurowy|premium|nowy|new)$")
        .expect("Invalid marketing token regex")
});

fn is_non_model_token(token: &str) -> bool {
    CPU_TOKEN_REGEX.is_match(token)
        || MEMORY_TOKEN_REGEX.is_match(token)
        || RESOLUTION_TOKEN_REGEX.is_match(token)
        || OS_TOKEN_REGEX.is_match(token)
        || MARKETING_TOKEN_REGEX.is_match(token)
}

/// Leftmost known brand in the title: (byte range, display form).
fn find_known_brand(title: &str) -> Option<(usize, usize, &'static str)> {
    BRAND_PATTERNS
        .iter()
        .filter_map(|(pattern, canonical)| {
            pattern.find(title).map(|m| (m.start(), m.end(), *canonical))
        })
        .min_by_key(|(start, _, _)| *start)
}

/// Split a product title into (brand, model).
///
/// The brand is the leftmost gazetteer hit, or the first title token when no
/// known brand occurs. The model is built from the title segment after the
/// brand, up to the first separator, with spec-like tokens (CPU, memory,
/// resolution, OS, marketing words) dropped.
pub fn guess_brand_model(title: Option<&str>) -> (Option<String>, Option<String>) {
    let title = clean_text(title);
    if title.is_empty() {
        return (None, None);
    }

    let (brand, remainder) = match find_known_brand(&title) {
        Some((start, end, canonical)) => {
            let remainder = format!("{} {}", &title[..start], &title[end..]);
            (canonical.to_string(), remainder)
        }
        None => {
            let mut parts = title.splitn(2, ' ');
            let first = parts.next().unwrap_or_default().to_string();
            (first, parts.next().unwrap_or_default().to_string())
        }
    };

    let remainder = clean_text(Some(&remainder));
    let remainder = CATEGORY_WORD_REGEX.replace(&remainder, "").to_string();

    let region = MODEL_SEPARATOR_REGEX
        .split(&remainder)
        .next()
        .unwrap_or_default()
        .trim();

    let model = MODEL_TOKEN_REGEX
        .find_iter(region)
        .map(|m| m.as_str())
        .filter(|token| !is_non_model_token(token))
        .take(4)
        .collect::<Vec<_>>()
        .join(" ");

    let model = if model.is_empty() || model.eq_ignore_ascii_case(&brand) {
        MODEL_FALLBACK_REGEX
            .find(&remainder)
            .map(|m| m.as_str().to_string())
    } else {
        Some(model)
    };

    (Some(brand), model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IDEAPAD: &str =
        "Lenovo IdeaPad Slim 3-15 - Core i5-13420H | 15,3'' WUXGA | 16GB | 512GB | Win11";

    #[test]
    fn test_known_brand_and_model() {
        let (brand, model) = guess_brand_model(Some(IDEAPAD));
        assert_eq!(brand.as_deref(), Some("Lenovo"));
        let model = model.unwrap();
        assert_eq!(model, "IdeaPad Slim 3-15");
        for excluded in ["i5-13420H", "16GB", "WUXGA", "Win11"] {
            assert!(!model.contains(excluded), "{excluded} leaked into {model}");
        }
    }

    #[test]
    fn test_category_word_before_brand() {
        let (brand, model) =
            guess_brand_model(Some("Laptop ASUS Vivobook 15 X1504ZA i5-1235U 16GB 512GB Win11"));
        assert_eq!(brand.as_deref(), Some("ASUS"));
        assert_eq!(model.as_deref(), Some("Vivobook 15 X1504ZA"));
    }

    #[test]
    fn test_leftmost_brand_wins() {
        // "HP" appears after "Dell" in the text, so Dell is the brand.
        let (brand, _) = guess_brand_model(Some("Dell Latitude 5440 (zamiennik HP ProBook)"));
        assert_eq!(brand.as_deref(), Some("Dell"));
    }

    #[test]
    fn test_brand_match_is_case_insensitive_and_canonical() {
        let (brand, model) = guess_brand_model(Some("notebook acer Aspire 5 A515-58M"));
        assert_eq!(brand.as_deref(), Some("Acer"));
        assert_eq!(model.as_deref(), Some("Aspire 5 A515-58M"));
    }

    #[test]
    fn test_unknown_brand_falls_back_to_first_token() {
        let (brand, model) = guess_brand_model(Some("Medion Akoya E15 - Ryzen 5"));
        assert_eq!(brand.as_deref(), Some("Medion"));
        assert_eq!(model.as_deref(), Some("Akoya E15"));
    }

    #[test]
    fn test_marketing_and_spec_tokens_are_dropped() {
        let (brand, model) = guess_brand_model(Some("MSI Gaming Katana 15 B13VFK i7-13620H 16GB RTX4060"));
        assert_eq!(brand.as_deref(), Some("MSI"));
        assert_eq!(model.as_deref(), Some("Katana 15 B13VFK RTX4060"));
    }

    #[test]
    fn test_model_falls_back_when_region_is_only_specs() {
        let (brand, model) = guess_brand_model(Some("HP 16GB | Victus 15"));
        assert_eq!(brand.as_deref(), Some("HP"));
        assert_eq!(model.as_deref(), Some("Victus"));
    }

    #[test]
    fn test_absent_title() {
        assert_eq!(guess_brand_model(None), (None, None));
        assert_eq!(guess_brand_model(Some("   ")), (None, None));
    }
}
