use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::{
    clean_text, extract_from_spec_table, extract_page_fields, extract_specs_from_title,
    guess_brand_model, parse_capacity_gb, parse_float, parse_int,
};
use crate::models::{Field, FieldMap, ProductId, ProductRecord};

static PRODUCT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/product/(\d+)/")
        .expect("Invalid product id regex")
});

const TRUTHY_MARKERS: [&str; 3] = ["tak", "podś", "podsw"];
const TRUTHY_EXACT: [&str; 3] = ["yes", "true", "1"];

pub fn extract_product_id(url: &str) -> Option<ProductId> {
    PRODUCT_ID_REGEX
        .captures(url)
        .map(|caps| ProductId(caps[1].to_string()))
}

/// `Some(true)` for a recognised "yes" value; anything else is unknown, never `false`.
pub fn parse_flag(text: Option<&str>) -> Option<bool> {
    let text = clean_text(text).to_lowercase();
    if text.is_empty() {
        return None;
    }
    let truthy = TRUTHY_MARKERS.iter().any(|marker| text.contains(marker))
        || TRUTHY_EXACT.contains(&text.as_str());
    truthy.then_some(true)
}

fn text_field(spec: &FieldMap, field: Field) -> Option<String> {
    spec.get(field)
        .map(|value| clean_text(Some(value)))
        .filter(|value| !value.is_empty())
}

/// Build one record from a product page.
///
/// Spec-table values take priority; title-derived values only fill fields
/// the table left empty. Never fails: anything unresolved stays `None`.
pub fn extract_record(html: &str, url: &str) -> ProductRecord {
    let document = Html::parse_document(html);
    let page = extract_page_fields(&document);

    let mut spec = extract_from_spec_table(&document);
    let from_title = extract_specs_from_title(page.name.as_deref().unwrap_or_default());
    debug!(
        "{}: {} spec-table fields, {} title fields",
        url,
        spec.len(),
        from_title.len()
    );
    spec.fill_from(from_title);

    let (brand, model) = guess_brand_model(page.name.as_deref());

    ProductRecord {
        product_id: extract_product_id(url),
        name: page.name,
        brand,
        model,
        price_pln: page.price_pln,
        availability: page.availability.or_else(|| text_field(&spec, Field::Availability)),
        rating: page.rating,
        reviews_count: page.reviews_count,
        screen_size_inches: parse_float(spec.get(Field::ScreenSizeInches)),
        screen_resolution: text_field(&spec, Field::ScreenResolution),
        panel_type: text_field(&spec, Field::PanelType),
        cpu: text_field(&spec, Field::Cpu),
        gpu: text_field(&spec, Field::Gpu),
        ram_gb: parse_int(spec.get(Field::RamGb)),
        storage_type: text_field(&spec, Field::StorageType),
        storage_capacity_gb: parse_capacity_gb(spec.get(Field::StorageCapacityGb)),
        os: text_field(&spec, Field::Os),
        color: text_field(&spec, Field::Color),
        keyboard_backlight: parse_flag(spec.get(Field::KeyboardBacklight)),
        product_url: url.to_string(),
        screen_refresh_rate_hz: parse_int(spec.get(Field::ScreenRefreshRateHz)),
        ram_type: text_field(&spec, Field::RamType),
        battery_capacity_wh: parse_float(spec.get(Field::BatteryCapacityWh)),
        weight_kg: parse_float(spec.get(Field::WeightKg)),
        body_material: text_field(&spec, Field::BodyMaterial),
        warranty_months: parse_int(spec.get(Field::WarrantyMonths)),
    }
}
