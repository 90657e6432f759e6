use serde::{Deserialize, Serialize};
use std::fmt;

// NewType pattern for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scraped product. Field order is the column order of the record stream.
///
/// Every attribute except `product_url` is optional and stays `None` when
/// nothing could be resolved for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: Option<ProductId>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price_pln: Option<f64>,
    pub availability: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<u32>,
    pub screen_size_inches: Option<f64>,
    pub screen_resolution: Option<String>,
    pub panel_type: Option<String>,
    pub cpu: Option<String>,
    pub gpu: Option<String>,
    pub ram_gb: Option<u32>,
    pub storage_type: Option<String>,
    pub storage_capacity_gb: Option<u32>,
    pub os: Option<String>,
    pub color: Option<String>,
    pub keyboard_backlight: Option<bool>,
    pub product_url: String,
    pub screen_refresh_rate_hz: Option<u32>,
    pub ram_type: Option<String>,
    pub battery_capacity_wh: Option<f64>,
    pub weight_kg: Option<f64>,
    pub body_material: Option<String>,
    pub warranty_months: Option<u32>,
}

impl ProductRecord {
    pub const COLUMNS: [&'static str; 26] = [
        "product_id",
        "name",
        "brand",
        "model",
        "price_pln",
        "availability",
        "rating",
        "reviews_count",
        "screen_size_inches",
        "screen_resolution",
        "panel_type",
        "cpu",
        "gpu",
        "ram_gb",
        "storage_type",
        "storage_capacity_gb",
        "os",
        "color",
        "keyboard_backlight",
        "product_url",
        "screen_refresh_rate_hz",
        "ram_type",
        "battery_capacity_wh",
        "weight_kg",
        "body_material",
        "warranty_months",
    ];
}
