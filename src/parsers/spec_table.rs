use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{clean_text, element_text};
use crate::models::{Field, FieldMap};

/// Label fragments mapped to canonical fields. Rules are tried in order and
/// the first rule with a fragment contained in the label wins, so narrower
/// labels ("typ pamięci ram") must come before broader ones ("ram").
/// Fragments up to `SHORT_FRAGMENT_LEN` chars must match a whole label word.
const FIELD_SYNONYMS: &[(&[&str], Field)] = &[
    (&["przekątna ekranu", "przekatna"], Field::ScreenSizeInches),
    (&["rozdzielczość", "rozdzielczosc"], Field::ScreenResolution),
    (&["matryca", "panel"], Field::PanelType),
    (&["procesor", "cpu"], Field::Cpu),
    (
        &["karta graficzna", "układ graficzny", "uklad graficzny", "gpu"],
        Field::Gpu,
    ),
    (
        &[
            "częstotliwość odświeżania",
            "czestotliwosc odswiezania",
            "odświeżanie ekranu",
            "refresh rate",
        ],
        Field::ScreenRefreshRateHz,
    ),
    (&["typ pamięci ram", "typ pamieci ram"], Field::RamType),
    (&["pamięć ram", "pamiec ram", "ram"], Field::RamGb),
    (
        &["pojemność dysku", "pojemnosc dysku", "pojemność ssd", "pojemnosc ssd"],
        Field::StorageCapacityGb,
    ),
    (&["rodzaj dysku", "typ dysku", "dysk"], Field::StorageType),
    (&["system operacyjny", "system"], Field::Os),
    (
        &[
            "podświetlana klawiatura",
            "podświetlenie klawiatury",
            "podswietlenie klawiatury",
            "podswietlana klawiatura",
        ],
        Field::KeyboardBacklight,
    ),
    (&["kolor"], Field::Color),
    (&["pojemność baterii", "bateria", "akumulator"], Field::BatteryCapacityWh),
    (&["waga", "masa"], Field::WeightKg),
    (
        &["materiał obudowy", "material obudowy", "obudowa"],
        Field::BodyMaterial,
    ),
    (&["gwarancja"], Field::WarrantyMonths),
    (&["dostępność", "dostepnosc"], Field::Availability),
];

const SHORT_FRAGMENT_LEN: usize = 3;

static DEFINITION_BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("dl, .specification, .product-parameters, .product-specs")
        .expect("Invalid definition block selector")
});
static DT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("dt").expect("Invalid dt selector"));
static DD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("dd").expect("Invalid dd selector"));
static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table tr").expect("Invalid row selector"));
static LABEL_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("Invalid label cell selector"));
static TD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Invalid td selector"));
static GRID_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-name="specsGroup"] div.grid.grid-cols-2"#)
        .expect("Invalid grid selector")
});
static GRID_VALUE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.block").expect("Invalid grid value selector"));

fn label_matches(key: &str, fragment: &str) -> bool {
    if fragment.chars().count() > SHORT_FRAGMENT_LEN {
        return key.contains(fragment);
    }
    // "ram" must not hit "oprogramowanie".
    key.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == fragment)
}

/// Canonical field for a raw spec label, if any synonym rule claims it.
pub fn map_label(label: &str) -> Option<Field> {
    let key = clean_text(Some(label)).to_lowercase();
    if key.is_empty() {
        return None;
    }
    FIELD_SYNONYMS
        .iter()
        .find(|(synonyms, _)| synonyms.iter().any(|s| label_matches(&key, s)))
        .map(|(_, field)| *field)
}

/// Route one scraped (label, value) pair into the map; unmapped labels are dropped.
fn map_into_spec(spec: &mut FieldMap, label: &str, value: &str) {
    let value = clean_text(Some(value));
    if value.is_empty() {
        return;
    }
    if let Some(field) = map_label(label) {
        spec.set_if_absent(field, value);
    }
}

/// `<dl>`-style blocks. Labels and values pair up one-to-one; a block with
/// mismatched counts is skipped as a whole.
fn collect_definition_lists(document: &Html, spec: &mut FieldMap) {
    for block in document.select(&DEFINITION_BLOCK_SELECTOR) {
        let labels: Vec<ElementRef> = block.select(&DT_SELECTOR).collect();
        let values: Vec<ElementRef> = block.select(&DD_SELECTOR).collect();
        if labels.is_empty() || labels.len() != values.len() {
            continue;
        }
        for (label, value) in labels.into_iter().zip(values) {
            map_into_spec(spec, &element_text(label), &element_text(value));
        }
    }
}

/// Generic tables: first header-or-cell is the label, last cell is the value.
fn collect_table_rows(document: &Html, spec: &mut FieldMap) {
    for row in document.select(&ROW_SELECTOR) {
        let Some(label) = row.select(&LABEL_CELL_SELECTOR).next() else {
            continue;
        };
        let Some(value) = row.select(&TD_SELECTOR).last() else {
            continue;
        };
        // A single-cell row has no separate value.
        if label.id() == value.id() {
            continue;
        }
        map_into_spec(spec, &element_text(label), &element_text(value));
    }
}

/// Component grids: first child div is the label, second holds the value,
/// preferring a nested `span.block` when present.
fn collect_grid_layout(document: &Html, spec: &mut FieldMap) {
    for grid in document.select(&GRID_SELECTOR) {
        let cells: Vec<ElementRef> = grid
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "div")
            .collect();
        if cells.len() < 2 {
            continue;
        }
        let value = cells[1]
            .select(&GRID_VALUE_SELECTOR)
            .next()
            .unwrap_or(cells[1]);
        map_into_spec(spec, &element_text(cells[0]), &element_text(value));
    }
}

/// Structured specification fields from every supported page layout.
///
/// Layouts run in a fixed order (definition lists, tables, grids) and the
/// first layout to supply a field keeps it.
pub fn extract_from_spec_table(document: &Html) -> FieldMap {
    let mut spec = FieldMap::new();
    collect_definition_lists(document, &mut spec);
    collect_table_rows(document, &mut spec);
    collect_grid_layout(document, &mut spec);
    spec
}
