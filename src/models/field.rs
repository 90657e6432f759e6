use std::collections::HashMap;

/// Canonical attribute names produced by the spec-table and title extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ScreenSizeInches,
    ScreenResolution,
    PanelType,
    ScreenRefreshRateHz,
    Cpu,
    Gpu,
    RamGb,
    RamType,
    StorageType,
    StorageCapacityGb,
    Os,
    Color,
    KeyboardBacklight,
    BatteryCapacityWh,
    WeightKg,
    BodyMaterial,
    WarrantyMonths,
    Availability,
}

/// Raw string values keyed by canonical field, accumulated before typing.
///
/// Writes are set-if-absent: the first extractor to claim a field keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: HashMap<Field, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `field` unless the field already holds a value.
    /// Returns `true` when the value was stored.
    pub fn set_if_absent(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.values.contains_key(&field) {
            return false;
        }
        self.values.insert(field, value.into());
        true
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Fills every field of `other` that `self` does not hold yet.
    pub fn fill_from(&mut self, other: FieldMap) {
        for (field, value) in other.values {
            self.values.entry(field).or_insert(value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
