// ==========================================
// Cruce de Material SAP - data cleaner
// ==========================================
// TRIM / NULL normalization / lenient numeric coercion.
// Coercion policy: the run completes on dirty data; blank
// or non-numeric quantities become 0 and the shortfall
// stays visible in the output instead of aborting the run.
// ==========================================

use tracing::warn;

pub struct DataCleaner;

impl DataCleaner {
    pub fn new() -> Self {
        Self {}
    }

    /// Trim surrounding whitespace.
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// Empty / whitespace-only values become None.
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// Coerce a raw cell to a non-negative quantity.
    ///
    /// Blank or non-numeric input is 0, not an error; negative or
    /// non-finite values are clamped to 0. Applied uniformly to every
    /// quantity column at ingestion.
    pub fn coerce_non_negative_qty(&self, raw: &str, field: &str, row: usize) -> f64 {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return 0.0;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            Ok(value) => {
                warn!(row, field, value, "out-of-range quantity coerced to 0");
                0.0
            }
            Err(_) => {
                warn!(row, field, raw = trimmed, "non-numeric quantity coerced to 0");
                0.0
            }
        }
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new()
    }
}
