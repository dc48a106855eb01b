// ==========================================
// Cruce de Material SAP - domain types
// ==========================================
// Serialization format follows the export vocabulary
// of the planning sheets ("Si" / "No")
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Dispatchable flag (Descargable)
// ==========================================
// Label semantics: Si when an output line carries any
// allocated quantity, No otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dispatchable {
    Si, // some stock was allocated to this line
    No, // nothing allocated (zero request, depleted or unmatched stock)
}

impl Dispatchable {
    /// Derive the flag from an allocated quantity.
    pub fn from_allocated(allocated_qty: f64) -> Self {
        if allocated_qty > 0.0 {
            Dispatchable::Si
        } else {
            Dispatchable::No
        }
    }

    pub fn is_dispatchable(&self) -> bool {
        matches!(self, Dispatchable::Si)
    }
}

impl fmt::Display for Dispatchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatchable::Si => write!(f, "Si"),
            Dispatchable::No => write!(f, "No"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_allocated() {
        assert_eq!(Dispatchable::from_allocated(1.0), Dispatchable::Si);
        assert_eq!(Dispatchable::from_allocated(0.5), Dispatchable::Si);
        assert_eq!(Dispatchable::from_allocated(0.0), Dispatchable::No);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Dispatchable::Si.to_string(), "Si");
        assert_eq!(Dispatchable::No.to_string(), "No");
    }
}
