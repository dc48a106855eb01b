// ==========================================
// Cruce de Material SAP - column mapping profile
// ==========================================
// Canonical field -> ordered source-header candidates.
// Defaults mirror the headers the planning sheets have
// shipped with; a JSON profile file can override any
// section, missing sections keep the defaults.
// ==========================================

use crate::config::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ==========================================
// RequestColumns - hoja "Material por Descargar"
// ==========================================
// material_code and requested_qty are required; leaving
// them unresolvable is a fatal configuration error at
// mapping time, not here
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestColumns {
    pub item: Vec<String>,
    pub material_code: Vec<String>,
    pub material_description: Vec<String>,
    pub site_code: Vec<String>,
    pub plan_name: Vec<String>,
    pub requested_qty: Vec<String>,
}

impl Default for RequestColumns {
    fn default() -> Self {
        Self {
            item: vec_of(&["Item"]),
            material_code: vec_of(&["MATERIAL", "Material"]),
            material_description: vec_of(&[
                "Descripcion Material",
                "Texto breve de material",
                "Descripción",
                "Descripcion",
            ]),
            site_code: vec_of(&["CODIGO OBRA SGT", "CODIGO OBRA"]),
            plan_name: vec_of(&["Planilla", "NOMBRE PLANILLA"]),
            requested_qty: vec_of(&["Planilla Cantidad", "Cantidad"]),
        }
    }
}

// ==========================================
// StockColumns - hoja "Existencia"
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockColumns {
    pub item: Vec<String>,
    pub material_code: Vec<String>,
    pub stock_description: Vec<String>,
    pub available_qty: Vec<String>,
}

impl Default for StockColumns {
    fn default() -> Self {
        Self {
            item: vec_of(&["Item"]),
            material_code: vec_of(&["MATERIAL", "Material"]),
            stock_description: vec_of(&["Descripcion_SAP", "Texto breve de material"]),
            available_qty: vec_of(&["SAP", "Libre utilización", "Libre utilizacion"]),
        }
    }
}

// ==========================================
// MappingProfile
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingProfile {
    /// Default sheet-name candidates for the requests sheet.
    pub requests_sheet: Vec<String>,
    /// Default sheet-name candidates for the stock sheet.
    pub stock_sheet: Vec<String>,
    pub requests: RequestColumns,
    pub stock: StockColumns,
}

impl Default for MappingProfile {
    fn default() -> Self {
        Self {
            requests_sheet: vec_of(&["Material por Descargar"]),
            stock_sheet: vec_of(&["Existencia", "Existencia SAP"]),
            requests: RequestColumns::default(),
            stock: StockColumns::default(),
        }
    }
}

impl MappingProfile {
    /// Load a profile from a JSON file. Sections absent from the file
    /// keep their built-in defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

fn vec_of(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
