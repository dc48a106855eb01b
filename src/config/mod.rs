// ==========================================
// Cruce de Material SAP - configuration layer
// ==========================================
// Column-mapping profiles; the engine never sees raw
// headers, only canonical fields mapped through here
// ==========================================

pub mod mapping_profile;

pub use mapping_profile::{MappingProfile, RequestColumns, StockColumns};

use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config read failed ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("config parse failed ({path}): {message}")]
    ParseError { path: String, message: String },
}

/// Result type alias
pub type ConfigResult<T> = Result<T, ConfigError>;
