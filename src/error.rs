#[derive(thiserror::Error, Debug)]
pub enum AqiError {
    #[error("AQI data unavailable from provider")]
    FetchFailure,
    #[error("history store is corrupt: {0}")]
    StorageCorrupt(String),
    #[error("failed to persist history: {0}")]
    Persistence(String),
    #[error("ward not found: {0}")]
    NotFound(String),
    #[error("ward name matches several zones, pass --zone: {0}")]
    AmbiguousWard(String),
    #[error("invalid AQI reading: {0}")]
    InvalidReading(String),
    #[error("ward catalog error: {0}")]
    Catalog(String),
}

impl AqiError {
    pub fn code(&self) -> &'static str {
        match self {
            AqiError::FetchFailure => "FETCH_FAILED",
            AqiError::StorageCorrupt(_) => "STORAGE_CORRUPT",
            AqiError::Persistence(_) => "PERSISTENCE_ERROR",
            AqiError::NotFound(_) => "WARD_NOT_FOUND",
            AqiError::AmbiguousWard(_) => "AMBIGUOUS_WARD",
            AqiError::InvalidReading(_) => "INVALID_READING",
            AqiError::Catalog(_) => "CATALOG_ERROR",
        }
    }
}

/// Maps any command failure onto a stable JSON error code.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<AqiError>()
        .map(AqiError::code)
        .unwrap_or("INTERNAL")
}
