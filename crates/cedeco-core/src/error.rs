use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CedecoError {
    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("worksheet '{sheet}' not found. Available sheets: {available}")]
    SheetNotFound { sheet: String, available: String },

    #[error("source '{0}' contains no records")]
    EmptySource(String),

    #[error("unsupported input format '{0}'. Expected .csv, .json or .xlsx")]
    UnsupportedInput(String),

    #[error("failed to load rule table from {path}: {reason}")]
    RulesetLoad { path: PathBuf, reason: String },

    #[error("invalid rule table: {0}")]
    RulesetInvalid(String),

    #[error("unknown rule table '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("unknown view '{name}'. Available: {available}")]
    UnknownView { name: String, available: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
