//! Loading survey exports into a [`RecordSet`].

pub mod delimited;
pub mod json_file;
pub mod sample;
pub mod workbook;

use std::path::Path;

use crate::error::CedecoError;
use crate::model::RecordSet;

pub use delimited::CsvSource;
pub use json_file::JsonSource;
pub use sample::SampleSource;
pub use workbook::{XlsxSource, DEFAULT_SHEET};

/// Trait for record loading backends.
pub trait RecordSource {
    fn load(&self) -> Result<RecordSet, CedecoError>;

    /// Name of this source (for diagnostics).
    fn source_name(&self) -> &str;
}

/// Pick a source by file extension. `sheet` applies to workbooks only.
pub fn source_for_path(
    path: &Path,
    sheet: Option<&str>,
) -> Result<Box<dyn RecordSource>, CedecoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvSource::new(path))),
        "json" => Ok(Box::new(JsonSource::new(path))),
        "xlsx" | "xlsm" => {
            let source = XlsxSource::new(path);
            Ok(Box::new(match sheet {
                Some(name) => source.with_sheet(name),
                None => source,
            }))
        }
        _ => Err(CedecoError::UnsupportedInput(path.display().to_string())),
    }
}

/// Records together with where they came from.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub records: RecordSet,
    pub source: String,
    /// True when the bundled sample replaced the requested source.
    pub used_sample: bool,
}

/// Load a source, failing if it yields no records.
pub fn load_strict(source: &dyn RecordSource) -> Result<Loaded, CedecoError> {
    let records = source.load()?;
    if records.is_empty() {
        return Err(CedecoError::EmptySource(source.source_name().to_string()));
    }
    tracing::info!(
        source = source.source_name(),
        records = records.len(),
        columns = records.columns.len(),
        "loaded records"
    );
    Ok(Loaded {
        records,
        source: source.source_name().to_string(),
        used_sample: false,
    })
}

/// Load a source, substituting the bundled sample when it fails or is empty.
pub fn load_or_sample(source: &dyn RecordSource) -> Result<Loaded, CedecoError> {
    match load_strict(source) {
        Ok(loaded) => Ok(loaded),
        Err(e) => {
            tracing::warn!(
                source = source.source_name(),
                error = %e,
                "falling back to sample data"
            );
            let sample = SampleSource;
            Ok(Loaded {
                records: sample.load()?,
                source: sample.source_name().to_string(),
                used_sample: true,
            })
        }
    }
}
