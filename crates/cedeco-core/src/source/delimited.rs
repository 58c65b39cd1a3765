use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::CedecoError;
use crate::model::{Record, RecordSet};
use crate::source::RecordSource;

/// A comma-separated export with a header row.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    name: String,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl RecordSource for CsvSource {
    fn load(&self) -> Result<RecordSet, CedecoError> {
        let file = std::fs::File::open(&self.path)?;
        parse_csv(file)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Read CSV with headers into a record set. Short rows leave trailing fields absent.
pub fn parse_csv<R: Read>(reader: R) -> Result<RecordSet, CedecoError> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let record = Record::from_pairs(
            headers
                .iter()
                .cloned()
                .zip(row.iter())
                .filter(|(h, _)| !h.is_empty()),
        );
        records.push(record);
    }

    let columns = headers.into_iter().filter(|h| !h.is_empty()).collect();
    Ok(RecordSet::new(columns, records))
}
