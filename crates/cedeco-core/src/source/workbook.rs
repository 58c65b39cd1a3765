use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx};

use crate::error::CedecoError;
use crate::model::{Record, RecordSet};
use crate::source::RecordSource;

/// Worksheet the survey form exports to.
pub const DEFAULT_SHEET: &str = "CEDECO";

/// One worksheet of an `.xlsx` workbook; the first row holds the column names.
#[derive(Debug, Clone)]
pub struct XlsxSource {
    path: PathBuf,
    sheet: String,
    name: String,
}

impl XlsxSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self {
            path,
            sheet: DEFAULT_SHEET.to_string(),
            name,
        }
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = sheet.into();
        self
    }
}

impl RecordSource for XlsxSource {
    fn load(&self) -> Result<RecordSet, CedecoError> {
        let bytes = std::fs::read(&self.path)?;
        parse_xlsx(&bytes, &self.sheet)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Read one worksheet of an xlsx file into a record set.
pub fn parse_xlsx(bytes: &[u8], sheet: &str) -> Result<RecordSet, CedecoError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| CedecoError::Workbook(format!("failed to open xlsx: {e}")))?;

    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet) {
        return Err(CedecoError::SheetNotFound {
            sheet: sheet.to_string(),
            available: names.join(", "),
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| CedecoError::Workbook(format!("failed to read sheet '{sheet}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row
            .iter()
            .map(|c| cell_as_string(c).unwrap_or_default())
            .collect(),
        None => return Ok(RecordSet::default()),
    };

    let mut records = Vec::new();
    for row in rows {
        let record = Record::from_pairs(
            headers
                .iter()
                .zip(row)
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, cell)| (h.clone(), cell_as_string(cell).unwrap_or_default())),
        );
        // Trailing blank rows in the sheet's used range.
        if !record.is_empty() {
            records.push(record);
        }
    }

    let columns = headers.into_iter().filter(|h| !h.is_empty()).collect();
    Ok(RecordSet::new(columns, records))
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(if *b { "SI" } else { "NO" }.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .or_else(|| Some(dt.to_string())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Empty | Data::Error(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_as_string(&Data::String("  SI ".into())), Some("SI".into()));
        assert_eq!(cell_as_string(&Data::String("   ".into())), None);
        assert_eq!(cell_as_string(&Data::Float(19.0)), Some("19".into()));
        assert_eq!(cell_as_string(&Data::Int(65)), Some("65".into()));
        assert_eq!(cell_as_string(&Data::Bool(true)), Some("SI".into()));
        assert_eq!(cell_as_string(&Data::Empty), None);
    }

    #[test]
    fn test_garbage_bytes_are_a_workbook_error() {
        assert!(matches!(
            parse_xlsx(b"not a zip archive", DEFAULT_SHEET),
            Err(CedecoError::Workbook(_))
        ));
    }
}
