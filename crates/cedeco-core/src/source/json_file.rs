use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::CedecoError;
use crate::model::{Record, RecordSet};
use crate::source::RecordSource;

/// A JSON array of flat objects, one per site.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
    name: String,
}

impl JsonSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl RecordSource for JsonSource {
    fn load(&self) -> Result<RecordSet, CedecoError> {
        let content = std::fs::read_to_string(&self.path)?;
        parse_json_records(&content)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Parse an array of objects. Scalars become strings; `null` is absent.
pub fn parse_json_records(json: &str) -> Result<RecordSet, CedecoError> {
    let rows: Vec<serde_json::Map<String, Value>> = serde_json::from_str(json)?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let mut record = Record::new();
        for (field, value) in row {
            if !columns.contains(&field) {
                columns.push(field.clone());
            }
            if let Some(text) = value_as_string(&value) {
                record.set(field, &text);
            }
        }
        records.push(record);
    }

    Ok(RecordSet::new(columns, records))
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "SI" } else { "NO" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_records() {
        let json = r#"[
            { "ID": "x1", "COMUNA": 19, "ESPACIO_TALLERES": true, "TELEFONO1": null },
            { "ID": "x2", "NOMBRE_COMEDOR": "  ", "QUE_REDES": "FACEBOOK" }
        ]"#;
        let set = parse_json_records(json).unwrap();
        assert_eq!(
            set.columns,
            vec!["ID", "COMUNA", "ESPACIO_TALLERES", "TELEFONO1", "NOMBRE_COMEDOR", "QUE_REDES"]
        );
        assert_eq!(set.records[0].get("COMUNA"), Some("19"));
        assert_eq!(set.records[0].get("ESPACIO_TALLERES"), Some("SI"));
        assert!(!set.records[0].has("TELEFONO1"));
        assert_eq!(set.records[1].site_name(), "x2");
    }

    #[test]
    fn test_non_array_is_rejected() {
        assert!(matches!(
            parse_json_records(r#"{ "ID": "x1" }"#),
            Err(CedecoError::Json(_))
        ));
    }
}
