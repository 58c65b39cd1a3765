use crate::error::CedecoError;
use crate::model::RecordSet;
use crate::source::json_file::parse_json_records;
use crate::source::RecordSource;

const SAMPLE_JSON: &str = include_str!("../../../../data/sample-visits.json");

/// The bundled five-site sample dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl RecordSource for SampleSource {
    fn load(&self) -> Result<RecordSet, CedecoError> {
        parse_json_records(SAMPLE_JSON)
    }

    fn source_name(&self) -> &str {
        "sample"
    }
}
