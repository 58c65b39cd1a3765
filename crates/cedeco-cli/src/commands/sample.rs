use cedeco_core::error::CedecoError;
use cedeco_core::source::{RecordSource, SampleSource};

use crate::output;

pub fn run(output_format: &str) -> Result<(), CedecoError> {
    let records = SampleSource.load()?;

    match output_format {
        "json" => output::json::print(&records.records)?,
        _ => output::table::print_records(&records),
    }

    Ok(())
}
