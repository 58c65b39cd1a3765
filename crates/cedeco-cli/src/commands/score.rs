use cedeco_core::error::CedecoError;
use cedeco_core::scoring::score_records;
use cedeco_core::source::{self, source_for_path};
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    strict: bool,
    sheet: Option<&str>,
) -> Result<(), CedecoError> {
    let source = source_for_path(&input_file, sheet)?;
    let loaded = if strict {
        source::load_strict(source.as_ref())?
    } else {
        source::load_or_sample(source.as_ref())?
    };

    let matrix = score_records(&loaded.records);

    match output_format {
        "json" => output::json::print(&matrix)?,
        _ => {
            output::table::print_source(&loaded.source, loaded.used_sample, loaded.records.len());
            output::table::print_potential(&matrix);
        }
    }

    Ok(())
}
