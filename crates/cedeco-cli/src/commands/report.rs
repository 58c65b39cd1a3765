use cedeco_core::error::CedecoError;
use cedeco_core::rules::RuleCatalog;
use cedeco_core::source::source_for_path;
use cedeco_core::views::ViewKind;
use cedeco_core::ReportOptions;
use std::path::PathBuf;

use crate::output;

pub struct ReportArgs {
    pub input_file: PathBuf,
    pub views: Vec<String>,
    pub rule_files: Vec<PathBuf>,
    pub output_format: String,
    pub strict: bool,
    pub sheet: Option<String>,
    pub top_n: usize,
}

pub fn run(args: ReportArgs) -> Result<(), CedecoError> {
    // No --view means every view, in the usual report order.
    let views: Vec<ViewKind> = if args.views.is_empty() {
        ViewKind::ALL.to_vec()
    } else {
        args.views
            .iter()
            .map(|v| v.parse::<ViewKind>())
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut catalog = RuleCatalog::builtin()?;
    catalog.extend_from_files(&args.rule_files)?;
    tracing::debug!(tables = catalog.len(), "rule catalog ready");

    let source = source_for_path(&args.input_file, args.sheet.as_deref())?;
    let options = ReportOptions {
        top_n: args.top_n,
        ..ReportOptions::default()
    };

    let report = cedeco_core::generate_report(source.as_ref(), &catalog, &views, &options, args.strict)?;

    match args.output_format.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report),
    }

    Ok(())
}
