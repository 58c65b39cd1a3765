pub mod aggregate;
pub mod classify;
pub mod error;
pub mod model;
pub mod parsing;
pub mod rules;
pub mod scoring;
pub mod source;
pub mod views;

use serde::{Deserialize, Serialize};

use error::CedecoError;
use parsing::lettered::DISPLAY_WIDTH;
use rules::RuleCatalog;
use source::RecordSource;
use views::{ViewKind, ViewReport};

/// Presentation settings passed to every view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// How many entries "most common" highlights list.
    pub top_n: usize,
    /// Display width for long labels such as lettered actions.
    pub label_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: 3,
            label_width: DISPLAY_WIDTH,
        }
    }
}

/// A set of view reports over one loaded record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub source: String,
    pub used_sample: bool,
    pub record_count: usize,
    pub views: Vec<ViewReport>,
}

/// Main API entry point: load records and run the requested views.
///
/// With `strict`, a failing or empty source is an error; otherwise the
/// bundled sample dataset stands in for it.
pub fn generate_report(
    source: &dyn RecordSource,
    catalog: &RuleCatalog,
    views: &[ViewKind],
    options: &ReportOptions,
    strict: bool,
) -> Result<Report, CedecoError> {
    let loaded = if strict {
        source::load_strict(source)?
    } else {
        source::load_or_sample(source)?
    };

    let reports = views::build_report(views, &loaded.records, catalog, options);

    Ok(Report {
        source: loaded.source,
        used_sample: loaded.used_sample,
        record_count: loaded.records.len(),
        views: reports,
    })
}
