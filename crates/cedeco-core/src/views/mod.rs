//! Report views: each one a thin configuration over classify, aggregate and score.

mod activities;
mod basic_info;
mod development;
mod financing;
mod history;
mod infrastructure;
mod population;
mod technology;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{count_labels, percent, CountTable, PivotTable};
use crate::classify::classify;
use crate::error::CedecoError;
use crate::model::RecordSet;
use crate::rules::RuleCatalog;
use crate::scoring::PotentialMatrix;
use crate::ReportOptions;

pub const INSUFFICIENT_DATA: &str = "No hay datos suficientes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    BasicInfo,
    Infrastructure,
    History,
    Technology,
    Financing,
    Population,
    Activities,
    Development,
}

impl ViewKind {
    pub const ALL: [ViewKind; 8] = [
        ViewKind::BasicInfo,
        ViewKind::Infrastructure,
        ViewKind::History,
        ViewKind::Technology,
        ViewKind::Financing,
        ViewKind::Population,
        ViewKind::Activities,
        ViewKind::Development,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ViewKind::BasicInfo => "basic_info",
            ViewKind::Infrastructure => "infrastructure",
            ViewKind::History => "history",
            ViewKind::Technology => "technology",
            ViewKind::Financing => "financing",
            ViewKind::Population => "population",
            ViewKind::Activities => "activities",
            ViewKind::Development => "development",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::BasicInfo => "Información Básica",
            ViewKind::Infrastructure => "Infraestructura y Funcionamiento",
            ViewKind::History => "Historia y Participación",
            ViewKind::Technology => "Uso de Tecnología y Comunicación",
            ViewKind::Financing => "Financiación y Dificultades",
            ViewKind::Population => "Población Atendida",
            ViewKind::Activities => "Actividades Realizadas",
            ViewKind::Development => "Potencial como Centro de Desarrollo",
        }
    }

    pub fn run(self, records: &RecordSet, catalog: &RuleCatalog, options: &ReportOptions) -> ViewReport {
        let report = match self {
            ViewKind::BasicInfo => basic_info::build(records, catalog, options),
            ViewKind::Infrastructure => infrastructure::build(records, catalog, options),
            ViewKind::History => history::build(records, catalog, options),
            ViewKind::Technology => technology::build(records, catalog, options),
            ViewKind::Financing => financing::build(records, catalog, options),
            ViewKind::Population => population::build(records, catalog, options),
            ViewKind::Activities => activities::build(records, catalog, options),
            ViewKind::Development => development::build(records, catalog, options),
        };
        tracing::debug!(
            view = self.key(),
            tables = report.tables.len(),
            empty_tables = report.tables.iter().filter(|t| t.insufficient_data).count(),
            "built view"
        );
        report
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ViewKind {
    type Err = CedecoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ViewKind::ALL
            .into_iter()
            .find(|v| v.key() == wanted)
            .ok_or_else(|| CedecoError::UnknownView {
                name: s.to_string(),
                available: ViewKind::ALL.map(|v| v.key()).join(", "),
            })
    }
}

/// Run each view in order.
pub fn build_report(
    views: &[ViewKind],
    records: &RecordSet,
    catalog: &RuleCatalog,
    options: &ReportOptions,
) -> Vec<ViewReport> {
    views.iter().map(|v| v.run(records, catalog, options)).collect()
}

/// "x of n sites" figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub count: usize,
    pub total: usize,
    pub percent: Decimal,
}

impl Metric {
    pub fn new(label: impl Into<String>, count: usize, total: usize) -> Self {
        Self {
            label: label.into(),
            count,
            total,
            percent: percent(count, total),
        }
    }

    /// A plain count with no denominator.
    pub fn count(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
            total: count,
            percent: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSection {
    pub title: String,
    /// Rule table used, if any.
    pub table: Option<String>,
    pub column: Option<String>,
    pub counts: CountTable,
    pub insufficient_data: bool,
    pub message: Option<String>,
}

impl TableSection {
    pub fn new(title: impl Into<String>, counts: CountTable) -> Self {
        let insufficient_data = counts.is_empty();
        Self {
            title: title.into(),
            table: None,
            column: None,
            counts,
            insufficient_data,
            message: insufficient_data.then(|| INSUFFICIENT_DATA.to_string()),
        }
    }

    fn from_column(mut self, column: &str) -> Self {
        self.column = Some(column.to_string());
        self
    }

    fn with_table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Most frequent labels first.
    fn ranked(mut self) -> Self {
        self.counts = self.counts.by_count_desc();
        self
    }

    /// Share of `label` in this section, zero when absent.
    pub fn share_of(&self, label: &str) -> Decimal {
        self.counts
            .rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.share)
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotSection {
    pub title: String,
    pub pivot: PivotTable,
    pub insufficient_data: bool,
    pub message: Option<String>,
}

impl PivotSection {
    pub fn new(title: impl Into<String>, pivot: PivotTable) -> Self {
        let insufficient_data = pivot.is_empty();
        Self {
            title: title.into(),
            pivot,
            insufficient_data,
            message: insufficient_data.then(|| INSUFFICIENT_DATA.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeEntry {
    pub site: String,
    pub text: String,
}

/// Free-text answers of one column, listed per site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub title: String,
    pub column: String,
    pub entries: Vec<NarrativeEntry>,
}

impl Narrative {
    pub fn collect(records: &RecordSet, column: &str, title: impl Into<String>) -> Self {
        let entries = records
            .iter()
            .filter_map(|r| {
                r.get(column).map(|text| NarrativeEntry {
                    site: r.site_name().to_string(),
                    text: text.to_string(),
                })
            })
            .collect();
        Self {
            title: title.into(),
            column: column.to_string(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewReport {
    pub key: ViewKind,
    pub title: String,
    pub metrics: Vec<Metric>,
    pub tables: Vec<TableSection>,
    pub pivots: Vec<PivotSection>,
    pub narratives: Vec<Narrative>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential: Option<PotentialMatrix>,
    pub highlights: Vec<String>,
}

impl ViewReport {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            key: kind,
            title: kind.title().to_string(),
            metrics: Vec::new(),
            tables: Vec::new(),
            pivots: Vec::new(),
            narratives: Vec::new(),
            potential: None,
            highlights: Vec::new(),
        }
    }

    pub fn table(&self, title: &str) -> Option<&TableSection> {
        self.tables.iter().find(|t| t.title == title)
    }

    pub fn metric(&self, label: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.label == label)
    }

    pub fn narrative(&self, column: &str) -> Option<&Narrative> {
        self.narratives.iter().find(|n| n.column == column)
    }

    /// Add a narrative only when some site answered.
    fn push_narrative(&mut self, records: &RecordSet, column: &str, title: &str) {
        let narrative = Narrative::collect(records, column, title);
        if !narrative.is_empty() {
            self.narratives.push(narrative);
        }
    }
}

/// Classify `column` with the catalog table `table_key` and count the labels
/// in the table's display order.
///
/// A table missing from the catalog yields an insufficient-data section.
pub(crate) fn classified_section(
    records: &RecordSet,
    catalog: &RuleCatalog,
    table_key: &str,
    column: &str,
    title: &str,
) -> TableSection {
    let Some(table) = catalog.get(table_key) else {
        tracing::warn!(table = table_key, column, "rule table not in catalog");
        return TableSection::new(title, CountTable::default())
            .from_column(column)
            .with_table(table_key);
    };

    let counts = classify(records, column, table)
        .counts()
        .in_display_order(&table.order);
    TableSection::new(title, counts)
        .from_column(column)
        .with_table(table_key)
}

/// Count raw answers of `column` as recorded.
pub(crate) fn raw_section(records: &RecordSet, column: &str, title: &str) -> TableSection {
    TableSection::new(title, count_labels(records.values(column))).from_column(column)
}

/// Yes/no distribution of `column`, absent answers counted as "Sin datos".
pub(crate) fn yes_no_section(
    records: &RecordSet,
    catalog: &RuleCatalog,
    column: &str,
    title: &str,
) -> TableSection {
    classified_section(records, catalog, "si_no", column, title)
}

/// Label used by the yes/no table for affirmative answers.
pub(crate) const YES: &str = "Sí";

/// Records with a present value for `column`.
pub(crate) fn present_metric(records: &RecordSet, column: &str, label: &str) -> Metric {
    Metric::new(label, records.count_present(column), records.len())
}

/// Records whose `column` is the affirmative sentinel.
pub(crate) fn affirmative_metric(records: &RecordSet, column: &str, label: &str) -> Metric {
    let count = records
        .iter()
        .filter(|r| crate::parsing::values::is_affirmative(r.get(column)))
        .count();
    Metric::new(label, count, records.len())
}
