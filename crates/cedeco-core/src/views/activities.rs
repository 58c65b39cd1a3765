use super::{raw_section, yes_no_section, PivotSection, TableSection, ViewKind, ViewReport, YES};
use crate::aggregate::{count_labels, pivot};
use crate::classify::Classifier;
use crate::model::{columns, RecordSet};
use crate::parsing::lettered::display_key;
use crate::parsing::values::activity_name;
use crate::parsing::{tokenize, SplitPolicy};
use crate::rules::RuleCatalog;
use crate::ReportOptions;

pub(super) const ACTIONS: &str = "Acciones puntuales de los comedores";
pub(super) const FREQUENCY: &str = "Frecuencia de actividades";
pub(super) const FOLLOW_UP: &str = "Seguimiento y evaluación de actividades";
pub(super) const GARDENS: &str = "Iniciativas de huertas";

pub(super) fn build(records: &RecordSet, catalog: &RuleCatalog, options: &ReportOptions) -> ViewReport {
    let mut report = ViewReport::new(ViewKind::Activities);

    let actions = actions_section(records, options);
    let top: Vec<String> = actions
        .counts
        .clone()
        .top(options.top_n)
        .rows
        .into_iter()
        .map(|r| r.label)
        .collect();
    if !top.is_empty() {
        report
            .highlights
            .push(format!("Acciones más comunes: {}.", top.join("; ")));
    }
    report.tables.push(actions);

    report.pivots.push(frequency_pivot(records, catalog));

    report.tables.push(
        raw_section(
            records,
            columns::LINKAGE,
            "Vinculación con otros actores",
        )
        .ranked(),
    );

    let follow_up = yes_no_section(records, catalog, columns::FOLLOW_UP, FOLLOW_UP);
    if follow_up.counts.get(YES).is_some() {
        report.highlights.push(format!(
            "El {}% de los comedores realiza seguimiento y evaluación de sus actividades.",
            follow_up.share_of(YES)
        ));
    }
    report.tables.push(follow_up);

    let gardens = yes_no_section(records, catalog, columns::GARDENS, GARDENS);
    if gardens.counts.get(YES).is_some() {
        report.highlights.push(format!(
            "El {}% de los comedores ha implementado iniciativas de huertas.",
            gardens.share_of(YES)
        ));
    }
    report.tables.push(gardens);

    report.push_narrative(records, columns::GARDEN_MANAGEMENT, "Gestión de las huertas");

    report
}

/// Lettered actions grouped by full text, listed by letter, shortened for display.
fn actions_section(records: &RecordSet, options: &ReportOptions) -> TableSection {
    let items: Vec<String> = records
        .iter()
        .flat_map(|r| tokenize(r.get(columns::ACTIONS), SplitPolicy::LetteredList))
        .collect();
    let width = options.label_width;
    let counts = count_labels(items)
        .by_label()
        .map_display(|label| display_key(label, width));
    TableSection::new(ACTIONS, counts).from_column(columns::ACTIONS)
}

/// Activity by frequency, one row per `*_FRECUENCIA` column with answers.
fn frequency_pivot(records: &RecordSet, catalog: &RuleCatalog) -> PivotSection {
    let table = catalog.get("frecuencia");
    if table.is_none() {
        tracing::warn!(table = "frecuencia", "rule table not in catalog, using raw answers");
    }
    let classifier = table.map(Classifier::new);

    let mut pairs: Vec<(String, String)> = Vec::new();
    for column in records.columns_containing(columns::FREQUENCY_SUFFIX) {
        let Some(activity) = activity_name(column) else {
            continue;
        };
        for record in records {
            let labels: Vec<String> = match &classifier {
                Some(c) => c
                    .classify_record(record, column)
                    .into_iter()
                    .map(|t| t.label)
                    .collect(),
                None => record.get(column).map(str::to_string).into_iter().collect(),
            };
            pairs.extend(labels.into_iter().map(|label| (activity.clone(), label)));
        }
    }

    let order = table.map(|t| t.order.as_slice()).unwrap_or_default();
    PivotSection::new(FREQUENCY, pivot(pairs, &[], order))
}
