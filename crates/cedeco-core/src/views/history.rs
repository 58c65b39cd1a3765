use super::{yes_no_section, TableSection, ViewKind, ViewReport, YES};
use crate::aggregate::count_labels;
use crate::model::{columns, RecordSet};
use crate::parsing::values::extract_years;
use crate::rules::RuleCatalog;
use crate::ReportOptions;

pub(super) const YEARS: &str = "Años mencionados en las historias";

pub(super) fn build(records: &RecordSet, catalog: &RuleCatalog, _options: &ReportOptions) -> ViewReport {
    let mut report = ViewReport::new(ViewKind::History);

    let history = yes_no_section(
        records,
        catalog,
        columns::HISTORY,
        "Comedores con historia documentada",
    );
    if history.counts.get(YES).is_some() {
        report.highlights.push(format!(
            "El {}% de los comedores tiene historia documentada.",
            history.share_of(YES)
        ));
    }
    report.tables.push(history);

    let participation = yes_no_section(
        records,
        catalog,
        columns::PARTICIPATION,
        "Comedores con participación en actividades",
    );
    if participation.counts.get(YES).is_some() {
        report.highlights.push(format!(
            "El {}% de los comedores participa en actividades comunitarias.",
            participation.share_of(YES)
        ));
    }
    report.tables.push(participation);

    let years = years_section(records);
    if let (Some(first), Some(last)) = (years.counts.rows.first(), years.counts.rows.last()) {
        report.highlights.push(format!(
            "Las historias abarcan desde {} hasta {}.",
            first.label, last.label
        ));
    }
    report.tables.push(years);

    report.push_narrative(records, columns::HISTORY_NOTES, "Historias de los comedores");
    report.push_narrative(records, columns::PARTICIPATION_NOTES, "Participación en actividades");

    report
}

/// Years mentioned in the history notes, ascending.
fn years_section(records: &RecordSet) -> TableSection {
    let years: Vec<String> = records
        .values(columns::HISTORY_NOTES)
        .flat_map(extract_years)
        .map(|y| y.to_string())
        .collect();
    TableSection::new(YEARS, count_labels(years).by_label()).from_column(columns::HISTORY_NOTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RecordSource, SampleSource};

    #[test]
    fn test_sample_history() {
        let records = SampleSource.load().unwrap();
        let catalog = RuleCatalog::builtin().unwrap();
        let report = build(&records, &catalog, &ReportOptions::default());

        let years = report.table(YEARS).unwrap();
        let labels: Vec<&str> = years.counts.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["1996", "2007"]);
        assert!(report
            .highlights
            .contains(&"Las historias abarcan desde 1996 hasta 2007.".to_string()));

        let notes = report.narrative(columns::HISTORY_NOTES).unwrap();
        assert_eq!(notes.entries.len(), 4);
        let participation = report.narrative(columns::PARTICIPATION_NOTES).unwrap();
        assert_eq!(participation.entries.len(), 5);
    }

    #[test]
    fn test_no_years_is_insufficient() {
        let section = years_section(&RecordSet::default());
        assert!(section.insufficient_data);
    }
}
