use super::{classified_section, yes_no_section, ViewKind, ViewReport, YES};
use crate::aggregate::percent;
use crate::model::{columns, RecordSet};
use crate::rules::RuleCatalog;
use crate::ReportOptions;

pub(super) const SOURCES: &str = "Fuentes de financiación";
pub(super) const DIFFICULTIES: &str = "Dificultades en la financiación";

pub(super) fn build(records: &RecordSet, catalog: &RuleCatalog, _options: &ReportOptions) -> ViewReport {
    let mut report = ViewReport::new(ViewKind::Financing);

    let sources =
        classified_section(records, catalog, "financiacion", columns::FINANCING, SOURCES).ranked();
    if let Some(top) = sources.counts.rows.first() {
        report.highlights.push(format!(
            "La fuente de financiación más mencionada es {} ({} comedores).",
            top.display, top.count
        ));
    }
    report.tables.push(sources);

    let difficulties = yes_no_section(records, catalog, columns::DIFFICULTIES, DIFFICULTIES);
    let yes = difficulties.counts.get(YES).unwrap_or(0);
    let no = difficulties.counts.get("No").unwrap_or(0);
    if yes + no > 0 {
        report.highlights.push(format!(
            "El {}% de los comedores que respondieron no reporta dificultades significativas.",
            percent(no, yes + no)
        ));
    }
    report.tables.push(difficulties);

    report.push_narrative(records, columns::OTHER_FINANCING, "Otras fuentes de financiación");
    report.push_narrative(records, columns::DIFFICULTY_DETAILS, "Dificultades reportadas");
    report.push_narrative(records, columns::FINANCING_NOTES, "Necesidades de financiamiento");

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RecordSource, SampleSource};

    #[test]
    fn test_sample_financing() {
        let records = SampleSource.load().unwrap();
        let catalog = RuleCatalog::builtin().unwrap();
        let report = build(&records, &catalog, &ReportOptions::default());

        let sources = report.table(SOURCES).unwrap();
        let rows: Vec<(&str, usize)> = sources
            .counts
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.count))
            .collect();
        assert_eq!(
            rows,
            vec![("RECURSOS PROPIOS", 4), ("DONACIONES", 3), ("OTRA", 1)]
        );

        let difficulties = report.table(DIFFICULTIES).unwrap();
        assert_eq!(difficulties.counts.get("No"), Some(3));
        assert_eq!(difficulties.counts.get("Sin datos"), Some(2));
        assert!(report.highlights.contains(
            &"El 100% de los comedores que respondieron no reporta dificultades significativas."
                .to_string()
        ));

        let notes = report.narrative(columns::FINANCING_NOTES).unwrap();
        assert_eq!(notes.entries.len(), 2);
    }
}
