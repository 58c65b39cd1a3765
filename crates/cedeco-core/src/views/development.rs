use super::{affirmative_metric, classified_section, yes_no_section, ViewKind, ViewReport};
use crate::model::{columns, RecordSet};
use crate::rules::RuleCatalog;
use crate::scoring::score_records;
use crate::ReportOptions;

pub(super) const INTERESTED: &str = "Comedores interesados en ser CEDECO";
pub(super) const NEEDS: &str = "Necesidades para la transformación";
pub(super) const HUMAN_RESOURCES: &str = "Recurso humano disponible";

const OBSERVATIONS: [(&str, &str); 6] = [
    (columns::ALLIANCE_NOTES, "Alianzas estratégicas"),
    (columns::FINANCING_NOTES, "Área de financiamiento"),
    (columns::TRAINING_NOTES, "Capacitación integral"),
    (columns::VISIBILITY_NOTES, "Visibilidad y reconocimiento"),
    (columns::PLANNING_NOTES, "Procesos de planificación"),
    (columns::GENERAL_NOTES, "Observaciones generales"),
];

pub(super) fn build(records: &RecordSet, catalog: &RuleCatalog, options: &ReportOptions) -> ViewReport {
    let mut report = ViewReport::new(ViewKind::Development);

    let interest = affirmative_metric(records, columns::INTEREST, INTERESTED);
    if interest.total > 0 {
        report.highlights.push(format!(
            "El {}% de los comedores está interesado en convertirse en Centro de Desarrollo Comunitario.",
            interest.percent
        ));
    }
    report.metrics.push(interest);
    report.tables.push(yes_no_section(
        records,
        catalog,
        columns::INTEREST,
        "Interés como centro de desarrollo",
    ));

    let needs = classified_section(records, catalog, "necesidades", columns::NEEDS, NEEDS).ranked();
    let top: Vec<&str> = needs
        .counts
        .rows
        .iter()
        .take(options.top_n)
        .map(|r| r.display.as_str())
        .collect();
    if !top.is_empty() {
        report
            .highlights
            .push(format!("Necesidades principales: {}.", top.join(", ")));
    }
    report.tables.push(needs);
    report.push_narrative(records, columns::OTHER_NEEDS, "Otras necesidades");

    report.tables.push(
        classified_section(
            records,
            catalog,
            "recurso_humano",
            columns::HUMAN_RESOURCES,
            HUMAN_RESOURCES,
        )
        .ranked(),
    );

    for (column, title) in OBSERVATIONS {
        report.push_narrative(records, column, title);
    }

    let matrix = score_records(records);
    if !matrix.is_empty() {
        report.highlights.push(format!(
            "El {}% de los comedores evaluados muestra un alto potencial para convertirse en CEDECO.",
            matrix.high_percent
        ));
    }
    report.potential = Some(matrix);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Tier;
    use crate::source::{RecordSource, SampleSource};

    #[test]
    fn test_sample_development() {
        let records = SampleSource.load().unwrap();
        let catalog = RuleCatalog::builtin().unwrap();
        let report = build(&records, &catalog, &ReportOptions::default());

        assert_eq!(report.metric(INTERESTED).unwrap().count, 5);

        let needs: Vec<(&str, usize)> = report
            .table(NEEDS)
            .unwrap()
            .counts
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.count))
            .collect();
        assert_eq!(
            needs,
            vec![
                ("Gestión de alianzas estratégicas", 2),
                ("Área de financiamiento", 2),
                ("Capacitación y formación integral", 2),
                ("Otras necesidades", 1),
            ]
        );

        let resources = report.table(HUMAN_RESOURCES).unwrap();
        assert_eq!(resources.counts.get("Red social (amigos, vecinos)"), Some(2));
        assert_eq!(resources.counts.get("Voluntariado"), Some(2));

        let matrix = report.potential.as_ref().unwrap();
        assert_eq!(matrix.records.len(), 5);
        assert_eq!(matrix.count(Tier::High), 5);
        assert_eq!(
            report.highlights.last().unwrap(),
            "El 100% de los comedores evaluados muestra un alto potencial para convertirse en CEDECO."
        );

        assert_eq!(report.narrative(columns::GENERAL_NOTES).unwrap().entries.len(), 3);
        assert!(report.narrative(columns::OTHER_NEEDS).is_none());
    }
}
