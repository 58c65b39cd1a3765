use super::{affirmative_metric, classified_section, yes_no_section, ViewKind, ViewReport, YES};
use crate::model::{columns, RecordSet};
use crate::rules::RuleCatalog;
use crate::ReportOptions;

pub(super) const ARTICULATION: &str = "Comedores con articulación organizacional";

pub(super) fn build(records: &RecordSet, catalog: &RuleCatalog, _options: &ReportOptions) -> ViewReport {
    let mut report = ViewReport::new(ViewKind::Infrastructure);

    let space = classified_section(
        records,
        catalog,
        "tipo_espacio",
        columns::SPACE_TYPE,
        "Tipo de espacio",
    );
    if !space.insufficient_data {
        report.highlights.push(format!(
            "El {}% de los comedores funciona en viviendas de los gestores y el {}% en instituciones o fundaciones.",
            space.share_of("Vivienda Gestores"),
            space.share_of("Institución/Fundación")
        ));
    }
    report.tables.push(space);

    let workshops = yes_no_section(
        records,
        catalog,
        columns::WORKSHOP_SPACE,
        "Espacio para talleres",
    );
    if workshops.counts.get(YES).is_some() {
        report.highlights.push(format!(
            "El {}% de los comedores cuenta con espacio para talleres.",
            workshops.share_of(YES)
        ));
    }
    report.tables.push(workshops);

    let articulation = affirmative_metric(records, columns::ARTICULATION, ARTICULATION);
    if articulation.total > 0 {
        report.highlights.push(format!(
            "{} de {} comedores ({}%) se articulan con otras organizaciones.",
            articulation.count, articulation.total, articulation.percent
        ));
    }
    report.metrics.push(articulation);
    report.tables.push(yes_no_section(
        records,
        catalog,
        columns::ARTICULATION,
        "Articulación con organizaciones",
    ));

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_space_types_from_letter_codes() {
        let records = RecordSet::from_records(vec![
            Record::from_pairs([(columns::SPACE_TYPE, "A. VIVIENDA DE UNA DE LAS/OS GESTORAS/ES")]),
            Record::from_pairs([(columns::SPACE_TYPE, "C. INSTITUCIÓN (FUNDACIÓN, IGLESIA, ETC.)")]),
            Record::from_pairs([(columns::SPACE_TYPE, "A. VIVIENDA DE UNA DE LAS/OS GESTORAS/ES")]),
            Record::new(),
        ]);
        let catalog = RuleCatalog::builtin().unwrap();
        let report = build(&records, &catalog, &ReportOptions::default());

        let space = report.table("Tipo de espacio").unwrap();
        assert_eq!(space.counts.get("Vivienda Gestores"), Some(2));
        assert_eq!(space.counts.get("Institución/Fundación"), Some(1));
        assert_eq!(space.counts.get("No especificado"), Some(1));
        assert_eq!(
            report.highlights[0],
            "El 50% de los comedores funciona en viviendas de los gestores y el 25% en instituciones o fundaciones."
        );
    }
}
