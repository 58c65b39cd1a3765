use super::{classified_section, yes_no_section, ViewKind, ViewReport, YES};
use crate::model::{columns, RecordSet};
use crate::rules::RuleCatalog;
use crate::ReportOptions;

pub(super) const ETHNICITY: &str = "Grupo étnico principal";
pub(super) const LIFE_STAGE: &str = "Etapa vital atendida";
pub(super) const VULNERABLE: &str = "Grupos en situación de vulnerabilidad";
pub(super) const BENEFICIARIES: &str = "Beneficiarios que realizan labor social";

const AFRO: &str = "Afrodescendiente";
const OLDER_ADULTS: &str = "Personas mayores (60+ años)";

pub(super) fn build(records: &RecordSet, catalog: &RuleCatalog, _options: &ReportOptions) -> ViewReport {
    let mut report = ViewReport::new(ViewKind::Population);

    let ethnicity = classified_section(records, catalog, "etnia", columns::POPULATION, ETHNICITY);
    if !ethnicity.insufficient_data {
        report.highlights.push(format!(
            "El {}% de los comedores atiende principalmente a población afrodescendiente.",
            ethnicity.share_of(AFRO)
        ));
    }
    report.tables.push(ethnicity);

    let stages = classified_section(records, catalog, "etapa_vital", columns::LIFE_STAGE, LIFE_STAGE);
    if let Some(top) = stages.counts.most_common() {
        if top.label == OLDER_ADULTS {
            report.highlights.push(format!(
                "Las personas mayores (60+ años) representan el {}% de la población atendida.",
                top.share
            ));
        }
    }
    report.tables.push(stages);

    report.tables.push(
        classified_section(
            records,
            catalog,
            "grupos_vulnerables",
            columns::VULNERABLE_GROUPS,
            VULNERABLE,
        )
        .ranked(),
    );

    let beneficiaries = yes_no_section(
        records,
        catalog,
        columns::BENEFICIARIES_SOCIAL_WORK,
        BENEFICIARIES,
    );
    if beneficiaries.counts.get(YES).is_some() {
        report.highlights.push(format!(
            "El {}% de los comedores reporta que los beneficiarios realizan labor social.",
            beneficiaries.share_of(YES)
        ));
    }
    report.tables.push(beneficiaries);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::source::{RecordSource, SampleSource};

    fn labels<'a>(report: &'a ViewReport, title: &str) -> Vec<&'a str> {
        report
            .table(title)
            .unwrap()
            .counts
            .rows
            .iter()
            .map(|r| r.label.as_str())
            .collect()
    }

    #[test]
    fn test_sample_population() {
        let records = SampleSource.load().unwrap();
        let catalog = RuleCatalog::builtin().unwrap();
        let report = build(&records, &catalog, &ReportOptions::default());

        let ethnicity = report.table(ETHNICITY).unwrap();
        assert_eq!(ethnicity.counts.get(AFRO), Some(2));
        assert_eq!(ethnicity.counts.total, 5);
        assert_eq!(
            report.highlights[0],
            "El 40% de los comedores atiende principalmente a población afrodescendiente."
        );

        assert_eq!(
            labels(&report, LIFE_STAGE),
            vec![
                "Infancia (6-11 años)",
                "Adolescentes (12-18 años)",
                "Adultos (29-59 años)",
                "Personas mayores (60+ años)"
            ]
        );
        assert_eq!(report.table(LIFE_STAGE).unwrap().counts.get(OLDER_ADULTS), Some(2));
    }

    #[test]
    fn test_vulnerable_groups_ranked() {
        let records = RecordSet::from_records(vec![
            Record::from_pairs([(columns::VULNERABLE_GROUPS, "MIGRANTES, HABITANTES DE CALLE")]),
            Record::from_pairs([(columns::VULNERABLE_GROUPS, "HABITANTES DE CALLE, RAROS")]),
        ]);
        let catalog = RuleCatalog::builtin().unwrap();
        let report = build(&records, &catalog, &ReportOptions::default());
        assert_eq!(
            labels(&report, VULNERABLE),
            vec!["Habitantes de calle", "Migrantes", "Otros grupos vulnerables"]
        );
    }
}
