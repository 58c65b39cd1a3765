use chrono::NaiveDate;

use super::{classified_section, raw_section, Metric, TableSection, ViewKind, ViewReport};
use crate::aggregate::CountTable;
use crate::model::{columns, RecordSet};
use crate::parsing::values::parse_visit_date;
use crate::rules::RuleCatalog;
use crate::ReportOptions;

pub(super) const SITES: &str = "Total comedores evaluados";
pub(super) const COMUNAS: &str = "Comunas representadas";
pub(super) const MANAGERS: &str = "Gestoras únicas";
pub(super) const NO_PHONE: &str = "Sin teléfono";

pub(super) fn build(records: &RecordSet, catalog: &RuleCatalog, _options: &ReportOptions) -> ViewReport {
    let mut report = ViewReport::new(ViewKind::BasicInfo);

    report.metrics.push(Metric::count(SITES, records.len()));
    report
        .metrics
        .push(Metric::count(COMUNAS, records.distinct(columns::COMUNA)));
    report
        .metrics
        .push(Metric::count(MANAGERS, records.distinct(columns::MANAGER)));

    report
        .tables
        .push(raw_section(records, columns::COMUNA, "Comedores por comuna"));

    let professionals = raw_section(records, columns::PROFESSIONAL, "Visitas por profesional");
    if let Some(top) = professionals.counts.most_common() {
        if top.count > 1 {
            report.highlights.push(format!(
                "{} ha realizado el {}% de las visitas.",
                top.label, top.share
            ));
        }
    }
    report.tables.push(professionals);

    let phones = classified_section(
        records,
        catalog,
        "telefono",
        columns::PHONE,
        "Disponibilidad de teléfono",
    );
    if !phones.insufficient_data {
        report.highlights.push(format!(
            "El {}% de los registros no tiene número de teléfono disponible.",
            phones.share_of(NO_PHONE)
        ));
    }
    report.tables.push(phones);

    report.tables.push(visits_by_date(records));

    report
}

/// Visits per date, oldest first. Unparseable dates are left out.
fn visits_by_date(records: &RecordSet) -> TableSection {
    let mut dated: Vec<(NaiveDate, String)> = Vec::new();
    for value in records.values(columns::VISIT_DATE) {
        match parse_visit_date(value) {
            Some(date) => dated.push((date, date.format("%d/%m/%Y").to_string())),
            None => tracing::debug!(value, "skipping unparseable visit date"),
        }
    }
    dated.sort_by_key(|(date, _)| *date);

    let counts: CountTable = crate::aggregate::count_labels(dated.iter().map(|(_, label)| label));
    TableSection::new("Visitas por fecha", counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn visit(date: &str, comuna: &str, professional: &str) -> Record {
        Record::from_pairs([
            (columns::VISIT_DATE, date),
            (columns::COMUNA, comuna),
            (columns::PROFESSIONAL, professional),
        ])
    }

    #[test]
    fn test_visits_sorted_chronologically() {
        let records = RecordSet::from_records(vec![
            visit("13/05/2025", "19", "A"),
            visit("12/05/2025", "15", "B"),
            visit("no sé", "15", "B"),
            visit("01/04/2025", "9", "B"),
        ]);
        let section = visits_by_date(&records);
        let labels: Vec<&str> = section.counts.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["01/04/2025", "12/05/2025", "13/05/2025"]);
    }

    #[test]
    fn test_metrics_and_professional_highlight() {
        let records = RecordSet::from_records(vec![
            visit("13/05/2025", "19", "NELMY"),
            visit("12/05/2025", "15", "NELMY"),
            visit("12/05/2025", "15", "OCTAVIO"),
        ]);
        let catalog = RuleCatalog::builtin().unwrap();
        let report = build(&records, &catalog, &ReportOptions::default());
        assert_eq!(report.metric(SITES).unwrap().count, 3);
        assert_eq!(report.metric(COMUNAS).unwrap().count, 2);
        assert!(report.highlights[0].starts_with("NELMY ha realizado el 67%"));
        assert_eq!(report.highlights[1], "El 100% de los registros no tiene número de teléfono disponible.");
    }
}
