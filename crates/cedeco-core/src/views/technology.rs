use super::{classified_section, present_metric, TableSection, ViewKind, ViewReport};
use crate::model::{columns, RecordSet};
use crate::rules::RuleCatalog;
use crate::ReportOptions;

pub(super) const USES_TIC: &str = "Comedores que utilizan TICs";
pub(super) const USES_NETWORKS: &str = "Comedores que utilizan redes sociales";

pub(super) fn build(records: &RecordSet, catalog: &RuleCatalog, _options: &ReportOptions) -> ViewReport {
    let mut report = ViewReport::new(ViewKind::Technology);

    report
        .metrics
        .push(present_metric(records, columns::TIC_USAGE, USES_TIC));
    report
        .metrics
        .push(present_metric(records, columns::SOCIAL_NETWORKS, USES_NETWORKS));

    let sections = [
        ("tecnologia", columns::TIC_USAGE, "Tipos de TIC utilizadas"),
        ("redes_sociales", columns::SOCIAL_NETWORKS, "Redes sociales utilizadas"),
        ("herramientas_office", columns::OFFICE_TOOLS, "Herramientas ofimáticas"),
        ("estrategias_comunicacion", columns::STRATEGIES, "Estrategias de comunicación"),
    ];
    for (table, column, title) in sections {
        let section = classified_section(records, catalog, table, column, title).ranked();
        if let Some(highlight) = leader(&section) {
            report.highlights.push(highlight);
        }
        report.tables.push(section);
    }

    report.push_narrative(records, columns::TECHNOLOGY_NOTES, "Observaciones sobre tecnología");

    report
}

fn leader(section: &TableSection) -> Option<String> {
    let top = section.counts.rows.first()?;
    Some(format!(
        "{}: predomina {} ({} menciones).",
        section.title, top.display, top.count
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RecordSource, SampleSource};
    use rust_decimal_macros::dec;

    #[test]
    fn test_sample_technology() {
        let records = SampleSource.load().unwrap();
        let catalog = RuleCatalog::builtin().unwrap();
        let report = build(&records, &catalog, &ReportOptions::default());

        let tic = report.metric(USES_TIC).unwrap();
        assert_eq!((tic.count, tic.total), (4, 5));
        assert_eq!(tic.percent, dec!(80));
        assert_eq!(report.metric(USES_NETWORKS).unwrap().count, 3);

        let types = report.table("Tipos de TIC utilizadas").unwrap();
        assert_eq!(types.counts.get("REDES SOCIALES"), Some(4));
        assert_eq!(types.counts.get("CORREO ELECTRÓNICO"), Some(1));

        let networks = report.table("Redes sociales utilizadas").unwrap();
        assert_eq!(networks.counts.rows[0].label, "Facebook");
        assert_eq!(networks.counts.get("WhatsApp"), Some(2));

        let office = report.table("Herramientas ofimáticas").unwrap();
        assert!(office.insufficient_data);
    }
}
