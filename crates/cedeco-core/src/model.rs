use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column names used by the built-in views and the potential scorer.
pub mod columns {
    pub const ID: &str = "ID";
    pub const VISIT_DATE: &str = "FECHA";
    pub const SITE_NAME: &str = "NOMBRE_COMEDOR";
    pub const MANAGER: &str = "NOMBER_GESTORA";
    pub const PHONE: &str = "TELEFONO1";
    pub const COMUNA: &str = "COMUNA";
    pub const PROFESSIONAL: &str = "PREFESIONAL_REALIZA_VISITA";
    pub const SPACE_TYPE: &str = "LUGAR_DONDE_FUNCIONA_COMEDOR";
    pub const WORKSHOP_SPACE: &str = "ESPACIO_TALLERES";
    pub const ARTICULATION: &str = "ARTICULACION_CON_ORGANIZACIONES";
    pub const HISTORY: &str = "HISTORIA_COMEDOR";
    pub const PARTICIPATION: &str = "PARTICIPACION_ACTIVIDADES";
    pub const HISTORY_NOTES: &str = "Observaciones1";
    pub const PARTICIPATION_NOTES: &str = "Observaciones2";
    pub const TECHNOLOGY_NOTES: &str = "Observaciones3";
    pub const TIC_USAGE: &str = "USO_DE_TIC";
    pub const SOCIAL_NETWORKS: &str = "QUE_REDES";
    pub const OFFICE_TOOLS: &str = "PAQUETES_OFFICE";
    pub const STRATEGIES: &str = "QUE_ESTRATEGIAS_USA";
    pub const FINANCING: &str = "FINANCIACION_ACTIVIDADES";
    pub const OTHER_FINANCING: &str = "QUE_OTRA_FINANCIACION";
    pub const DIFFICULTIES: &str = "HA_TENIDO_DIFICULTADES";
    pub const DIFFICULTY_DETAILS: &str = "QUE_DIFICULTADES";
    pub const POPULATION: &str = "POBLACION_PRINCIPAL_COMEDOR";
    pub const LIFE_STAGE: &str = "ETAPA_VITAL";
    pub const VULNERABLE_GROUPS: &str = "GRUPOS_EN_SITUACION_DE_VULNERABILIDAD";
    pub const BENEFICIARIES_SOCIAL_WORK: &str = "BENEFICIARIOS_SON_MISMOS_QUE_REALIZA_LABORA_SOCIAL";
    pub const ACTIONS: &str = "ACCIONES_PUNTUALES_COMEDOR";
    pub const LINKAGE: &str = "VINCULACION_OTROS_ACTORES";
    pub const FOLLOW_UP: &str = "SEGUIMIENTO_EVALUACION_A_OTRAS_ACTIVIDADES";
    pub const GARDENS: &str = "INICIATIVA_HUERTAS";
    pub const GARDEN_MANAGEMENT: &str = "GESTION_HC";
    pub const INTEREST: &str = "INTERESADO_COMO_CENTRO_DESARROLLO";
    pub const NEEDS: &str = "NECESIDADES_QUE_SE_APOYARAN";
    pub const OTHER_NEEDS: &str = "OTRA_NECESIDAD";
    pub const HUMAN_RESOURCES: &str = "RECURSO_HUMANO_CON_EL_QUE_CUENTA";
    pub const ALLIANCE_NOTES: &str = "OBSERVACIONES_ALIANZAS_ESTRATEGICAS";
    pub const FINANCING_NOTES: &str = "OBSERVACIONES_AREA_FINANCIAMIENTO";
    pub const TRAINING_NOTES: &str = "OBSERVACIONES_CAPACITACION_INTEGRAL";
    pub const VISIBILITY_NOTES: &str = "OBSERVACIONES_VISIBILIDAD_RECONOCIMIENTO";
    pub const PLANNING_NOTES: &str = "OBSERVACIONES_PROCESOS_PLANIFICACIONES";
    pub const GENERAL_NOTES: &str = "OBSERVACIONES";

    /// Suffix marking per-activity frequency columns (e.g. `TALLERES_FRECUENCIA`).
    pub const FREQUENCY_SUFFIX: &str = "_FRECUENCIA";
}

/// One surveyed site: field name to value.
///
/// Blank values are never stored, so a missing column and an empty answer
/// read the same through [`Record::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(field, value)` pairs, skipping blank values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut record = Self::new();
        for (field, value) in pairs {
            record.set(field, value.as_ref());
        }
        record
    }

    /// Set a field. Blank values remove the field instead.
    pub fn set(&mut self, field: impl Into<String>, value: &str) {
        let field = field.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, trimmed.to_string());
        }
    }

    /// The trimmed value of `field`, or `None` when the field is missing or blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn id(&self) -> Option<&str> {
        self.get(columns::ID)
    }

    /// Site name, falling back to the record id.
    pub fn site_name(&self) -> &str {
        self.get(columns::SITE_NAME)
            .or_else(|| self.id())
            .unwrap_or("(sin nombre)")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The rows of one survey export together with its column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Column names in the order they first appeared in the source.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Build a set from records alone, deriving columns from first appearance.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for (field, _) in record.fields() {
                if !columns.iter().any(|c| c == field) {
                    columns.push(field.to_string());
                }
            }
        }
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Values of `field` across records, skipping absent ones.
    pub fn values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.records.iter().filter_map(move |r| r.get(field))
    }

    /// Number of records with a present value for `field`.
    pub fn count_present(&self, field: &str) -> usize {
        self.values(field).count()
    }

    /// Number of distinct present values for `field`.
    pub fn distinct(&self, field: &str) -> usize {
        let mut seen: Vec<&str> = Vec::new();
        for value in self.values(field) {
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen.len()
    }

    /// Columns whose name contains `needle`, in source order.
    pub fn columns_containing<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.columns
            .iter()
            .filter(move |c| c.contains(needle))
            .map(|c| c.as_str())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_read_as_absent() {
        let record = Record::from_pairs([("A", "  "), ("B", " SI ")]);
        assert_eq!(record.get("A"), None);
        assert_eq!(record.get("B"), Some("SI"));
        assert_eq!(record.get("MISSING"), None);
    }

    #[test]
    fn test_set_blank_removes_field() {
        let mut record = Record::from_pairs([("A", "x")]);
        record.set("A", "");
        assert!(!record.has("A"));
        assert!(record.is_empty());
    }

    #[test]
    fn test_site_name_falls_back_to_id() {
        let record = Record::from_pairs([(columns::ID, "abc")]);
        assert_eq!(record.site_name(), "abc");
    }

    #[test]
    fn test_from_records_keeps_first_seen_column_order() {
        let set = RecordSet::from_records(vec![
            Record::from_pairs([("Z", "1")]),
            Record::from_pairs([("A", "1"), ("Z", "2")]),
        ]);
        assert_eq!(set.columns, vec!["Z", "A"]);
    }

    #[test]
    fn test_distinct_ignores_absent() {
        let set = RecordSet::from_records(vec![
            Record::from_pairs([("C", "19")]),
            Record::from_pairs([("C", "19")]),
            Record::from_pairs([("C", "")]),
            Record::from_pairs([("C", "15")]),
        ]);
        assert_eq!(set.distinct("C"), 2);
        assert_eq!(set.count_present("C"), 3);
    }
}
