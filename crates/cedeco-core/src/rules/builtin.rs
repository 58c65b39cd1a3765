use crate::error::CedecoError;
use crate::rules::schema::RuleTableDef;
use crate::rules::validate_ruleset;

const ETNIA_JSON: &str = include_str!("../../../../rules/etnia.json");
const ETAPA_VITAL_JSON: &str = include_str!("../../../../rules/etapa_vital.json");
const GRUPOS_VULNERABLES_JSON: &str = include_str!("../../../../rules/grupos_vulnerables.json");
const FINANCIACION_JSON: &str = include_str!("../../../../rules/financiacion.json");
const TECNOLOGIA_JSON: &str = include_str!("../../../../rules/tecnologia.json");
const REDES_SOCIALES_JSON: &str = include_str!("../../../../rules/redes_sociales.json");
const HERRAMIENTAS_OFFICE_JSON: &str = include_str!("../../../../rules/herramientas_office.json");
const ESTRATEGIAS_JSON: &str = include_str!("../../../../rules/estrategias_comunicacion.json");
const NECESIDADES_JSON: &str = include_str!("../../../../rules/necesidades.json");
const RECURSO_HUMANO_JSON: &str = include_str!("../../../../rules/recurso_humano.json");
const TIPO_ESPACIO_JSON: &str = include_str!("../../../../rules/tipo_espacio.json");
const SI_NO_JSON: &str = include_str!("../../../../rules/si_no.json");
const FRECUENCIA_JSON: &str = include_str!("../../../../rules/frecuencia.json");
const TELEFONO_JSON: &str = include_str!("../../../../rules/telefono.json");
const RESPUESTA_JSON: &str = include_str!("../../../../rules/respuesta.json");

/// Keys of the built-in rule tables.
pub const PRESETS: &[&str] = &[
    "etnia",
    "etapa_vital",
    "grupos_vulnerables",
    "financiacion",
    "tecnologia",
    "redes_sociales",
    "herramientas_office",
    "estrategias_comunicacion",
    "necesidades",
    "recurso_humano",
    "tipo_espacio",
    "si_no",
    "frecuencia",
    "telefono",
    "respuesta",
];

/// Load a built-in rule table by key.
pub fn load_preset(key: &str) -> Result<RuleTableDef, CedecoError> {
    let json = match key {
        "etnia" => ETNIA_JSON,
        "etapa_vital" => ETAPA_VITAL_JSON,
        "grupos_vulnerables" => GRUPOS_VULNERABLES_JSON,
        "financiacion" => FINANCIACION_JSON,
        "tecnologia" => TECNOLOGIA_JSON,
        "redes_sociales" => REDES_SOCIALES_JSON,
        "herramientas_office" => HERRAMIENTAS_OFFICE_JSON,
        "estrategias_comunicacion" => ESTRATEGIAS_JSON,
        "necesidades" => NECESIDADES_JSON,
        "recurso_humano" => RECURSO_HUMANO_JSON,
        "tipo_espacio" => TIPO_ESPACIO_JSON,
        "si_no" => SI_NO_JSON,
        "frecuencia" => FRECUENCIA_JSON,
        "telefono" => TELEFONO_JSON,
        "respuesta" => RESPUESTA_JSON,
        _ => {
            return Err(CedecoError::UnknownPreset {
                name: key.to_string(),
                available: PRESETS.join(", "),
            })
        }
    };
    let table: RuleTableDef = serde_json::from_str(json)?;
    validate_ruleset(&table)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::schema::{Fallback, MatchMode};

    #[test]
    fn test_all_presets_load_and_keys_match() {
        for key in PRESETS {
            let table = load_preset(key).unwrap();
            assert_eq!(table.key, *key);
        }
    }

    #[test]
    fn test_life_stage_is_multi_label() {
        let table = load_preset("etapa_vital").unwrap();
        assert_eq!(table.mode, MatchMode::AllMatches);
        assert_eq!(table.order.len(), 5);
    }

    #[test]
    fn test_financing_passes_tokens_through() {
        let table = load_preset("financiacion").unwrap();
        assert_eq!(table.fallback, Fallback::Token);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            load_preset("xyz"),
            Err(CedecoError::UnknownPreset { .. })
        ));
    }
}
