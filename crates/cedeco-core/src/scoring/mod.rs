//! Additive potential rubric: five 0/1 indicators per site, summed into a tier.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::percent;
use crate::model::{columns, Record, RecordSet};
use crate::parsing::values::is_affirmative;

/// Totals at or above this are `Tier::High`.
pub const HIGH_THRESHOLD: u8 = 4;
/// Totals at or above this (and below `HIGH_THRESHOLD`) are `Tier::Medium`.
pub const MEDIUM_THRESHOLD: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Infrastructure,
    Articulation,
    Participation,
    Technology,
    Interest,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Infrastructure,
        Dimension::Articulation,
        Dimension::Participation,
        Dimension::Technology,
        Dimension::Interest,
    ];

    /// Column the indicator reads.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Infrastructure => columns::WORKSHOP_SPACE,
            Dimension::Articulation => columns::ARTICULATION,
            Dimension::Participation => columns::PARTICIPATION,
            Dimension::Technology => columns::TIC_USAGE,
            Dimension::Interest => columns::INTEREST,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Infrastructure => "Infraestructura",
            Dimension::Articulation => "Articulación",
            Dimension::Participation => "Participación",
            Dimension::Technology => "Tecnología",
            Dimension::Interest => "Interés",
        }
    }

    /// Score one record on this dimension.
    pub fn evaluate(self, record: &Record) -> IndicatorScore {
        let column = self.column();
        let value = record.get(column);

        let (score, note) = match self {
            // Any recorded TIC answer counts.
            Dimension::Technology => match value {
                Some(v) => (1, format!("{column} recorded ({v})")),
                None => (0, format!("{column} not recorded")),
            },
            _ => match value {
                _ if is_affirmative(value) => (1, format!("{column} is SI")),
                Some(v) => (0, format!("{column} is {v}")),
                None => (0, format!("{column} not recorded")),
            },
        };

        IndicatorScore {
            dimension: self,
            score,
            note,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    /// Display order of the distribution.
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    pub fn from_total(total: u8) -> Self {
        if total >= HIGH_THRESHOLD {
            Tier::High
        } else if total >= MEDIUM_THRESHOLD {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::High => "Alto",
            Tier::Medium => "Medio",
            Tier::Low => "Bajo",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorScore {
    pub dimension: Dimension,
    /// 0 or 1.
    pub score: u8,
    pub note: String,
}

/// A site with its indicator breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: Option<String>,
    pub site: String,
    pub comuna: Option<String>,
    /// One entry per dimension, in `Dimension::ALL` order.
    pub indicators: Vec<IndicatorScore>,
    pub total: u8,
    pub tier: Tier,
}

impl ScoredRecord {
    pub fn indicator(&self, dimension: Dimension) -> u8 {
        self.indicators
            .iter()
            .find(|i| i.dimension == dimension)
            .map(|i| i.score)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCount {
    pub tier: Tier,
    pub count: usize,
    pub share: Decimal,
}

/// Scored sites in input order plus the tier distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PotentialMatrix {
    pub records: Vec<ScoredRecord>,
    /// High, Medium, Low. Empty when there are no records.
    pub distribution: Vec<TierCount>,
    /// Percent of sites in the High tier.
    pub high_percent: Decimal,
}

impl PotentialMatrix {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, tier: Tier) -> usize {
        self.distribution
            .iter()
            .find(|t| t.tier == tier)
            .map(|t| t.count)
            .unwrap_or(0)
    }
}

pub fn score_record(record: &Record) -> ScoredRecord {
    let indicators: Vec<IndicatorScore> =
        Dimension::ALL.iter().map(|d| d.evaluate(record)).collect();
    let total = indicators.iter().map(|i| i.score).sum();

    ScoredRecord {
        id: record.id().map(str::to_string),
        site: record.site_name().to_string(),
        comuna: record.get(columns::COMUNA).map(str::to_string),
        indicators,
        total,
        tier: Tier::from_total(total),
    }
}

pub fn score_records(records: &RecordSet) -> PotentialMatrix {
    if records.is_empty() {
        return PotentialMatrix::default();
    }

    let scored: Vec<ScoredRecord> = records.iter().map(score_record).collect();
    let n = scored.len();
    let distribution: Vec<TierCount> = Tier::ALL
        .iter()
        .map(|&tier| {
            let count = scored.iter().filter(|r| r.tier == tier).count();
            TierCount {
                tier,
                count,
                share: percent(count, n),
            }
        })
        .collect();
    let high_percent = distribution[0].share;

    tracing::debug!(
        sites = n,
        high = distribution[0].count,
        medium = distribution[1].count,
        low = distribution[2].count,
        "scored potential"
    );

    PotentialMatrix {
        records: scored,
        distribution,
        high_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn site(pairs: &[(&str, &str)]) -> Record {
        Record::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::from_total(5), Tier::High);
        assert_eq!(Tier::from_total(4), Tier::High);
        assert_eq!(Tier::from_total(3), Tier::Medium);
        assert_eq!(Tier::from_total(2), Tier::Medium);
        assert_eq!(Tier::from_total(1), Tier::Low);
        assert_eq!(Tier::from_total(0), Tier::Low);
    }

    #[test]
    fn test_full_marks() {
        let record = site(&[
            (columns::SITE_NAME, "Comedor Uno"),
            (columns::WORKSHOP_SPACE, "SI"),
            (columns::ARTICULATION, "SI"),
            (columns::PARTICIPATION, "SÍ"),
            (columns::TIC_USAGE, "REDES SOCIALES"),
            (columns::INTEREST, "si"),
        ]);
        let scored = score_record(&record);
        assert_eq!(scored.total, 5);
        assert_eq!(scored.tier, Tier::High);
        assert_eq!(scored.site, "Comedor Uno");
    }

    #[test]
    fn test_missing_fields_score_zero() {
        let scored = score_record(&site(&[(columns::SITE_NAME, "Vacío")]));
        assert_eq!(scored.total, 0);
        assert_eq!(scored.tier, Tier::Low);
        assert!(scored.indicators.iter().all(|i| i.note.ends_with("not recorded")));
    }

    #[test]
    fn test_technology_counts_any_answer() {
        let record = site(&[(columns::TIC_USAGE, "NO")]);
        assert_eq!(score_record(&record).indicator(Dimension::Technology), 1);
    }

    #[test]
    fn test_negative_answer_scores_zero_with_note() {
        let scored = score_record(&site(&[(columns::WORKSHOP_SPACE, "NO")]));
        let infra = &scored.indicators[0];
        assert_eq!(infra.dimension, Dimension::Infrastructure);
        assert_eq!(infra.score, 0);
        assert_eq!(infra.note, "ESPACIO_TALLERES is NO");
    }

    #[test]
    fn test_matrix_distribution() {
        let records = RecordSet::from_records(vec![
            site(&[
                (columns::WORKSHOP_SPACE, "SI"),
                (columns::ARTICULATION, "SI"),
                (columns::PARTICIPATION, "SI"),
                (columns::INTEREST, "SI"),
            ]),
            site(&[(columns::WORKSHOP_SPACE, "SI"), (columns::INTEREST, "SI")]),
            site(&[(columns::INTEREST, "SI")]),
            site(&[]),
        ]);
        let matrix = score_records(&records);
        assert_eq!(matrix.records.len(), 4);
        assert_eq!(matrix.count(Tier::High), 1);
        assert_eq!(matrix.count(Tier::Medium), 1);
        assert_eq!(matrix.count(Tier::Low), 2);
        assert_eq!(matrix.high_percent, dec!(25));
        let tiers: Vec<Tier> = matrix.distribution.iter().map(|t| t.tier).collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }

    #[test]
    fn test_empty_record_set_gives_empty_matrix() {
        let matrix = score_records(&RecordSet::default());
        assert!(matrix.is_empty());
        assert!(matrix.distribution.is_empty());
        assert_eq!(matrix.high_percent, Decimal::ZERO);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let record = site(&[(columns::ARTICULATION, "SI"), (columns::TIC_USAGE, "X")]);
        assert_eq!(score_record(&record), score_record(&record));
    }
}
