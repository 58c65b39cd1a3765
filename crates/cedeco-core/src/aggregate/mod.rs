//! Counting and cross-tabulation of classified labels.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// `count` as a whole-number percentage of `total`, rounding half to even.
///
/// A zero total yields zero.
pub fn percent(count: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(count) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// One label and how often it occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountRow {
    pub label: String,
    /// Label as shown to the reader (may be truncated).
    pub display: String,
    pub count: usize,
    /// Percent of the table total.
    pub share: Decimal,
}

/// Label counts. Rows never carry a zero count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountTable {
    pub rows: Vec<CountRow>,
    /// Sum of all counts, including rows dropped by `top`.
    pub total: usize,
}

/// Count identical labels, keeping first-seen order.
pub fn count_labels<I, S>(labels: I) -> CountTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in labels {
        let label = label.as_ref();
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }

    let total = counts.iter().map(|(_, n)| n).sum();
    let rows = counts
        .into_iter()
        .map(|(label, count)| CountRow {
            display: label.clone(),
            label,
            count,
            share: percent(count, total),
        })
        .collect();

    CountTable { rows, total }
}

impl CountTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.count)
    }

    /// Labels listed in `order` first, in that order; the rest keep their position.
    pub fn in_display_order(mut self, order: &[String]) -> Self {
        if order.is_empty() {
            return self;
        }
        self.rows.sort_by_key(|r| {
            order
                .iter()
                .position(|o| *o == r.label)
                .unwrap_or(order.len())
        });
        self
    }

    /// Descending by count. Ties keep their current order.
    pub fn by_count_desc(mut self) -> Self {
        self.rows.sort_by(|a, b| b.count.cmp(&a.count));
        self
    }

    /// Ascending by label.
    pub fn by_label(mut self) -> Self {
        self.rows.sort_by(|a, b| a.label.cmp(&b.label));
        self
    }

    /// The `n` most frequent labels. The total still covers every label.
    pub fn top(self, n: usize) -> Self {
        let mut ranked = self.by_count_desc();
        ranked.rows.truncate(n);
        ranked
    }

    /// The most frequent row, first-seen on ties.
    pub fn most_common(&self) -> Option<&CountRow> {
        self.rows
            .iter()
            .fold(None, |best: Option<&CountRow>, r| match best {
                Some(b) if b.count >= r.count => Some(b),
                _ => Some(r),
            })
    }

    /// Rewrite display labels, leaving grouping labels untouched.
    pub fn map_display(mut self, f: impl Fn(&str) -> String) -> Self {
        for row in &mut self.rows {
            row.display = f(&row.label);
        }
        self
    }
}

/// Dense two-dimensional count grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `cells[r][c]` counts pairs of `rows[r]` and `columns[c]`.
    pub cells: Vec<Vec<usize>>,
}

/// Cross-tabulate `(row, column)` pairs over the observed labels.
///
/// Labels named in an order hint come first in hint order; unknown labels
/// follow in first-seen order. Unobserved combinations are zero.
pub fn pivot<I, R, C>(pairs: I, row_order: &[String], column_order: &[String]) -> PivotTable
where
    I: IntoIterator<Item = (R, C)>,
    R: AsRef<str>,
    C: AsRef<str>,
{
    let pairs: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(r, c)| (r.as_ref().to_string(), c.as_ref().to_string()))
        .collect();

    let rows = ordered_labels(pairs.iter().map(|(r, _)| r.as_str()), row_order);
    let columns = ordered_labels(pairs.iter().map(|(_, c)| c.as_str()), column_order);

    let mut cells = vec![vec![0; columns.len()]; rows.len()];
    for (r, c) in &pairs {
        let ri = rows.iter().position(|x| x == r);
        let ci = columns.iter().position(|x| x == c);
        if let (Some(ri), Some(ci)) = (ri, ci) {
            cells[ri][ci] += 1;
        }
    }

    PivotTable {
        rows,
        columns,
        cells,
    }
}

fn ordered_labels<'a>(seen: impl Iterator<Item = &'a str>, hints: &[String]) -> Vec<String> {
    let mut observed: Vec<&str> = Vec::new();
    for label in seen {
        if !observed.contains(&label) {
            observed.push(label);
        }
    }

    let mut out: Vec<String> = hints
        .iter()
        .filter(|h| observed.contains(&h.as_str()))
        .cloned()
        .collect();
    for label in observed {
        if !hints.iter().any(|h| h == label) {
            out.push(label.to_string());
        }
    }
    out
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: &str, column: &str) -> usize {
        let ri = self.rows.iter().position(|r| r == row);
        let ci = self.columns.iter().position(|c| c == column);
        match (ri, ci) {
            (Some(ri), Some(ci)) => self.cells[ri][ci],
            _ => 0,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    pub fn zero_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|&&n| n == 0).count()
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    pub fn row_total(&self, row: &str) -> usize {
        self.rows
            .iter()
            .position(|r| r == row)
            .map(|ri| self.cells[ri].iter().sum())
            .unwrap_or(0)
    }
}
