use cedeco_core::aggregate::PivotTable;
use cedeco_core::model::{columns, RecordSet};
use cedeco_core::scoring::{Dimension, PotentialMatrix};
use cedeco_core::views::{Narrative, PivotSection, TableSection, ViewReport};
use cedeco_core::Report;

pub fn print_report(report: &Report) {
    print_source(&report.source, report.used_sample, report.record_count);

    for (i, view) in report.views.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_view(view);
    }
}

pub fn print_source(source: &str, used_sample: bool, record_count: usize) {
    if used_sample {
        println!("Source: {} (sample data, input could not be used)", source);
    } else {
        println!("Source: {}", source);
    }
    println!("Records: {}\n", record_count);
}

fn print_view(view: &ViewReport) {
    println!("=== {} ===\n", view.title);

    if !view.metrics.is_empty() {
        let max_label = max_width(view.metrics.iter().map(|m| m.label.as_str()));
        for m in &view.metrics {
            if m.total == m.count && m.percent.is_zero() {
                println!("  {:<w$}  {}", m.label, m.count, w = max_label);
            } else {
                println!(
                    "  {:<w$}  {} / {} ({}%)",
                    m.label,
                    m.count,
                    m.total,
                    m.percent,
                    w = max_label
                );
            }
        }
        println!();
    }

    for table in &view.tables {
        print_table(table);
    }

    for section in &view.pivots {
        print_pivot(section);
    }

    if let Some(ref matrix) = view.potential {
        print_potential(matrix);
    }

    if !view.highlights.is_empty() {
        println!("  Highlights:");
        for h in &view.highlights {
            println!("    - {}", h);
        }
        println!();
    }

    for narrative in &view.narratives {
        print_narrative(narrative);
    }
}

fn print_table(section: &TableSection) {
    println!("  {}", section.title);

    if section.insufficient_data {
        println!("    {}\n", section.message.as_deref().unwrap_or_default());
        return;
    }

    let max_label = max_width(section.counts.rows.iter().map(|r| r.display.as_str()));
    for row in &section.counts.rows {
        println!(
            "    {:<w$}  {:>4}  {:>4}%",
            row.display,
            row.count,
            row.share,
            w = max_label
        );
    }
    println!("    {:<w$}  {:>4}", "Total", section.counts.total, w = max_label);
    println!();
}

fn print_pivot(section: &PivotSection) {
    println!("  {}", section.title);

    if section.insufficient_data {
        println!("    {}\n", section.message.as_deref().unwrap_or_default());
        return;
    }

    print_grid(&section.pivot);
    println!();
}

fn print_grid(grid: &PivotTable) {
    let row_width = max_width(grid.rows.iter().map(String::as_str));
    let col_widths: Vec<usize> = grid
        .columns
        .iter()
        .map(|c| c.chars().count().max(4))
        .collect();

    print!("    {:<w$}", "", w = row_width);
    for (col, width) in grid.columns.iter().zip(&col_widths) {
        print!("  {:>width$}", col, width = *width);
    }
    println!("  {:>5}", "Total");

    for (row, cells) in grid.rows.iter().zip(&grid.cells) {
        print!("    {:<w$}", row, w = row_width);
        for (count, width) in cells.iter().zip(&col_widths) {
            print!("  {:>width$}", count, width = *width);
        }
        println!("  {:>5}", grid.row_total(row));
    }
}

pub fn print_potential(matrix: &PotentialMatrix) {
    println!("  Matriz de potencial CEDECO");

    if matrix.is_empty() {
        println!("    No hay datos suficientes\n");
        return;
    }

    let site_width = max_width(matrix.records.iter().map(|r| r.site.as_str()));
    print!("    {:<w$}", "Comedor", w = site_width);
    for d in Dimension::ALL {
        print!("  {}", abbreviation(d));
    }
    println!("  Total  Nivel");

    for r in &matrix.records {
        print!("    {:<w$}", r.site, w = site_width);
        for d in Dimension::ALL {
            print!("  {:>3}", r.indicator(d));
        }
        println!("  {:>5}  {}", r.total, r.tier);
    }
    println!();

    for t in &matrix.distribution {
        println!("    {:<6} {:>4}  {:>4}%", t.tier.label(), t.count, t.share);
    }
    println!();

    println!("    Leyenda:");
    for d in Dimension::ALL {
        println!("      {}  {}", abbreviation(d), d.label());
    }
    println!();
}

fn abbreviation(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Infrastructure => "INF",
        Dimension::Articulation => "ART",
        Dimension::Participation => "PAR",
        Dimension::Technology => "TIC",
        Dimension::Interest => "INT",
    }
}

fn print_narrative(narrative: &Narrative) {
    println!("  {}", narrative.title);
    for entry in &narrative.entries {
        println!("    {}: {}", entry.site, entry.text);
    }
    println!();
}

/// Each site's answered fields, in column order.
pub fn print_records(records: &RecordSet) {
    println!("Sample dataset: {} records, {} columns\n", records.len(), records.columns.len());

    let max_name = max_width(records.columns.iter().map(String::as_str));
    for record in records {
        println!(
            "--- {} ({}) ---",
            record.site_name(),
            record.get(columns::COMUNA).unwrap_or("-")
        );
        for column in &records.columns {
            if let Some(value) = record.get(column) {
                println!("  {:<w$}  {}", column, value, w = max_name);
            }
        }
        println!();
    }
}

fn max_width<'a>(items: impl Iterator<Item = &'a str>) -> usize {
    items.map(|s| s.chars().count()).max().unwrap_or(10)
}
