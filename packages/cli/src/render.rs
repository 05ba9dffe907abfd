//! Plain-text rendering of report tables.

use std::fmt::Write as _;

use housing_registry_report_models::{ReportProjection, ReportTable};

fn line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn render_table(out: &mut String, table: &ReportTable) {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let _ = writeln!(out, "{}", table.kind);
    let _ = writeln!(out, "{}", line(&table.columns, &widths));
    let _ = writeln!(
        out,
        "{}",
        "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1))
    );
    for row in &table.rows {
        let _ = writeln!(out, "{}", line(row, &widths));
    }
    let _ = writeln!(out, "({} row(s))", table.rows.len());
}

/// Renders every table of a projection, separated by blank lines.
pub fn render_projection(projection: &ReportProjection) -> String {
    let mut out = String::new();
    for (i, table) in projection.tables().into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_table(&mut out, table);
    }
    out
}

#[cfg(test)]
mod tests {
    use housing_registry_report_models::TableKind;

    use super::*;

    #[test]
    fn aligns_columns_to_widest_cell() {
        let mut table = ReportTable::empty(TableKind::Area);
        table.rows = vec![
            vec!["RW 01".to_string(), "Riverside".to_string(), "3".to_string()],
            vec!["RW 12 Extension".to_string(), "-".to_string(), "-".to_string()],
        ];
        let rendered = render_projection(&ReportProjection::Area { table });
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "AREA");
        assert_eq!(lines[1], "name             description  infrastructureCount");
        assert_eq!(lines[3], "RW 01            Riverside    3");
        assert_eq!(lines[4], "RW 12 Extension  -            -");
        assert_eq!(lines[5], "(2 row(s))");
    }

    #[test]
    fn separates_combined_tables() {
        let projection = ReportProjection::Combined {
            household: ReportTable::empty(TableKind::Household),
            infrastructure: ReportTable::empty(TableKind::Infrastructure),
            area: ReportTable::empty(TableKind::Area),
        };
        let rendered = render_projection(&projection);
        assert_eq!(rendered.matches("(0 row(s))").count(), 3);
        assert!(rendered.contains("\n\nINFRASTRUCTURE\n"));
    }
}
