use clap::ValueEnum;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pmse::error::PmseResult;
use pmse::metrics::{SimulationScore, Summary};
use pmse::types::Variable;
use serde::Serialize;
use std::path::Path;
use strum::IntoEnumIterator;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// The four labelled sections, one value or vector per line
    #[default]
    Plain,
    Table,
    Json,
}

pub fn render_plain(summary: &Summary) -> String {
    format!(
        "should be equal:\n{}\n{}\nmean averages:\n{:?}\nmedians:\n{:?}\nbinary:\n{:?}\n",
        summary.truth_count,
        summary.posterior_count,
        summary.mean_pmse,
        summary.median_pmse,
        summary.hits
    )
}

pub fn print_summary(summary: &Summary, format: ReportFormat) -> PmseResult<()> {
    match format {
        ReportFormat::Plain => print!("{}", render_plain(summary)),
        ReportFormat::Table => print_summary_table(summary),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
    }
    Ok(())
}

fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Variable").add_attribute(Attribute::Bold),
        Cell::new("Mean PMSE").fg(Color::Cyan),
        Cell::new("Median PMSE"),
        Cell::new("Hits").fg(Color::Green),
    ]);

    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for v in Variable::iter() {
        let i = v.index();
        table.add_row(vec![
            Cell::new(v).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.4}", summary.mean_pmse[i])).fg(Color::Cyan),
            Cell::new(format!("{:.4}", summary.median_pmse[i])),
            Cell::new(format!(
                "{}/{}",
                summary.hits[i],
                summary.truth_count.min(summary.posterior_count)
            ))
            .fg(Color::Green),
        ]);
    }

    // Footer: the hit denominators above only hold when both counts agree.
    let counts = if summary.counts_match() {
        Cell::new(summary.truth_count).fg(Color::Green)
    } else {
        Cell::new(format!(
            "{} truth / {} posterior",
            summary.truth_count, summary.posterior_count
        ))
        .fg(Color::Red)
    };
    table.add_row(vec![
        Cell::new("Simulations").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        counts,
    ]);

    table
}

fn print_summary_table(summary: &Summary) {
    println!("\n{}", summary_table(summary));
}

pub fn print_breakdown(scores: &[SimulationScore]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Sim").add_attribute(Attribute::Bold)];
    for v in Variable::iter() {
        header.push(Cell::new(format!("{}\nTop", v)));
        header.push(Cell::new(format!("{}\nHit", v)).fg(Color::Green));
        header.push(Cell::new(format!("{}\nPMSE", v)).fg(Color::Cyan));
    }
    table.add_row(header);

    for i in 1..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for s in scores {
        let mut row = vec![Cell::new(s.index).add_attribute(Attribute::Bold)];
        for v in Variable::iter() {
            let vs = s.get(v);
            let hit = if vs.hit == 1 {
                Cell::new("✓").fg(Color::Green)
            } else {
                Cell::new("·")
            };
            row.push(Cell::new(format!("{}", vs.top_prediction)));
            row.push(hit);
            row.push(Cell::new(format!("{:.4}", vs.pmse)).fg(Color::Cyan));
        }
        table.add_row(row);
    }

    println!("\n{}", table);
}

#[derive(Debug, Serialize)]
struct BreakdownRow {
    simulation: usize,
    money_top: f64,
    money_hit: u32,
    money_pmse: f64,
    norm_top: f64,
    norm_hit: u32,
    norm_pmse: f64,
    gasp_top: f64,
    gasp_hit: u32,
    gasp_pmse: f64,
}

impl From<&SimulationScore> for BreakdownRow {
    fn from(s: &SimulationScore) -> Self {
        Self {
            simulation: s.index,
            money_top: s.money.top_prediction,
            money_hit: s.money.hit,
            money_pmse: s.money.pmse,
            norm_top: s.norm.top_prediction,
            norm_hit: s.norm.hit,
            norm_pmse: s.norm.pmse,
            gasp_top: s.gasp.top_prediction,
            gasp_hit: s.gasp.hit,
            gasp_pmse: s.gasp.pmse,
        }
    }
}

pub fn write_breakdown_csv<P: AsRef<Path>>(path: P, scores: &[SimulationScore]) -> PmseResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for s in scores {
        wtr.serialize(BreakdownRow::from(s))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary {
            truth_count: 10,
            posterior_count: 10,
            mean_pmse: [1.5, 0.25, 2.0],
            median_pmse: [1.0, 0.2, 1.75],
            hits: [3, 7, 4],
        }
    }

    #[test]
    fn test_plain_report_layout() {
        let text = render_plain(&summary());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "should be equal:",
                "10",
                "10",
                "mean averages:",
                "[1.5, 0.25, 2.0]",
                "medians:",
                "[1.0, 0.2, 1.75]",
                "binary:",
                "[3, 7, 4]",
            ]
        );
    }

    fn table_text(s: &Summary) -> String {
        let mut table = summary_table(s);
        table.force_no_tty();
        table.to_string()
    }

    #[test]
    fn test_summary_table_rows() {
        let text = table_text(&summary());
        assert!(text.contains("Mean PMSE"));
        let money = text.lines().find(|l| l.contains("money")).unwrap();
        assert!(money.contains("1.5000") && money.contains("1.0000") && money.contains("3/10"));
        let footer = text.lines().find(|l| l.contains("Simulations")).unwrap();
        assert!(footer.trim_end().ends_with("10 |"), "{}", footer);
    }

    #[test]
    fn test_summary_table_flags_mismatched_counts() {
        let mut s = summary();
        s.posterior_count = 9;
        let text = table_text(&s);
        assert!(text.contains("10 truth / 9 posterior"), "{}", text);
        let gasp = text.lines().find(|l| l.contains("gasp")).unwrap();
        assert!(gasp.contains("4/9"), "{}", gasp);
    }

    #[test]
    fn test_plain_report_shows_mismatched_counts() {
        let mut s = summary();
        s.posterior_count = 9;
        let text = render_plain(&s);
        assert!(text.starts_with("should be equal:\n10\n9\n"));
    }
}
