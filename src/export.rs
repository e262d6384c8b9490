use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::state::DashboardState;
use crate::views::CountryCount;

pub struct ExportReport {
    pub finals: usize,
    pub winners: usize,
    pub runner_ups: usize,
    pub map_rows: usize,
    pub selection_rows: usize,
}

/// Write every view of the dashboard into an xlsx workbook, one sheet per view.
pub fn export_dashboard(path: &Path, state: &DashboardState) -> Result<ExportReport> {
    let derived = state.derived();

    let mut finals_rows = vec![vec![
        "Year".to_string(),
        "Winner".to_string(),
        "Runner-Up".to_string(),
        "Final Score".to_string(),
        "Host".to_string(),
    ]];
    for point in &derived.timeline {
        finals_rows.push(vec![
            point.year.to_string(),
            point.winner.clone(),
            point.runner_up.clone(),
            point.score.clone(),
            point.host.clone(),
        ]);
    }

    let wins_rows = count_rows("Wins", &derived.win_ranking);
    let runner_up_rows = count_rows("Runner-Up Times", &derived.runner_up_ranking);
    let map_rows = count_rows("Wins", &derived.win_map);

    let summary = state.country_summary();
    let mut selection_rows = vec![
        vec!["Selected country".to_string(), summary.country.clone()],
        vec![summary.headline()],
    ];
    let years_line = summary.years_line();
    if !years_line.is_empty() {
        selection_rows.push(vec![years_line]);
    }
    selection_rows.push(vec![
        "Selected year".to_string(),
        state.selection().year().to_string(),
    ]);
    for line in state.year_summary().lines() {
        selection_rows.push(vec![line]);
    }

    let sheets: [(&str, &[Vec<String>]); 5] = [
        ("Finals", &finals_rows),
        ("Wins", &wins_rows),
        ("RunnerUps", &runner_up_rows),
        ("WinMap", &map_rows),
        ("Selection", &selection_rows),
    ];
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_rows(sheet, rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        finals: finals_rows.len().saturating_sub(1),
        winners: wins_rows.len().saturating_sub(1),
        runner_ups: runner_up_rows.len().saturating_sub(1),
        map_rows: map_rows.len().saturating_sub(1),
        selection_rows: selection_rows.len(),
    })
}

fn count_rows(count_header: &str, rows: &[CountryCount]) -> Vec<Vec<String>> {
    let mut out = vec![vec!["Country".to_string(), count_header.to_string()]];
    for row in rows {
        out.push(vec![row.country.clone(), row.count.to_string()]);
    }
    out
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell {row_idx},{col_idx}"))?;
        }
    }
    Ok(())
}
