use std::sync::Arc;

use wc_winners::dataset::Dataset;
use wc_winners::export::export_dashboard;
use wc_winners::state::{DashboardState, Delta, Derived, apply_delta};

#[test]
fn export_writes_every_view() {
    let dataset = Arc::new(Dataset::builtin().expect("dataset"));
    let mut state = DashboardState::new(Arc::new(Derived::new(dataset))).expect("state");
    apply_delta(&mut state, Delta::SelectCountry("Brazil".to_string())).expect("accepted");

    let path = std::env::temp_dir().join(format!("wc_winners_export_{}.xlsx", std::process::id()));
    let report = export_dashboard(&path, &state).expect("export should succeed");
    assert_eq!(report.finals, 22);
    assert_eq!(report.winners, 8);
    assert_eq!(report.map_rows, 8);
    assert_eq!(report.runner_ups, 10);
    // country row, headline, years line, year row, five year lines
    assert_eq!(report.selection_rows, 9);

    let written = std::fs::metadata(&path).expect("workbook exists");
    assert!(written.len() > 0);
    let _ = std::fs::remove_file(&path);
}
