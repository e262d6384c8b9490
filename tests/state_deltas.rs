use std::sync::Arc;

use wc_winners::config::DashboardConfig;
use wc_winners::dataset::Dataset;
use wc_winners::error::DashboardError;
use wc_winners::state::{DashboardState, Delta, Derived, apply_delta};
use wc_winners::views::{ViewId, ViewPayload};

fn fresh_state() -> DashboardState {
    let dataset = Arc::new(Dataset::builtin().expect("dataset"));
    DashboardState::new(Arc::new(Derived::new(dataset))).expect("initial state")
}

#[test]
fn defaults_are_first_winner_and_latest_year() {
    let state = fresh_state();
    assert_eq!(state.selection().country(), "Argentina");
    assert_eq!(state.selection().year(), 2022);
    assert_eq!(state.country_summary().years, vec![1978, 1986, 2022]);
}

#[test]
fn selecting_a_country_refreshes_only_the_country_summary() {
    let mut state = fresh_state();
    let payloads =
        apply_delta(&mut state, Delta::SelectCountry("Uruguay".to_string())).expect("accepted");
    assert_eq!(payloads.len(), 1);
    let ViewPayload::CountrySummary(summary) = &payloads[0] else {
        panic!("expected country summary, got {:?}", payloads[0].view());
    };
    assert_eq!(summary.count, 2);
    assert_eq!(summary.years, vec![1930, 1950]);
    assert_eq!(state.selection().country(), "Uruguay");
    assert_eq!(state.selection().year(), 2022);
}

#[test]
fn selecting_a_year_refreshes_only_the_year_summary() {
    let mut state = fresh_state();
    let payloads = apply_delta(&mut state, Delta::SelectYear(1990)).expect("accepted");
    let views: Vec<ViewId> = payloads.iter().map(|p| p.view()).collect();
    assert_eq!(views, vec![ViewId::YearSummary]);
    let record = state.year_summary().record().expect("1990 exists");
    assert_eq!(record.winner, "Germany");
    assert_eq!(state.selection().country(), "Argentina");
}

#[test]
fn out_of_domain_year_is_rejected_without_mutation() {
    let mut state = fresh_state();
    apply_delta(&mut state, Delta::SelectYear(1998)).expect("accepted");
    let before = state.selection().clone();

    let err = apply_delta(&mut state, Delta::SelectYear(1942)).expect_err("1942 is not an edition");
    assert_eq!(err, DashboardError::InvalidYear { year: 1942 });
    assert_eq!(state.selection(), &before);
    assert_eq!(state.year_summary().record().map(|r| r.year), Some(1998));
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[WARN]")));
}

#[test]
fn non_winner_country_is_rejected_without_mutation() {
    let mut state = fresh_state();
    let err = apply_delta(&mut state, Delta::SelectCountry("Netherlands".to_string()))
        .expect_err("never won");
    assert_eq!(
        err,
        DashboardError::InvalidCountry {
            country: "Netherlands".to_string()
        }
    );
    assert_eq!(state.selection().country(), "Argentina");

    // Historical names are not part of the selection domain.
    assert!(apply_delta(&mut state, Delta::SelectCountry("West Germany".to_string())).is_err());
    assert_eq!(state.selection().country(), "Argentina");
}

#[test]
fn static_payloads_do_not_change_with_selection() {
    let mut state = fresh_state();
    let fixed = |state: &DashboardState| -> Vec<ViewPayload> {
        ViewId::ALL
            .iter()
            .filter(|v| v.is_static())
            .map(|v| state.payload(*v))
            .collect()
    };
    let before = fixed(&state);
    apply_delta(&mut state, Delta::SelectCountry("Brazil".to_string())).expect("accepted");
    apply_delta(&mut state, Delta::SelectYear(1930)).expect("accepted");
    assert_eq!(fixed(&state), before);

    let ViewPayload::WinRanking(rows) = state.payload(ViewId::WinRanking) else {
        panic!("expected win ranking");
    };
    assert_eq!((rows[0].country.as_str(), rows[0].count), ("Brazil", 5));
}

#[test]
fn payloads_cover_every_view_once() {
    let state = fresh_state();
    let views: Vec<ViewId> = state.payloads().iter().map(|p| p.view()).collect();
    assert_eq!(views, ViewId::ALL.to_vec());
}

#[test]
fn log_ring_is_capped() {
    let mut state = fresh_state();
    for i in 0..250 {
        state.push_log(format!("[INFO] line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}

#[test]
fn configured_defaults_are_applied_when_valid() {
    let dataset = Arc::new(Dataset::builtin().expect("dataset"));
    let derived = Arc::new(Derived::new(dataset));
    let config = DashboardConfig {
        default_country: Some("Italy".to_string()),
        default_year: Some(2006),
        ..DashboardConfig::default()
    };
    let state = DashboardState::with_config(derived, &config).expect("state");
    assert_eq!(state.selection().country(), "Italy");
    assert_eq!(state.selection().year(), 2006);
    assert_eq!(state.country_summary().count, 4);
}

#[test]
fn invalid_configured_defaults_fall_back() {
    let dataset = Arc::new(Dataset::builtin().expect("dataset"));
    let derived = Arc::new(Derived::new(dataset));
    let config = DashboardConfig {
        default_country: Some("Atlantis".to_string()),
        default_year: Some(2026),
        ..DashboardConfig::default()
    };
    let state = DashboardState::with_config(derived, &config).expect("state");
    assert_eq!(state.selection().country(), "Argentina");
    assert_eq!(state.selection().year(), 2022);
    assert_eq!(
        state
            .logs
            .iter()
            .filter(|l| l.starts_with("[WARN]"))
            .count(),
        2
    );
}
