use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::selection::{SelectionField, SelectionState};
use crate::tally::{CountryTally, Role, tally};
use crate::views::{
    self, CountryCount, CountrySummary, TimelinePoint, ViewId, ViewPayload, YearSummary,
};

const MAX_LOGS: usize = 200;

/// Everything derived from the dataset alone. Built once and shared read-only.
#[derive(Debug)]
pub struct Derived {
    pub dataset: Arc<Dataset>,
    pub wins: CountryTally,
    pub runner_ups: CountryTally,
    pub win_map: Vec<CountryCount>,
    pub win_ranking: Vec<CountryCount>,
    pub runner_up_ranking: Vec<CountryCount>,
    pub timeline: Vec<TimelinePoint>,
}

impl Derived {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let wins = tally(dataset.records(), Role::Winner);
        let runner_ups = tally(dataset.records(), Role::RunnerUp);
        let win_map = views::win_map(&wins);
        let win_ranking = views::ranking(&wins);
        let runner_up_ranking = views::ranking(&runner_ups);
        let timeline = views::win_timeline(&dataset);
        Self {
            dataset,
            wins,
            runner_ups,
            win_map,
            win_ranking,
            runner_up_ranking,
            timeline,
        }
    }
}

/// A selection change relayed from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    SelectCountry(String),
    SelectYear(u16),
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    derived: Arc<Derived>,
    selection: SelectionState,
    country_summary: CountrySummary,
    year_summary: YearSummary,
    pub logs: VecDeque<String>,
}

impl DashboardState {
    pub fn new(derived: Arc<Derived>) -> Result<Self> {
        let selection = SelectionState::initial(&derived.dataset)?;
        let country_summary =
            views::country_summary(&derived.dataset, &derived.wins, selection.country());
        let year_summary = views::year_summary(&derived.dataset, selection.year());
        Ok(Self {
            derived,
            selection,
            country_summary,
            year_summary,
            logs: VecDeque::with_capacity(MAX_LOGS),
        })
    }

    /// Start from the configured defaults, keeping the built-in ones for anything invalid.
    pub fn with_config(derived: Arc<Derived>, config: &DashboardConfig) -> Result<Self> {
        let mut state = Self::new(derived)?;
        if let Some(country) = &config.default_country {
            let _ = apply_delta(&mut state, Delta::SelectCountry(country.clone()));
        }
        if let Some(year) = config.default_year {
            let _ = apply_delta(&mut state, Delta::SelectYear(year));
        }
        Ok(state)
    }

    pub fn derived(&self) -> &Arc<Derived> {
        &self.derived
    }

    pub fn dataset(&self) -> &Dataset {
        &self.derived.dataset
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn country_summary(&self) -> &CountrySummary {
        &self.country_summary
    }

    pub fn year_summary(&self) -> &YearSummary {
        &self.year_summary
    }

    pub fn payload(&self, view: ViewId) -> ViewPayload {
        match view {
            ViewId::CountrySummary => ViewPayload::CountrySummary(self.country_summary.clone()),
            ViewId::YearSummary => ViewPayload::YearSummary(self.year_summary.clone()),
            ViewId::WinMap => ViewPayload::WinMap(self.derived.win_map.clone()),
            ViewId::WinRanking => ViewPayload::WinRanking(self.derived.win_ranking.clone()),
            ViewId::RunnerUpRanking => {
                ViewPayload::RunnerUpRanking(self.derived.runner_up_ranking.clone())
            }
            ViewId::WinTimeline => ViewPayload::WinTimeline(self.derived.timeline.clone()),
        }
    }

    pub fn payloads(&self) -> Vec<ViewPayload> {
        ViewId::ALL.iter().map(|view| self.payload(*view)).collect()
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn refresh(&mut self, field: SelectionField) -> Vec<ViewPayload> {
        let mut out = Vec::new();
        for view in ViewId::ALL.iter().filter(|v| v.depends_on(field)) {
            match view {
                ViewId::CountrySummary => {
                    self.country_summary = views::country_summary(
                        &self.derived.dataset,
                        &self.derived.wins,
                        self.selection.country(),
                    );
                }
                ViewId::YearSummary => {
                    self.year_summary =
                        views::year_summary(&self.derived.dataset, self.selection.year());
                }
                _ => {}
            }
            out.push(self.payload(*view));
        }
        out
    }
}

/// Apply one selection change and return the payloads of exactly the views that read
/// the changed field. A rejected value leaves the selection untouched.
pub fn apply_delta(state: &mut DashboardState, delta: Delta) -> Result<Vec<ViewPayload>> {
    let dataset = Arc::clone(&state.derived.dataset);
    let changed = match &delta {
        Delta::SelectCountry(country) => state.selection.set_country(&dataset, country),
        Delta::SelectYear(year) => state.selection.set_year(&dataset, *year),
    };
    match changed {
        Ok(field) => {
            match &delta {
                Delta::SelectCountry(country) => {
                    state.push_log(format!("[INFO] Country selected: {country}"))
                }
                Delta::SelectYear(year) => state.push_log(format!("[INFO] Year selected: {year}")),
            }
            Ok(state.refresh(field))
        }
        Err(err) => {
            state.push_log(format!("[WARN] Selection rejected: {err}"));
            Err(err)
        }
    }
}
