//! Pure resolvers turning the dataset, tallies and a selection into view payloads.
//!
//! None of these mutate their inputs. Each view declares the selection fields it
//! reads through [`ViewId::dependencies`]; the dashboard state only recomputes a
//! view when one of those fields changes.

use std::cmp::Ordering;

use serde::Serialize;

use crate::dataset::{Dataset, TournamentRecord};
use crate::selection::SelectionField;
use crate::tally::CountryTally;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViewId {
    CountrySummary,
    YearSummary,
    WinMap,
    WinRanking,
    RunnerUpRanking,
    WinTimeline,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::CountrySummary,
        ViewId::YearSummary,
        ViewId::WinMap,
        ViewId::WinRanking,
        ViewId::RunnerUpRanking,
        ViewId::WinTimeline,
    ];

    pub fn dependencies(self) -> &'static [SelectionField] {
        match self {
            ViewId::CountrySummary => &[SelectionField::Country],
            ViewId::YearSummary => &[SelectionField::Year],
            ViewId::WinMap
            | ViewId::WinRanking
            | ViewId::RunnerUpRanking
            | ViewId::WinTimeline => &[],
        }
    }

    pub fn depends_on(self, field: SelectionField) -> bool {
        self.dependencies().contains(&field)
    }

    pub fn is_static(self) -> bool {
        self.dependencies().is_empty()
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewId::CountrySummary => "World Cup Winners",
            ViewId::YearSummary => "World Cup by Year",
            ViewId::WinMap => "World Cup Wins by Country",
            ViewId::WinRanking => "Winners Ranking",
            ViewId::RunnerUpRanking => "Runner-Ups",
            ViewId::WinTimeline => "Win Timeline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySummary {
    pub country: String,
    pub count: u32,
    pub years: Vec<u16>,
}

impl CountrySummary {
    /// True for the empty-state payload of a country that never won.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn headline(&self) -> String {
        if self.is_empty() {
            return format!("{} has not won the World Cup", self.country);
        }
        format!(
            "{} has won the World Cup {} times",
            self.country, self.count
        )
    }

    pub fn years_line(&self) -> String {
        if self.years.is_empty() {
            return String::new();
        }
        let years = self
            .years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} won in the following years: {years}", self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum YearSummary {
    Found(TournamentRecord),
    Missing { year: u16 },
}

impl YearSummary {
    pub fn record(&self) -> Option<&TournamentRecord> {
        match self {
            YearSummary::Found(record) => Some(record),
            YearSummary::Missing { .. } => None,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            YearSummary::Found(r) => vec![
                format!("{} World Cup", r.year),
                format!("Winner: {}", r.winner),
                format!("Runner-Up: {}", r.runner_up),
                format!("Final Score: {}", r.winning_score),
                format!("Host country: {}", r.host),
            ],
            YearSummary::Missing { year } => vec![format!("No World Cup recorded for {year}")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub year: u16,
    pub winner: String,
    pub runner_up: String,
    pub score: String,
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViewPayload {
    CountrySummary(CountrySummary),
    YearSummary(YearSummary),
    WinMap(Vec<CountryCount>),
    WinRanking(Vec<CountryCount>),
    RunnerUpRanking(Vec<CountryCount>),
    WinTimeline(Vec<TimelinePoint>),
}

impl ViewPayload {
    pub fn view(&self) -> ViewId {
        match self {
            ViewPayload::CountrySummary(_) => ViewId::CountrySummary,
            ViewPayload::YearSummary(_) => ViewId::YearSummary,
            ViewPayload::WinMap(_) => ViewId::WinMap,
            ViewPayload::WinRanking(_) => ViewId::WinRanking,
            ViewPayload::RunnerUpRanking(_) => ViewId::RunnerUpRanking,
            ViewPayload::WinTimeline(_) => ViewId::WinTimeline,
        }
    }
}

pub fn country_summary(dataset: &Dataset, wins: &CountryTally, country: &str) -> CountrySummary {
    let years = dataset
        .records()
        .iter()
        .filter(|r| r.winner == country)
        .map(|r| r.year)
        .collect();
    CountrySummary {
        country: country.to_string(),
        count: wins.count(country),
        years,
    }
}

pub fn year_summary(dataset: &Dataset, year: u16) -> YearSummary {
    match dataset.record(year) {
        Ok(record) => YearSummary::Found(record.clone()),
        Err(_) => YearSummary::Missing { year },
    }
}

/// Country/count pairs for map shading, ordered by country name.
pub fn win_map(wins: &CountryTally) -> Vec<CountryCount> {
    let mut rows = to_rows(wins);
    rows.sort_by(|a, b| a.country.cmp(&b.country));
    rows
}

/// Count descending, ties broken by country name ascending.
pub fn ranking(tally: &CountryTally) -> Vec<CountryCount> {
    let mut rows = to_rows(tally);
    rows.sort_by(compare_ranked);
    rows
}

pub fn win_timeline(dataset: &Dataset) -> Vec<TimelinePoint> {
    dataset
        .records()
        .iter()
        .map(|r| TimelinePoint {
            year: r.year,
            winner: r.winner.clone(),
            runner_up: r.runner_up.clone(),
            score: r.winning_score.clone(),
            host: r.host.clone(),
        })
        .collect()
}

fn to_rows(tally: &CountryTally) -> Vec<CountryCount> {
    tally
        .iter()
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect()
}

fn compare_ranked(a: &CountryCount, b: &CountryCount) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.country.cmp(&b.country))
}
