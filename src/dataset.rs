use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::error::{DashboardError, Result};

/// One row of the literal finals table, before the host join.
#[derive(Debug, Clone, Copy)]
pub struct FinalRow {
    pub year: u16,
    pub winner: &'static str,
    pub runner_up: &'static str,
    pub score: &'static str,
}

const fn row(
    year: u16,
    winner: &'static str,
    runner_up: &'static str,
    score: &'static str,
) -> FinalRow {
    FinalRow {
        year,
        winner,
        runner_up,
        score,
    }
}

pub const FINALS: &[FinalRow] = &[
    row(1930, "Uruguay", "Argentina", "4-2"),
    row(1934, "Italy", "Czechoslovakia", "2-1"),
    row(1938, "Italy", "Hungary", "4-2"),
    row(1950, "Uruguay", "Brazil", "2-1"),
    row(1954, "West Germany", "Hungary", "3-2"),
    row(1958, "Brazil", "Sweden", "5-2"),
    row(1962, "Brazil", "Czechoslovakia", "3-1"),
    row(1966, "England", "West Germany", "4-2"),
    row(1970, "Brazil", "Italy", "4-1"),
    row(1974, "West Germany", "Netherlands", "2-1"),
    row(1978, "Argentina", "Netherlands", "3-1"),
    row(1982, "Italy", "West Germany", "3-1"),
    row(1986, "Argentina", "West Germany", "3-2"),
    row(1990, "West Germany", "Argentina", "1-0"),
    row(1994, "Brazil", "Italy", "0-0 (3-2)"),
    row(1998, "France", "Brazil", "3-0"),
    row(2002, "Brazil", "Germany", "2-0"),
    row(2006, "Italy", "France", "1-1 (5-3)"),
    row(2010, "Spain", "Netherlands", "1-0"),
    row(2014, "Germany", "Argentina", "1-0"),
    row(2018, "France", "Croatia", "4-2"),
    row(2022, "Argentina", "France", "3-3 (4-2)"),
];

pub const HOSTS: &[(u16, &str)] = &[
    (1930, "Uruguay"),
    (1934, "Italy"),
    (1938, "France"),
    (1950, "Brazil"),
    (1954, "Switzerland"),
    (1958, "Sweden"),
    (1962, "Chile"),
    (1966, "England"),
    (1970, "Mexico"),
    (1974, "West Germany"),
    (1978, "Argentina"),
    (1982, "Spain"),
    (1986, "Mexico"),
    (1990, "Italy"),
    (1994, "United States"),
    (1998, "France"),
    (2002, "South Korea & Japan"),
    (2006, "Germany"),
    (2010, "South Africa"),
    (2014, "Brazil"),
    (2018, "Russia"),
    (2022, "Qatar"),
];

/// Historical names mapped to the name the country plays under today.
pub const CANONICAL_NAMES: &[(&str, &str)] = &[("West Germany", "Germany")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentRecord {
    pub year: u16,
    pub winner: String,
    pub runner_up: String,
    pub winning_score: String,
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<TournamentRecord>,
    winners: Vec<String>,
}

impl Dataset {
    pub fn builtin() -> Result<Self> {
        build_dataset(FINALS, HOSTS, CANONICAL_NAMES)
    }

    pub fn records(&self) -> &[TournamentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct winners, sorted by name.
    pub fn winners(&self) -> &[String] {
        &self.winners
    }

    pub fn years(&self) -> Vec<u16> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn latest_year(&self) -> Option<u16> {
        self.records.last().map(|r| r.year)
    }

    pub fn has_year(&self, year: u16) -> bool {
        self.position(year).is_some()
    }

    pub fn is_winner(&self, country: &str) -> bool {
        self.winners
            .binary_search_by(|w| w.as_str().cmp(country))
            .is_ok()
    }

    pub fn record(&self, year: u16) -> Result<&TournamentRecord> {
        self.position(year)
            .map(|idx| &self.records[idx])
            .ok_or(DashboardError::NotFound { year })
    }

    fn position(&self, year: u16) -> Option<usize> {
        self.records.binary_search_by_key(&year, |r| r.year).ok()
    }
}

/// Join the finals table with the host table and canonicalize country names.
pub fn build_dataset(
    finals: &[FinalRow],
    hosts: &[(u16, &str)],
    renames: &[(&str, &str)],
) -> Result<Dataset> {
    if finals.is_empty() {
        return Err(DashboardError::EmptyDataset);
    }

    let host_by_year: HashMap<u16, &str> = hosts.iter().copied().collect();
    let canonical = |name: &str| -> String {
        renames
            .iter()
            .find(|(old, _)| *old == name)
            .map(|(_, current)| (*current).to_string())
            .unwrap_or_else(|| name.to_string())
    };

    let mut records = Vec::with_capacity(finals.len());
    for final_row in finals {
        let host = host_by_year
            .get(&final_row.year)
            .ok_or(DashboardError::MissingHost {
                year: final_row.year,
            })?;
        records.push(TournamentRecord {
            year: final_row.year,
            winner: canonical(final_row.winner),
            runner_up: canonical(final_row.runner_up),
            winning_score: final_row.score.to_string(),
            host: canonical(*host),
        });
    }

    records.sort_by_key(|r| r.year);
    if let Some(pair) = records.windows(2).find(|pair| pair[0].year == pair[1].year) {
        return Err(DashboardError::DuplicateYear { year: pair[0].year });
    }

    let winners = records
        .iter()
        .map(|r| r.winner.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Ok(Dataset { records, winners })
}

static SHARED: OnceCell<Arc<Dataset>> = OnceCell::new();

/// Process-wide handle to the built-in dataset, built on first use.
pub fn shared_dataset() -> Result<Arc<Dataset>> {
    SHARED
        .get_or_try_init(|| Dataset::builtin().map(Arc::new))
        .cloned()
}
