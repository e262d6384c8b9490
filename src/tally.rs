use std::collections::HashMap;

use serde::Serialize;

use crate::dataset::TournamentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Winner,
    RunnerUp,
}

impl Role {
    pub fn country(self, record: &TournamentRecord) -> &str {
        match self {
            Role::Winner => &record.winner,
            Role::RunnerUp => &record.runner_up,
        }
    }
}

/// Per-country appearance counts for one role. Unordered; ranking is a view concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryTally {
    role: Role,
    counts: HashMap<String, u32>,
}

impl CountryTally {
    pub fn role(&self) -> Role {
        self.role
    }

    /// Count for `country`, zero when it never held the role.
    pub fn count(&self, country: &str) -> u32 {
        self.counts.get(country).copied().unwrap_or(0)
    }

    pub fn contains(&self, country: &str) -> bool {
        self.counts.contains_key(country)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(country, n)| (country.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

pub fn tally(records: &[TournamentRecord], role: Role) -> CountryTally {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for record in records {
        *counts.entry(role.country(record).to_string()).or_insert(0) += 1;
    }
    CountryTally { role, counts }
}
