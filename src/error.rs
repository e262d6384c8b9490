//! Error types for the winners dashboard core.

/// Errors raised while building the dataset or handling a selection change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    /// A finals row has no entry in the host table.
    #[error("no host recorded for the {year} edition")]
    MissingHost { year: u16 },

    /// Two finals rows share the same year.
    #[error("duplicate finals row for {year}")]
    DuplicateYear { year: u16 },

    /// The finals table has no rows, so no default selection exists.
    #[error("finals table is empty")]
    EmptyDataset,

    /// A year lookup fell outside the dataset.
    #[error("no edition recorded for {year}")]
    NotFound { year: u16 },

    /// A country selection that never won the tournament.
    #[error("{country} is not a tournament winner")]
    InvalidCountry { country: String },

    /// A year selection that is not an edition year.
    #[error("{year} is not an edition year")]
    InvalidYear { year: u16 },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
