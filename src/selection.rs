use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SelectionField {
    Country,
    Year,
}

/// The two user-controlled inputs. Both fields always hold an in-domain value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    country: String,
    year: u16,
}

impl SelectionState {
    /// Alphabetically first winner and the most recent edition.
    pub fn initial(dataset: &Dataset) -> Result<Self> {
        let country = dataset
            .winners()
            .first()
            .cloned()
            .ok_or(DashboardError::EmptyDataset)?;
        let year = dataset.latest_year().ok_or(DashboardError::EmptyDataset)?;
        Ok(Self { country, year })
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn set_country(&mut self, dataset: &Dataset, country: &str) -> Result<SelectionField> {
        if !dataset.is_winner(country) {
            return Err(DashboardError::InvalidCountry {
                country: country.to_string(),
            });
        }
        self.country = country.to_string();
        Ok(SelectionField::Country)
    }

    pub fn set_year(&mut self, dataset: &Dataset, year: u16) -> Result<SelectionField> {
        if !dataset.has_year(year) {
            return Err(DashboardError::InvalidYear { year });
        }
        self.year = year;
        Ok(SelectionField::Year)
    }
}
