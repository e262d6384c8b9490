use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TICK_MS: u64 = 250;
const MIN_TICK_MS: u64 = 50;
const DEFAULT_EXPORT_PATH: &str = "wc_winners.xlsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub default_country: Option<String>,
    pub default_year: Option<u16>,
    pub tick_rate: Duration,
    pub export_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_country: None,
            default_year: None,
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

impl DashboardConfig {
    /// Read `WC_*` variables. Call `dotenvy` beforehand to pick up `.env` files.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_country = lookup("WC_DEFAULT_COUNTRY")
            .map(|raw| raw.trim().to_string())
            .filter(|s| !s.is_empty());
        let default_year = lookup("WC_DEFAULT_YEAR").and_then(|raw| raw.trim().parse::<u16>().ok());
        let tick_ms = lookup("WC_TICK_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_MS)
            .max(MIN_TICK_MS);
        let export_path = lookup("WC_EXPORT_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));
        Self {
            default_country,
            default_year,
            tick_rate: Duration::from_millis(tick_ms),
            export_path,
        }
    }
}
