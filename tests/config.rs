use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use wc_winners::config::DashboardConfig;

fn from_pairs(pairs: &[(&str, &str)]) -> DashboardConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    DashboardConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn empty_environment_gives_defaults() {
    assert_eq!(from_pairs(&[]), DashboardConfig::default());
}

#[test]
fn values_are_parsed_and_trimmed() {
    let config = from_pairs(&[
        ("WC_DEFAULT_COUNTRY", " Brazil "),
        ("WC_DEFAULT_YEAR", "1970"),
        ("WC_TICK_MS", "500"),
        ("WC_EXPORT_PATH", "out/report.xlsx"),
    ]);
    assert_eq!(config.default_country.as_deref(), Some("Brazil"));
    assert_eq!(config.default_year, Some(1970));
    assert_eq!(config.tick_rate, Duration::from_millis(500));
    assert_eq!(config.export_path, PathBuf::from("out/report.xlsx"));
}

#[test]
fn bad_values_fall_back() {
    let config = from_pairs(&[
        ("WC_DEFAULT_COUNTRY", "   "),
        ("WC_DEFAULT_YEAR", "nineteen"),
        ("WC_TICK_MS", "5"),
        ("WC_EXPORT_PATH", ""),
    ]);
    assert_eq!(config.default_country, None);
    assert_eq!(config.default_year, None);
    assert_eq!(config.tick_rate, Duration::from_millis(50));
    assert_eq!(config.export_path, PathBuf::from("wc_winners.xlsx"));
}
