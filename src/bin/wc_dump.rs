use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use wc_winners::dataset::shared_dataset;
use wc_winners::state::{DashboardState, Delta, Derived, apply_delta};
use wc_winners::views::ViewPayload;

#[derive(Serialize)]
struct Dump<'a> {
    country: &'a str,
    year: u16,
    views: Vec<ViewPayload>,
}

// Usage: wc_dump [COUNTRY] [YEAR]
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let country = args.next();
    let year = args
        .next()
        .map(|raw| raw.parse::<u16>().with_context(|| format!("invalid year: {raw}")))
        .transpose()?;

    let dataset = shared_dataset().context("build tournament dataset")?;
    let mut state = DashboardState::new(Arc::new(Derived::new(dataset)))?;

    if let Some(country) = country {
        apply_delta(&mut state, Delta::SelectCountry(country))
            .map_err(|err| anyhow!("country rejected: {err}"))?;
    }
    if let Some(year) = year {
        apply_delta(&mut state, Delta::SelectYear(year))
            .map_err(|err| anyhow!("year rejected: {err}"))?;
    }

    let dump = Dump {
        country: state.selection().country(),
        year: state.selection().year(),
        views: state.payloads(),
    };
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}
