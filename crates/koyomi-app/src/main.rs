//! Koyomi: renders the stored event list as a month calendar.

mod render;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use koyomi_core::config::load_config;
use koyomi_engine::month_data;
use koyomi_store::{EventService, JsonFileStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(false))
        .init();

    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let today = Local::now().date_naive();
    let reference = match std::env::args().nth(1) {
        Some(arg) => parse_month(&arg)
            .with_context(|| format!("expected a YYYY-MM month argument, got {arg:?}"))?,
        None => today,
    };

    tracing::info!(path = %config.storage.path, %reference, "rendering month");

    let service = EventService::new(JsonFileStore::new(config.storage.path.as_str()));
    let events = service.list()?;
    tracing::debug!(count = events.len(), "loaded events");

    print!("{}", render::render_month(&month_data(reference, today, &events)));

    Ok(())
}

/// Parses a `YYYY-MM` argument into the first day of that month.
fn parse_month(arg: &str) -> Option<NaiveDate> {
    let (year, month) = arg.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}
