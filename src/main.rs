use std::env;
use std::path::Path;
use std::process::ExitCode;
use anyhow::{Context, Result};
use log::info;
use crate::chart::plot_temperature;
use crate::initialization::init;
use crate::manager_open_meteo::OpenMeteo;
use crate::models::hourly_record::format_head;
use crate::shaper::transform;

mod chart;
mod config;
mod errors;
mod initialization;
mod manager_open_meteo;
mod models;
mod shaper;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// Message printed to stderr on failure, holding the full context chain
fn failure_message(e: &anyhow::Error) -> String {
    format!("Error: {:?}", e)
}

/// Fetches the forecast, prints the head of the shaped table and plots the temperature
fn run() -> Result<()> {
    let args = env::args().skip(1).collect::<Vec<String>>();
    let config = init(&args).context("initializing")?;

    let open_meteo = OpenMeteo::new(&config.open_meteo);
    let forecast = open_meteo
        .get_forecast(config.geo_ref.lat, config.geo_ref.long)
        .context("fetching forecast")?;

    let records = transform(&forecast).context("shaping forecast")?;
    info!("forecast shaped into {} hourly records", records.len());

    println!("{}", format_head(&records, config.general.head_rows));

    plot_temperature(
        &records,
        config.chart.hours,
        Path::new(&config.chart.output),
        (config.chart.width, config.chart.height),
        config.chart.show,
    ).context("plotting temperature")?;

    Ok(())
}
