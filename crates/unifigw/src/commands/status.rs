//! `status`: one update per sensor, then print the readings.

use unifigw_config::Config;
use unifigw_core::Pollable;

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::{SensorRow, sensor_line};

pub async fn handle(cfg: &Config, settings: &Settings) -> Result<(), CliError> {
    let entry = super::connect(cfg, settings).await?;
    let mut sensors = super::sensors_for(&entry);
    super::poll_all(&mut sensors).await;
    super::logout(&entry).await;

    let snapshots: Vec<_> = sensors.iter().map(Pollable::snapshot).collect();
    let out = output::render_list(
        settings.output,
        &snapshots,
        |s| SensorRow::from(s),
        sensor_line,
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
