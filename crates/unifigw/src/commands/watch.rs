//! `watch`: act as the host scheduler, triggering every sensor on an
//! interval until Ctrl-C. The per-sensor throttle decides which triggers
//! actually reach the controller.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use unifigw_config::Config;
use unifigw_core::Pollable;

use crate::cli::WatchArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::{SensorRow, sensor_line};

pub async fn handle(cfg: &Config, args: WatchArgs, settings: &Settings) -> Result<(), CliError> {
    let entry = super::connect(cfg, settings).await?;
    let mut sensors = super::sensors_for(&entry);
    if sensors.is_empty() {
        super::logout(&entry).await;
        eprintln!("Nothing to watch: the sensor platform is disabled for this profile.");
        return Ok(());
    }

    let every = args
        .interval
        .map_or(settings.trigger_interval, Duration::from_secs);
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval = ?every, sensors = sensors.len(), "watching");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            _ = ticker.tick() => {
                let refreshed = super::poll_all(&mut sensors).await;
                debug!(refreshed, "trigger complete");
                if refreshed == 0 {
                    continue;
                }
                let snapshots: Vec<_> = sensors.iter().map(Pollable::snapshot).collect();
                let out = output::render_list(
                    settings.output,
                    &snapshots,
                    |s| SensorRow::from(s),
                    sensor_line,
                )?;
                output::print_output(&out, settings.quiet);
            }
        }
    }

    super::logout(&entry).await;
    Ok(())
}
