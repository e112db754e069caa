//! Command dispatch: bridges CLI args -> setup/sensor core -> output formatting.

pub mod check;
pub mod conditions;
pub mod options;
pub mod status;
pub mod watch;

use chrono::Local;
use tabled::Tabled;
use tracing::warn;

use unifigw_api::LegacyClient;
use unifigw_config::Config;
use unifigw_core::{
    ConfigFlow, PollOutcome, Pollable, SensorPoller, SensorSnapshot, SessionConnector, SetupEntry,
    build_sensors,
};

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// A configured entry backed by a live controller session.
pub type Entry = SetupEntry<LegacyClient>;

/// Dispatch a profile-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, cfg: Config, settings: &Settings) -> Result<(), CliError> {
    match cmd {
        Command::Check => check::handle(&cfg, settings).await,
        Command::Status => status::handle(&cfg, settings).await,
        Command::Watch(args) => watch::handle(&cfg, args, settings).await,
        Command::Options(args) => options::handle(cfg, args, settings).await,
        Command::Conditions => conditions::handle(settings),
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}

// ── Shared helpers ──────────────────────────────────────────────────

/// Run the setup flow for the active profile: validate, then log in.
pub async fn connect(cfg: &Config, settings: &Settings) -> Result<Entry, CliError> {
    let stored = cfg.profile(&settings.profile)?;
    let input = unifigw_config::resolve_input(stored, &settings.profile);

    ConfigFlow::new(SessionConnector::new(settings.timeout))
        .submit(&input, stored.options.clone())
        .await
        .map_err(|e| CliError::from_core(e, &settings.profile))
}

/// One poller per monitored condition, unless the sensor platform is off.
pub fn sensors_for(entry: &Entry) -> Vec<SensorPoller<LegacyClient>> {
    if !entry.options.is_enabled("sensor") {
        warn!(profile = %entry.title(), "sensor platform disabled in options");
        return Vec::new();
    }
    build_sensors(&entry.profile, &entry.handle)
}

/// Trigger every sensor once; returns how many refreshed.
pub async fn poll_all(sensors: &mut [SensorPoller<LegacyClient>]) -> usize {
    let mut refreshed = 0;
    for sensor in sensors.iter_mut() {
        if sensor.update().await == PollOutcome::Refreshed {
            refreshed += 1;
        }
    }
    refreshed
}

/// End the controller session; a failure here is only worth a warning.
pub async fn logout(entry: &Entry) {
    if let Err(e) = entry.handle.logout().await {
        warn!(error = %e, "logout failed");
    }
}

// ── Sensor rendering ────────────────────────────────────────────────

#[derive(Tabled)]
pub struct SensorRow {
    #[tabled(rename = "Sensor")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Attributes")]
    attributes: usize,
    #[tabled(rename = "Icon")]
    icon: &'static str,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&SensorSnapshot> for SensorRow {
    fn from(s: &SensorSnapshot) -> Self {
        Self {
            name: s.display_name.clone(),
            state: s.state.as_ref().map_or_else(|| "-".into(), ToString::to_string),
            attributes: s.attributes.len(),
            icon: s.icon,
            updated: s.last_updated.map_or_else(
                || "-".into(),
                |t| t.with_timezone(&Local).format("%H:%M:%S").to_string(),
            ),
        }
    }
}

/// `"{display name}\t{state}"`, for plain output.
pub fn sensor_line(s: &SensorSnapshot) -> String {
    let state = s.state.as_ref().map_or_else(|| "-".into(), ToString::to_string);
    format!("{}\t{state}", s.display_name)
}
