// ── Sensor pollers ──
//
// One poller per (profile, condition). Each update fetches one endpoint,
// reduces it through `mapping`, and replaces the cached reading. Failures
// are logged here and never escape; the previous reading stays in place.

pub mod mapping;
mod throttle;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, trace, warn};

use crate::condition::{Condition, DataSource};
use crate::error::CoreError;
use crate::gateway::GatewayApi;
use crate::profile::ConnectionProfile;

use self::mapping::HealthGap;
pub use self::throttle::{MIN_TIME_BETWEEN_UPDATES, Throttle};

/// Attribute mapping exposed alongside a sensor state, in insertion order.
pub type Attributes = IndexMap<String, Value>;

/// Scalar sensor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SensorState {
    /// Alert and firmware sensors.
    Count(usize),
    /// Subsystem health sensors, e.g. `"OK"`.
    Status(String),
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Status(s) => f.write_str(s),
        }
    }
}

/// Last good result of a poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    pub state: SensorState,
    pub attributes: Attributes,
    pub updated_at: DateTime<Utc>,
}

/// What the host sees for one sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSnapshot {
    pub condition: Condition,
    pub display_name: String,
    pub icon: &'static str,
    pub unit: &'static str,
    /// `None` until the first successful poll.
    pub state: Option<SensorState>,
    pub attributes: Attributes,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Result of one update trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Inside the throttle window; nothing fetched.
    Throttled,
    /// Fetched and replaced the reading.
    Refreshed,
    /// Fetched, but the response held nothing for this sensor.
    NoData,
    /// The fetch failed and was logged.
    Failed,
}

/// Host-facing sensor capability.
pub trait Pollable: Send {
    fn condition(&self) -> Condition;

    /// Run one poll cycle, subject to throttling. Never fails.
    fn update(&mut self) -> impl Future<Output = PollOutcome> + Send;

    fn snapshot(&self) -> SensorSnapshot;
}

/// Throttled poller for a single condition against a shared gateway handle.
pub struct SensorPoller<G> {
    gateway: Arc<G>,
    condition: Condition,
    display_name: String,
    reading: Option<SensorReading>,
    throttle: Throttle,
}

impl<G: GatewayApi> SensorPoller<G> {
    pub fn new(profile_name: &str, condition: Condition, gateway: Arc<G>) -> Self {
        Self {
            gateway,
            condition,
            display_name: format!("{profile_name} {}", condition.meta().label),
            reading: None,
            throttle: Throttle::default(),
        }
    }

    /// Override the throttle window.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.throttle = Throttle::new(interval);
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn reading(&self) -> Option<&SensorReading> {
        self.reading.as_ref()
    }

    /// Time until the next trigger would fetch.
    pub fn next_poll_in(&self) -> Duration {
        self.throttle.remaining()
    }

    async fn fetch(&self) -> Result<Option<(SensorState, Attributes)>, CoreError> {
        match self.condition.source() {
            DataSource::Alerts => {
                let alerts = self
                    .gateway
                    .get_alerts()
                    .await
                    .map_err(|e| CoreError::fetch("alerts", e))?;
                Ok(Some(mapping::reduce_alerts(alerts)))
            }
            DataSource::Devices => {
                let devices = self
                    .gateway
                    .get_aps()
                    .await
                    .map_err(|e| CoreError::fetch("devices", e))?;
                Ok(Some(mapping::reduce_firmware(devices)))
            }
            DataSource::Health => {
                let entries = self
                    .gateway
                    .get_healthinfo()
                    .await
                    .map_err(|e| CoreError::fetch("health info", e))?;
                let subsystem = self.condition.name();
                match mapping::reduce_health(entries, subsystem) {
                    Ok(reduced) => Ok(Some(reduced)),
                    Err(HealthGap::MissingSubsystem) => {
                        warn!(sensor = %self.display_name, subsystem, "no health entry for subsystem");
                        Ok(None)
                    }
                    Err(HealthGap::MissingStatus) => {
                        warn!(sensor = %self.display_name, subsystem, "health entry has no status");
                        Ok(None)
                    }
                }
            }
        }
    }

    fn log_failure(&self, err: &CoreError) {
        let sensor = self.display_name.as_str();
        match (self.condition.source(), err) {
            (_, CoreError::Unsupported { operation }) => {
                error!(sensor, %operation, "no health info capability for controller");
            }
            (DataSource::Alerts, _) => error!(sensor, error = %err, "failed to access alerts info"),
            (DataSource::Devices, _) => error!(sensor, error = %err, "failed to scan aps"),
            (DataSource::Health, _) => error!(sensor, error = %err, "failed to access health info"),
        }
    }
}

impl<G: GatewayApi> Pollable for SensorPoller<G> {
    fn condition(&self) -> Condition {
        self.condition
    }

    async fn update(&mut self) -> PollOutcome {
        if !self.throttle.try_acquire() {
            trace!(sensor = %self.display_name, "update throttled");
            return PollOutcome::Throttled;
        }

        match self.fetch().await {
            Ok(Some((state, attributes))) => {
                debug!(sensor = %self.display_name, %state, attributes = attributes.len(), "sensor refreshed");
                self.reading = Some(SensorReading {
                    state,
                    attributes,
                    updated_at: Utc::now(),
                });
                PollOutcome::Refreshed
            }
            Ok(None) => PollOutcome::NoData,
            Err(e) => {
                self.log_failure(&e);
                PollOutcome::Failed
            }
        }
    }

    fn snapshot(&self) -> SensorSnapshot {
        let meta = self.condition.meta();
        let (state, attributes, last_updated) = match &self.reading {
            Some(r) => (Some(r.state.clone()), r.attributes.clone(), Some(r.updated_at)),
            None => (None, Attributes::new(), None),
        };
        SensorSnapshot {
            condition: self.condition,
            display_name: self.display_name.clone(),
            icon: meta.icon,
            unit: meta.unit,
            state,
            attributes,
            last_updated,
        }
    }
}

/// One poller per monitored condition of `profile`, all sharing `gateway`.
pub fn build_sensors<G: GatewayApi>(
    profile: &ConnectionProfile,
    gateway: &Arc<G>,
) -> Vec<SensorPoller<G>> {
    profile
        .monitored_conditions
        .iter()
        .map(|&condition| SensorPoller::new(&profile.name, condition, Arc::clone(gateway)))
        .collect()
}
