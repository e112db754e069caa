//! Gateway health sensors on top of `unifigw-api`.
//!
//! - **Profile validation** ([`validate`]) turns raw form or file input into
//!   an immutable [`ConnectionProfile`], reporting every bad field at once.
//! - **Setup flow** ([`ConfigFlow`], [`OptionsFlow`]) validates, then opens a
//!   session through a [`Connector`] to prove the credentials work.
//! - **Sensors** ([`SensorPoller`]) reduce one controller endpoint each to a
//!   scalar state plus attributes, at most once per throttle window. Failed
//!   polls are logged and keep the last good reading.

pub mod condition;
pub mod error;
pub mod gateway;
pub mod options;
pub mod profile;
pub mod sensor;
pub mod setup;

// ── Primary re-exports ──────────────────────────────────────────────
pub use condition::{Condition, SensorMeta};
pub use error::{CoreError, FieldErrors};
pub use gateway::GatewayApi;
pub use options::{OptionsDocument, PLATFORMS};
pub use profile::{
    ApiVersion, ConditionsInput, ConnectionProfile, ProfileInput, VerifyTls, validate,
};
pub use sensor::{
    Attributes, MIN_TIME_BETWEEN_UPDATES, PollOutcome, Pollable, SensorPoller, SensorReading,
    SensorSnapshot, SensorState, build_sensors,
};
pub use setup::{ConfigFlow, Connector, OptionsFlow, SessionConnector, SetupEntry, test_credentials};
