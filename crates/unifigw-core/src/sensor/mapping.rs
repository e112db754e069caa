// ── Field mapping ──
//
// Pure reductions from controller records to (state, attributes). No I/O
// and no logging; the poller decides what a `None` means.

use serde_json::Value;

use unifigw_api::Record;

use super::{Attributes, SensorState};

/// Python-style truthiness for JSON values: `null`, `false`, zero, and
/// empty strings, arrays, and objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Unarchived alerts, keyed "1", "2", ... in controller order.
pub fn reduce_alerts(alerts: Vec<Record>) -> (SensorState, Attributes) {
    let attributes: Attributes = alerts
        .into_iter()
        .filter(|alert| !alert.get("archived").is_some_and(is_truthy))
        .enumerate()
        .map(|(i, alert)| ((i + 1).to_string(), Value::Object(alert)))
        .collect();
    (SensorState::Count(attributes.len()), attributes)
}

/// Devices with an upgrade pending, keyed by device name.
///
/// A missing or empty name falls back to the MAC. Every upgradable device
/// counts: duplicate names share one attribute (the later wins), and a
/// device with neither name nor MAC counts without an attribute.
pub fn reduce_firmware(devices: Vec<Record>) -> (SensorState, Attributes) {
    let mut attributes = Attributes::new();
    let mut count = 0;
    for mut device in devices {
        let Some(upgradable) = device.remove("upgradable").filter(is_truthy) else {
            continue;
        };
        count += 1;
        if let Some(key) = device_key(&device) {
            attributes.insert(key.to_owned(), upgradable);
        }
    }
    (SensorState::Count(count), attributes)
}

fn device_key(device: &Record) -> Option<&str> {
    ["name", "mac"].into_iter().find_map(|field| {
        device
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    })
}

/// Why a health list could not be reduced for a subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthGap {
    /// No entry carries the subsystem tag.
    MissingSubsystem,
    /// The entry has no string `status`.
    MissingStatus,
}

/// The entry for `subsystem`: upper-cased status, every field as attributes.
pub fn reduce_health(
    entries: Vec<Record>,
    subsystem: &str,
) -> Result<(SensorState, Attributes), HealthGap> {
    let entry = entries
        .into_iter()
        .find(|e| e.get("subsystem").and_then(Value::as_str) == Some(subsystem))
        .ok_or(HealthGap::MissingSubsystem)?;

    let status = entry
        .get("status")
        .and_then(Value::as_str)
        .ok_or(HealthGap::MissingStatus)?
        .to_uppercase();

    Ok((SensorState::Status(status), entry.into_iter().collect()))
}
