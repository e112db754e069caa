// Envelope types
//
// Payload records stay untyped: their fields differ across firmware
// releases and the sensors pass them through as attributes.

use serde::Deserialize;

/// `{ "meta": { "rc": "ok", "msg": ... }, "data": [ ... ] }`
#[derive(Debug, Deserialize)]
pub struct LegacyResponse<T> {
    pub meta: Meta,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// `rc` is `"ok"` or `"error"`; `msg` is an `api.err.*` code on error.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

/// One JSON object from `data`.
pub type Record = serde_json::Map<String, serde_json::Value>;
