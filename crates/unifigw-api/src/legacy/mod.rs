// Site-scoped endpoints behind `{prefix}/api/s/{site}/`
//
// All of them answer with the `{ meta: { rc, msg }, data: [...] }` envelope.

pub mod alarms;
pub mod auth;
pub mod client;
pub mod devices;
pub mod models;
pub mod system;

pub use client::LegacyClient;
