// unifigw-api: Async client for the UniFi controller's legacy endpoints
//
// Only the surface the gateway sensors need: session login/logout, alarms,
// devices, and the site health dashboard.

pub mod auth;
pub mod error;
pub mod legacy;
pub mod transport;

pub use auth::ControllerPlatform;
pub use error::Error;
pub use legacy::LegacyClient;
pub use legacy::models::Record;
pub use transport::{TlsMode, TransportConfig};
