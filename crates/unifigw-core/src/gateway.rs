// ── Controller capability ──
//
// The three reads the sensors need, as a trait so pollers can run against
// any handle. `LegacyClient` is the production implementation.

use std::future::Future;

use unifigw_api::{Error as ApiError, LegacyClient, Record};

/// Read-only controller calls used by the sensor pollers.
///
/// Handles are shared behind `Arc` by every poller of a profile and are
/// never mutated through this trait.
pub trait GatewayApi: Send + Sync {
    /// Every alert on the site, archived or not.
    fn get_alerts(&self) -> impl Future<Output = Result<Vec<Record>, ApiError>> + Send;

    /// Every adopted device, access points included.
    fn get_aps(&self) -> impl Future<Output = Result<Vec<Record>, ApiError>> + Send;

    /// Subsystem health entries.
    ///
    /// Handles without a health endpoint keep this default, which reports
    /// the capability as missing.
    fn get_healthinfo(&self) -> impl Future<Output = Result<Vec<Record>, ApiError>> + Send {
        async { Err(ApiError::UnsupportedOperation("stat/health")) }
    }
}

impl GatewayApi for LegacyClient {
    fn get_alerts(&self) -> impl Future<Output = Result<Vec<Record>, ApiError>> + Send {
        self.list_alarms()
    }

    fn get_aps(&self) -> impl Future<Output = Result<Vec<Record>, ApiError>> + Send {
        self.list_devices()
    }

    fn get_healthinfo(&self) -> impl Future<Output = Result<Vec<Record>, ApiError>> + Send {
        self.get_health()
    }
}
