// ── Setup and options flows ──
//
// Setup validates raw input, then proves the credentials by opening a
// session. The options flow merges new flags and re-checks the credentials,
// producing a fresh handle. Neither retries.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use unifigw_api::{Error as ApiError, LegacyClient};

use crate::error::CoreError;
use crate::options::OptionsDocument;
use crate::profile::{ConnectionProfile, ProfileInput, validate};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Opens an authenticated controller session for a profile.
pub trait Connector: Send + Sync {
    type Handle: Send + Sync;

    fn connect(
        &self,
        profile: &ConnectionProfile,
    ) -> impl Future<Output = Result<Self::Handle, ApiError>> + Send;
}

/// Production connector: cookie-session login on the legacy API.
#[derive(Debug, Clone)]
pub struct SessionConnector {
    timeout: Duration,
}

impl Default for SessionConnector {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SessionConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Connector for SessionConnector {
    type Handle = LegacyClient;

    async fn connect(&self, profile: &ConnectionProfile) -> Result<LegacyClient, ApiError> {
        let url = profile.controller_url()?;
        let transport = profile.transport(self.timeout);

        let platform = match profile.api_version.platform() {
            Some(platform) => platform,
            None => LegacyClient::detect_platform(&url, &transport).await?,
        };
        debug!(?platform, %url, "connecting to controller");

        let client = LegacyClient::new(url, profile.site_id.clone(), platform, &transport)?;
        client.login(&profile.username, &profile.password).await?;
        Ok(client)
    }
}

/// Open a session for `profile`, turning any client failure into an
/// authentication error.
///
/// The failure is logged here; callers only see the generic error.
pub async fn test_credentials<C: Connector>(
    connector: &C,
    profile: &ConnectionProfile,
) -> Result<Arc<C::Handle>, CoreError> {
    match connector.connect(profile).await {
        Ok(handle) => {
            debug!(name = %profile.name, "credentials accepted");
            Ok(Arc::new(handle))
        }
        Err(e) => {
            error!(error = %e, host = %profile.host, "failed to connect to UniFi gateway");
            Err(CoreError::AuthenticationFailed {
                message: e.to_string(),
            })
        }
    }
}

/// A configured entry: validated profile, stored options, live handle.
pub struct SetupEntry<H> {
    pub profile: ConnectionProfile,
    pub options: OptionsDocument,
    pub handle: Arc<H>,
}

impl<H> SetupEntry<H> {
    pub fn title(&self) -> &str {
        &self.profile.name
    }
}

/// First-time setup: validate, then check credentials.
pub struct ConfigFlow<C> {
    connector: C,
}

impl<C: Connector> ConfigFlow<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Validate `input` and open a session.
    ///
    /// Validation failures return before any network traffic. Use
    /// [`CoreError::form_errors`] to render the result next to a form.
    pub async fn submit(
        &self,
        input: &ProfileInput,
        options: OptionsDocument,
    ) -> Result<SetupEntry<C::Handle>, CoreError> {
        let profile = validate(input)?;
        let handle = test_credentials(&self.connector, &profile).await?;
        info!(name = %profile.name, conditions = profile.monitored_conditions.len(), "entry configured");
        Ok(SetupEntry {
            profile,
            options,
            handle,
        })
    }
}

/// Options changes for an existing entry.
pub struct OptionsFlow<C> {
    connector: C,
}

impl<C: Connector> OptionsFlow<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Merge `update` over `entry.options`, re-check credentials, and
    /// swap in the new document and handle.
    ///
    /// On an authentication failure the entry is left untouched.
    pub async fn apply(
        &self,
        entry: &mut SetupEntry<C::Handle>,
        update: &OptionsDocument,
    ) -> Result<(), CoreError> {
        let mut merged = entry.options.clone();
        merged.merge(update);

        let handle = test_credentials(&self.connector, &entry.profile).await?;
        entry.options = merged;
        entry.handle = handle;
        debug!(name = %entry.profile.name, "options updated");
        Ok(())
    }
}
