// HTTP client construction
//
// The session client and the platform probe both come from here, so TLS
// trust and timeouts are applied the same way to every request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;
use reqwest::cookie::Jar;

use crate::error::Error;

const USER_AGENT: &str = concat!("unifigw/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the controller's certificate is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Platform trust store.
    System,
    /// Trust the certificates in a PEM bundle, in addition to the platform store.
    CustomCa(PathBuf),
    /// No verification. Gateways ship self-signed certificates, so this is
    /// the default.
    DangerAcceptInvalid,
}

/// Settings for building a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A client without cookies, for unauthenticated probes.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        finish(self.base_builder()?)
    }

    /// A client that keeps session cookies in `jar`.
    pub fn build_session_client(&self, jar: Arc<Jar>) -> Result<reqwest::Client, Error> {
        finish(self.base_builder()?.cookie_provider(jar))
    }

    fn base_builder(&self) -> Result<ClientBuilder, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);
        apply_tls(builder, &self.tls)
    }
}

fn finish(builder: ClientBuilder) -> Result<reqwest::Client, Error> {
    builder
        .build()
        .map_err(|e| Error::Tls(format!("cannot build HTTP client: {e}")))
}

fn apply_tls(builder: ClientBuilder, tls: &TlsMode) -> Result<ClientBuilder, Error> {
    match tls {
        TlsMode::System => Ok(builder),
        TlsMode::DangerAcceptInvalid => Ok(builder.danger_accept_invalid_certs(true)),
        TlsMode::CustomCa(path) => {
            let pem = std::fs::read(path).map_err(|e| {
                Error::Tls(format!("cannot read CA bundle {}: {e}", path.display()))
            })?;
            let certs = reqwest::Certificate::from_pem_bundle(&pem)
                .map_err(|e| Error::Tls(format!("bad CA bundle {}: {e}", path.display())))?;
            Ok(certs
                .into_iter()
                .fold(builder, ClientBuilder::add_root_certificate))
        }
    }
}
