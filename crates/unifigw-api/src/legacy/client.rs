// Session-holding HTTP client for the legacy endpoints
//
// One client per controller session. Requests carry the session cookie from
// the client's own jar; responses are decoded by `decode`, which strips the
// `{ meta, data }` envelope and classifies failures.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::Jar;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::ControllerPlatform;
use crate::error::Error;
use crate::legacy::models::LegacyResponse;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Authenticated handle on one site of one controller.
///
/// Cheap to share behind `Arc`; every method takes `&self`.
pub struct LegacyClient {
    pub(super) http: reqwest::Client,
    pub(super) controller: Url,
    site: String,
    platform: ControllerPlatform,
}

impl LegacyClient {
    /// Build an unauthenticated client with its own cookie jar.
    ///
    /// `controller` is the controller root, e.g. `https://192.168.1.1`.
    /// Call [`login`](Self::login) before any endpoint method.
    pub fn new(
        controller: Url,
        site: impl Into<String>,
        platform: ControllerPlatform,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_session_client(Arc::new(Jar::default()))?;
        Ok(Self {
            http,
            controller,
            site: site.into(),
            platform,
        })
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn platform(&self) -> ControllerPlatform {
        self.platform
    }

    pub fn controller(&self) -> &Url {
        &self.controller
    }

    /// `{controller}{prefix}/api/s/{site}/{path}`.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let scoped = format!(
            "{}/api/s/{}/{path}",
            self.platform.legacy_prefix(),
            self.site
        );
        Ok(self.controller.join(&scoped)?)
    }

    /// GET a site-scoped endpoint and return its `data` array.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        decode(status, &body)
    }
}

/// Console-style failure, sent by UniFi OS with HTTP 200.
#[derive(Deserialize)]
struct ConsoleFailure {
    error: ConsoleFailureBody,
}

#[derive(Deserialize)]
struct ConsoleFailureBody {
    code: u16,
    #[serde(default)]
    message: String,
}

/// Classify a legacy response and unwrap its `data` array.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<Vec<T>, Error> {
    match status {
        StatusCode::UNAUTHORIZED => {
            return Err(Error::Authentication {
                message: "session expired or credentials rejected".into(),
            });
        }
        StatusCode::FORBIDDEN => {
            return Err(Error::LegacyApi {
                message: "account lacks permission for this site (HTTP 403)".into(),
            });
        }
        s if !s.is_success() => {
            return Err(Error::LegacyApi {
                message: format!("HTTP {s}: {}", preview(body)),
            });
        }
        _ => {}
    }

    if let Ok(ConsoleFailure { error }) = serde_json::from_str(body) {
        return Err(match error.code {
            401 => Error::Authentication {
                message: error.message,
            },
            code => Error::LegacyApi {
                message: format!("console error {code}: {}", error.message),
            },
        });
    }

    let envelope: LegacyResponse<T> =
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            message: format!("{e} in {:?}", preview(body)),
            body: body.to_owned(),
        })?;

    if envelope.meta.rc == "ok" {
        Ok(envelope.data)
    } else {
        Err(Error::LegacyApi {
            message: envelope
                .meta
                .msg
                .unwrap_or_else(|| format!("rc={}", envelope.meta.rc)),
        })
    }
}

fn preview(body: &str) -> &str {
    body.char_indices()
        .nth(BODY_PREVIEW_CHARS)
        .map_or(body, |(end, _)| &body[..end])
}
