// Session login/logout and platform probing
//
// Login leaves a session cookie (`unifises` or `TOKEN`) in the client's jar.
// Nothing else is kept: the controller forgets us on logout or expiry.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::auth::ControllerPlatform;
use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::transport::TransportConfig;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl LegacyClient {
    /// Open a session. Any non-2xx answer is reported as rejected
    /// credentials; connection failures stay [`Error::Transport`].
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.controller.join(self.platform().login_path())?;
        debug!(%url, username, "login");

        let resp = self
            .http
            .post(url)
            .json(&Credentials {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            info!(site = self.site(), "session opened");
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Error::Authentication {
            message: format!("controller answered {status} to login: {}", body.trim()),
        })
    }

    /// Close the session. The response body is ignored.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.controller.join(self.platform().logout_path())?;
        debug!(%url, "logout");
        self.http.post(url).send().await?;
        Ok(())
    }

    /// Work out which login path `controller` serves.
    ///
    /// UniFi OS answers `GET /api/auth/login` with something other than 404
    /// (usually 401 or 405). A classic controller 404s there, so a second
    /// request to `/api/login` only has to prove the host is reachable.
    pub async fn detect_platform(
        controller: &Url,
        transport: &TransportConfig,
    ) -> Result<ControllerPlatform, Error> {
        let http = transport.build_client()?;

        let unifi_os = controller.join(ControllerPlatform::UnifiOs.login_path())?;
        match http.get(unifi_os).send().await {
            Ok(resp) if resp.status() != StatusCode::NOT_FOUND => {
                debug!(status = %resp.status(), "UniFi OS login path present");
                return Ok(ControllerPlatform::UnifiOs);
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "UniFi OS probe failed"),
        }

        let classic = controller.join(ControllerPlatform::ClassicController.login_path())?;
        http.get(classic).send().await?;
        debug!("falling back to classic controller paths");
        Ok(ControllerPlatform::ClassicController)
    }
}
