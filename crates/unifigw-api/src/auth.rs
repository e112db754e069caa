/// Which flavour of controller serves the Network application.
///
/// The two differ only in where the legacy endpoints and the session
/// endpoints live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPlatform {
    /// UniFi OS consoles (UDM, UCG, UDR): the Network app sits behind
    /// `/proxy/network` and sessions go through `/api/auth/*`.
    UnifiOs,
    /// Self-hosted Network Application, usually on port 8443.
    ClassicController,
}

impl ControllerPlatform {
    /// Prepended to `/api/s/{site}/...`.
    pub fn legacy_prefix(self) -> &'static str {
        match self {
            Self::UnifiOs => "/proxy/network",
            Self::ClassicController => "",
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            Self::UnifiOs => "/api/auth/login",
            Self::ClassicController => "/api/login",
        }
    }

    pub fn logout_path(self) -> &'static str {
        match self {
            Self::UnifiOs => "/api/auth/logout",
            Self::ClassicController => "/api/logout",
        }
    }
}
