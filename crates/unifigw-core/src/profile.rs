// ── Connection profile ──
//
// Raw input (form fields or a config-file table) is validated into an
// immutable `ConnectionProfile`. Validation reports every bad field at once
// and never touches the network.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use url::Url;

use unifigw_api::{ControllerPlatform, TlsMode, TransportConfig};

use crate::condition::Condition;
use crate::error::{CoreError, FieldErrors, code};

pub const DEFAULT_NAME: &str = "UniFi Gateway";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_SITE: &str = "default";
pub const DEFAULT_API_VERSION: ApiVersion = ApiVersion::V5;
pub const DEFAULT_VERIFY_TLS: bool = false;

// ── API version ─────────────────────────────────────────────────────

/// Controller API generation, as named in the configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ApiVersion {
    #[serde(rename = "v4")]
    #[strum(serialize = "v4")]
    V4,
    #[serde(rename = "v5")]
    #[strum(serialize = "v5")]
    V5,
    #[serde(rename = "unifiOS")]
    #[strum(serialize = "unifiOS")]
    UnifiOs,
    #[serde(rename = "UDMP-unifiOS")]
    #[strum(serialize = "UDMP-unifiOS")]
    UdmpUnifiOs,
    /// Probe the controller's login endpoints at connect time.
    #[serde(rename = "auto")]
    #[strum(serialize = "auto")]
    Auto,
}

impl ApiVersion {
    /// The platform this version implies, or `None` when it must be detected.
    pub fn platform(self) -> Option<ControllerPlatform> {
        match self {
            Self::V4 | Self::V5 => Some(ControllerPlatform::ClassicController),
            Self::UnifiOs | Self::UdmpUnifiOs => Some(ControllerPlatform::UnifiOs),
            Self::Auto => None,
        }
    }
}

// ── TLS verification ────────────────────────────────────────────────

/// Validated TLS verification mode: a plain switch or a CA bundle path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifyTls {
    Enabled(bool),
    CaBundle(PathBuf),
}

impl Default for VerifyTls {
    fn default() -> Self {
        Self::Enabled(DEFAULT_VERIFY_TLS)
    }
}

impl VerifyTls {
    pub fn tls_mode(&self) -> TlsMode {
        match self {
            Self::Enabled(true) => TlsMode::System,
            Self::Enabled(false) => TlsMode::DangerAcceptInvalid,
            Self::CaBundle(path) => TlsMode::CustomCa(path.clone()),
        }
    }
}

// ── Raw input ───────────────────────────────────────────────────────

/// `verify_tls` as entered: a boolean, or text that is either a boolean
/// word or a certificate bundle path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifyTlsInput {
    Flag(bool),
    Text(String),
}

/// `port` as entered: forms and environment variables may hand it over as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortInput {
    Number(i64),
    Text(String),
}

/// `monitored_conditions` as entered: a list, or one bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionsInput {
    One(String),
    Many(Vec<String>),
}

impl ConditionsInput {
    pub fn names(&self) -> &[String] {
        match self {
            Self::One(name) => std::slice::from_ref(name),
            Self::Many(names) => names,
        }
    }
}

impl From<Vec<String>> for ConditionsInput {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

/// Unvalidated connection parameters.
///
/// Every field is optional here; [`validate`] applies defaults and decides
/// which absences are errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        default,
        rename = "version",
        alias = "api_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_version: Option<String>,
    #[serde(
        default,
        alias = "verify_ssl",
        skip_serializing_if = "Option::is_none"
    )]
    pub verify_tls: Option<VerifyTlsInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitored_conditions: Option<ConditionsInput>,
}

// ── Validated profile ───────────────────────────────────────────────

/// Validated connection parameters for one controller.
///
/// Immutable once built; a reconfiguration builds a new one.
#[derive(Debug, Clone)]
pub struct ConnectionProfile {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub site_id: String,
    pub username: String,
    pub password: SecretString,
    pub api_version: ApiVersion,
    pub verify_tls: VerifyTls,
    pub monitored_conditions: BTreeSet<Condition>,
}

impl ConnectionProfile {
    /// Controller root URL: `https://{host}:{port}` unless `host` carries
    /// its own scheme.
    pub fn controller_url(&self) -> Result<Url, url::ParseError> {
        controller_url(&self.host, self.port)
    }

    /// HTTP transport settings for this profile.
    pub fn transport(&self, timeout: Duration) -> TransportConfig {
        TransportConfig::default()
            .with_tls(self.verify_tls.tls_mode())
            .with_timeout(timeout)
    }
}

fn controller_url(host: &str, port: u16) -> Result<Url, url::ParseError> {
    let raw = if host.contains("://") {
        host.to_owned()
    } else if host.contains(':') && !host.starts_with('[') {
        // Bare IPv6 literal.
        format!("https://[{host}]")
    } else {
        format!("https://{host}")
    };
    let mut url = Url::parse(&raw)?;
    if url.host_str().is_none() || url.set_port(Some(port)).is_err() {
        return Err(url::ParseError::EmptyHost);
    }
    Ok(url)
}

/// `gw.lan:8443` or `10.0.0.1:443`: a scheme-less host with one colon
/// followed by digits. Bare IPv6 literals have more than one colon.
fn has_port_suffix(host: &str) -> bool {
    if host.contains("://") || host.starts_with('[') {
        return false;
    }
    match host.split_once(':') {
        Some((name, port)) => {
            !name.is_empty()
                && !port.contains(':')
                && !port.is_empty()
                && port.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

// ── Validation ──────────────────────────────────────────────────────

/// Validate raw input into a [`ConnectionProfile`].
///
/// `username` and `password` are required. Absent optional fields take
/// their defaults; `monitored_conditions` defaults to all seven conditions
/// but an explicit empty list is rejected.
pub fn validate(input: &ProfileInput) -> Result<ConnectionProfile, CoreError> {
    let mut errors = FieldErrors::new();

    let username = required(input.username.as_deref(), "username", &mut errors);
    let password = required(input.password.as_deref(), "password", &mut errors);

    let name = or_default(input.name.as_deref(), DEFAULT_NAME);
    let host = or_default(input.host.as_deref(), DEFAULT_HOST);
    let site_id = or_default(input.site_id.as_deref(), DEFAULT_SITE);

    let port = match &input.port {
        None => DEFAULT_PORT,
        Some(raw) => parse_port(raw).unwrap_or_else(|| {
            errors.insert("port", code::INVALID_PORT);
            DEFAULT_PORT
        }),
    };

    if has_port_suffix(&host) {
        errors.insert("host", code::HOST_HAS_PORT);
    } else if controller_url(&host, port).is_err() {
        errors.insert("host", code::INVALID_HOST);
    }

    let api_version = match input.api_version.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_API_VERSION,
        Some(raw) => ApiVersion::from_str(raw).unwrap_or_else(|_| {
            errors.insert("version", code::INVALID_VERSION);
            DEFAULT_API_VERSION
        }),
    };

    let verify_tls = match &input.verify_tls {
        None => VerifyTls::default(),
        Some(raw) => parse_verify_tls(raw).unwrap_or_else(|| {
            errors.insert("verify_tls", code::INVALID_VERIFY_TLS);
            VerifyTls::default()
        }),
    };

    let monitored_conditions = match &input.monitored_conditions {
        None => Condition::iter().collect(),
        Some(names) => parse_conditions(names.names(), &mut errors),
    };

    if !errors.is_empty() {
        return Err(CoreError::Validation { errors });
    }

    Ok(ConnectionProfile {
        name,
        host,
        port,
        site_id,
        username: username.unwrap_or_default(),
        password: SecretString::from(password.unwrap_or_default()),
        api_version,
        verify_tls,
        monitored_conditions,
    })
}

fn required(value: Option<&str>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.to_owned()),
        _ => {
            errors.insert(field, code::REQUIRED);
            None
        }
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => default.to_owned(),
    }
}

fn parse_port(raw: &PortInput) -> Option<u16> {
    let value = match raw {
        PortInput::Number(n) => *n,
        PortInput::Text(s) => s.trim().parse().ok()?,
    };
    u16::try_from(value).ok().filter(|p| *p != 0)
}

fn parse_verify_tls(raw: &VerifyTlsInput) -> Option<VerifyTls> {
    match raw {
        VerifyTlsInput::Flag(flag) => Some(VerifyTls::Enabled(*flag)),
        VerifyTlsInput::Text(text) => {
            if let Some(flag) = parse_bool_word(text) {
                return Some(VerifyTls::Enabled(flag));
            }
            let path = Path::new(text.trim());
            path.is_file()
                .then(|| VerifyTls::CaBundle(path.to_path_buf()))
        }
    }
}

fn parse_bool_word(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" => Some(true),
        "0" | "false" | "no" | "off" | "disable" => Some(false),
        _ => None,
    }
}

fn parse_conditions(names: &[String], errors: &mut FieldErrors) -> BTreeSet<Condition> {
    let mut set = BTreeSet::new();
    for name in names {
        match Condition::from_str(name.trim()) {
            Ok(condition) => {
                set.insert(condition);
            }
            Err(_) => errors.insert("monitored_conditions", code::UNKNOWN_CONDITION),
        }
    }
    if names.is_empty() {
        errors.insert("monitored_conditions", code::NO_CONDITIONS);
    }
    set
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn minimal() -> ProfileInput {
        ProfileInput {
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            ..ProfileInput::default()
        }
    }

    fn errors_of(input: &ProfileInput) -> FieldErrors {
        match validate(input) {
            Err(CoreError::Validation { errors }) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let profile = validate(&minimal()).unwrap();
        assert_eq!(profile.name, "UniFi Gateway");
        assert_eq!(profile.host, "localhost");
        assert_eq!(profile.port, 443);
        assert_eq!(profile.site_id, "default");
        assert_eq!(profile.api_version, ApiVersion::V5);
        assert_eq!(profile.verify_tls, VerifyTls::Enabled(false));
        assert_eq!(profile.monitored_conditions.len(), 7);
        assert_eq!(profile.password.expose_secret(), "hunter2");
    }

    #[test]
    fn missing_username_and_password_are_required() {
        let errors = errors_of(&ProfileInput::default());
        assert_eq!(errors.get("username"), Some(code::REQUIRED));
        assert_eq!(errors.get("password"), Some(code::REQUIRED));
    }

    #[test]
    fn blank_password_is_missing() {
        let input = ProfileInput {
            password: Some("   ".into()),
            ..minimal()
        };
        assert_eq!(errors_of(&input).get("password"), Some(code::REQUIRED));
    }

    #[test]
    fn port_range_is_enforced() {
        for bad in [
            PortInput::Number(0),
            PortInput::Number(65536),
            PortInput::Number(-1),
            PortInput::Text("https".into()),
        ] {
            let input = ProfileInput {
                port: Some(bad),
                ..minimal()
            };
            assert_eq!(errors_of(&input).get("port"), Some(code::INVALID_PORT));
        }

        let input = ProfileInput {
            port: Some(PortInput::Text(" 8443 ".into())),
            ..minimal()
        };
        assert_eq!(validate(&input).unwrap().port, 8443);
    }

    #[test]
    fn every_non_empty_subset_of_conditions_is_accepted() {
        let all: Vec<Condition> = Condition::iter().collect();
        for mask in 1u32..(1 << all.len()) {
            let names: Vec<String> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| c.name().to_owned())
                .collect();
            let input = ProfileInput {
                monitored_conditions: Some(names.clone().into()),
                ..minimal()
            };
            let profile = validate(&input).unwrap();
            assert_eq!(profile.monitored_conditions.len(), names.len());
        }
    }

    #[test]
    fn unknown_condition_is_rejected() {
        let input = ProfileInput {
            monitored_conditions: Some(ConditionsInput::Many(vec!["wan".into(), "dhcp".into()])),
            ..minimal()
        };
        assert_eq!(
            errors_of(&input).get("monitored_conditions"),
            Some(code::UNKNOWN_CONDITION)
        );
    }

    #[test]
    fn empty_condition_list_is_rejected() {
        let input = ProfileInput {
            monitored_conditions: Some(ConditionsInput::Many(Vec::new())),
            ..minimal()
        };
        assert_eq!(
            errors_of(&input).get("monitored_conditions"),
            Some(code::NO_CONDITIONS)
        );
    }

    #[test]
    fn duplicate_conditions_collapse() {
        let input = ProfileInput {
            monitored_conditions: Some(ConditionsInput::Many(vec![
                "wan".into(),
                "wan".into(),
                "lan".into(),
            ])),
            ..minimal()
        };
        let profile = validate(&input).unwrap();
        assert_eq!(
            profile.monitored_conditions.into_iter().collect::<Vec<_>>(),
            vec![Condition::Wan, Condition::Lan]
        );
    }

    #[test]
    fn verify_tls_accepts_bool_words_and_existing_bundle() {
        let input = ProfileInput {
            verify_tls: Some(VerifyTlsInput::Text("Yes".into())),
            ..minimal()
        };
        assert_eq!(validate(&input).unwrap().verify_tls, VerifyTls::Enabled(true));

        let mut bundle = tempfile::NamedTempFile::new().unwrap();
        bundle.write_all(b"-----BEGIN CERTIFICATE-----\n").unwrap();
        let path = bundle.path().to_path_buf();
        let input = ProfileInput {
            verify_tls: Some(VerifyTlsInput::Text(path.display().to_string())),
            ..minimal()
        };
        let profile = validate(&input).unwrap();
        assert_eq!(profile.verify_tls, VerifyTls::CaBundle(path.clone()));
        assert_eq!(profile.verify_tls.tls_mode(), TlsMode::CustomCa(path));
    }

    #[test]
    fn verify_tls_rejects_missing_bundle() {
        let input = ProfileInput {
            verify_tls: Some(VerifyTlsInput::Text("/nonexistent/ca.pem".into())),
            ..minimal()
        };
        assert_eq!(
            errors_of(&input).get("verify_tls"),
            Some(code::INVALID_VERIFY_TLS)
        );
    }

    #[test]
    fn api_versions() {
        for (raw, expected) in [
            ("v4", ApiVersion::V4),
            ("unifiOS", ApiVersion::UnifiOs),
            ("UDMP-unifiOS", ApiVersion::UdmpUnifiOs),
            ("auto", ApiVersion::Auto),
        ] {
            let input = ProfileInput {
                api_version: Some(raw.into()),
                ..minimal()
            };
            assert_eq!(validate(&input).unwrap().api_version, expected);
        }

        let input = ProfileInput {
            api_version: Some("v9".into()),
            ..minimal()
        };
        assert_eq!(errors_of(&input).get("version"), Some(code::INVALID_VERSION));
    }

    #[test]
    fn controller_url_forms() {
        let mut profile = validate(&minimal()).unwrap();
        profile.host = "192.168.1.1".into();
        assert_eq!(
            profile.controller_url().unwrap().as_str(),
            "https://192.168.1.1/"
        );

        profile.port = 8443;
        profile.host = "http://controller.lan".into();
        assert_eq!(
            profile.controller_url().unwrap().as_str(),
            "http://controller.lan:8443/"
        );

        profile.host = "fd00::1".into();
        assert_eq!(
            profile.controller_url().unwrap().as_str(),
            "https://[fd00::1]:8443/"
        );
    }

    #[test]
    fn input_reads_original_field_names() {
        let input: ProfileInput = serde_json::from_value(serde_json::json!({
            "username": "admin",
            "password": "pw",
            "version": "unifiOS",
            "verify_ssl": true,
            "port": "8443",
            "monitored_conditions": ["wan", "alerts"]
        }))
        .unwrap();
        assert_eq!(input.api_version.as_deref(), Some("unifiOS"));
        assert_eq!(input.verify_tls, Some(VerifyTlsInput::Flag(true)));
        assert_eq!(input.port, Some(PortInput::Text("8443".into())));
    }

    #[test]
    fn single_condition_name_is_a_one_item_list() {
        let input: ProfileInput = serde_json::from_value(serde_json::json!({
            "username": "a",
            "password": "b",
            "monitored_conditions": "wan"
        }))
        .unwrap();
        assert_eq!(
            input.monitored_conditions,
            Some(ConditionsInput::One("wan".into()))
        );
        let profile = validate(&input).unwrap();
        assert_eq!(
            profile.monitored_conditions.into_iter().collect::<Vec<_>>(),
            [Condition::Wan]
        );

        let input = ProfileInput {
            monitored_conditions: Some(ConditionsInput::One("dhcp".into())),
            ..minimal()
        };
        assert_eq!(
            errors_of(&input).get("monitored_conditions"),
            Some(code::UNKNOWN_CONDITION)
        );
    }

    #[test]
    fn host_with_port_gets_its_own_code() {
        for host in ["gw.lan:8443", "10.0.0.1:443"] {
            let input = ProfileInput {
                host: Some(host.into()),
                ..minimal()
            };
            assert_eq!(errors_of(&input).get("host"), Some(code::HOST_HAS_PORT), "{host}");
        }
        for host in ["fd00::1", "[fd00::1]", "https://gw.lan:8443", "gw.lan"] {
            let input = ProfileInput {
                host: Some(host.into()),
                ..minimal()
            };
            assert!(validate(&input).is_ok(), "{host}");
        }
    }
}
