//! Shared configuration for unifigw hosts.
//!
//! TOML profiles, `UNIFIGW_` environment overrides, and password resolution
//! (env + keyring + plaintext). Profiles hold raw input; validation belongs
//! to `unifigw_core::validate`, so this crate never rejects a field itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use unifigw_core::{OptionsDocument, ProfileInput};

const KEYRING_SERVICE: &str = "unifigw";
const ENV_PREFIX: &str = "UNIFIGW_";
const PASSWORD_ENV: &str = "UNIFIGW_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named gateway profiles.
    #[serde(default)]
    pub profiles: HashMap<String, ProfileEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&ProfileEntry, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.profile_names(),
            })
    }

    pub fn profile_mut(&mut self, name: &str) -> Result<&mut ProfileEntry, ConfigError> {
        let available = self.profile_names();
        self.profiles
            .get_mut(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available,
            })
    }

    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        names
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Seconds between host update triggers.
    #[serde(default = "default_trigger_interval")]
    pub trigger_interval: u64,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            trigger_interval: default_trigger_interval(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_trigger_interval() -> u64 {
    10
}
fn default_timeout() -> u64 {
    30
}

/// A named gateway profile: raw connection input plus stored options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileEntry {
    #[serde(flatten)]
    pub input: ProfileInput,

    #[serde(default, skip_serializing_if = "OptionsDocument::is_empty")]
    pub options: OptionsDocument,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    let dir = ProjectDirs::from("com", "unifigw", "unifigw").map_or_else(
        || {
            let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
            home.join(".config").join("unifigw")
        },
        |dirs| dirs.config_dir().to_path_buf(),
    );
    dir.join("config.toml")
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, with `UNIFIGW_` environment variables on top.
///
/// Nested keys split on `_`, e.g. `UNIFIGW_PROFILES_HOME_HOST` sets
/// `profiles.home.host`. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("_"));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file doesn't exist or is unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a profile's password.
///
/// Order: `UNIFIGW_PASSWORD`, the system keyring entry
/// `"{profile}/password"`, then plaintext in the profile. `None` means no
/// source had one; validation will report it as missing.
pub fn resolve_password(entry: &ProfileEntry, profile_name: &str) -> Option<SecretString> {
    resolve_password_from(
        entry,
        std::env::var(PASSWORD_ENV).ok(),
        || keyring_password(profile_name),
    )
}

fn resolve_password_from(
    entry: &ProfileEntry,
    env: Option<String>,
    keyring: impl FnOnce() -> Option<String>,
) -> Option<SecretString> {
    // 1. Env var
    if let Some(pw) = env.filter(|pw| !pw.is_empty()) {
        debug!("password from environment");
        return Some(SecretString::from(pw));
    }

    // 2. Keyring
    if let Some(pw) = keyring() {
        debug!("password from keyring");
        return Some(SecretString::from(pw));
    }

    // 3. Plaintext in config
    entry.input.password.clone().map(SecretString::from)
}

fn keyring_password(profile_name: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .and_then(|entry| entry.get_password())
        .ok()
}

/// The profile's raw input with its password resolved and its name
/// defaulted to the profile key.
pub fn resolve_input(entry: &ProfileEntry, profile_name: &str) -> ProfileInput {
    let mut input = entry.input.clone();
    input.name.get_or_insert_with(|| profile_name.to_owned());
    input.password = resolve_password(entry, profile_name).map(|pw| pw.expose_secret().to_owned());
    input
}
