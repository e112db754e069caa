//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use unifigw_config::ConfigError;
use unifigw_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFIG: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed for profile '{profile}'")]
    #[diagnostic(
        code(unifigw::auth_failed),
        help(
            "Could not log in to the gateway: {message}\n\
             Check host, port, and credentials. The password is read from\n\
             UNIFIGW_PASSWORD, the keyring entry \"{profile}/password\", or the profile."
        )
    )]
    AuthFailed { profile: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Profile '{profile}' is invalid: {errors}")]
    #[diagnostic(
        code(unifigw::validation),
        help("Fix the listed fields in [profiles.{profile}] of {path}")
    )]
    Validation {
        profile: String,
        errors: String,
        path: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(unifigw::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No gateway profiles configured")]
    #[diagnostic(
        code(unifigw::no_config),
        help(
            "Add a [profiles.<name>] table with host, username, and password.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(unifigw::config))]
    Config(#[source] ConfigError),

    // ── Controller ───────────────────────────────────────────────────
    #[error("Controller request failed: {message}")]
    #[diagnostic(code(unifigw::controller))]
    Controller { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    #[diagnostic(code(unifigw::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    #[diagnostic(code(unifigw::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::Config(_) => exit_code::CONFIG,
            Self::Controller { .. } | Self::Io(_) | Self::Json(_) | Self::Yaml(_) => {
                exit_code::GENERAL
            }
        }
    }

    /// Map a core error raised while working on `profile`.
    pub fn from_core(err: CoreError, profile: &str) -> Self {
        match err {
            CoreError::Validation { errors } => Self::Validation {
                profile: profile.into(),
                errors: errors.to_string(),
                path: unifigw_config::config_path().display().to_string(),
            },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                profile: profile.into(),
                message,
            },
            other @ (CoreError::Fetch { .. } | CoreError::Unsupported { .. }) => Self::Controller {
                message: other.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { available, .. } if available.is_empty() => {
                Self::NoConfig {
                    path: unifigw_config::config_path().display().to_string(),
                }
            }
            ConfigError::ProfileNotFound { name, available } => Self::ProfileNotFound {
                name,
                available: available.join(", "),
            },
            other => Self::Config(other),
        }
    }
}
