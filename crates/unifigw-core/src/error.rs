// ── Core error types ──
//
// Setup-time errors (validation, authentication) surface to the caller.
// Poll-time errors (fetch, capability) are built here too, but the sensor
// poller only logs them and keeps its last reading.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Form-level key used for errors that belong to no single field.
pub const BASE_FIELD: &str = "base";

/// Error codes reported per field by validation and the setup flow.
pub mod code {
    pub const REQUIRED: &str = "required";
    pub const INVALID_HOST: &str = "invalid_host";
    /// `host` carries `:port`; the port belongs in its own field.
    pub const HOST_HAS_PORT: &str = "host_has_port";
    pub const INVALID_PORT: &str = "invalid_port";
    pub const INVALID_VERIFY_TLS: &str = "invalid_verify_tls";
    pub const INVALID_VERSION: &str = "invalid_version";
    pub const UNKNOWN_CONDITION: &str = "unknown_condition";
    pub const NO_CONDITIONS: &str = "no_conditions";
    /// The one credential-check failure code.
    pub const AUTH: &str = "auth";
}

/// Field name -> error code mapping, as shown next to a setup form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first error recorded for a field wins.
    pub fn insert(&mut self, field: &str, code: &'static str) {
        self.0.entry(field.to_owned()).or_insert(code);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, code) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {code}")?;
            first = false;
        }
        Ok(())
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Setup errors (surface to the caller) ────────────────────────
    #[error("Validation failed: {errors}")]
    Validation { errors: FieldErrors },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Poll errors (logged, never propagated by sensors) ───────────
    #[error("Failed to fetch {resource}: {source}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: unifigw_api::Error,
    },

    #[error("Controller does not support {operation}")]
    Unsupported { operation: String },
}

impl CoreError {
    /// Wrap a client-library error raised while fetching `resource`.
    ///
    /// A missing endpoint on the handle becomes [`CoreError::Unsupported`];
    /// everything else is a fetch failure.
    pub fn fetch(resource: &'static str, err: unifigw_api::Error) -> Self {
        match err {
            unifigw_api::Error::UnsupportedOperation(op) => Self::Unsupported {
                operation: op.to_owned(),
            },
            source => Self::Fetch { resource, source },
        }
    }

    /// Errors as a per-field mapping for a setup form.
    ///
    /// Authentication failures collapse to the generic `"auth"` code on the
    /// form-level key. Poll errors never reach a form and map to nothing.
    pub fn form_errors(&self) -> FieldErrors {
        match self {
            Self::Validation { errors } => errors.clone(),
            Self::AuthenticationFailed { .. } => {
                let mut errors = FieldErrors::new();
                errors.insert(BASE_FIELD, code::AUTH);
                errors
            }
            Self::Fetch { .. } | Self::Unsupported { .. } => FieldErrors::new(),
        }
    }
}
