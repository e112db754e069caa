//! CLI configuration: a thin layer over `unifigw_config`.
//!
//! Resolves global settings (profile, output, timeout, trigger interval)
//! with command-line flags taking priority over the config file.

use std::time::Duration;

use clap::ValueEnum;
use unifigw_config::Config;

use crate::cli::{GlobalOpts, OutputFormat};

pub use unifigw_config::{load_config, save_config};

/// Settings shared by every command after flag and config resolution.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: String,
    pub output: OutputFormat,
    pub quiet: bool,
    pub timeout: Duration,
    pub trigger_interval: Duration,
}

impl Settings {
    pub fn resolve(global: &GlobalOpts, config: &Config) -> Self {
        Self {
            profile: active_profile_name(global, config),
            output: global
                .output
                .or_else(|| OutputFormat::from_str(&config.defaults.output, true).ok())
                .unwrap_or(OutputFormat::Table),
            quiet: global.quiet,
            timeout: Duration::from_secs(global.timeout.unwrap_or(config.defaults.timeout)),
            trigger_interval: Duration::from_secs(config.defaults.trigger_interval.max(1)),
        }
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}
