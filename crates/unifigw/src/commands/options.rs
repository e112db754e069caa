//! `options show` / `options set`.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use unifigw_config::Config;
use unifigw_core::{OptionsDocument, OptionsFlow, SessionConnector};

use crate::cli::{OptionsArgs, OptionsCommand};
use crate::config::{Settings, save_config};
use crate::error::CliError;
use crate::output;

#[derive(Clone, Serialize, Tabled)]
struct OptionRow {
    #[tabled(rename = "Option")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: bool,
}

/// Every known platform with its effective value, then any extra stored flags.
fn rows(options: &OptionsDocument) -> Vec<OptionRow> {
    let mut rows: Vec<OptionRow> = options
        .form_defaults()
        .into_iter()
        .map(|(name, enabled)| OptionRow {
            name: name.into(),
            enabled,
        })
        .collect();
    for (name, enabled) in options.iter() {
        if !rows.iter().any(|r| r.name == name) {
            rows.push(OptionRow {
                name: name.into(),
                enabled,
            });
        }
    }
    rows
}

fn show(options: &OptionsDocument, settings: &Settings) -> Result<(), CliError> {
    let rows = rows(options);
    let out = output::render_list(settings.output, &rows, Clone::clone, |r| {
        format!("{}={}", r.name, r.enabled)
    })?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

pub async fn handle(
    mut cfg: Config,
    args: OptionsArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    match args.command {
        OptionsCommand::Show => show(&cfg.profile(&settings.profile)?.options, settings),

        OptionsCommand::Set { pairs } => {
            let update: OptionsDocument = pairs.into_iter().collect();

            let mut entry = super::connect(&cfg, settings).await?;
            let previous = Arc::clone(&entry.handle);

            OptionsFlow::new(SessionConnector::new(settings.timeout))
                .apply(&mut entry, &update)
                .await
                .map_err(|e| CliError::from_core(e, &settings.profile))?;

            cfg.profile_mut(&settings.profile)?.options = entry.options.clone();
            save_config(&cfg)?;
            info!(profile = %settings.profile, "options saved");

            if let Err(e) = previous.logout().await {
                tracing::warn!(error = %e, "logout failed");
            }
            super::logout(&entry).await;

            show(&entry.options, settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_list_platforms_then_extra_flags() {
        let stored: OptionsDocument = [("zeta", true), ("sensor", false)].into_iter().collect();
        let rows = rows(&stored);
        let flat: Vec<(&str, bool)> = rows.iter().map(|r| (r.name.as_str(), r.enabled)).collect();
        assert_eq!(flat, [("sensor", false), ("zeta", true)]);
    }

    #[test]
    fn empty_document_shows_platform_defaults() {
        let rows = rows(&OptionsDocument::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "sensor");
        assert!(rows[0].enabled);
    }
}
