//! `check`: validate the profile, prove the credentials, log out.

use serde::Serialize;

use unifigw_config::Config;

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct CheckReport {
    profile: String,
    title: String,
    controller: String,
    site: String,
    version: String,
    conditions: Vec<&'static str>,
}

fn detail(r: &CheckReport) -> String {
    [
        format!("Profile:    {}", r.profile),
        format!("Title:      {}", r.title),
        format!("Controller: {}", r.controller),
        format!("Site:       {}", r.site),
        format!("Version:    {}", r.version),
        format!("Conditions: {}", r.conditions.join(", ")),
    ]
    .join("\n")
}

pub async fn handle(cfg: &Config, settings: &Settings) -> Result<(), CliError> {
    let entry = super::connect(cfg, settings).await?;
    super::logout(&entry).await;

    let profile = &entry.profile;
    let report = CheckReport {
        profile: settings.profile.clone(),
        title: entry.title().to_owned(),
        controller: profile
            .controller_url()
            .map_or_else(|_| profile.host.clone(), |u| u.to_string()),
        site: profile.site_id.clone(),
        version: profile.api_version.to_string(),
        conditions: profile.monitored_conditions.iter().map(|c| c.name()).collect(),
    };

    let out = output::render_single(settings.output, &report, detail)?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
