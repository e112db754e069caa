//! `conditions`: the static sensor table.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use unifigw_core::Condition;

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct ConditionInfo {
    name: &'static str,
    label: &'static str,
    icon: &'static str,
}

#[derive(Tabled)]
struct ConditionRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Icon")]
    icon: &'static str,
}

pub fn handle(settings: &Settings) -> Result<(), CliError> {
    let conditions: Vec<ConditionInfo> = Condition::iter()
        .map(|c| {
            let meta = c.meta();
            ConditionInfo {
                name: c.name(),
                label: meta.label,
                icon: meta.icon,
            }
        })
        .collect();

    let out = output::render_list(
        settings.output,
        &conditions,
        |c| ConditionRow {
            name: c.name,
            label: c.label,
            icon: c.icon,
        },
        |c| c.name.to_owned(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
