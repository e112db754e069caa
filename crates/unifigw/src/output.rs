//! Rendering for `--output`.
//!
//! Structured formats serialize the command's own data; `table` and `plain`
//! go through a per-command row type or line function.

use std::io::{self, Write};

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Serialize `data` for the structured formats; `None` for table/plain.
fn structured<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<Option<String>, CliError> {
    Ok(Some(match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Table | OutputFormat::Plain => return Ok(None),
    }))
}

/// A collection: one table row or plain line per item.
pub fn render_list<T, R>(
    format: OutputFormat,
    items: &[T],
    row: impl Fn(&T) -> R,
    line: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    if let Some(text) = structured(format, items)? {
        return Ok(text);
    }
    Ok(if format == OutputFormat::Plain {
        items.iter().map(line).collect::<Vec<_>>().join("\n")
    } else {
        let rows: Vec<R> = items.iter().map(row).collect();
        Table::new(rows).with(Style::rounded()).to_string()
    })
}

/// One record. Table and plain both use the `describe` text.
pub fn render_single<T: Serialize>(
    format: OutputFormat,
    item: &T,
    describe: impl Fn(&T) -> String,
) -> Result<String, CliError> {
    Ok(structured(format, item)?.unwrap_or_else(|| describe(item)))
}

/// Write to stdout unless `--quiet` or there is nothing to show.
pub fn print_output(text: &str, quiet: bool) {
    if quiet || text.is_empty() {
        return;
    }
    // A closed pipe (`| head`) is not an error worth reporting.
    let _ = writeln!(io::stdout().lock(), "{text}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Reading {
        sensor: &'static str,
        value: usize,
    }

    #[derive(Tabled)]
    struct ReadingRow {
        #[tabled(rename = "Sensor")]
        sensor: &'static str,
    }

    fn render(format: OutputFormat) -> String {
        let readings = [
            Reading { sensor: "WAN", value: 1 },
            Reading { sensor: "LAN", value: 2 },
        ];
        render_list(
            format,
            &readings,
            |r| ReadingRow { sensor: r.sensor },
            |r| format!("{}\t{}", r.sensor, r.value),
        )
        .unwrap()
    }

    #[test]
    fn list_formats() {
        assert!(render(OutputFormat::Table).contains("Sensor"));
        assert_eq!(
            render(OutputFormat::JsonCompact),
            r#"[{"sensor":"WAN","value":1},{"sensor":"LAN","value":2}]"#
        );
        assert!(render(OutputFormat::Yaml).contains("- sensor: WAN"));
        assert_eq!(render(OutputFormat::Plain), "WAN\t1\nLAN\t2");
    }

    #[test]
    fn single_uses_description_for_human_formats() {
        let r = Reading { sensor: "WAN", value: 1 };
        let describe = |r: &Reading| format!("{} is {}", r.sensor, r.value);
        assert_eq!(render_single(OutputFormat::Table, &r, describe).unwrap(), "WAN is 1");
        assert_eq!(render_single(OutputFormat::Plain, &r, describe).unwrap(), "WAN is 1");
        assert_eq!(
            render_single(OutputFormat::JsonCompact, &r, describe).unwrap(),
            r#"{"sensor":"WAN","value":1}"#
        );
    }
}
