//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render a list of records.
///
/// Machine formats serialize the records themselves; `pretty` renders the
/// rows produced by `to_row` as a table.
pub fn render_list<T, R>(
    format: OutputFormat,
    records: &[T],
    to_row: impl Fn(&T) -> R,
) -> Result<String>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(records)?),
        OutputFormat::Csv => to_csv(records),
        OutputFormat::Pretty => {
            let rows: Vec<R> = records.iter().map(to_row).collect();
            Ok(Table::new(rows).with(Style::rounded()).to_string())
        }
    }
}

/// Render one record in a machine format, or `None` for `pretty`.
pub fn render_record<T: Serialize>(format: OutputFormat, record: &T) -> Result<Option<String>> {
    Ok(match format {
        OutputFormat::Json => Some(serde_json::to_string_pretty(record)?),
        OutputFormat::Yaml => Some(serde_yaml::to_string(record)?),
        OutputFormat::Csv => Some(to_csv(std::slice::from_ref(record))?),
        OutputFormat::Pretty => None,
    })
}

fn to_csv<T: Serialize>(records: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Format Unix milliseconds for display.
pub fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .filter(|_| millis > 0)
        .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}
