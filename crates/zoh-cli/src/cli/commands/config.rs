//! `zoh config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::{mask, Config};
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut config = Config::load()?;
    config.access_token = config.access_token.as_deref().map(mask);

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&config)?);
        }
        _ => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let token = config
                .access_token
                .unwrap_or_else(|| "(not set)".dimmed().to_string());
            println!("  {} {}", "access_token:".bold(), token);
            println!("  {} {}", "region:".bold(), config.region.unwrap_or_default());
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );
            println!(
                "  {} {}",
                "page_size:".bold(),
                config.page_size.unwrap_or(zoh_client::DEFAULT_PAGE_SIZE)
            );
        }
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let shown = if key.contains("token") { mask(value) } else { value.to_string() };
    println!("{} {} set to {}.", "Success:".green().bold(), key, shown.cyan());

    Ok(())
}

fn show_path() -> Result<()> {
    println!("{}", Config::path()?.display());
    Ok(())
}
