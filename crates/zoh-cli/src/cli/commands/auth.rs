//! `zoh auth` - Access token information.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{AuthArgs, AuthCommands};
use crate::config::mask;
use crate::output::render_record;

pub async fn execute(ctx: Context, args: AuthArgs) -> Result<()> {
    match args.command {
        AuthCommands::Info => show_info(ctx).await,
    }
}

async fn show_info(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let token = ctx.require_token()?;
    let info = client.accounts().token_info(token).await?;

    if let Some(out) = render_record(ctx.output_format, &info)? {
        println!("{out}");
        return Ok(());
    }

    println!("{} {}", "Token:".bold(), mask(token));
    println!("{} {}", "Region:".bold(), ctx.region);

    match info.expires_in {
        Some(secs) if secs > 300 => println!("{} {}s", "Expires in:".bold(), secs.to_string().green()),
        Some(secs) if secs > 0 => println!("{} {}s", "Expires in:".bold(), secs.to_string().yellow()),
        Some(_) => println!("{} {}", "Expires in:".bold(), "expired".red()),
        None => {}
    }

    println!();
    println!("{}", "Scopes:".bold().underline());
    let mut scopes = info.scopes().peekable();
    if scopes.peek().is_none() {
        println!("  (none reported)");
    }
    for scope in scopes {
        println!("  {scope}");
    }

    Ok(())
}
