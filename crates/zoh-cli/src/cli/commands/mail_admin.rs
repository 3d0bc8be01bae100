//! `zoh mail admin` - Organization-wide mail settings.

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;
use zoh_core::{DeliveryLog, SpamCategory};

use super::{Context, Listing};
use crate::cli::args::{MailAdminArgs, MailAdminCommands, PageArgs, SpamCommands};
use crate::output::{format_millis, render_list, OutputFormat};

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Sent")]
    sent: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Subject")]
    subject: String,
}

impl LogRow {
    fn new(log: &DeliveryLog) -> Self {
        Self {
            sent: format_millis(log.sent_time),
            from: log.from_address.clone(),
            to: log.to_address.clone(),
            status: log.status.clone(),
            subject: log.subject.clone(),
        }
    }
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Entry")]
    value: String,
}

impl EntryRow {
    #[allow(clippy::ptr_arg)]
    fn new(value: &String) -> Self {
        Self {
            value: value.clone(),
        }
    }
}

pub async fn execute(ctx: Context, args: MailAdminArgs) -> Result<()> {
    match args.command {
        MailAdminCommands::Spam(spam) => match spam.command {
            SpamCommands::Get { category } => show_spam_list(ctx, category).await,
            SpamCommands::Set { category, values } => set_spam_list(ctx, category, values).await,
        },
        MailAdminCommands::Retention => show_retention(ctx).await,
        MailAdminCommands::Logs(page) => list_logs(ctx, page).await,
    }
}

async fn show_spam_list(ctx: Context, category: SpamCategory) -> Result<()> {
    let client = ctx.client()?;
    let entries = client.mail_admin().spam_settings(category).await?;

    if entries.is_empty() && ctx.output_format == OutputFormat::Pretty {
        println!("{} is empty.", category.to_string().cyan());
        return Ok(());
    }

    println!("{}", render_list(ctx.output_format, &entries, EntryRow::new)?);
    Ok(())
}

async fn set_spam_list(ctx: Context, category: SpamCategory, values: Vec<String>) -> Result<()> {
    let client = ctx.client()?;
    let count = values.len();
    client.mail_admin().update_spam_list(category, values).await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "category": category, "entries": count })
            );
        }
        _ => {
            println!(
                "{} {} now has {} entries.",
                "Success:".green().bold(),
                category.to_string().cyan(),
                count
            );
        }
    }

    Ok(())
}

async fn show_retention(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let policy = client.mail_admin().retention_policy().await?;

    match ctx.output_format {
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&policy)?),
        OutputFormat::Csv => anyhow::bail!("The retention policy has no tabular form; use json or yaml"),
        OutputFormat::Json | OutputFormat::Pretty => {
            println!("{}", serde_json::to_string_pretty(&policy)?);
        }
    }

    Ok(())
}

async fn list_logs(ctx: Context, page: PageArgs) -> Result<()> {
    let client = ctx.client()?;
    let admin = client.mail_admin();

    let logs = match Listing::from_args(page, ctx.page_size) {
        Listing::All { page_size } => admin.delivery_log_pages(page_size).fetch_all().await?,
        Listing::Page { start, limit } => admin.delivery_logs(start, limit).await?,
    };

    if logs.is_empty() {
        eprintln!("No delivery logs.");
        return Ok(());
    }

    println!("{}", render_list(ctx.output_format, &logs, LogRow::new)?);
    Ok(())
}
