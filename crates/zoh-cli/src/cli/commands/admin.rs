//! `zoh admin` - Organization administration.

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;
use zoh_core::User;

use super::{Context, Listing};
use crate::cli::args::{AdminArgs, AdminCommands, PageArgs, UserCommands};
use crate::output::{render_list, render_record};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ZUID")]
    zuid: i64,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Mailbox")]
    mailbox: String,
}

impl UserRow {
    fn new(user: &User) -> Self {
        Self {
            zuid: user.zuid,
            email: user.email_address.clone(),
            name: user.display_name.clone(),
            role: user.role.clone(),
            mailbox: user.mailbox_status.clone(),
        }
    }
}

pub async fn execute(ctx: Context, args: AdminArgs) -> Result<()> {
    match args.command {
        AdminCommands::Org => show_org(ctx).await,
        AdminCommands::Users(users) => match users.command {
            UserCommands::List(page) => list_users(ctx, page).await,
            UserCommands::Get { identifier } => get_user(ctx, &identifier).await,
        },
    }
}

async fn show_org(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let org = client.admin().organization().await?;

    if let Some(out) = render_record(ctx.output_format, &org)? {
        println!("{out}");
        return Ok(());
    }

    println!("{} {}", "Organization:".bold(), org.company_name.as_deref().unwrap_or("?").cyan());
    println!();
    println!("  {} {}", "ZOID:".bold(), org.zoid);
    if let Some(domain) = &org.domain_name {
        println!("  {} {}", "Domain:".bold(), domain);
    }
    if let Some(seats) = org.user_count {
        println!("  {} {}", "Users:".bold(), seats);
    }

    Ok(())
}

async fn list_users(ctx: Context, page: PageArgs) -> Result<()> {
    let client = ctx.client()?;
    let admin = client.admin();

    let users = match Listing::from_args(page, ctx.page_size) {
        Listing::All { page_size } => admin.users(page_size).fetch_all().await?,
        Listing::Page { start, limit } => admin.list_users(start, limit).await?,
    };

    if users.is_empty() {
        eprintln!("No users found.");
        return Ok(());
    }

    println!("{}", render_list(ctx.output_format, &users, UserRow::new)?);
    Ok(())
}

async fn get_user(ctx: Context, identifier: &str) -> Result<()> {
    let client = ctx.client()?;
    let user = client.admin().get_user_by_identifier(identifier).await?;

    if let Some(out) = render_record(ctx.output_format, &user)? {
        println!("{out}");
        return Ok(());
    }

    println!("{} {}", "User:".bold(), user.email_address.cyan());
    println!();
    println!("  {} {}", "ZUID:".bold(), user.zuid);
    println!("  {} {}", "Name:".bold(), user.display_name);
    if let Some(account_id) = &user.account_id {
        println!("  {} {}", "Account:".bold(), account_id);
    }
    println!("  {} {}", "Role:".bold(), user.role);

    let status = if user.mailbox_status.eq_ignore_ascii_case("enabled") {
        user.mailbox_status.green()
    } else {
        user.mailbox_status.yellow()
    };
    println!("  {} {}", "Mailbox:".bold(), status);

    Ok(())
}
