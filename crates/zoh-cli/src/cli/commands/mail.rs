//! `zoh mail` - Mailbox contents of the token owner.

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;
use zoh_core::{Folder, Label, MailAccount, MessageSummary};

use super::{Context, Listing};
use crate::cli::args::{MailArgs, MailCommands, MessageCommands, PageArgs};
use crate::output::{format_millis, render_list, render_record, OutputFormat};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Account ID")]
    id: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
}

impl AccountRow {
    fn new(account: &MailAccount) -> Self {
        Self {
            id: account.account_id.clone(),
            email: account.email_address.clone(),
            name: account.account_display_name.clone(),
            kind: account.kind.clone(),
        }
    }
}

#[derive(Tabled)]
struct FolderRow {
    #[tabled(rename = "Folder ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Unread")]
    unread: u32,
}

impl FolderRow {
    fn new(folder: &Folder) -> Self {
        Self {
            id: folder.folder_id.clone(),
            name: folder.folder_name.clone(),
            path: folder.path.clone(),
            unread: folder.unread_count,
        }
    }
}

#[derive(Tabled)]
struct LabelRow {
    #[tabled(rename = "Label ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
}

impl LabelRow {
    fn new(label: &Label) -> Self {
        Self {
            id: label.label_id.clone(),
            name: label.label_name.clone(),
            color: label.label_color.clone(),
        }
    }
}

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "Message ID")]
    id: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Subject")]
    subject: String,
}

impl MessageRow {
    fn new(message: &MessageSummary) -> Self {
        Self {
            id: message.message_id.clone(),
            received: format_millis(message.received_time),
            from: message.from_address.clone(),
            subject: truncate(&message.subject, 60),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

pub async fn execute(ctx: Context, args: MailArgs) -> Result<()> {
    match args.command {
        MailCommands::Accounts => list_accounts(ctx).await,
        MailCommands::Folders => list_folders(ctx).await,
        MailCommands::Labels => list_labels(ctx).await,
        MailCommands::Messages(messages) => match messages.command {
            MessageCommands::List { folder, page } => list_messages(ctx, &folder, page).await,
            MessageCommands::Get {
                folder_id,
                message_id,
                content,
            } => get_message(ctx, &folder_id, &message_id, content).await,
        },
        MailCommands::Admin(admin) => super::mail_admin::execute(ctx, admin).await,
    }
}

async fn list_accounts(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let accounts = client.mail().list_accounts().await?;
    println!("{}", render_list(ctx.output_format, &accounts, AccountRow::new)?);
    Ok(())
}

async fn list_folders(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let folders = client.mail().list_folders().await?;
    println!("{}", render_list(ctx.output_format, &folders, FolderRow::new)?);
    Ok(())
}

async fn list_labels(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let labels = client.mail().list_labels().await?;

    if labels.is_empty() {
        eprintln!("No labels defined.");
        return Ok(());
    }

    println!("{}", render_list(ctx.output_format, &labels, LabelRow::new)?);
    Ok(())
}

async fn list_messages(ctx: Context, folder: &str, page: PageArgs) -> Result<()> {
    let client = ctx.client()?;
    let mail = client.mail();

    // Numeric input is a folder id, anything else a folder name
    let folder_id = if folder.chars().all(|c| c.is_ascii_digit()) {
        folder.to_string()
    } else {
        mail.get_folder_by_name(folder).await?.folder_id
    };

    let messages = match Listing::from_args(page, ctx.page_size) {
        Listing::All { page_size } => mail.messages(&folder_id, page_size).fetch_all().await?,
        Listing::Page { start, limit } => mail.list_messages(&folder_id, start, limit).await?,
    };

    if messages.is_empty() {
        eprintln!("No messages in {folder}.");
        return Ok(());
    }

    println!("{}", render_list(ctx.output_format, &messages, MessageRow::new)?);
    Ok(())
}

async fn get_message(ctx: Context, folder_id: &str, message_id: &str, content: bool) -> Result<()> {
    let client = ctx.client()?;
    let mail = client.mail();

    if content {
        let body = mail.message_content(folder_id, message_id).await?;
        match ctx.output_format {
            OutputFormat::Pretty => println!("{}", body.content),
            format => {
                if let Some(out) = render_record(format, &body)? {
                    println!("{out}");
                }
            }
        }
        return Ok(());
    }

    let meta = mail.message_metadata(folder_id, message_id).await?;
    if let Some(out) = render_record(ctx.output_format, &meta)? {
        println!("{out}");
        return Ok(());
    }

    println!("{} {}", "Subject:".bold(), meta.subject.cyan());
    println!();
    println!("  {} {}", "From:".bold(), meta.from_address);
    println!("  {} {}", "To:".bold(), meta.to_address);
    if !meta.cc_address.is_empty() {
        println!("  {} {}", "Cc:".bold(), meta.cc_address);
    }
    let sent = meta
        .sent_at()
        .map_or_else(|| "-".to_string(), |t| t.to_rfc2822());
    println!("  {} {}", "Sent:".bold(), sent);
    println!("  {} {} bytes", "Size:".bold(), meta.message_size);
    if meta.has_attachment {
        println!("  {} {}", "Attachments:".bold(), "yes".yellow());
    }

    Ok(())
}
