//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;

    // Flags and environment win over the config file
    let access_token = cli.token.or_else(|| config.access_token.clone());
    let region = cli.region.or(config.region).unwrap_or_default();
    let output_format = cli.output.or(config.output_format).unwrap_or_default();
    let page_size = config.page_size.unwrap_or(zoh_client::DEFAULT_PAGE_SIZE);

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    debug!(%region, %output_format, page_size, "starting");

    let ctx = commands::Context {
        access_token,
        region,
        output_format,
        page_size,
        cancel,
    };

    match cli.command {
        Commands::Admin(args) => commands::admin::execute(ctx, args).await,
        Commands::Mail(args) => commands::mail::execute(ctx, args).await,
        Commands::Auth(args) => commands::auth::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling outstanding requests");
            cancel.cancel();
        }
    });
}
