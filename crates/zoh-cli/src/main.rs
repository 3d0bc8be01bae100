//! zoh - Zoho Mail administration from the command line.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    zoh_cli::run().await
}
