//! satchel - Entry point for the mailbox operations agent

use std::sync::Arc;

use satchel::agent;
use satchel::config::Settings;
use satchel::providers::mail::{GmailCredentials, GmailProvider};
use satchel::services::MailboxService;

#[tokio::main]
async fn main() {
    // Initialize logging on stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting satchel");

    if let Err(e) = run().await {
        tracing::error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    let mut provider = GmailProvider::new(GmailCredentials::from(settings.google));
    provider.authenticate().await?;

    let service = Arc::new(MailboxService::new(Arc::new(provider)));
    let registry = agent::mailbox_operations(service);

    tracing::info!(
        operations = registry.len(),
        "Serving mailbox operations on stdio"
    );
    agent::stdio::serve(&registry).await
}
