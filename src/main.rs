use anyhow::Context;
use clap::Parser;
use issue_relay::{
    ConfigSource, RelayConfig, SlackNotifier, WebhookHandler,
    server::{AppState, router},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "RELAY_PORT", default_value = "6666")]
    port: u16,

    /// Fixed Slack webhook URL. When omitted, SLACK_URL is read on every event.
    #[arg(long)]
    slack_url: Option<String>,

    /// Don't write inbound payloads to the log.
    #[arg(long, env = "RELAY_NO_PAYLOAD_LOG")]
    no_payload_log: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let log_payloads = !args.no_payload_log;

    let config = match args.slack_url {
        Some(url) => ConfigSource::Fixed(RelayConfig::new(url).with_payload_logging(log_payloads)),
        None => ConfigSource::Env { log_payloads },
    };

    let state = Arc::new(AppState {
        handler: WebhookHandler::new(SlackNotifier::new(reqwest::Client::new())),
        config,
    });

    let app = router(state.clone());

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Issue relay starting on {}", addr);
    if log_payloads {
        warn!("Inbound payloads are logged verbatim; pass --no-payload-log to disable");
    }
    if state.config.resolve().slack_url().is_none() {
        warn!("SLACK_URL is not set - events will be rejected until it is");
    }

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
