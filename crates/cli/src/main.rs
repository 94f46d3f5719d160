use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thematic_core::classify::Classifier;
use thematic_core::domain::classification::ClassificationRequest;
use thematic_core::llm::openai::OpenAiClient;

/// Classify one 10-K filing and print the same JSON body the API returns.
#[derive(Debug, Parser)]
#[command(name = "thematic_cli")]
struct Args {
    /// Ticker symbol, passed through as given.
    #[arg(long)]
    ticker: String,

    /// Filing date, passed through as given (e.g. 2024-02-01).
    #[arg(long)]
    filing_date: String,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = thematic_core::config::Settings::from_env()?;
    let sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let llm = OpenAiClient::from_settings(&settings).inspect_err(|e| {
        sentry_anyhow::capture_anyhow(e);
    })?;
    let classifier = Classifier::new(Arc::new(llm));

    let request = ClassificationRequest::new(args.ticker, args.filing_date);
    let response = classifier.respond(request).await;

    let out = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{out}");

    if !response.is_success() {
        // exit() skips destructors; flush sentry first.
        drop(sentry_guard);
        std::process::exit(1);
    }
    Ok(())
}

fn init_sentry(settings: &thematic_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
