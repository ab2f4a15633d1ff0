//! Shopfront CLI - Drive the storefront client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create a checkout session and print the payment URL
//! shopfront checkout --success-url https://shop.example/thanks --cancel-url https://shop.example/cart
//!
//! # Issue an arbitrary request as if from a page
//! shopfront fetch /api/cart --page "/products/matcha?size=30g"
//!
//! # Print (and clear) the page remembered after an unauthorized response
//! shopfront marker
//! ```
//!
//! # Commands
//!
//! - `checkout` - Create a checkout session
//! - `fetch` - Send a request through the sign-in-aware wrapper
//! - `marker` - Consume the redirect-after-login marker
//!
//! Session storage lives in a JSON file so the marker written by one run can
//! be read by the next.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_client::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront client")]
struct Cli {
    /// File backing session storage
    #[arg(long, global = true, default_value = ".shopfront-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a checkout session and print its payment URL
    Checkout {
        /// Where the payment provider returns after success
        #[arg(long)]
        success_url: String,

        /// Where the payment provider returns on cancel
        #[arg(long)]
        cancel_url: String,

        /// Page the request is made from
        #[arg(long, default_value = "/cart")]
        page: String,
    },
    /// Send a request and print the response
    Fetch {
        /// Address, relative to the base URL or absolute
        address: String,

        /// HTTP method
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// JSON body
        #[arg(short, long)]
        data: Option<String>,

        /// Page the request is made from
        #[arg(long, default_value = "/")]
        page: String,
    },
    /// Print and clear the redirect-after-login marker
    Marker,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Configuration is optional here: `marker` works without a base URL
    let config = ClientConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=info,shopfront_cli=info,shopfront_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(
    cli: Cli,
    config: Result<ClientConfig, shopfront_client::config::ConfigError>,
) -> Result<(), commands::CommandError> {
    let session_file = cli.session_file;

    match cli.command {
        Commands::Checkout {
            success_url,
            cancel_url,
            page,
        } => {
            let session = commands::Session::open(config?, &session_file, &page)?;
            commands::checkout::run(&session, &success_url, &cancel_url).await?;
        }
        Commands::Fetch {
            address,
            method,
            data,
            page,
        } => {
            let session = commands::Session::open(config?, &session_file, &page)?;
            commands::fetch::run(&session, &address, &method, data.as_deref()).await?;
        }
        Commands::Marker => commands::marker::run(&session_file),
    }
    Ok(())
}
