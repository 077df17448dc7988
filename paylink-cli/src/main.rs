//! PayGlobal checkout console
//!
//! Generates hosted USDT payment links and files refund requests against the
//! PayGlobal merchant API.

mod command;
mod config;
mod console;
mod navigator;
mod render;

use anyhow::Context;
use clap::Parser;
use config::ConfigLoader;
use navigator::TerminalNavigator;
use paylink_core::gateway::HttpGateway;
use paylink_core::launch::LaunchParams;
use paylink_core::shell;
use paylink_core::view::CheckoutView;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// PayGlobal checkout console - payment links and refund requests
#[derive(Parser, Debug)]
#[command(name = "paylink")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./paylink.toml")]
    config: PathBuf,

    /// Override the gateway API root (e.g., http://localhost:5000/api/v1)
    #[arg(short, long, env = "PAYLINK_BASE_URL")]
    base_url: Option<Url>,

    /// Launch URL or query string carrying api_key, api_secret and amount.
    /// With all three present the payment is submitted automatically.
    #[arg(short, long)]
    launch: Option<String>,

    /// Open payment links with the configured browser command
    #[arg(long, default_value = "false")]
    open_browser: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::debug!("Starting paylink v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = ConfigLoader::new(&args.config, args.base_url.clone())
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    tracing::debug!("Using gateway at {}", config.base_url);

    let params = match args.launch.as_deref() {
        Some(input) => launch_params(input)?,
        None => LaunchParams::default(),
    };

    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .context("failed to build http client")?;
    let gateway = HttpGateway::new(config.base_url).with_http_client(http);
    let navigator = TerminalNavigator::new(
        args.open_browser || config.open_browser,
        config.browser_command,
    );

    print!("{}", shell::header("PayGlobal"));
    let mut view = CheckoutView::mount(gateway, navigator, params);

    if let Some(result) = view.run_auto_submit().await {
        match result {
            Ok(link) => tracing::info!("Auto-submitted payment, link {}", link.url),
            Err(e) => tracing::warn!("Auto-submitted payment failed: {}", e),
        }
    }

    console::run(&mut view).await?;
    Ok(())
}

/// Resolve `--launch`: a full URL must point at a mounted view.
fn launch_params(input: &str) -> anyhow::Result<LaunchParams> {
    if let Ok(url) = Url::parse(input) {
        if shell::route(url.path()).is_none() {
            anyhow::bail!("no view is mounted at {}", url.path());
        }
        return Ok(LaunchParams::from_url(&url));
    }
    Ok(LaunchParams::from_query(input))
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper_util=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
