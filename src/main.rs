//! Pokedex - an interactive PokeAPI browser

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Cache, Config, HttpFetcher, PokeApi, Session};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr, quiet by default)
/// 2. Load configuration from environment variables
/// 3. Create the shared cache, which starts its background sweep
/// 4. Run the prompt loop until `exit` or end of input
///
/// The sweep task is dropped with the runtime when `main` returns.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so log lines don't interleave with the prompt,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, sweep_interval={}s, base_url={}",
        config.cache_interval, config.sweep_interval, config.base_url
    );

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .context("failed to build HTTP client")?;
    let cache = Cache::with_sweep_period(config.cache_interval(), config.sweep_interval());
    let api = PokeApi::new(HttpFetcher::with_client(client), cache, &config.base_url);
    let mut session = Session::new(api).with_catch_delay(config.catch_delay());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run(&mut session, stdin, &mut stdout)
        .await
        .context("pokedex session failed")?;

    info!("Pokedex closed");
    Ok(())
}
