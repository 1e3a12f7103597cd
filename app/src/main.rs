//! Userdesk console.
//!
//! # Running
//!
//! ```bash
//! USERDESK_ENV=dev USERDESK_METRICS_ADDR=127.0.0.1:9000 cargo run -p userdesk-app
//! ```
//!
//! Then `login emilys emilyspass` and `help`.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userdesk::{AppConfig, Command, Console, ConsoleConfig, DEFAULT_LOG_FILTER, Step};
use userdesk_auth::{AuthEnvironment, HttpAuthGateway, auth_store};
use userdesk_core::environment::SystemClock;
use userdesk_directory::HttpDirectoryApi;
use userdesk_runtime::metrics::MetricsServer;

const LOGIN_TIMEOUT: Duration = Duration::from_secs(30);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they do not interleave with page output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    info!(
        environment = %config.environment,
        api_url = %config.auth.api_url,
        search_url = %config.search_url,
        "Configuration loaded"
    );

    if let Some(addr) = config.metrics_addr {
        MetricsServer::new(addr).serve()?;
    }

    let gateway = HttpAuthGateway::new(&config.auth)?;
    let store = auth_store(AuthEnvironment::new(gateway));
    let directory = HttpDirectoryApi::new(&config.directory())?;

    let mut console = Console::attach(
        store.clone(),
        directory,
        SystemClock,
        ConsoleConfig {
            landing_route: config.auth.landing_route.clone(),
            search_url: config.search_url.clone(),
            login_timeout: config.request_timeout().unwrap_or(LOGIN_TIMEOUT),
        },
    )
    .await;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(b"Userdesk - type 'help' for commands\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let output = match Command::parse(&line) {
            Ok(command) => match console.execute(command).await {
                Step::Continue(output) => output,
                Step::Quit => break,
            },
            Err(userdesk::CommandError::Empty) => String::new(),
            Err(error) => error.to_string(),
        };

        if !output.is_empty() {
            stdout.write_all(output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    info!("Shutting down");
    store.shutdown(SHUTDOWN_TIMEOUT).await?;
    Ok(())
}
