//! `larek`: the storefront in a terminal.

use std::process::ExitCode;

use client::command::{Command, HELP};
use client::frontend::{self, Reply};
use client::render::render_event;
use client::{Config, HttpShopApi, LogFormat, ShopSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the subscriber. Logs go to stderr so stdout stays the view.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(config: Config) -> client::Result<()> {
    let mut session = ShopSession::new(HttpShopApi::new(config.api_url()));

    let cdn_url = config.cdn_url();
    session
        .storefront()
        .bus()
        .subscribe_all(move |event| println!("{}", render_event(event, &cdn_url)));

    session.load_catalog().await?;
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}\n{HELP}");
                continue;
            }
        };

        match frontend::apply(&mut session, command).await {
            Ok(Reply::Quiet) => {}
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(e) => println!("Error: {e}"),
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    init_tracing(&config);
    tracing::info!(api = %config.api_url(), "starting storefront");

    // 2. Run the command loop until EOF or `quit`
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "storefront stopped");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
