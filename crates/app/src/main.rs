//! Unifind - Main Entry Point
//!
//! Loads configuration, restores the stored session and runs one command.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use unifind::{App, Cli, execute, hint, storage_for};
use unifind_application::ViewScope;
use unifind_infrastructure::{ClientConfig, ConsoleNavigator, ReqwestTransport, SystemClock};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(Some(output)) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("cancelled");
            ExitCode::from(130)
        }
        Err(error) => {
            eprintln!("error: {error}");
            if let Some(hint) = hint(&error) {
                eprintln!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Option<String>, unifind::CommandError> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
        config.validate()?;
    }
    if let Some(page) = cli.page {
        config.current_page = page;
    }

    let transport = ReqwestTransport::new(&config.user_agent, config.timeout())?;
    let app = App::new(
        transport,
        &config,
        storage_for(&config, cli.ephemeral)?,
        Arc::new(ConsoleNavigator::new(config.current_page.clone())),
        Arc::new(SystemClock::new()),
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api_base_url,
        "starting unifind"
    );

    let scope = ViewScope::new();
    let on_interrupt = scope.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.unmount();
        }
    });

    scope
        .run(async {
            app.start().await;
            execute(&app, cli.command).await
        })
        .await
        .transpose()
}
