use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::signal;

use fafo_reconciler::cli::{
    handle_config_command, handle_run_command, handle_window_command, RunArgs, WindowArgs,
};
use fafo_reconciler::config::Settings;
use fafo_reconciler::{logging, scheduler};

#[derive(Parser)]
#[command(
    name = "fafo",
    author = "Kaylee Beyene",
    version,
    about = "Month-to-month budget reconciler",
    long_about = "Keeps the Fixed, Flex and Allowances budgets consistent across months \
                  and assigns what is left of the monthly target to the Other category. \
                  Without a subcommand it runs as a daemon: once at startup, then daily."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daemon: health endpoint plus the daily schedule
    Serve,

    /// Run one reconciliation now and exit
    Run(RunArgs),

    /// Show which months a date would reconcile
    Window(WindowArgs),

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Window(args) => {
            handle_window_command(args)?;
        }
        Commands::Config => {
            let settings = Settings::from_env()?;
            handle_config_command(&settings);
        }
        Commands::Run(args) => {
            let settings = Settings::from_env()?;
            logging::init(settings.log_format)?;
            handle_run_command(settings, args).await?;
        }
        Commands::Serve => {
            let settings = Settings::from_env()?;
            logging::init(settings.log_format)?;
            scheduler::serve(settings, shutdown_signal()).await?;
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
