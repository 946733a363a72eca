//! Slightly Warmer
//!
//! Entry point for the `warmer` CLI.

mod app;
mod cli;
mod cmd_generate;
mod cmd_settings;
mod surface;

use clap::Parser;
use tracing::{error, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use warmer_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

use crate::app::App;
use crate::cli::{Cli, Commands, StoreCommand};

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so replies on stdout stay clean. Log files
/// rotate daily under the configured directory.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = if logging.directory.trim().is_empty() {
        None
    } else {
        let log_dir = ConfigLoader::expand_path(&logging.directory);
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("warmer")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keep the writer alive for the program duration.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

fn check_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("Config warning at {}: {}", warning.path, warning.message);
    }
    if let Some(first) = result.errors.first() {
        return Err(format!("Invalid configuration at {}: {}", first.path, first.message).into());
    }
    Ok(())
}

async fn run(command: StoreCommand, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    check_config(&config)?;
    let app = App::open(config).await?;

    match command {
        StoreCommand::Generate { text } => cmd_generate::generate(&app, &text).await,
        StoreCommand::Select { text } => cmd_generate::select(&app, &text).await,
        StoreCommand::Analyze { files } => cmd_generate::analyze(&app, &files).await,
        StoreCommand::RemoveSample { name } => cmd_settings::remove_sample(&app, &name).await,
        StoreCommand::Key { action } => cmd_settings::handle_key_command(&app, action).await,
        StoreCommand::Settings { action } => {
            cmd_settings::handle_settings_command(&app, action).await
        }
        StoreCommand::Status { format } => cmd_settings::status(&app, &format).await,
        StoreCommand::Reset { yes } => cmd_settings::reset(&app, yes).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => ConfigLoader::default_path()?,
    };
    let config = ConfigLoader::load_or_default(&config_path)?;
    init_tracing(&config.logging)?;

    let result = match cli.command {
        Commands::Config { action } => {
            cmd_settings::handle_config_command(action, &config_path, &config)
        }
        Commands::Store(command) => run(command, config).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}
