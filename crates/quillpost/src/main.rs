mod app;
mod cli;
mod error;
mod logging;
mod notifier;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use quillpost_platform::AppPaths;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::cli::Cli;
use crate::error::AppError;
use crate::settings::AppSettings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            log::error!("{error}");
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let paths = match cli.data_root {
        Some(root) => AppPaths::rooted_at(root),
        None => AppPaths::new().map_err(AppError::paths_unavailable)?,
    };

    let (settings, settings_error) = match AppSettings::load(&paths) {
        Ok(settings) => (settings, None),
        Err(error) => (AppSettings::default(), Some(error)),
    };
    logging::init_logging(
        &paths.log_file(),
        settings.debug_logging || cli.verbose,
        settings.max_log_size_bytes,
    );

    if let Some(error) = settings_error {
        log::warn!("{error}, using defaults");
        eprintln!("Warning: {error}, using defaults");
    } else if !paths.settings_file().exists()
        && let Err(error) = settings.save(&paths)
    {
        log::warn!("{error}");
    }

    let app = App::new(settings, &paths)?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl+C, cancelling");
            interrupt.cancel();
        }
    });

    app.run(cli.command, &cancel).await
}
