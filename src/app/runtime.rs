use std::fs;
use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use sentinel_dl::{
    Credentials, DownloadEngine, HubClient, HubEndpoint, ProgressReporter, classify_input,
};
use tracing::{debug, info, warn};

use crate::ProcessExit;
use crate::app::{config_runtime, exit_handler, terminal};
use crate::app_config;
use crate::cli::Args;

pub(crate) async fn run_downloader(args: Args) -> Result<ProcessExit> {
    let loaded = app_config::load_default_file_config()?;
    let settings = config_runtime::resolve_settings(args, loaded.config.as_ref());

    let default_level = config_runtime::resolve_default_log_level(&settings);
    let _log_guard = terminal::init_tracing(default_level, settings.log_file.as_deref())?;

    debug!(
        config_path = ?loaded.path,
        config_loaded = loaded.config.is_some(),
        "configuration resolved"
    );
    info!("sentinel-dl starting");

    let credentials = Credentials::load(&settings.credentials_file)?;
    debug!(username = %credentials.username(), "credentials loaded");

    let endpoint = HubEndpoint::new(&settings.base_url)
        .with_context(|| format!("Invalid portal base URL '{}'", settings.base_url))?;
    let input = classify_input(&settings.uri)?;
    info!(input = %input, "input classified");

    if !settings.output_dir.exists() {
        fs::create_dir_all(&settings.output_dir).with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                settings.output_dir.display()
            )
        })?;
        info!(dir = %settings.output_dir.display(), "Created output directory");
    }

    let progress = if terminal::should_use_progress_bars(
        io::stderr().is_terminal(),
        settings.quiet,
        terminal::is_dumb_terminal(),
    ) {
        ProgressReporter::visible()
    } else {
        ProgressReporter::hidden()
    };

    let client = HubClient::with_settings(credentials, endpoint, settings.client)?;
    let engine = DownloadEngine::new(client, progress);
    let stats = engine.run(&input, &settings.output_dir).await?;

    for failure in stats.failures() {
        warn!(url = %failure.url, reason = %failure.reason, "product not downloaded");
    }
    info!(
        completed = stats.completed(),
        skipped = stats.skipped(),
        failed = stats.failed(),
        "Run finished"
    );

    Ok(exit_handler::determine_exit_outcome(
        stats.completed() + stats.skipped(),
        stats.failed(),
    ))
}
