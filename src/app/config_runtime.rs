use std::path::PathBuf;

use sentinel_dl::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_CREDENTIALS_FILE};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Effective run settings after merging command-line flags over file config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunSettings {
    pub(crate) uri: String,
    pub(crate) base_url: String,
    pub(crate) credentials_file: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) client: ClientSettings,
    pub(crate) verbose: u8,
    pub(crate) quiet: bool,
    pub(crate) log_file: Option<PathBuf>,
}

pub(crate) fn resolve_settings(args: Args, file_config: Option<&FileConfig>) -> RunSettings {
    let file_config = file_config.cloned().unwrap_or_default();

    let (verbose, quiet) = if args.verbose == 0 && !args.quiet {
        verbosity_flags(file_config.verbosity.unwrap_or(VerbositySetting::Default))
    } else {
        (args.verbose, args.quiet)
    };

    let defaults = ClientSettings::default();
    let client = ClientSettings {
        connect_timeout_secs: file_config
            .connect_timeout_secs
            .unwrap_or(defaults.connect_timeout_secs),
        read_timeout_secs: file_config
            .read_timeout_secs
            .unwrap_or(defaults.read_timeout_secs),
    };

    RunSettings {
        uri: args.uri,
        base_url: args
            .base_url
            .or(file_config.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        credentials_file: args
            .credentials
            .or(file_config.credentials_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE)),
        output_dir: args
            .output_dir
            .or(file_config.output_dir)
            .unwrap_or_else(|| PathBuf::from(".")),
        client,
        verbose,
        quiet,
        log_file: args.log_file,
    }
}

fn verbosity_flags(verbosity: VerbositySetting) -> (u8, bool) {
    match verbosity {
        VerbositySetting::Default => (0, false),
        VerbositySetting::Verbose => (1, false),
        VerbositySetting::Quiet => (0, true),
        VerbositySetting::Debug => (2, false),
    }
}

/// Priority: RUST_LOG env var > quiet flag > verbose flag > default (info).
pub(crate) fn resolve_default_log_level(settings: &RunSettings) -> &'static str {
    if settings.quiet {
        "error"
    } else {
        match settings.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
