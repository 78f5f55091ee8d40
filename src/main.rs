//! CLI entry point for sentinel-dl.

use std::process::ExitCode;

use clap::Parser;

mod app;
mod app_config;
mod cli;

use cli::Args;

/// Process outcome reported through the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every requested product is present locally.
    Success,
    /// Some products failed while others succeeded.
    Partial,
    /// Nothing could be downloaded, or the run could not start.
    Failure,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Partial => 2,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before config and tracing, so --help works offline)
    let args = Args::parse();

    match app::runtime::run_downloader(args).await {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(ProcessExit::Failure.code())
        }
    }
}
