//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

const INSTRUCTIONS: &str = "\
URI is one of:
  a scihub URL for searching products
  a scihub URL for downloading a product
  a file containing metalinks of products

Getting started:
  1. Register at https://scihub.esa.int/.
  2. Create a file named .credentials with a single line USER:PASSWORD
     holding your scihub account.
  3. Log in at https://scihub.esa.int/dhus/ and search for data.
  4. Add products to your cart and save the cart (products.meta4 by default).
  5. Run sentinel-dl with the saved metalink file as URI,
     or pass a single product link instead of steps 4-5.

Building search URLs is described at https://scihub.esa.int/userguide/BatchScripting";

/// Download Sentinel data products from the scihub portal.
///
/// Resolves a search query, a product download link, or a metalink file and
/// downloads the referenced products using saved credentials.
#[derive(Parser, Debug)]
#[command(name = "sentinel-dl")]
#[command(author, version, about, after_help = INSTRUCTIONS)]
#[command(disable_help_flag = true)]
pub struct Args {
    /// Search URL, product download URL, or metalink file
    #[arg(value_name = "URI")]
    pub uri: String,

    /// Credentials file containing USER:PASSWORD [default: .credentials]
    #[arg(short = 'c', long = "credentials", value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Directory to save products in (created if missing) [default: .]
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Portal base URL [default: https://scihub.esa.int/dhus/]
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Write logs to FILE.<date> instead of stderr, starting a new file daily
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Print help
    #[arg(short = 'h', short_alias = 'H', long = "help", action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}
