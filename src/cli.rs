//! Command-line interface definitions.

use clap::Parser;

/// Command-line arguments for the digest binary.
///
/// The only knob is the configuration file path; everything else lives in
/// the config file so a run is reproducible from that single input.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(
        short,
        long,
        env = "NEWS_DIGEST_CONFIG",
        default_value = "config.yaml"
    )]
    pub config: String,
}
