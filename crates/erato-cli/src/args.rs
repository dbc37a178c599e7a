//! Command-line argument definitions for the Erato CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the bound, configuration file, pacing
//! and logging verbosity.

use clap::Parser;

/// Watch the Sieve of Eratosthenes run in your terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Upper bound of the sieve (2 to 5000)
    #[arg(help = "Upper bound of the sieve; omit to enter bounds interactively")]
    pub bound: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Draw every step immediately instead of pausing between steps
    #[arg(long)]
    pub no_delay: bool,
}
