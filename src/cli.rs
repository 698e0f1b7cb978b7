//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Interactive flight route map and network dashboard.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "route-atlas", version, about)]
pub struct Cli {
    /// Route network JSON file. The embedded demo network is used when absent
    /// or unreadable.
    #[arg(long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Settings JSON file (viewport limits, zoom step, animation duration).
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Emit debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Log level implied by the flags. `RUST_LOG` still takes precedence.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
