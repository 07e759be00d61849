//! Command line options

use clap::Parser;
use std::path::PathBuf;

/// Headless drive: seed a virtual drive and move items around with commands
#[derive(Debug, Clone, Parser)]
#[command(name = "drive", version, about)]
pub struct Args {
    /// Number of items to generate
    #[arg(long, default_value_t = 50)]
    pub count: usize,

    /// Seed for the item generator
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Read commands from this file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Start in multi-select mode
    #[arg(long)]
    pub multi: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter for these options
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["drive"]);
        assert_eq!(args.count, 50);
        assert_eq!(args.seed, 42);
        assert!(args.script.is_none());
        assert!(!args.multi);
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "drive", "--count", "5", "--seed", "7", "--script", "moves.txt", "--multi", "-v",
        ]);
        assert_eq!(args.count, 5);
        assert_eq!(args.seed, 7);
        assert_eq!(args.script, Some(PathBuf::from("moves.txt")));
        assert!(args.multi);
        assert_eq!(args.log_filter(), "debug");
    }
}
