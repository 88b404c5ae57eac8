//! Command line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CampusBay marketplace server.
#[derive(Debug, Parser)]
#[command(name = "campusbay-server", version, about)]
pub struct Cli {
    /// Directory holding `default.toml` and environment overrides.
    #[arg(long, env = "CAMPUSBAY_CONFIG_DIR", default_value = "./config", global = true)]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP API (default).
    Serve,
    /// Replace all data with sample users and listings.
    Seed,
    /// Delete all users, listings, messages and wishlists.
    Clear,
}

impl Cli {
    /// The subcommand to run, defaulting to `serve`.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::parse_from(["campusbay-server"]);
        assert_eq!(cli.command(), Command::Serve);
        assert_eq!(cli.config_dir, PathBuf::from("./config"));
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::parse_from(["campusbay-server", "seed", "--config-dir", "/etc/campusbay"]);
        assert_eq!(cli.command(), Command::Seed);
        assert_eq!(cli.config_dir, PathBuf::from("/etc/campusbay"));

        let cli = Cli::parse_from(["campusbay-server", "clear"]);
        assert_eq!(cli.command(), Command::Clear);
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["campusbay-server", "migrate"]).is_err());
    }
}
