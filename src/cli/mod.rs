//! CLI module - Command-line interface for Movie Vault
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Movie Vault - a small authenticated movie catalogue API
#[derive(Parser)]
#[command(name = "movie-vault")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[default]
    Serve,

    /// Create default config file
    Init,

    /// Print the effective configuration
    Config,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or_default()
    }
}

pub use commands::*;
