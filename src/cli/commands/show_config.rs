//! Config command handler

use anyhow::Context;

use crate::config::Config;

/// Renders the effective configuration with credentials masked.
pub fn render_config(config: &Config) -> anyhow::Result<String> {
    toml::to_string_pretty(&config.redacted()).context("Failed to serialize config")
}

pub fn cmd_show_config(config: &Config) -> anyhow::Result<()> {
    print!("{}", render_config(config)?);
    Ok(())
}
