//! Command-line arguments

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use maintdesk_core::ConsoleConfig;
use maintdesk_core::config::BASE_URL_ENV;

#[derive(Debug, Parser)]
#[command(
    name = "maintdesk",
    version,
    about = "Terminal console for maintenance management records"
)]
pub struct Cli {
    /// Config file (default: <config dir>/maintdesk/config.json)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend API root; overrides the config file and MAINTDESK_BASE_URL
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Rows per page
    #[arg(short = 'n', long = "items-per-page", value_name = "N")]
    pub items_per_page: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Read a session token from stdin and store it in the system keyring
    Login,
    /// Remove the stored session token
    Logout,
}

impl Cli {
    /// Config file, then environment, then flags.
    pub fn load_config(&self) -> Result<ConsoleConfig> {
        let path = self.config.clone().or_else(ConsoleConfig::default_path);
        let mut config = match &path {
            Some(path) => ConsoleConfig::load_from(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ConsoleConfig::default(),
        };
        config.apply_env_override(std::env::var(BASE_URL_ENV).ok());
        if let Some(url) = &self.base_url {
            config.base_url.clone_from(url);
        }
        if let Some(n) = self.items_per_page {
            config.items_per_page = n;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}
