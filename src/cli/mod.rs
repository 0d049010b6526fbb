//! CLI command implementations

pub mod classify;
pub mod init;
pub mod run;
pub mod serve;

use std::path::PathBuf;

use anyhow::Result;

use natasha::DispatchMode;
use natasha::config::Config;

/// Global flags that take precedence over the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub mode: Option<DispatchMode>,
    pub gateway: Option<String>,
}

impl Overrides {
    /// Load the configuration and apply the command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config_path.as_deref())?;

        if let Some(mode) = self.mode {
            config.dispatch.mode = mode;
        }
        if let Some(gateway) = &self.gateway {
            config.gateway.base_url = gateway.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}
