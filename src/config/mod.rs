//! Configuration loading and management

mod io;
mod settings;

pub use io::write_config_file;
pub use settings::{
    DispatchSettings, GatewaySettings, NotifierSettings, ServerSettings, VoiceSettings,
    default_search_url,
};

use serde::{Deserialize, Serialize};

/// Main configuration structure
///
/// Every section and field has a default, so partial files load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewaySettings,

    #[serde(default)]
    pub dispatch: DispatchSettings,

    #[serde(default)]
    pub voice: VoiceSettings,

    #[serde(default)]
    pub notifier: NotifierSettings,

    #[serde(default)]
    pub server: ServerSettings,
}
