//! Init command implementation

use anyhow::{Result, bail};
use std::path::PathBuf;

use natasha::config::{Config, write_config_file};

/// Default configuration content for natasha init
pub const DEFAULT_CONFIG: &str = r#"# Natasha Configuration
# =====================
#
# Speak a command ("search for ...", "open ...", "play ...") and natasha
# routes it to the Action Gateway or handles it locally.

# ============================================================================
# GATEWAY - The HTTP service that performs open / play (and relayed search)
# ============================================================================

[gateway]
base_url = "http://127.0.0.1:5000"
connect_timeout_secs = 5
read_timeout_secs = 30

# ============================================================================
# DISPATCH
# ============================================================================
#
#   mode       - "local": transcribe with whisper, open searches directly
#                "relayed": the gateway transcribes (/voice/command) and searches
#   search_url - Local search location, {query} is replaced by the encoded query

[dispatch]
mode = "local"
search_url = "https://www.google.com/search?q={query}"

# ============================================================================
# VOICE - Local speech recognition (sox `rec` + `whisper-cli`)
# ============================================================================

[voice]
language = "en-US"
# whisper_model = "~/.natasha/models/ggml-base.en.bin"
record_seconds = 5.0

# ============================================================================
# NOTIFIER
# ============================================================================
#
#   speak - Also read messages aloud (`say` on macOS, `espeak` elsewhere)

[notifier]
speak = false

# ============================================================================
# SERVER - Reference gateway started with `natasha serve`
# ============================================================================

[server]
bind = "127.0.0.1:5000"
# Directory searched for "play <name>" (matched by file name without extension)
# media_dir = "/home/me/Music"

# Application name -> URL or program
[server.apps]
browser = "https://www.google.com"
"#;

/// Write the default configuration file
pub fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    write_config_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.gateway.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.server.bind, "127.0.0.1:5000");
        assert!(config.server.media_dir.is_none());
        assert_eq!(config.server.apps.len(), 1);
    }

    #[test]
    fn test_commented_model_path_works_when_enabled() {
        let enabled = DEFAULT_CONFIG.replace("# whisper_model", "whisper_model");
        let config: Config = toml::from_str(&enabled).unwrap();
        assert_eq!(
            config.voice.whisper_model_path(),
            Config::global_config_dir()
                .join("models")
                .join("ggml-base.en.bin")
        );
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init_command(Some(path.clone()), false).unwrap();
        assert!(path.exists());
        assert!(init_command(Some(path.clone()), false).is_err());
        init_command(Some(path), true).unwrap();
    }
}
