//! Notifiers - presenting outcomes to the user
//!
//! `notify` is synchronous and returns nothing: once it returns, the user has
//! been told.

use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::NotifierSettings;

/// Presents a message to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints messages to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        info!("[natasha:notify] {}", message);
        println!("{}", message);
    }
}

/// Prints messages and speaks them aloud
#[derive(Debug, Clone, Default)]
pub struct SpeechNotifier {
    console: ConsoleNotifier,
}

impl SpeechNotifier {
    fn speak(message: &str) -> std::io::Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = Command::new("say");
        #[cfg(not(target_os = "macos"))]
        let mut command = Command::new("espeak");

        let status = command
            .arg(message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(std::io::Error::other(format!(
                "speech synthesizer exited with {}",
                status
            )));
        }
        Ok(())
    }
}

impl Notifier for SpeechNotifier {
    fn notify(&self, message: &str) {
        self.console.notify(message);
        // Speech is best effort, the console already has the message
        if let Err(e) = Self::speak(message) {
            warn!("[natasha:notify] Failed to speak message: {}", e);
        }
    }
}

/// Build the notifier selected in `[notifier]`
pub fn notifier_from_settings(settings: &NotifierSettings) -> Arc<dyn Notifier> {
    if settings.speak {
        Arc::new(SpeechNotifier::default())
    } else {
        Arc::new(ConsoleNotifier)
    }
}
