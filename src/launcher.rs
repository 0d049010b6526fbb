//! Local side effects: opening URLs and files, launching programs

use std::process::{Command, Stdio};
use std::thread;

use tracing::warn;

/// Performs local open/launch effects
pub trait Launcher: Send + Sync {
    /// Open a URL or file with the platform's default handler
    fn open(&self, target: &str) -> std::io::Result<()>;

    /// Launch an application by name
    fn launch(&self, program: &str) -> std::io::Result<()>;
}

/// Returns true if `target` should be opened rather than launched as a program
pub fn is_location(target: &str) -> bool {
    let target = target.trim();
    target.contains("://")
        || target.starts_with('/')
        || target.starts_with("~/")
        || target.starts_with("./")
        || std::path::Path::new(target).exists()
}

/// Launcher backed by `open` (macOS), `xdg-open` (Linux) and `start` (Windows)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open(&self, target: &str) -> std::io::Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = {
            let mut c = Command::new("open");
            c.arg(target);
            c
        };

        #[cfg(target_os = "windows")]
        let mut command = {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", target]);
            c
        };

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut command = {
            let mut c = Command::new("xdg-open");
            c.arg(target);
            c
        };

        spawn_detached(&mut command)
    }

    fn launch(&self, program: &str) -> std::io::Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = {
            let mut c = Command::new("open");
            c.args(["-a", program]);
            c
        };

        #[cfg(target_os = "windows")]
        let mut command = {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", program]);
            c
        };

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut command = Command::new(program);

        spawn_detached(&mut command)
    }
}

/// Spawn without waiting; the child is reaped on a background thread
fn spawn_detached(command: &mut Command) -> std::io::Result<()> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    thread::spawn(move || {
        if let Err(e) = child.wait() {
            warn!("[natasha:launcher] Failed to reap child process: {}", e);
        }
    });

    Ok(())
}
