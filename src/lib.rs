//! Natasha - voice command resolver and action dispatcher
//!
//! A spoken phrase is transcribed to text, classified into one of a small set
//! of intents (search, open, play) and routed either to a local side effect or
//! to an Action Gateway over HTTP. The outcome is reported back to the user.
//!
//! ## Flow
//!
//! ```text
//! TranscriptionSource -> classify -> extract_argument -> Dispatcher -> Notifier
//!                                                          |
//!                                             Launcher or ActionGateway
//! ```
//!
//! [`session::VoiceSession`] runs one activation end to end and rejects
//! overlapping activations.

pub mod config;
pub mod dispatch;
pub mod gateway;
pub mod intent;
pub mod launcher;
pub mod notify;
pub mod session;
pub mod voice;

pub use dispatch::{DispatchMode, Dispatcher, Notice};
pub use intent::{Command, Intent, Transcript};
