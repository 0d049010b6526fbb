//! Voice session - one activation from listening to notification
//!
//! At most one activation is in flight per session. A second activation while
//! the first is pending is rejected with [`Notice::Busy`] and does nothing else.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::dispatch::{Dispatcher, Notice};
use crate::intent::{Command, Transcript};
use crate::voice::TranscriptionSource;

/// How an activation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The command was dispatched; `notice` is what the user saw (None: nothing to do)
    Dispatched {
        command: Command,
        notice: Option<Notice>,
    },
    /// The transcription source failed; no command was built
    RecognitionFailed,
    /// Another activation was still pending
    Rejected,
}

/// Releases the busy flag when dropped
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Listens on a transcription source and dispatches what it hears
pub struct VoiceSession {
    source: Arc<dyn TranscriptionSource>,
    dispatcher: Dispatcher,
    busy: AtomicBool,
}

impl VoiceSession {
    pub fn new(source: Arc<dyn TranscriptionSource>, dispatcher: Dispatcher) -> Self {
        Self {
            source,
            dispatcher,
            busy: AtomicBool::new(false),
        }
    }

    /// Returns true while an activation is pending
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run one voice activation: listen, classify, dispatch, notify
    pub async fn activate(&self) -> Activation {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("[natasha:session] Activation rejected, previous command still pending");
            self.dispatcher.notify(&Notice::Busy);
            return Activation::Rejected;
        }
        let _guard = BusyGuard(&self.busy);

        let text = match self.source.listen().await {
            Ok(text) => text,
            Err(e) => {
                warn!("[natasha:session] Speech recognition error: {}", e);
                self.dispatcher.notify(&Notice::RecognitionFailed);
                return Activation::RecognitionFailed;
            }
        };

        let transcript = Transcript::new(&text);
        info!("[natasha:session] Voice command: {}", transcript);

        let command = Command::from_transcript(&transcript);
        let notice = self.dispatcher.dispatch(&command).await;

        Activation::Dispatched { command, notice }
    }
}
