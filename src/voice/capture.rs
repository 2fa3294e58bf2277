//! Voice capture controller: a single-utterance speech-to-text session.
//!
//! [`VoiceCaptureController`] owns one capture session at a time and drives
//! the state machine:
//!
//! ```text
//! Idle ──start()──▶ Listening ──transcript──▶ Processing ──finish()──▶ Idle
//!                       │
//!                       └──recognition error──▶ Error ──next start()──▶ Listening
//! ```
//!
//! `start()` while `Listening` or `Processing` is an explicit [`CaptureError::Busy`]
//! rejection: never a silent queue.  Errors are never retried automatically;
//! the user must re-invoke `start()`, which drains the `Error` state first.
//!
//! The controller is an owned, per-session instance with no process-wide
//! shared recognition handle, so nothing leaks across sessions.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::pipeline::{AcquireError, RecipeArtifact, RecipeOrchestrator};

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Classified reasons a capture session can fail.
///
/// Every variant carries a human-readable description so the renderer can
/// display it without knowing the internal cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The platform exposes no speech-capture capability.
    #[error("speech capture is not supported on this platform")]
    Unsupported,

    /// A capture session is already in progress.
    #[error("a capture session is already in progress")]
    Busy,

    /// The session ended without any usable speech.
    #[error("no speech was detected. Try speaking again")]
    NoSpeech,

    /// Microphone permission was refused.
    #[error("microphone access was denied")]
    MicrophoneDenied,

    /// The recognition backend lost its network connection.
    #[error("network error during speech recognition: {0}")]
    Network(String),

    /// Any other recognition failure.
    #[error("speech recognition failed: {0}")]
    Recognition(String),
}

// ---------------------------------------------------------------------------
// CaptureState
// ---------------------------------------------------------------------------

/// States of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Waiting for the user to start a capture.
    #[default]
    Idle,
    /// The microphone is live; waiting for a terminal recognition result.
    Listening,
    /// A transcript was produced and the pipeline is running on it.
    Processing,
    /// A recoverable error occurred; drained on the next `start()`.
    Error,
}

impl CaptureState {
    /// True while the controller cannot accept a new `start()`.
    pub fn is_busy(&self) -> bool {
        matches!(self, CaptureState::Listening | CaptureState::Processing)
    }

    /// A short human-readable label suitable for a status display.
    pub fn label(&self) -> &'static str {
        match self {
            CaptureState::Idle => "Idle",
            CaptureState::Listening => "Listening",
            CaptureState::Processing => "Processing",
            CaptureState::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechRecognizer trait
// ---------------------------------------------------------------------------

/// Platform speech-to-text capability: one utterance per call.
///
/// Implementations must be `Send + Sync` so they can be shared as
/// `Arc<dyn SpeechRecognizer>`.  A call resolves with the best transcript of
/// a single utterance in `locale`, or a classified [`CaptureError`].
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, locale: &str) -> Result<String, CaptureError>;
}

/// Stand-in for platforms without a speech-capture capability.
///
/// Always fails with [`CaptureError::Unsupported`]: a capability error at
/// call time, not a crash.
pub struct UnsupportedRecognizer;

#[async_trait]
impl SpeechRecognizer for UnsupportedRecognizer {
    async fn recognize(&self, _locale: &str) -> Result<String, CaptureError> {
        Err(CaptureError::Unsupported)
    }
}

// ---------------------------------------------------------------------------
// VoiceCaptureController
// ---------------------------------------------------------------------------

/// Owns one speech-capture session and its state machine.
pub struct VoiceCaptureController {
    recognizer: Arc<dyn SpeechRecognizer>,
    locale: String,
    state: CaptureState,
    last_error: Option<String>,
}

impl VoiceCaptureController {
    /// Create a controller over `recognizer` with a fixed capture locale.
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, locale: impl Into<String>) -> Self {
        Self {
            recognizer,
            locale: locale.into(),
            state: CaptureState::Idle,
            last_error: None,
        }
    }

    /// Current state of the session.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Human-readable message for the most recent error, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // -----------------------------------------------------------------------
    // State machine
    // -----------------------------------------------------------------------

    /// Begin a single-utterance capture and return the final transcript.
    ///
    /// Valid from `Idle` (and from `Error`, which is drained back through
    /// `Idle` first).  From `Listening` or `Processing` this is an explicit
    /// [`CaptureError::Busy`] rejection.
    ///
    /// On success the controller is left in `Processing`; call
    /// [`finish`](Self::finish) once the pipeline has settled.  On failure
    /// the controller rests in `Error` with the reason retained.
    pub async fn start(&mut self) -> Result<String, CaptureError> {
        match self.state {
            CaptureState::Listening | CaptureState::Processing => {
                return Err(CaptureError::Busy);
            }
            CaptureState::Error => {
                // Re-invocation drains the error state.
                self.state = CaptureState::Idle;
            }
            CaptureState::Idle => {}
        }

        self.last_error = None;
        self.state = CaptureState::Listening;
        log::debug!("capture: Idle -> Listening (locale={})", self.locale);

        match self.recognizer.recognize(&self.locale).await {
            Ok(transcript) if !transcript.trim().is_empty() => {
                log::debug!("capture: transcript = {transcript:?}");
                self.state = CaptureState::Processing;
                Ok(transcript)
            }
            Ok(_) => self.fail(CaptureError::NoSpeech),
            Err(e) => self.fail(e),
        }
    }

    /// Return to `Idle` after the pipeline has produced an artifact or an
    /// error for the captured transcript.
    pub fn finish(&mut self) {
        log::debug!("capture: {} -> Idle", self.state.label());
        self.state = CaptureState::Idle;
    }

    /// Capture one utterance and run it through the orchestration pipeline.
    ///
    /// The controller returns to `Idle` once the artifact (or error) is
    /// available.  Returns the transcript together with the artifact so the
    /// renderer can log both sides of the turn.
    pub async fn capture_recipe(
        &mut self,
        orchestrator: &RecipeOrchestrator,
    ) -> Result<(String, RecipeArtifact), CaptureError> {
        let transcript = self.start().await?;
        let result = orchestrator.acquire(&transcript).await;
        self.finish();

        match result {
            Ok(artifact) => Ok((transcript, artifact)),
            // Unreachable in practice: start() already rejects empty
            // transcripts as NoSpeech.
            Err(AcquireError::EmptyInput) => Err(CaptureError::NoSpeech),
        }
    }

    fn fail(&mut self, e: CaptureError) -> Result<String, CaptureError> {
        log::warn!("capture error: {e}");
        self.state = CaptureState::Error;
        self.last_error = Some(e.to_string());
        Err(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
