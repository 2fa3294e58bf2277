//! Speech playback controller: narration with cancellation and fallback.
//!
//! [`SpeechPlaybackController`] drives the state machine:
//!
//! ```text
//! Silent ──speak(text)──▶ Speaking ──stop() / natural end──▶ Silent
//! ```
//!
//! `speak()` tries the primary networked provider first and falls back to
//! the local synthesizer automatically when the primary is unconfigured or
//! fails: logged, never surfaced as a user-facing failure.  At most one
//! playback is active: a second `speak()` cancels the in-flight one (stop +
//! release) before starting.  `stop()` is idempotent from any state.
//!
//! The "currently playing audio" handle is exclusively owned here; no other
//! component touches it.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// Errors that can occur while synthesizing or playing narration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Neither a networked provider nor a local fallback produced audio.
    #[error("no speech synthesizer is available")]
    Unavailable,

    /// The networked provider returned an error.
    #[error("voice provider request failed: {0}")]
    Provider(String),

    /// The networked provider did not respond within the configured timeout.
    #[error("voice provider request timed out")]
    Timeout,

    /// Local audio output failed.
    #[error("audio playback failed: {0}")]
    Audio(String),
}

impl From<reqwest::Error> for PlaybackError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PlaybackError::Timeout
        } else {
            PlaybackError::Provider(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackState
// ---------------------------------------------------------------------------

/// States of the narration machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No playback is active.
    #[default]
    Silent,
    /// Exactly one playback is active.
    Speaking,
}

impl PlaybackState {
    /// A short human-readable label suitable for a status display.
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Silent => "Silent",
            PlaybackState::Speaking => "Speaking",
        }
    }
}

// ---------------------------------------------------------------------------
// AudioHandle
// ---------------------------------------------------------------------------

/// An in-flight playback and the audio resource behind it.
///
/// Dropping or stopping the handle must release the resource: handles never
/// leak across repeated `speak()` calls.
pub trait AudioHandle: Send {
    /// Stop playback and release the underlying audio resource.
    /// Must be safe to call more than once.
    fn stop(&mut self);

    /// True once playback has completed naturally.
    fn is_finished(&mut self) -> bool;
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Text-to-speech capability: text in, playing audio handle out.
///
/// Covers both the networked provider and the local fallback; the controller
/// does not care which is which beyond their ordering.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, text: &str) -> Result<Box<dyn AudioHandle>, PlaybackError>;
}

// ---------------------------------------------------------------------------
// SpeechPlaybackController
// ---------------------------------------------------------------------------

/// Owns the single "currently playing audio" handle.
pub struct SpeechPlaybackController {
    primary: Option<Arc<dyn SpeechSynthesizer>>,
    fallback: Arc<dyn SpeechSynthesizer>,
    active: Option<Box<dyn AudioHandle>>,
}

impl SpeechPlaybackController {
    /// Create a controller.
    ///
    /// * `primary`: networked voice provider; `None` means unconfigured
    ///   and every `speak()` goes straight to the fallback.
    /// * `fallback`: local/on-device synthesis.
    pub fn new(
        primary: Option<Arc<dyn SpeechSynthesizer>>,
        fallback: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            primary,
            fallback,
            active: None,
        }
    }

    /// Current state.  `Speaking` only while an unfinished playback exists.
    pub fn state(&mut self) -> PlaybackState {
        match self.active.as_mut() {
            Some(handle) => {
                if !handle.is_finished() {
                    PlaybackState::Speaking
                } else {
                    PlaybackState::Silent
                }
            }
            None => PlaybackState::Silent,
        }
    }

    // -----------------------------------------------------------------------
    // speak / stop
    // -----------------------------------------------------------------------

    /// Narrate `text`, cancelling any in-flight playback first.
    ///
    /// Primary-provider failure triggers the local fallback automatically;
    /// only a failure of *both* paths is returned, and even that is merely
    /// lost narration, never fatal to the session.
    pub async fn speak(&mut self, text: &str) -> Result<(), PlaybackError> {
        // Only one playback may be active.
        self.stop();

        let handle = match &self.primary {
            Some(primary) => match primary.speak(text).await {
                Ok(handle) => handle,
                Err(e) => {
                    log::warn!("playback: primary voice provider failed ({e}), using local fallback");
                    self.fallback.speak(text).await?
                }
            },
            None => {
                log::debug!("playback: no networked voice provider configured, using local fallback");
                self.fallback.speak(text).await?
            }
        };

        self.active = Some(handle);
        Ok(())
    }

    /// Cancel playback and release the audio resource.
    ///
    /// Idempotent: calling while `Silent` is a no-op, including before
    /// playback has audibly started and after it has finished.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.active.take() {
            handle.stop();
            log::debug!("playback: Speaking -> Silent (stopped)");
        }
    }
}

impl Drop for SpeechPlaybackController {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Handle that records whether it was stopped.
    struct TrackedHandle {
        stopped: Arc<AtomicBool>,
        finished: bool,
    }

    impl AudioHandle for TrackedHandle {
        fn stop(&mut self) {
            self.stopped.store(true, Ordering::SeqCst);
        }
        fn is_finished(&mut self) -> bool {
            self.finished
        }
    }

    /// Synthesizer that always succeeds and exposes its handles' stop flags.
    struct OkSynth {
        calls: AtomicUsize,
        handles: std::sync::Mutex<Vec<Arc<AtomicBool>>>,
    }

    impl OkSynth {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                handles: std::sync::Mutex::new(Vec::new()),
            })
        }

        fn stop_flags(&self) -> Vec<Arc<AtomicBool>> {
            self.handles.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for OkSynth {
        async fn speak(&self, _text: &str) -> Result<Box<dyn AudioHandle>, PlaybackError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let stopped = Arc::new(AtomicBool::new(false));
            self.handles.lock().unwrap().push(Arc::clone(&stopped));
            Ok(Box::new(TrackedHandle {
                stopped,
                finished: false,
            }))
        }
    }

    /// Synthesizer that always fails.
    struct FailSynth {
        calls: AtomicUsize,
    }

    impl FailSynth {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for FailSynth {
        async fn speak(&self, _text: &str) -> Result<Box<dyn AudioHandle>, PlaybackError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PlaybackError::Provider("503 service unavailable".into()))
        }
    }

    // -----------------------------------------------------------------------
    // Fallback behaviour
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn primary_success_does_not_touch_fallback() {
        let primary = OkSynth::new();
        let fallback = OkSynth::new();
        let mut c = SpeechPlaybackController::new(Some(primary.clone()), fallback.clone());

        c.speak("hello").await.unwrap();
        assert_eq!(c.state(), PlaybackState::Speaking);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    /// Primary failure silently falls back; the caller sees success.
    #[tokio::test]
    async fn primary_failure_falls_back_automatically() {
        let primary = FailSynth::new();
        let fallback = OkSynth::new();
        let mut c = SpeechPlaybackController::new(Some(primary.clone()), fallback.clone());

        c.speak("hello").await.unwrap();
        assert_eq!(c.state(), PlaybackState::Speaking);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unconfigured_primary_goes_straight_to_fallback() {
        let fallback = OkSynth::new();
        let mut c = SpeechPlaybackController::new(None, fallback.clone());

        c.speak("hello").await.unwrap();
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn both_paths_failing_returns_error_and_stays_silent() {
        let mut c = SpeechPlaybackController::new(Some(FailSynth::new()), FailSynth::new());

        let err = c.speak("hello").await.unwrap_err();
        assert!(matches!(err, PlaybackError::Provider(_)));
        assert_eq!(c.state(), PlaybackState::Silent);
    }

    // -----------------------------------------------------------------------
    // Single active playback / cancellation
    // -----------------------------------------------------------------------

    /// Two `speak()` calls in succession: the first playback is cancelled,
    /// leaving exactly one active at completion.
    #[tokio::test]
    async fn second_speak_cancels_the_first() {
        let synth = OkSynth::new();
        let mut c = SpeechPlaybackController::new(None, synth.clone());

        c.speak("first").await.unwrap();
        c.speak("second").await.unwrap();

        let flags = synth.stop_flags();
        assert_eq!(flags.len(), 2);
        assert!(flags[0].load(Ordering::SeqCst), "first playback must be stopped");
        assert!(!flags[1].load(Ordering::SeqCst), "second playback must be live");
        assert_eq!(c.state(), PlaybackState::Speaking);
    }

    #[tokio::test]
    async fn stop_while_silent_is_a_no_op() {
        let mut c = SpeechPlaybackController::new(None, OkSynth::new());
        assert_eq!(c.state(), PlaybackState::Silent);
        c.stop();
        c.stop();
        assert_eq!(c.state(), PlaybackState::Silent);
    }

    #[tokio::test]
    async fn stop_releases_the_active_handle() {
        let synth = OkSynth::new();
        let mut c = SpeechPlaybackController::new(None, synth.clone());

        c.speak("narrate this").await.unwrap();
        c.stop();

        assert_eq!(c.state(), PlaybackState::Silent);
        assert!(synth.stop_flags()[0].load(Ordering::SeqCst));

        // stop() after the playback has ended remains a no-op.
        c.stop();
        assert_eq!(c.state(), PlaybackState::Silent);
    }

    #[tokio::test]
    async fn naturally_finished_playback_reports_silent() {
        struct FinishedSynth;

        #[async_trait]
        impl SpeechSynthesizer for FinishedSynth {
            async fn speak(&self, _text: &str) -> Result<Box<dyn AudioHandle>, PlaybackError> {
                Ok(Box::new(TrackedHandle {
                    stopped: Arc::new(AtomicBool::new(false)),
                    finished: true,
                }))
            }
        }

        let mut c = SpeechPlaybackController::new(None, Arc::new(FinishedSynth));
        c.speak("short clip").await.unwrap();
        assert_eq!(c.state(), PlaybackState::Silent);
    }

    #[test]
    fn state_labels() {
        assert_eq!(PlaybackState::Silent.label(), "Silent");
        assert_eq!(PlaybackState::Speaking.label(), "Speaking");
    }
}
