//! Voice input/output for VeganChef.
//!
//! Two small state machines wrap the platform speech capabilities:
//!
//! * [`VoiceCaptureController`]: one speech-to-text utterance at a time,
//!   `Idle → Listening → Processing → Idle` with an `Error` resting state.
//! * [`SpeechPlaybackController`]: narration with a networked primary
//!   provider and a local fallback, `Silent → Speaking → Silent`, always
//!   cancellable via `stop()`.
//!
//! The platform capabilities themselves sit behind [`SpeechRecognizer`] and
//! [`SpeechSynthesizer`] trait objects; capability absence is a classified
//! error ([`CaptureError::Unsupported`]) or a fallback trigger, never a
//! crash.
//!
//! # Architecture
//!
//! ```text
//! start() ──▶ VoiceCaptureController ──transcript──▶ RecipeOrchestrator
//!                     │                                     │
//!                  Error(reason)                      RecipeArtifact
//!                                                           │
//! speak(text) ◀── SpeechPlaybackController ◀── narrative ───┘
//!                     │
//!                     ├─ primary networked provider (when configured)
//!                     └─ local fallback synthesis (automatic, silent)
//! ```

pub mod capture;
pub mod playback;
pub mod synth;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use capture::{
    CaptureError, CaptureState, SpeechRecognizer, UnsupportedRecognizer, VoiceCaptureController,
};
pub use playback::{
    AudioHandle, PlaybackError, PlaybackState, SpeechPlaybackController, SpeechSynthesizer,
};
pub use synth::{AudioClip, AudioSink, HttpVoiceProvider, LocalCommandSynthesizer};
