//! Concrete speech synthesizers: networked provider and local fallback.
//!
//! [`HttpVoiceProvider`] POSTs to an OpenAI-compatible `/v1/audio/speech`
//! endpoint and hands the returned audio bytes to an injected [`AudioSink`]
//! (the platform audio-output capability; the engine never touches a device
//! directly).
//!
//! [`LocalCommandSynthesizer`] shells out to a platform speech command
//! (`say` on macOS, `espeak`/`espeak-ng` or `spd-say` on Linux): the
//! on-device fallback used when no networked provider is configured or the
//! provider fails.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Serialize;
use tokio::process::{Child, Command};

use crate::config::VoiceConfig;
use crate::voice::playback::{AudioHandle, PlaybackError, SpeechSynthesizer};

// ---------------------------------------------------------------------------
// AudioClip / AudioSink
// ---------------------------------------------------------------------------

/// Synthesized audio returned by a networked provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    /// MIME type of `bytes` (e.g. `audio/mpeg`).
    pub mime: &'static str,
}

/// Platform audio-output capability: turns an [`AudioClip`] into a live
/// playback.  Injected by the renderer; the engine owns only the handle.
pub trait AudioSink: Send + Sync {
    fn play(&self, clip: AudioClip) -> Result<Box<dyn AudioHandle>, PlaybackError>;
}

// ---------------------------------------------------------------------------
// HttpVoiceProvider
// ---------------------------------------------------------------------------

/// Request body for the `/v1/audio/speech` endpoint.
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// Networked voice-synthesis provider (OpenAI-compatible speech endpoint).
///
/// All connection details come from [`VoiceConfig`]; construction fails
/// soft: a missing API key simply means the controller should be built
/// without a primary provider.
pub struct HttpVoiceProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    voice: String,
    sink: std::sync::Arc<dyn AudioSink>,
}

impl HttpVoiceProvider {
    /// Build a provider from config, or `None` when no API key is set
    /// (the unconfigured-provider fallback trigger).
    pub fn from_config(
        config: &VoiceConfig,
        sink: std::sync::Arc<dyn AudioSink>,
    ) -> Option<Self> {
        let api_key = config.provider_api_key.as_deref().unwrap_or("").to_string();
        if api_key.is_empty() {
            return None;
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Some(Self {
            client,
            base_url: config.provider_base_url.clone(),
            api_key,
            model: config.model.clone(),
            voice: config.voice.clone(),
            sink,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpVoiceProvider {
    /// Synthesize `text` and start playback through the injected sink.
    async fn speak(&self, text: &str) -> Result<Box<dyn AudioHandle>, PlaybackError> {
        let url = format!(
            "{}/v1/audio/speech",
            self.base_url.trim_end_matches('/')
        );

        let body = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "mp3",
        };

        log::debug!(
            "synth: requesting {} voice={} text_len={}",
            url,
            self.voice,
            text.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlaybackError::Provider(format!(
                "voice provider returned HTTP {status}"
            )));
        }

        let bytes = response.bytes().await?.to_vec();
        if bytes.is_empty() {
            return Err(PlaybackError::Provider("empty audio response".into()));
        }

        self.sink.play(AudioClip {
            bytes,
            mime: "audio/mpeg",
        })
    }
}

// ---------------------------------------------------------------------------
// LocalCommandSynthesizer
// ---------------------------------------------------------------------------

/// Speech commands probed by [`LocalCommandSynthesizer::detect`], in
/// preference order.
const LOCAL_SPEECH_COMMANDS: &[&str] = &["say", "espeak-ng", "espeak", "spd-say"];

/// On-device fallback that speaks through a platform command.
///
/// The spawned process *is* the audio resource: stopping the handle kills
/// it, and `kill_on_drop` guarantees release even if the handle is dropped
/// without an explicit stop.
pub struct LocalCommandSynthesizer {
    program: String,
}

impl LocalCommandSynthesizer {
    /// Use an explicit speech command.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Probe the platform for a known speech command.
    ///
    /// Returns `None` when none is on the `PATH`: callers treat that as
    /// narration being unavailable, not as an error.
    pub fn detect() -> Option<Self> {
        for program in LOCAL_SPEECH_COMMANDS {
            let found = std::process::Command::new("which")
                .arg(program)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map(|s| s.success())
                .unwrap_or(false);
            if found {
                log::debug!("synth: local speech command = {program}");
                return Some(Self::new(*program));
            }
        }
        None
    }

    /// The speech command this synthesizer runs.
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl SpeechSynthesizer for LocalCommandSynthesizer {
    async fn speak(&self, text: &str) -> Result<Box<dyn AudioHandle>, PlaybackError> {
        let child = Command::new(&self.program)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                PlaybackError::Audio(format!("failed to launch {}: {e}", self.program))
            })?;

        Ok(Box::new(ProcessHandle { child }))
    }
}

/// Playback handle over a spawned speech process.
struct ProcessHandle {
    child: Child,
}

impl AudioHandle for ProcessHandle {
    fn stop(&mut self) {
        // Already-exited children make start_kill fail; that is fine.
        let _ = self.child.start_kill();
    }

    fn is_finished(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
