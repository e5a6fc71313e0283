//! Response narration through the platform speech service
//!
//! Every committed assistant reply is handed to this pipeline, which
//! cancels whatever is currently being spoken and starts the new
//! utterance. Narration is fire-and-forget: synthesis failures are
//! reported as events for the debug surface and never reach the reply
//! text.

use crate::{HeraldError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::process::Child;
use std::thread;
use tracing::{debug, error, info, warn};

/// Configuration for the narrator
#[derive(Clone, Debug)]
pub struct NarratorConfig {
    /// Speech rate (1.0 = the platform's normal speed)
    pub rate: f32,

    /// Speech pitch (1.0 = the platform's normal pitch)
    pub pitch: f32,

    /// Voice language tag handed to the platform service
    pub voice_lang: String,

    /// Maximum queue size for pending narration commands
    pub queue_size: usize,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            voice_lang: "en-IN".to_string(),
            queue_size: 100,
        }
    }
}

impl NarratorConfig {
    /// Set the speech rate
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the speech pitch
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Set the voice language tag
    pub fn with_voice_lang(mut self, voice_lang: impl Into<String>) -> Self {
        self.voice_lang = voice_lang.into();
        self
    }
}

/// One utterance handed to the speech backend
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub lang: String,
}

impl Utterance {
    fn build(config: &NarratorConfig, text: &str) -> Self {
        Self {
            text: text.to_string(),
            rate: config.rate,
            pitch: config.pitch,
            lang: config.voice_lang.clone(),
        }
    }
}

/// Seam over the platform speech service.
///
/// Implementations must tolerate `cancel` with nothing playing. A
/// backend that discovers the platform service is missing should report
/// `is_available() == false` and turn `speak` into a no-op rather than
/// an error.
pub trait SpeechBackend: Send {
    /// Stop the current utterance, if any
    fn cancel(&mut self);

    /// Begin speaking the utterance; must not block until completion
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;

    /// Whether the platform service is usable
    fn is_available(&self) -> bool {
        true
    }
}

/// Platform speech implementation spawning the OS speech command
/// (speech-dispatcher on Linux, `say` on macOS, SAPI via PowerShell on
/// Windows). Cancellation kills the previously spawned process.
pub struct SystemSpeech {
    current: Option<Child>,
    available: bool,
}

impl SystemSpeech {
    pub fn new() -> Self {
        Self {
            current: None,
            available: true,
        }
    }
}

impl Default for SystemSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechBackend for SystemSpeech {
    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        if !self.available {
            return Ok(());
        }

        match spawn_speech_command(utterance) {
            Ok(child) => {
                self.current = Some(child);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Platform speech command not found; disabling narration");
                self.available = false;
                Ok(())
            }
            Err(e) => Err(HeraldError::Speech(e.to_string())),
        }
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

#[cfg(target_os = "linux")]
fn spawn_speech_command(utterance: &Utterance) -> std::io::Result<Child> {
    use std::process::Command;

    // spd-say takes rate and pitch as -100..100 offsets from normal.
    let rate = ((utterance.rate - 1.0) * 100.0).clamp(-100.0, 100.0) as i32;
    let pitch = ((utterance.pitch - 1.0) * 100.0).clamp(-100.0, 100.0) as i32;

    Command::new("spd-say")
        .args([
            "-r",
            &rate.to_string(),
            "-p",
            &pitch.to_string(),
            "-l",
            &utterance.lang,
            "--",
            &utterance.text,
        ])
        .spawn()
}

#[cfg(target_os = "macos")]
fn spawn_speech_command(utterance: &Utterance) -> std::io::Result<Child> {
    use std::process::Command;

    // say takes an absolute words-per-minute rate; 175 is the default
    // voice speed. Pitch and language follow the system voice.
    let wpm = (175.0 * utterance.rate).round() as i32;

    Command::new("say")
        .args(["-r", &wpm.to_string(), "--", &utterance.text])
        .spawn()
}

#[cfg(target_os = "windows")]
fn spawn_speech_command(utterance: &Utterance) -> std::io::Result<Child> {
    use std::process::Command;

    // SAPI rate runs -10..10 around normal speed.
    let rate = ((utterance.rate - 1.0) * 10.0).clamp(-10.0, 10.0) as i32;
    let script = format!(
        "Add-Type -AssemblyName System.Speech; \
         $synth = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
         $synth.Rate = {}; \
         $synth.Speak('{}');",
        rate,
        utterance.text.replace('\'', "''").replace('\n', " ")
    );

    Command::new("powershell").args(["-Command", &script]).spawn()
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn spawn_speech_command(_utterance: &Utterance) -> std::io::Result<Child> {
    Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "no platform speech service",
    ))
}

/// Commands that can be sent to the narrator pipeline
#[derive(Debug, Clone)]
pub enum NarratorCommand {
    /// Cancel the current utterance and speak this text
    Speak {
        /// The text to narrate
        text: String,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the narrator pipeline
#[derive(Debug, Clone)]
pub enum NarratorEvent {
    /// An utterance was started
    Spoken {
        /// The text handed to the backend
        text: String,
    },

    /// Synthesis failed; the reply text is unaffected
    Error {
        /// Error message
        error: String,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Narrator pipeline with channel-based communication
pub struct NarratorPipeline {
    config: NarratorConfig,
    command_tx: Sender<NarratorCommand>,
    command_rx: Receiver<NarratorCommand>,
    event_tx: Sender<NarratorEvent>,
    event_rx: Receiver<NarratorEvent>,
}

impl NarratorPipeline {
    /// Create a new narrator pipeline
    pub fn new(config: NarratorConfig) -> Self {
        let (command_tx, command_rx) = bounded(config.queue_size);
        let (event_tx, event_rx) = bounded(config.queue_size);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<NarratorCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<NarratorEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread with the given backend
    ///
    /// Returns the JoinHandle for the worker thread.
    pub fn start_worker(self, backend: Box<dyn SpeechBackend>) -> Result<thread::JoinHandle<()>> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        let handle = thread::spawn(move || {
            let mut backend = backend;

            info!("Narrator worker starting");

            if !backend.is_available() {
                warn!("Platform speech service unavailable; replies will not be narrated");
            }

            loop {
                match command_rx.recv() {
                    Ok(NarratorCommand::Speak { text }) => {
                        if text.trim().is_empty() {
                            continue;
                        }

                        backend.cancel();

                        let utterance = Utterance::build(&config, &text);
                        debug!("Narrating: {}", utterance.text);

                        match backend.speak(&utterance) {
                            Ok(()) => {
                                let _ = event_tx.send(NarratorEvent::Spoken { text });
                            }
                            Err(e) => {
                                warn!("Narration failed: {}", e);
                                let _ = event_tx.send(NarratorEvent::Error {
                                    error: e.to_string(),
                                });
                            }
                        }
                    }

                    Ok(NarratorCommand::Shutdown) => {
                        info!("Narrator worker shutting down");
                        backend.cancel();
                        let _ = event_tx.send(NarratorEvent::Shutdown);
                        break;
                    }

                    Err(e) => {
                        error!("Command channel error: {}", e);
                        break;
                    }
                }
            }

            info!("Narrator worker stopped");
        });

        Ok(handle)
    }
}
