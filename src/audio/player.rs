use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

pub struct AudioPlayer {
    tx: Option<Sender<AudioCmd>>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        if !audio_settings.enabled {
            tracing::info!("audio output disabled");
            return Self {
                tx: None,
                playback: playback_info,
                join: Mutex::new(None),
            };
        }

        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let audio_handle = spawn_audio_thread(rx, playback_info.clone(), audio_settings);

        Self {
            tx: Some(tx),
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    /// Send a command to the audio thread. Without an output this is a no-op.
    pub fn send(&self, cmd: AudioCmd) {
        if let Some(tx) = &self.tx {
            if tx.send(cmd).is_err() {
                tracing::warn!("audio thread is gone");
            }
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
