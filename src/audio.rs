//! Sound collaborator
//!
//! The core never plays audio itself. It fires `SoundId`s into a
//! `SoundSink` and moves on; sinks must not block the frame.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    /// New run started
    Start,
    /// Player fired a volley
    Fire,
    /// Asteroid destroyed
    Explosion,
    /// Asteroid hit the unshielded ship
    PlayerHit,
    /// Shield absorbed a hit
    ShieldBlock,
    /// Power-up collected
    PowerUp,
    /// Run ended
    GameOver,
}

/// Fire-and-forget audio output
pub trait SoundSink {
    fn play_once(&mut self, sound: SoundId);
}

/// Shared sink, so the host can inspect what a session played
impl<S: SoundSink> SoundSink for Rc<RefCell<S>> {
    fn play_once(&mut self, sound: SoundId) {
        self.borrow_mut().play_once(sound);
    }
}

/// Discards every sound
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play_once(&mut self, _sound: SoundId) {}
}

/// Records every sound in order (demo summaries, tests)
#[derive(Debug, Default, Clone)]
pub struct SoundLog {
    pub played: Vec<SoundId>,
}

impl SoundLog {
    pub fn count(&self, sound: SoundId) -> usize {
        self.played.iter().filter(|s| **s == sound).count()
    }
}

impl SoundSink for SoundLog {
    fn play_once(&mut self, sound: SoundId) {
        self.played.push(sound);
    }
}

/// Volume gate in front of another sink
#[derive(Debug, Clone)]
pub struct MixerSink<S> {
    inner: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: SoundSink> MixerSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SoundSink> SoundSink for MixerSink<S> {
    fn play_once(&mut self, sound: SoundId) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        self.inner.play_once(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_log_counts() {
        let mut log = SoundLog::default();
        log.play_once(SoundId::Fire);
        log.play_once(SoundId::Fire);
        log.play_once(SoundId::Explosion);
        assert_eq!(log.count(SoundId::Fire), 2);
        assert_eq!(log.count(SoundId::GameOver), 0);
    }

    #[test]
    fn test_mixer_drops_sounds_when_silent() {
        let mut mixer = MixerSink::new(SoundLog::default());
        mixer.play_once(SoundId::Start);
        mixer.set_muted(true);
        mixer.play_once(SoundId::Fire);
        mixer.set_muted(false);
        mixer.set_sfx_volume(0.0);
        mixer.play_once(SoundId::Fire);
        mixer.set_sfx_volume(2.0);
        assert_eq!(mixer.effective_volume(), 0.8);
        mixer.play_once(SoundId::PowerUp);
        assert_eq!(mixer.inner().played, vec![SoundId::Start, SoundId::PowerUp]);
    }

    #[test]
    fn test_shared_sink_records_through_clone() {
        let shared = Rc::new(RefCell::new(SoundLog::default()));
        let mut handle = shared.clone();
        handle.play_once(SoundId::GameOver);
        assert_eq!(shared.borrow().count(SoundId::GameOver), 1);
    }
}
