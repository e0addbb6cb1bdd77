//! Audio cues
//!
//! Fire-and-forget playback triggers. The actual output backend (mixer,
//! sound assets) is an external collaborator behind [`AudioOutput`]; a
//! missing backend or missing assets degrade to a silent no-op, never a
//! crash.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Title-screen jingle
    Intro,
    /// Start button pressed
    StartGame,
    /// Ball hits paddle
    PaddleHit,
    /// Brick destroyed
    BrickBreak,
    /// Run ended with no lives
    GameOver,
    /// All bricks cleared
    GameWin,
}

impl SoundEffect {
    /// Effect for a simulation event, if the event is audible
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::BrickBreak => Some(SoundEffect::BrickBreak),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::GameWin => Some(SoundEffect::GameWin),
            GameEvent::SpeedRamp | GameEvent::LifeLost | GameEvent::PickupCollected => None,
        }
    }
}

/// Playback backend seam
pub trait AudioOutput: Send {
    /// Begin playback of an effect at the given volume; must not block
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    output: Option<Box<dyn AudioOutput>>,
    master_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(output: Option<Box<dyn AudioOutput>>) -> Self {
        if output.is_none() {
            log::warn!("No audio backend available - sounds will be disabled");
        }
        Self {
            output,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Manager with no backend; every play call is a no-op
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect (no-op without a backend or at zero volume)
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Some(output) = &mut self.output {
            output.play(effect, vol);
        }
    }

    /// Play the cues for a batch of simulation events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(effect) = SoundEffect::for_event(*event) {
                self.play(effect);
            }
        }
    }
}
