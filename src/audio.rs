//! Sound effect seam
//!
//! The simulation never talks to an audio device. Hosts implement
//! [`EffectPlayer`] for their backend and feed it game events through
//! [`AudioManager`].

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Accepted flap (manual or autopilot)
    Flap,
    /// Obstacle passed
    Score,
    /// Run ended on the floor, ceiling or an obstacle
    Crash,
}

impl SoundEffect {
    /// The effect (if any) that accompanies an event
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped { .. } => Some(SoundEffect::Flap),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::RunEnded { .. } => Some(SoundEffect::Crash),
            GameEvent::RunStarted
            | GameEvent::AutopilotToggled { .. }
            | GameEvent::AutopilotUncertain { .. } => None,
        }
    }
}

/// Backend capable of playing an effect at a volume in `0.0..=1.0`
pub trait EffectPlayer {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
}

/// Player that discards everything (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl EffectPlayer for SilentPlayer {
    fn play_effect(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Volume and mute handling in front of a backend
#[derive(Debug)]
pub struct AudioManager<P> {
    player: P,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<P: EffectPlayer> AudioManager<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
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

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect (skipped entirely when silent)
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.player.play_effect(effect, vol);
    }

    /// Play whatever effect accompanies `event`
    pub fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}
