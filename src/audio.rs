//! Audio system
//!
//! Two procedurally generated sound effects, no external files needed.
//! The simulation never plays sounds itself; the host maps drained
//! `GameEvent`s to `SoundEffect`s and hands them to an `AudioSink`.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball bounced off anything, or was lost
    Hit,
    /// Level cleared
    Success,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Collision => Some(SoundEffect::Hit),
            GameEvent::LevelCleared { .. } => Some(SoundEffect::Success),
            _ => None,
        }
    }
}

/// Anything that can play sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    fn toggle_mute(&mut self) {
        let muted = !self.is_muted();
        self.set_muted(muted);
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
    }

    /// Play the sounds for a batch of events, in order
    fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

/// Sink that remembers what it would have played (headless runs and tests)
#[derive(Debug)]
pub struct SilentAudio {
    pub played: Vec<SoundEffect>,
    levels: Levels,
}

impl SilentAudio {
    pub fn new(settings: &Settings) -> Self {
        Self {
            played: Vec::new(),
            levels: Levels::from_settings(settings),
        }
    }
}

impl AudioSink for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.levels.effective_volume() > 0.0 {
            self.played.push(effect);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.levels.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.levels.muted
    }
}

/// Volume levels shared by every sink
#[derive(Debug, Clone, Copy, PartialEq)]
struct Levels {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Levels {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Levels, SoundEffect};
    use crate::settings::Settings;

    /// Web Audio oscillator synth
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        levels: Levels,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                levels: Levels::from_settings(settings),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short percussive blip
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(440.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(220.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Rising arpeggio
        fn play_success(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.levels.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Hit => self.play_hit(ctx, vol),
                SoundEffect::Success => self.play_success(ctx, vol),
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.levels.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.levels.muted
        }
    }
}
