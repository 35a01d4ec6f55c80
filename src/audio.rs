//! Audio system using Web Audio API
//!
//! Sound cues are synthesized with oscillators - no external files needed.
//! Like a chip tune channel, starting a cue on a channel cuts off whatever
//! that channel was playing.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{Audio, SoundCue};
use crate::settings::Settings;

/// Number of independent sound channels
const CHANNELS: usize = 4;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Volumes and mute flag
    settings: Settings,
    /// Oscillators still sounding, per channel
    voices: [Vec<OscillatorNode>; CHANNELS],
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings: settings.clone(),
            voices: Default::default(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        if muted {
            for channel in 0..CHANNELS {
                self.stop_channel(channel);
            }
        }
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    fn stop_channel(&mut self, channel: usize) {
        for osc in self.voices[channel].drain(..) {
            osc.stop().ok();
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
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

    /// Damage - short crunchy drop
    fn play_damage(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let t = ctx.current_time();
        let mut voices = Vec::new();

        if let Some((osc, gain)) = Self::create_osc(ctx, 600.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(600.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
            voices.push(osc);
        }

        // Noisy crackle on top
        if let Some((osc, gain)) = Self::create_osc(ctx, 2500.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();
            osc.frequency().set_value_at_time(2500.0, t).ok();
            osc.frequency().set_value_at_time(300.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.04).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
            voices.push(osc);
        }

        voices
    }

    /// Game over - long descending buzz
    fn play_game_over(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let Some((osc, gain)) = Self::create_osc(ctx, 440.0, OscillatorType::Sawtooth) else {
            return Vec::new();
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 1.2)
            .ok();
        osc.frequency().set_value_at_time(440.0, t).ok();
        osc.frequency().set_value_at_time(330.0, t + 0.3).ok();
        osc.frequency().set_value_at_time(262.0, t + 0.6).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 1.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 1.3).ok();
        vec![osc]
    }

    /// Complete - rising major arpeggio
    fn play_complete(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        const NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.5];
        let t = ctx.current_time();
        let mut voices = Vec::new();

        for (i, &freq) in NOTES.iter().enumerate() {
            let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Triangle) else {
                continue;
            };
            let start = t + i as f64 * 0.12;
            let len = if i == NOTES.len() - 1 { 0.6 } else { 0.15 };

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.35, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + len)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + len + 0.05).ok();
            voices.push(osc);
        }

        voices
    }
}

impl Audio for AudioManager {
    fn play(&mut self, channel: u8, cue: SoundCue) {
        let vol = self.settings.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let channel = channel as usize % CHANNELS;
        self.stop_channel(channel);

        self.voices[channel] = match cue {
            SoundCue::Damage => Self::play_damage(&ctx, vol),
            SoundCue::GameOver => Self::play_game_over(&ctx, vol),
            SoundCue::Complete => Self::play_complete(&ctx, vol),
        };
    }
}
