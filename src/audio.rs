//! Audio cues using the Web Audio API
//!
//! Each cue is a short run of synthesized tones, so no sound files ship.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player was hit
    GameOver,
    /// Final score beat the stored best
    HighScore,
    /// New session started
    Restart,
}

/// One note in a cue
#[derive(Debug, Clone, Copy)]
struct Tone {
    freq: f32,
    /// Frequency to glide to over the note, if any
    glide_to: Option<f32>,
    start: f64,
    length: f64,
    level: f32,
    wave: OscillatorType,
}

impl Tone {
    const fn note(freq: f32, start: f64, length: f64, level: f32, wave: OscillatorType) -> Self {
        Self {
            freq,
            glide_to: None,
            start,
            length,
            level,
            wave,
        }
    }
}

const GAME_OVER: &[Tone] = &[
    Tone::note(440.0, 0.0, 0.35, 0.3, OscillatorType::Sine),
    Tone::note(370.0, 0.18, 0.35, 0.3, OscillatorType::Sine),
    Tone::note(311.0, 0.36, 0.35, 0.3, OscillatorType::Sine),
    Tone {
        freq: 220.0,
        glide_to: Some(110.0),
        start: 0.54,
        length: 0.6,
        level: 0.3,
        wave: OscillatorType::Triangle,
    },
];

const HIGH_SCORE: &[Tone] = &[
    Tone::note(523.0, 0.0, 0.2, 0.25, OscillatorType::Triangle),
    Tone::note(659.0, 0.08, 0.2, 0.25, OscillatorType::Triangle),
    Tone::note(784.0, 0.16, 0.2, 0.25, OscillatorType::Triangle),
    Tone::note(1047.0, 0.24, 0.4, 0.25, OscillatorType::Triangle),
];

const RESTART: &[Tone] = &[Tone {
    freq: 220.0,
    glide_to: Some(660.0),
    start: 0.0,
    length: 0.2,
    level: 0.25,
    wave: OscillatorType::Triangle,
}];

impl SoundEffect {
    fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::HighScore => HIGH_SCORE,
            SoundEffect::Restart => RESTART,
        }
    }
}

/// Plays cues through a shared AudioContext
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Not available outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.7 }
    }

    /// Set output volume (0.0 - 1.0). Zero mutes.
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Resume audio context (browsers require a user gesture first)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        let now = ctx.current_time();
        for tone in effect.tones() {
            if self.schedule(ctx, now, tone).is_none() {
                log::debug!("Dropped a tone of {:?}", effect);
            }
        }
    }

    fn schedule(&self, ctx: &AudioContext, now: f64, tone: &Tone) -> Option<()> {
        let (osc, gain) = voice(ctx, tone.freq, tone.wave)?;
        let t = now + tone.start;
        let end = t + tone.length;

        gain.gain().set_value_at_time(tone.level * self.volume, t).ok()?;
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;
        if let Some(target) = tone.glide_to {
            osc.frequency().set_value_at_time(tone.freq, t).ok()?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(target, end)
                .ok()?;
        }

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end + 0.05).ok()
    }
}

/// Oscillator routed through its own gain node to the speakers
fn voice(ctx: &AudioContext, freq: f32, wave: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;
    osc.set_type(wave);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;
    Some((osc, gain))
}
