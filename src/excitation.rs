//! Dual-source excitation: a glottal tone and looped colored noise, summed
//! through independently smoothed gain stages.
//!
//! Every setter schedules a ramp toward a target value; nothing in here ever
//! steps a gain or a frequency within a block. The render path only advances
//! ramps and reads tables.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::glottal::GlottalOscillator;
use crate::noise::{ColoredNoise, SmoothRandom};
use crate::utils::Ramped;
use crate::SAMPLE_RATE;

/// Gain smoothing time constant.
const GAIN_RAMP_S: f32 = 0.020;

/// Slow random pitch drift: rate in Hz and depth as a fraction of the pitch.
const DRIFT_RATE_HZ: f32 = 5.0;
const DRIFT_DEPTH: f32 = 0.003;

/// Fraction of the noise path that stays open at full voicing.
const NOISE_FLOOR: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct ExcitationSource {
    glottal: GlottalOscillator,
    noise: ColoredNoise,
    drift: SmoothRandom,

    tone_gain: Ramped,
    noise_gain: Ramped,
    output_level: Ramped,

    voicing: f32,
    breathiness: f32,
    pitch_hz: f32,
}

impl ExcitationSource {
    pub fn new() -> Self {
        Self {
            glottal: GlottalOscillator::new(),
            noise: ColoredNoise::new(),
            drift: SmoothRandom::new(),
            tone_gain: Ramped::new(1.0, GAIN_RAMP_S),
            noise_gain: Ramped::new(0.0, GAIN_RAMP_S),
            output_level: Ramped::new(1.0, GAIN_RAMP_S),
            voicing: 1.0,
            breathiness: 0.0,
            pitch_hz: 110.0,
        }
    }

    pub fn init(&mut self) {
        self.glottal.init();
        self.noise.init();
        self.drift.init();
        self.tone_gain = Ramped::new(1.0, GAIN_RAMP_S);
        self.noise_gain = Ramped::new(0.0, GAIN_RAMP_S);
        self.output_level = Ramped::new(1.0, GAIN_RAMP_S);
        self.voicing = 1.0;
        self.breathiness = 0.0;
        self.pitch_hz = 110.0;
    }

    /// Balance between periodic and noise excitation. 0 is noise-only,
    /// 1 is tone-only, with a breathiness-scaled noise floor that stays open
    /// even at full voicing.
    pub fn set_voicing_amount(&mut self, voicing: f32) {
        self.voicing = voicing.clamp(0.0, 1.0);
        self.tone_gain.set_target(self.voicing);
        self.update_noise_gain();
    }

    /// Breathiness scales the noise path; it never touches the tone gain.
    pub fn set_breathiness(&mut self, breathiness: f32) {
        self.breathiness = breathiness.clamp(0.0, 1.0);
        self.update_noise_gain();
    }

    fn update_noise_gain(&mut self) {
        // The unvoiced share plus the always-open floor, both gated by
        // breathiness: a whisper with zero breathiness is true silence.
        let gain = self.breathiness * ((1.0 - self.voicing) + NOISE_FLOOR);
        self.noise_gain.set_target(gain.clamp(0.0, 1.0));
    }

    pub fn set_pitch(&mut self, pitch_hz: f32) {
        self.pitch_hz = pitch_hz.max(0.0);
    }

    pub fn set_output_level(&mut self, level: f32) {
        self.output_level.set_target(level.clamp(0.0, 1.0));
    }

    pub fn pitch_hz(&self) -> f32 {
        self.pitch_hz
    }

    pub fn voicing(&self) -> f32 {
        self.voicing
    }

    pub fn breathiness(&self) -> f32 {
        self.breathiness
    }

    /// Current tone gain ramp target.
    pub fn tone_gain(&self) -> f32 {
        self.tone_gain.target()
    }

    /// Current noise gain ramp target.
    pub fn noise_gain(&self) -> f32 {
        self.noise_gain.target()
    }

    /// Render one block of tone and noise excitation into separate buffers,
    /// already gain-staged, so the caller can feed them to different
    /// resonance branches.
    #[inline]
    pub fn render(&mut self, tone: &mut [f32], noise: &mut [f32]) {
        // One drift step per block keeps the pitch alive between control
        // ticks without touching the per-sample path.
        let drift = self
            .drift
            .render(DRIFT_RATE_HZ * tone.len() as f32 / SAMPLE_RATE);
        self.glottal
            .set_frequency_hz(self.pitch_hz * (1.0 + DRIFT_DEPTH * drift));

        self.glottal.render(tone);
        self.noise.render(noise);

        for (tone_sample, noise_sample) in tone.iter_mut().zip(noise.iter_mut()) {
            let level = self.output_level.next();
            *tone_sample *= self.tone_gain.next() * level;
            *noise_sample *= self.noise_gain.next() * level;
        }
    }
}

impl Default for ExcitationSource {
    fn default() -> Self {
        Self::new()
    }
}
