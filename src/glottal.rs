//! Band-limited glottal pulse oscillator.
//!
//! A polyblep ramp is differentiated against a tracking low-pass, which
//! yields the asymmetric pulse shape of a glottal flow derivative without
//! the cost of a full waveform model. Frequency changes are ramped over
//! about 10 ms so pitch automation never steps.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::{next_blep_sample, this_blep_sample, Ramped};
use crate::SAMPLE_RATE;

/// Upper limit for the fundamental, in normalized frequency. Keeps the blep
/// correction well-conditioned.
const MAX_FREQUENCY: f32 = 0.0625;

const FREQUENCY_RAMP_S: f32 = 0.010;

#[derive(Debug, Clone)]
pub struct GlottalOscillator {
    phase: f32,
    next_sample: f32,
    pulse_lp: f32,
    frequency: Ramped,
}

impl Default for GlottalOscillator {
    fn default() -> Self {
        Self {
            phase: 0.0,
            next_sample: 0.0,
            pulse_lp: 0.0,
            frequency: Ramped::new(110.0 / SAMPLE_RATE, FREQUENCY_RAMP_S),
        }
    }
}

impl GlottalOscillator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        *self = Self::default();
    }

    /// Schedule a pitch ramp toward `frequency_hz`.
    #[inline]
    pub fn set_frequency_hz(&mut self, frequency_hz: f32) {
        let f = (frequency_hz / SAMPLE_RATE).clamp(0.0, MAX_FREQUENCY);
        self.frequency.set_target(f);
    }

    #[inline]
    pub fn frequency_hz(&self) -> f32 {
        self.frequency.target() * SAMPLE_RATE
    }

    #[inline]
    pub fn render(&mut self, out: &mut [f32]) {
        let mut next_sample = self.next_sample;

        for out_sample in out.iter_mut() {
            let mut this_sample = next_sample;
            next_sample = 0.0;

            let frequency = self.frequency.next();
            self.phase += frequency;

            if self.phase >= 1.0 {
                self.phase -= 1.0;
                let t = self.phase / frequency;
                this_sample -= this_blep_sample(t);
                next_sample -= next_blep_sample(t);
            }
            next_sample += self.phase;

            let d = this_sample - 0.5 - self.pulse_lp;
            self.pulse_lp += f32::min(16.0 * frequency, 1.0) * d;
            *out_sample = 2.0 * d;
        }

        self.next_sample = next_sample;
    }
}
