//! Two-operator FM tone for the FM topology.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::Ramped;
use crate::SAMPLE_RATE;

const TAU: f32 = core::f32::consts::TAU;

/// Phase-modulation pair: one modulator feeding one carrier.
#[derive(Debug, Clone)]
pub struct TwoOpFm {
    carrier_phase: f32,
    modulator_phase: f32,
    frequency: Ramped,
    index: Ramped,
    ratio: f32,
}

impl TwoOpFm {
    pub fn new() -> Self {
        Self {
            carrier_phase: 0.0,
            modulator_phase: 0.0,
            frequency: Ramped::new(110.0 / SAMPLE_RATE, 0.010),
            index: Ramped::new(0.0, 0.020),
            ratio: 1.0,
        }
    }

    pub fn init(&mut self) {
        *self = Self::new();
    }

    pub fn set_frequency_hz(&mut self, frequency_hz: f32) {
        self.frequency
            .set_target((frequency_hz / SAMPLE_RATE).clamp(0.0, 0.25));
    }

    /// Modulation index, 0 to 1, mapped to up to ~4 radians of deviation.
    pub fn set_index(&mut self, index: f32) {
        self.index.set_target(index.clamp(0.0, 1.0) * 4.0);
    }

    /// Modulator-to-carrier frequency ratio. Callers quantize; sweeping this
    /// continuously is out of tune by design.
    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.max(0.25);
    }

    #[inline]
    pub fn render(&mut self, out: &mut [f32]) {
        for out_sample in out.iter_mut() {
            let f = self.frequency.next();
            let index = self.index.next();

            self.modulator_phase += f * self.ratio;
            if self.modulator_phase >= 1.0 {
                self.modulator_phase -= 1.0;
            }
            self.carrier_phase += f;
            if self.carrier_phase >= 1.0 {
                self.carrier_phase -= 1.0;
            }

            let modulation = (self.modulator_phase * TAU).sin() * index;
            *out_sample = (self.carrier_phase * TAU + modulation).sin();
        }
    }
}

impl Default for TwoOpFm {
    fn default() -> Self {
        Self::new()
    }
}
