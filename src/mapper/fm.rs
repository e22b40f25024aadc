//! FM mode: a two-operator FM tone played like a theremin. Kept from the
//! era before the vocal model, still useful as a pitch-practice topology.

use crate::articulation::ArticulationState;
use crate::gesture::GestureFrame;

use super::pitch_from_palm_height;

/// Modulator ratios worth landing on. Continuous ratio sweeps just detune.
const RATIO_STEPS: [f32; 5] = [0.5, 1.0, 1.5, 2.0, 3.0];

#[derive(Debug, Clone)]
pub struct FmMapper {
    index: f32,
    ratio: f32,
}

impl Default for FmMapper {
    fn default() -> Self {
        Self {
            index: 0.0,
            ratio: 1.0,
        }
    }
}

impl FmMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Modulation index for the FM pair, updated per tick.
    pub fn index(&self) -> f32 {
        self.index
    }

    /// Quantized modulator ratio.
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn update(&mut self, frame: &GestureFrame) -> ArticulationState {
        self.index = frame.openness.clamp(0.0, 1.0);

        let step = (frame.roll.clamp(0.0, 1.0) * (RATIO_STEPS.len() as f32 - 0.001)) as usize;
        self.ratio = RATIO_STEPS[step];

        let mut state = ArticulationState::default();
        state.pitch_hz = pitch_from_palm_height(frame.palm[1]);
        state.voicing_mix = 1.0;
        state.output_level = frame.openness.clamp(0.0, 1.0);
        state
    }
}
