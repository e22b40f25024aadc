//! Ergonomic single-hand mode.
//!
//! Everything rides one hand: forward tilt is breath, roll is pitch, two
//! finger curls pick the vowel, and the consonant classifier blends phoneme
//! targets in by closure intensity.

use crate::articulation::ArticulationState;
use crate::gesture::GestureFrame;

use super::{apply_classified_consonant, single_hand_base};

#[derive(Debug, Clone, Default)]
pub struct ErgonomicMapper {
    breath: f32,
}

impl ErgonomicMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current breath level, for diagnostics.
    pub fn breath(&self) -> f32 {
        self.breath
    }

    pub fn update(&mut self, frame: &GestureFrame) -> ArticulationState {
        let (mut state, breath) = single_hand_base(frame);
        self.breath = breath;

        apply_classified_consonant(&mut state, frame);
        state
    }
}
