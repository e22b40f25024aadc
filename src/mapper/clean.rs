//! Vowel-only mode: a clean formant voice with no consonant logic.

use crate::articulation::ArticulationState;
use crate::gesture::{GestureFrame, INDEX, MIDDLE, PINKY, RING};
use crate::vowel::formants_for_position;

use super::{pitch_from_palm_height, SmoothedPosition};

#[derive(Debug, Clone, Default)]
pub struct CleanMapper {
    position: SmoothedPosition,
}

impl CleanMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, frame: &GestureFrame) -> ArticulationState {
        // Backness rides the curl of the pointing pair, height the extension
        // of the outer pair. Both smoothed against tracking jitter.
        let backness = 0.5 * (frame.finger_curl(INDEX) + frame.finger_curl(MIDDLE));
        let height = 0.5 * (frame.finger_extension[RING] + frame.finger_extension[PINKY]);
        self.position.update(backness, height);

        let mut state = ArticulationState::default();
        let (f1, f2, f3) = formants_for_position(self.position.backness, self.position.height);
        state.f1 = f1;
        state.f2 = f2;
        state.f3 = f3;
        state.pitch_hz = pitch_from_palm_height(frame.palm[1]);
        state.voicing_mix = 1.0;
        state.aspiration_level = 0.05;
        state
    }
}
