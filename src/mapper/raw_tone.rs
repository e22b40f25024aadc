//! Raw tone mode: the earliest topology. Palm height is pitch, openness is
//! level, the tone goes straight to the output with no vocal tract at all.

use crate::articulation::ArticulationState;
use crate::gesture::GestureFrame;

use super::pitch_from_palm_height;

#[derive(Debug, Clone, Default)]
pub struct RawToneMapper;

impl RawToneMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn update(&mut self, frame: &GestureFrame) -> ArticulationState {
        let mut state = ArticulationState::default();
        state.pitch_hz = pitch_from_palm_height(frame.palm[1]);
        state.voicing_mix = 1.0;
        state.output_level = frame.openness.clamp(0.0, 1.0);
        state
    }
}
