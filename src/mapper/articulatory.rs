//! Full articulatory mode: the complete model. Adds breath control from
//! forward tilt and a velocity-based plosive detector on top of the
//! bio-mechanical articulators.

use crate::articulation::{acoustics_from_articulators, ArticulationState, Articulators};
use crate::gesture::{GestureFrame, INDEX, MIDDLE, RING};

use super::{
    breath_from_tilt, lip_closure_from_pinch, pinch_velocity_edge, pitch_from_palm_height,
    SmoothedPosition,
};

#[derive(Debug, Clone)]
pub struct ArticulatoryMapper {
    position: SmoothedPosition,
    last_breath: f32,
    last_pinch_velocity: f32,
    breath: f32,
}

impl Default for ArticulatoryMapper {
    fn default() -> Self {
        Self {
            position: SmoothedPosition::new(),
            last_breath: 0.0,
            last_pinch_velocity: 0.0,
            breath: 0.0,
        }
    }
}

impl ArticulatoryMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current breath level, for diagnostics.
    pub fn breath(&self) -> f32 {
        self.breath
    }

    pub fn update(&mut self, frame: &GestureFrame) -> ArticulationState {
        let closure = lip_closure_from_pinch(frame.pinch_distance);

        let backness = 0.5 * (frame.finger_curl(INDEX) + frame.finger_curl(MIDDLE));
        let height = frame.finger_extension[MIDDLE];
        self.position.update(backness, height);

        // A fast pinch opening is the release burst; the raw closure value
        // never enters the decision.
        let plosive = pinch_velocity_edge(self.last_pinch_velocity, frame.pinch_velocity);
        self.last_pinch_velocity = frame.pinch_velocity;

        let breath = breath_from_tilt(frame.tilt);
        let breath_onset = self.last_breath <= 0.0 && breath > 0.0;
        let breath_offset = self.last_breath > 0.0 && breath <= 0.0;
        self.last_breath = breath;
        self.breath = breath;

        let articulators = Articulators {
            lip_closure: closure,
            tongue_height: self.position.height,
            tongue_backness: self.position.backness,
            tongue_tip: frame.finger_extension[RING],
            voiced: frame.roll > 0.4,
            plosive,
        };

        let mut state = acoustics_from_articulators(&articulators);
        state.pitch_hz = pitch_from_palm_height(frame.palm[1]);
        state.output_level = breath;
        state.breath_onset_trigger = breath_onset;
        state.breath_offset_trigger = breath_offset;
        state
    }
}
