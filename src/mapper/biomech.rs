//! Bio-mechanical mode: pinch distance is the lips, finger pose is the
//! tongue, roll is the larynx.

use crate::articulation::{acoustics_from_articulators, ArticulationState, Articulators};
use crate::gesture::{GestureFrame, INDEX, MIDDLE, PINKY, RING};

use super::{closure_release_edge, lip_closure_from_pinch, pitch_from_palm_height, SmoothedPosition};

/// Minimum one-tick closure drop that counts as a release burst.
pub const DEFAULT_RELEASE_SENSITIVITY: f32 = 0.15;

#[derive(Debug, Clone)]
pub struct BioMechanicalMapper {
    position: SmoothedPosition,
    last_closure: f32,
    release_sensitivity: f32,
}

impl Default for BioMechanicalMapper {
    fn default() -> Self {
        Self {
            position: SmoothedPosition::new(),
            last_closure: 0.0,
            release_sensitivity: DEFAULT_RELEASE_SENSITIVITY,
        }
    }
}

impl BioMechanicalMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_release_sensitivity(&mut self, sensitivity: f32) {
        self.release_sensitivity = sensitivity.max(0.0);
    }

    pub fn update(&mut self, frame: &GestureFrame) -> ArticulationState {
        let closure = lip_closure_from_pinch(frame.pinch_distance);

        let backness = 0.5 * (frame.finger_curl(INDEX) + frame.finger_curl(MIDDLE));
        let height = 0.5 * (frame.finger_extension[RING] + frame.finger_extension[PINKY]);
        self.position.update(backness, height);

        let voiced = frame.roll > 0.4;
        let plosive = closure_release_edge(self.last_closure, closure, self.release_sensitivity);
        self.last_closure = closure;

        let articulators = Articulators {
            lip_closure: closure,
            tongue_height: self.position.height,
            tongue_backness: self.position.backness,
            tongue_tip: self.position.height,
            voiced,
            plosive,
        };

        let mut state = acoustics_from_articulators(&articulators);
        state.pitch_hz = pitch_from_palm_height(frame.palm[1]);
        state
    }
}
