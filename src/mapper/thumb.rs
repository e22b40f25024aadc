//! Abstract thumb-distance mode.
//!
//! Four thumb-to-fingertip distances map to four consonant groups. Only the
//! single nearest contact below the proximity threshold is applied, with no
//! blending, so two touching fingers can never smear into an ambiguous
//! half-consonant. Vowel and pitch behave exactly like the ergonomic mode.

use crate::articulation::ArticulationState;
use crate::classify::default_phoneme;
use crate::gesture::GestureFrame;
use crate::phoneme::{phoneme, Manner, Place};

use super::{apply_phoneme, single_hand_base};

/// A thumb-fingertip distance below this counts as a contact.
pub const PROXIMITY_THRESHOLD: f32 = 0.08;

/// Consonant group per fingertip: index, middle, ring, pinky.
const GROUPS: [(Place, Manner); 4] = [
    (Place::Bilabial, Manner::Stop),
    (Place::Alveolar, Manner::Stop),
    (Place::Velar, Manner::Stop),
    (Place::Alveolar, Manner::Fricative),
];

#[derive(Debug, Clone, Default)]
pub struct ThumbDistanceMapper {
    breath: f32,
}

impl ThumbDistanceMapper {
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

        let mut best: Option<(usize, f32)> = None;
        for (finger, distance) in frame.thumb_distance.iter().enumerate() {
            if *distance < PROXIMITY_THRESHOLD {
                match best {
                    Some((_, best_distance)) if *distance >= best_distance => {}
                    _ => best = Some((finger, *distance)),
                }
            }
        }

        if let Some((finger, distance)) = best {
            let intensity = (PROXIMITY_THRESHOLD - distance) / PROXIMITY_THRESHOLD;
            let (place, manner) = GROUPS[finger];
            let voiced = state.voicing_mix > 0.5;
            let symbol = default_phoneme(place, manner, voiced);
            if let Some(entry) = phoneme(symbol) {
                apply_phoneme(&mut state, entry, intensity);
            }
        }

        state
    }
}
