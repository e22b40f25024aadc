//! Per-mode articulation mappers.
//!
//! Each synthesis mode owns a mapper that consumes one gesture frame per
//! control tick and produces the full set of acoustic targets. The set of
//! modes is closed, so dispatch is a plain enum selected once at mode-switch
//! time; nothing re-branches per tick. All "last value" state lives inside
//! the individual mapper, scoped to the session that owns the voice.

pub mod articulatory;
pub mod biomech;
pub mod clean;
pub mod ergonomic;
pub mod fm;
pub mod raw_tone;
pub mod thumb;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::articulation::ArticulationState;
use crate::classify::{classify, default_phoneme};
use crate::gesture::{GestureFrame, INDEX, MIDDLE};
use crate::phoneme::{phoneme, Manner, PhonemeEntry};
use crate::utils::{crossfade, one_pole};
use crate::vowel::formants_for_position;

pub use articulatory::ArticulatoryMapper;
pub use biomech::BioMechanicalMapper;
pub use clean::CleanMapper;
pub use ergonomic::ErgonomicMapper;
pub use fm::FmMapper;
pub use raw_tone::RawToneMapper;
pub use thumb::ThumbDistanceMapper;

/// Per-tick smoothing factor for the articulatory position. Heavy enough to
/// keep tracking jitter out of the formants.
pub const POSITION_SMOOTHING: f32 = 0.2;

/// Base fundamental around which the pitch mappings operate.
pub const BASE_PITCH_HZ: f32 = 110.0;

/// Oral gain never drops to zero during a consonant; a little oral leak
/// keeps coarticulation smooth.
pub const ORAL_GAIN_FLOOR: f32 = 0.15;

/// Tilt window for breath control: dead below `BREATH_TILT_START`, full at
/// `BREATH_TILT_FULL`. Only forward tilt produces breath.
pub const BREATH_TILT_START: f32 = -0.15;
pub const BREATH_TILT_FULL: f32 = -0.4;

/// Dispatch over the closed set of mode mappers.
#[derive(Debug, Clone)]
pub enum Mapper {
    RawTone(RawToneMapper),
    Clean(CleanMapper),
    Fm(FmMapper),
    BioMechanical(BioMechanicalMapper),
    Articulatory(ArticulatoryMapper),
    Ergonomic(ErgonomicMapper),
    ThumbDistance(ThumbDistanceMapper),
}

impl Mapper {
    /// Map one gesture frame to acoustic targets.
    pub fn update(&mut self, frame: &GestureFrame) -> ArticulationState {
        match self {
            Mapper::RawTone(mapper) => mapper.update(frame),
            Mapper::Clean(mapper) => mapper.update(frame),
            Mapper::Fm(mapper) => mapper.update(frame),
            Mapper::BioMechanical(mapper) => mapper.update(frame),
            Mapper::Articulatory(mapper) => mapper.update(frame),
            Mapper::Ergonomic(mapper) => mapper.update(frame),
            Mapper::ThumbDistance(mapper) => mapper.update(frame),
        }
    }
}

/// Exponentially smoothed 2D articulatory position.
#[derive(Debug, Clone)]
pub struct SmoothedPosition {
    pub backness: f32,
    pub height: f32,
}

impl SmoothedPosition {
    pub fn new() -> Self {
        Self {
            backness: 0.5,
            height: 0.5,
        }
    }

    #[inline]
    pub fn update(&mut self, backness_target: f32, height_target: f32) {
        one_pole(
            &mut self.backness,
            backness_target.clamp(0.0, 1.0),
            POSITION_SMOOTHING,
        );
        one_pole(
            &mut self.height,
            height_target.clamp(0.0, 1.0),
            POSITION_SMOOTHING,
        );
    }
}

impl Default for SmoothedPosition {
    fn default() -> Self {
        Self::new()
    }
}

/// Breath level from forward tilt: a deadzone, then a linear ramp across the
/// tilt window.
#[inline]
pub fn breath_from_tilt(tilt: f32) -> f32 {
    ((BREATH_TILT_START - tilt) / (BREATH_TILT_START - BREATH_TILT_FULL)).clamp(0.0, 1.0)
}

/// Palm height to pitch, roughly 80 to 240 Hz across the frame.
#[inline]
pub fn pitch_from_palm_height(palm_y: f32) -> f32 {
    80.0 + (1.0 - palm_y).clamp(0.0, 1.0) * 160.0
}

/// Hand roll to a pitch multiplier between 0.5x and 2x.
#[inline]
pub fn pitch_multiplier_from_roll(roll: f32) -> f32 {
    2.0_f32.powf((roll.clamp(0.0, 1.0) - 0.5) * 2.0)
}

/// Lip closure from pinch distance: closed at 0.05 and below, open at 0.1.
#[inline]
pub fn lip_closure_from_pinch(pinch_distance: f32) -> f32 {
    ((0.1 - pinch_distance) / 0.05).clamp(0.0, 1.0)
}

/// Delta-threshold plosive detector: the closure was past the closed point
/// and dropped below it by more than `sensitivity` in one tick.
#[inline]
pub fn closure_release_edge(previous_closure: f32, closure: f32, sensitivity: f32) -> bool {
    previous_closure > 0.8 && closure < 0.8 && (previous_closure - closure) > sensitivity
}

/// Velocity-threshold plosive detector: the pinch is opening faster than
/// 2 units per second. Edge-gated on the predicate so one fast opening
/// fires exactly once.
#[inline]
pub fn pinch_velocity_edge(previous_velocity: f32, velocity: f32) -> bool {
    velocity < -2.0 && previous_velocity >= -2.0
}

/// Shared single-hand base mapping (ergonomic and thumb-distance modes):
/// breath drives voicing and level, roll scales pitch, two raw finger-curl
/// channels select the vowel.
pub(crate) fn single_hand_base(frame: &GestureFrame) -> (ArticulationState, f32) {
    let breath = breath_from_tilt(frame.tilt);

    let mut state = ArticulationState::default();
    state.voicing_mix = breath.powf(0.6);
    state.output_level = breath.powf(1.3);
    state.pitch_hz = BASE_PITCH_HZ * pitch_multiplier_from_roll(frame.roll);

    // Responsiveness over jitter suppression: these channels are raw.
    let backness = frame.finger_curl(INDEX).clamp(0.0, 1.0);
    let height = frame.finger_curl(MIDDLE).clamp(0.0, 1.0);
    let (f1, f2, f3) = formants_for_position(backness, height);
    state.f1 = f1;
    state.f2 = f2;
    state.f3 = f3;

    // Breathiness collapses quickly once voicing engages.
    state.aspiration_level = (1.0 - breath * 1.5).max(0.0).powf(2.0);

    (state, breath)
}

/// Apply a matched phoneme entry to the base state at a given closure
/// intensity: approximants pull the formants, obstruents rework the branch
/// gains and damp the formant resonances.
pub(crate) fn apply_phoneme(state: &mut ArticulationState, entry: &PhonemeEntry, closure: f32) {
    let closure = closure.clamp(0.0, 1.0);

    if let Some((f1, f2, f3)) = entry.target_formants {
        state.f1 = crossfade(state.f1, f1, closure);
        state.f2 = crossfade(state.f2, f2, closure);
        state.f3 = crossfade(state.f3, f3, closure);
    } else {
        state.oral_gain = crossfade(state.oral_gain, entry.oral_gain, closure).max(ORAL_GAIN_FLOOR);
        state.nasal_gain = crossfade(state.nasal_gain, entry.nasal_gain, closure);
        if entry.manner == Manner::Fricative {
            state.fricative_gain = closure * if entry.voiced { 0.6 } else { 1.0 };
            state.fricative_center_hz = entry.noise_center_hz;
            state.fricative_bandwidth_hz = entry.noise_bandwidth_hz;
        }
    }

    state.formant_damping = (closure * entry.damping).clamp(0.0, 1.0);
}

/// Classify the frame and apply the matched consonant, resolving default
/// phonemes through the standard policy.
pub(crate) fn apply_classified_consonant(state: &mut ArticulationState, frame: &GestureFrame) {
    if let Some(consonant) = classify(frame) {
        let voiced = state.voicing_mix > 0.5;
        let symbol = consonant
            .phoneme
            .unwrap_or_else(|| default_phoneme(consonant.place, consonant.manner, voiced));
        if let Some(entry) = phoneme(symbol) {
            apply_phoneme(state, entry, consonant.closure);
        }
    }
}
