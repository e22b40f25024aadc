//! Acoustic parameter records and the articulator-to-acoustics mapping.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::vowel::formants_for_position;

/// Full set of acoustic targets produced by a mapper for one control tick.
///
/// Continuous fields become ramp targets on the excitation source and the
/// resonance network; the trigger flags fire one-shot envelope events.
#[derive(Debug, Clone, Copy)]
pub struct ArticulationState {
    pub pitch_hz: f32,

    pub f1: f32,
    pub f2: f32,
    pub f3: f32,

    /// 0 is noise-only, 1 is tone-only.
    pub voicing_mix: f32,
    pub aspiration_level: f32,
    pub output_level: f32,

    pub oral_gain: f32,
    pub nasal_gain: f32,
    pub fricative_gain: f32,
    pub fricative_center_hz: f32,
    pub fricative_bandwidth_hz: f32,

    /// 0 leaves formant resonances sharp, 1 fully damps them.
    pub formant_damping: f32,

    pub plosive_trigger: bool,
    pub breath_onset_trigger: bool,
    pub breath_offset_trigger: bool,
}

impl Default for ArticulationState {
    fn default() -> Self {
        let (f1, f2, f3) = formants_for_position(0.5, 0.5);
        Self {
            pitch_hz: 110.0,
            f1,
            f2,
            f3,
            voicing_mix: 1.0,
            aspiration_level: 0.0,
            output_level: 1.0,
            oral_gain: 1.0,
            nasal_gain: 0.0,
            fricative_gain: 0.0,
            fricative_center_hz: 4000.0,
            fricative_bandwidth_hz: 2000.0,
            formant_damping: 0.0,
            plosive_trigger: false,
            breath_onset_trigger: false,
            breath_offset_trigger: false,
        }
    }
}

/// The six articulatory degrees of freedom the acoustic model consumes.
#[derive(Debug, Clone, Copy)]
pub struct Articulators {
    /// 0 open lips to 1 full closure.
    pub lip_closure: f32,
    /// 0 low to 1 high.
    pub tongue_height: f32,
    /// 0 front to 1 back, in vowel-space convention.
    pub tongue_backness: f32,
    /// Tongue tip position, 0 retracted to 1 at the alveolar ridge.
    pub tongue_tip: f32,
    pub voiced: bool,
    pub plosive: bool,
}

/// Height of tongue above which turbulent airflow starts.
pub const FRICATION_HEIGHT: f32 = 0.7;

/// Convert articulator positions to the full acoustic parameter set.
///
/// This is the acoustic model's single source of truth: pure, stateless and
/// deterministic. Pitch and output level are performance parameters, not
/// articulation, so the caller fills those in afterwards.
pub fn acoustics_from_articulators(articulators: &Articulators) -> ArticulationState {
    let closure = articulators.lip_closure.clamp(0.0, 1.0);
    let height = articulators.tongue_height.clamp(0.0, 1.0);
    let backness = articulators.tongue_backness.clamp(0.0, 1.0);
    let tip = articulators.tongue_tip.clamp(0.0, 1.0);

    let mut state = ArticulationState::default();

    // Lip closure shades all formants downward before the oral path fades.
    // The vowel-space height axis raises F1, so phonetic tongue height goes
    // in inverted: a high tongue makes a close vowel.
    let lip_factor = 1.0 - 0.25 * closure;
    let (f1, f2, f3) = formants_for_position(backness, 1.0 - height);
    state.f1 = f1 * lip_factor;
    state.f2 = f2 * lip_factor;
    state.f3 = f3;

    // Power-law crossfade between the oral and nasal branches. A linear
    // crossfade reads as a mechanical shutter rather than a velum.
    state.oral_gain = (1.0 - closure).powf(1.5);
    state.nasal_gain = closure.powf(0.8) * 0.7;

    let voiced = articulators.voiced;
    state.voicing_mix = if voiced { 1.0 } else { 0.0 };
    state.aspiration_level = if voiced { 0.1 } else { 0.4 };

    // Frication starts once the tongue crowds the palate; unvoiced
    // constrictions get twice the noise.
    if height > FRICATION_HEIGHT {
        let strength = (height - FRICATION_HEIGHT) / (1.0 - FRICATION_HEIGHT);
        state.fricative_gain = strength * if voiced { 0.5 } else { 1.0 };
    }
    state.fricative_center_hz = 2000.0 + tip * 4500.0;
    state.fricative_bandwidth_hz = state.fricative_center_hz / 3.0;

    if articulators.plosive {
        state.plosive_trigger = true;
        state.fricative_gain = state.fricative_gain.max(0.8);
    }

    state.formant_damping = closure * 0.5;

    state
}
