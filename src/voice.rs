//! Top-level voice: mode selection, signal routing and the control/render
//! API exposed to the host application.
//!
//! The voice sits between two rates. The detection-rate producer calls
//! [`Voice::update_from_gesture`] once per tick; every continuous parameter
//! lands as a ramp target and every event becomes an envelope trigger. The
//! render-rate consumer calls [`Voice::render`] from the audio callback and
//! only ever advances ramps; no update can stall or step the audio path.

use alloc::boxed::Box;
use alloc::vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::articulation::ArticulationState;
use crate::envelope::{EnergyEnvelope, BREATH_SWELL, PLOSIVE_BURST};
use crate::error::{Error, Result};
use crate::excitation::ExcitationSource;
use crate::fm::TwoOpFm;
use crate::gesture::GestureFrame;
use crate::mapper::{
    ArticulatoryMapper, BioMechanicalMapper, CleanMapper, ErgonomicMapper, FmMapper, Mapper,
    RawToneMapper, ThumbDistanceMapper,
};
use crate::resonance::ResonanceNetwork;
use crate::utils::{soft_clip, Ramped};
use crate::vowel::nearest_vowel;

pub const MAX_BLOCK_SIZE: usize = 1024;

const VOLUME_RAMP_S: f32 = 0.020;

/// Voice-size formant scaling stays within a narrow band; outside it the
/// result stops reading as a voice.
const VOICE_SIZE_MIN: f32 = 0.8;
const VOICE_SIZE_MAX: f32 = 1.2;

/// Fraction of the breath level the gate settles at after the onset swell.
const BREATH_SUSTAIN: f32 = 0.85;

/// Synthesis topology. Selecting a mode swaps the articulation mapper and
/// rebuilds the signal routing in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthMode {
    /// Direct tone, no vocal tract.
    RawTone,
    /// Vowel-only formant voice.
    Clean,
    /// Two-operator FM tone.
    Fm,
    /// Pinch-as-lips vocal model.
    BioMechanical,
    /// Full articulatory model with breath control.
    Articulatory,
    /// Single-hand ergonomic mapping.
    Ergonomic,
    /// Thumb-to-fingertip consonant selection.
    ThumbDistance,
}

/// Which excitation buffer feeds a resonance branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BranchSource {
    Tone,
    Noise,
    Mix,
}

/// How the energy envelope shapes the excitation in a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvelopeRole {
    /// Envelope unused; excitation passes unchanged.
    Bypass,
    /// Plosive bursts ride on top of the steady excitation.
    Burst,
    /// The envelope gates all excitation: silence until breath arrives,
    /// with bursts riding on the breath level.
    BreathGate,
}

/// Signal-graph wiring for one mode, built once at mode-select time.
#[derive(Debug, Clone, Copy)]
struct Routing {
    oral: Option<BranchSource>,
    nasal: Option<BranchSource>,
    fricative: Option<BranchSource>,
    /// Tone straight to the output, bypassing the resonance network.
    direct_tone: bool,
    /// The direct tone is the FM pair rather than the glottal source.
    fm_tone: bool,
    envelope: EnvelopeRole,
}

fn routing_for(mode: SynthMode) -> Routing {
    match mode {
        SynthMode::RawTone => Routing {
            oral: None,
            nasal: None,
            fricative: None,
            direct_tone: true,
            fm_tone: false,
            envelope: EnvelopeRole::Bypass,
        },
        SynthMode::Clean => Routing {
            oral: Some(BranchSource::Tone),
            nasal: None,
            fricative: None,
            direct_tone: false,
            fm_tone: false,
            envelope: EnvelopeRole::Bypass,
        },
        SynthMode::Fm => Routing {
            oral: None,
            nasal: None,
            fricative: None,
            direct_tone: true,
            fm_tone: true,
            envelope: EnvelopeRole::Bypass,
        },
        SynthMode::BioMechanical => Routing {
            oral: Some(BranchSource::Mix),
            nasal: Some(BranchSource::Tone),
            fricative: Some(BranchSource::Noise),
            direct_tone: false,
            fm_tone: false,
            envelope: EnvelopeRole::Burst,
        },
        SynthMode::Articulatory => Routing {
            oral: Some(BranchSource::Mix),
            nasal: Some(BranchSource::Tone),
            fricative: Some(BranchSource::Noise),
            direct_tone: false,
            fm_tone: false,
            envelope: EnvelopeRole::BreathGate,
        },
        SynthMode::Ergonomic | SynthMode::ThumbDistance => Routing {
            oral: Some(BranchSource::Mix),
            nasal: Some(BranchSource::Tone),
            fricative: Some(BranchSource::Noise),
            direct_tone: false,
            fm_tone: false,
            envelope: EnvelopeRole::Bypass,
        },
    }
}

fn mapper_for(mode: SynthMode) -> Mapper {
    match mode {
        SynthMode::RawTone => Mapper::RawTone(RawToneMapper::new()),
        SynthMode::Clean => Mapper::Clean(CleanMapper::new()),
        SynthMode::Fm => Mapper::Fm(FmMapper::new()),
        SynthMode::BioMechanical => Mapper::BioMechanical(BioMechanicalMapper::new()),
        SynthMode::Articulatory => Mapper::Articulatory(ArticulatoryMapper::new()),
        SynthMode::Ergonomic => Mapper::Ergonomic(ErgonomicMapper::new()),
        SynthMode::ThumbDistance => Mapper::ThumbDistance(ThumbDistanceMapper::new()),
    }
}

#[derive(Debug)]
pub struct Voice {
    mode: SynthMode,
    mapper: Mapper,
    routing: Routing,

    excitation: ExcitationSource,
    fm: TwoOpFm,
    resonance: ResonanceNetwork,
    energy: EnergyEnvelope,

    master_volume: Ramped,
    zone_gain: Ramped,
    direct_level: Ramped,
    voice_size: f32,

    state: ArticulationState,

    tone_buffer: Box<[f32]>,
    noise_buffer: Box<[f32]>,
    mix_buffer: Box<[f32]>,
    scratch_buffer: Box<[f32]>,
    silence_buffer: Box<[f32]>,
    block_size: usize,
}

impl Voice {
    /// Build a voice rendering in blocks of at most `block_size` samples.
    pub fn new(block_size: usize) -> Result<Self> {
        if block_size == 0 || block_size > MAX_BLOCK_SIZE {
            return Err(Error::InvalidBlockSize(block_size));
        }

        let mode = SynthMode::Clean;
        Ok(Self {
            mode,
            mapper: mapper_for(mode),
            routing: routing_for(mode),
            excitation: ExcitationSource::new(),
            fm: TwoOpFm::new(),
            resonance: ResonanceNetwork::new(block_size),
            energy: EnergyEnvelope::new(),
            master_volume: Ramped::new(1.0, VOLUME_RAMP_S),
            zone_gain: Ramped::new(1.0, VOLUME_RAMP_S),
            direct_level: Ramped::new(1.0, VOLUME_RAMP_S),
            voice_size: 1.0,
            state: ArticulationState::default(),
            tone_buffer: vec![0.0; block_size].into_boxed_slice(),
            noise_buffer: vec![0.0; block_size].into_boxed_slice(),
            mix_buffer: vec![0.0; block_size].into_boxed_slice(),
            scratch_buffer: vec![0.0; block_size].into_boxed_slice(),
            silence_buffer: vec![0.0; block_size].into_boxed_slice(),
            block_size,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn mode(&self) -> SynthMode {
        self.mode
    }

    /// Switch topology. The handover is atomic with respect to the update
    /// path: the previous mode's paths are detached, filter memory and
    /// transient gains reset to the new mode's defaults, and only then does
    /// the new mapper start accepting frames. Two modes never sum.
    pub fn select_mode(&mut self, mode: SynthMode) {
        if mode == self.mode {
            return;
        }

        self.mode = mode;
        self.routing = routing_for(mode);
        self.mapper = mapper_for(mode);

        self.resonance.reset();
        self.resonance.snap_gains(1.0, 0.0, 0.0);
        self.excitation.init();
        self.fm.init();
        self.energy.init();

        self.state = ArticulationState::default();
    }

    /// Apply one detection tick for the active mode. `None` means the hand
    /// was not detected this tick; the previous acoustic state holds.
    pub fn update_from_gesture(&mut self, frame: Option<&GestureFrame>) {
        let Some(frame) = frame else {
            return;
        };

        // Edge-of-frame tracking artifacts must not be audible: outside the
        // interaction zone the output fades to zero and nothing else moves.
        if !frame.in_active_zone() {
            self.zone_gain.set_target(0.0);
            return;
        }
        self.zone_gain.set_target(1.0);

        let state = self.mapper.update(frame);
        self.apply(state);
    }

    /// Like [`update_from_gesture`](Self::update_from_gesture), but tagged
    /// with the mode the frame was mapped for. A stale tag is a no-op, not
    /// an error.
    pub fn update_if_mode(&mut self, mode: SynthMode, frame: Option<&GestureFrame>) {
        if mode != self.mode {
            return;
        }
        self.update_from_gesture(frame);
    }

    fn apply(&mut self, state: ArticulationState) {
        self.excitation.set_pitch(state.pitch_hz);
        self.excitation.set_voicing_amount(state.voicing_mix);
        self.excitation.set_breathiness(state.aspiration_level);
        self.excitation.set_output_level(state.output_level);
        self.direct_level.set_target(state.output_level);

        if self.routing.fm_tone {
            self.fm.set_frequency_hz(state.pitch_hz);
            if let Mapper::Fm(mapper) = &self.mapper {
                self.fm.set_index(mapper.index());
                self.fm.set_ratio(mapper.ratio());
            }
        }

        let scale = self.voice_size;
        self.resonance
            .set_formants(state.f1 * scale, state.f2 * scale, state.f3 * scale);
        self.resonance.set_formant_damping(state.formant_damping);
        self.resonance.set_oral_gain(state.oral_gain);
        self.resonance.set_nasal_gain(state.nasal_gain);
        self.resonance.set_fricative_gain(state.fricative_gain);
        self.resonance
            .set_fricative_band(state.fricative_center_hz, state.fricative_bandwidth_hz);

        // Breath sustains the gate at a level tracking the tilt; bursts
        // always decay back to whatever that level currently is.
        let breath_gated = self.routing.envelope == EnvelopeRole::BreathGate;
        let sustain = if breath_gated {
            BREATH_SUSTAIN * state.output_level
        } else {
            0.0
        };

        if state.breath_onset_trigger {
            self.energy.set_profile(&BREATH_SWELL);
            self.energy.set_sustain(sustain);
            self.energy.trigger(state.output_level.max(0.5));
        } else if breath_gated && self.energy.is_active() && !state.breath_offset_trigger {
            self.energy.set_sustain(sustain);
        }

        if state.plosive_trigger {
            self.energy.set_profile(&PLOSIVE_BURST);
            self.energy.set_sustain(sustain);
            self.energy.trigger(1.0);
        }

        if state.breath_offset_trigger {
            self.energy.release();
        }

        self.state = state;
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume.set_target(volume.clamp(0.0, 1.0));
    }

    /// Formant scaling for voice character, clamped to 0.8x-1.2x.
    pub fn set_voice_size_scale(&mut self, scale: f32) {
        self.voice_size = scale.clamp(VOICE_SIZE_MIN, VOICE_SIZE_MAX);
        let scale = self.voice_size;
        self.resonance.set_formants(
            self.state.f1 * scale,
            self.state.f2 * scale,
            self.state.f3 * scale,
        );
    }

    /// Current formant ramp targets after voice-size scaling.
    pub fn formants(&self) -> (f32, f32, f32) {
        self.resonance.formants()
    }

    /// Nearest vowel label for the current formant pair. Display only.
    pub fn nearest_vowel_label(&self) -> &'static str {
        let (f1, f2, _) = self.resonance.formants();
        nearest_vowel(f1, f2)
    }

    /// Current breath level, zero in modes without breath control.
    pub fn breath_level(&self) -> f32 {
        match &self.mapper {
            Mapper::Articulatory(mapper) => mapper.breath(),
            Mapper::Ergonomic(mapper) => mapper.breath(),
            Mapper::ThumbDistance(mapper) => mapper.breath(),
            _ => 0.0,
        }
    }

    /// Current voicing amount on the excitation source.
    pub fn voicing_level(&self) -> f32 {
        self.excitation.voicing()
    }

    /// Last applied articulation state.
    pub fn articulation(&self) -> &ArticulationState {
        &self.state
    }

    /// Render audio. Slices larger than the configured block size are
    /// processed in chunks. Rendering has no notion of wall-clock time, so a
    /// sink that pauses and resumes picks up exactly where it left off.
    pub fn render(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(self.block_size) {
            self.render_block(chunk);
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        let n = out.len();

        {
            let tone = &mut self.tone_buffer[..n];
            let noise = &mut self.noise_buffer[..n];
            self.excitation.render(tone, noise);

            match self.routing.envelope {
                EnvelopeRole::Bypass => {}
                EnvelopeRole::Burst => {
                    let gain = &mut self.scratch_buffer[..n];
                    self.energy.render(gain);
                    for ((tone_sample, noise_sample), gain_sample) in
                        tone.iter_mut().zip(noise.iter_mut()).zip(gain.iter())
                    {
                        *tone_sample *= 1.0 + *gain_sample;
                        *noise_sample *= 1.0 + *gain_sample;
                    }
                }
                EnvelopeRole::BreathGate => {
                    let gain = &mut self.scratch_buffer[..n];
                    self.energy.render(gain);
                    for ((tone_sample, noise_sample), gain_sample) in
                        tone.iter_mut().zip(noise.iter_mut()).zip(gain.iter())
                    {
                        *tone_sample *= *gain_sample;
                        *noise_sample *= *gain_sample;
                    }
                }
            }

            for ((mix_sample, tone_sample), noise_sample) in self.mix_buffer[..n]
                .iter_mut()
                .zip(tone.iter())
                .zip(noise.iter())
            {
                *mix_sample = *tone_sample + *noise_sample;
            }
        }

        out.fill(0.0);

        let any_branch = self.routing.oral.is_some()
            || self.routing.nasal.is_some()
            || self.routing.fricative.is_some();

        if any_branch {
            let tone = &self.tone_buffer[..n];
            let noise = &self.noise_buffer[..n];
            let mix = &self.mix_buffer[..n];
            let silence = &self.silence_buffer[..n];
            let pick = |source: Option<BranchSource>| -> &[f32] {
                match source {
                    Some(BranchSource::Tone) => tone,
                    Some(BranchSource::Noise) => noise,
                    Some(BranchSource::Mix) => mix,
                    // A detached branch is fed exact silence; with its
                    // filter memory reset at mode switch it contributes
                    // nothing at all.
                    None => silence,
                }
            };

            self.resonance.render(
                pick(self.routing.oral),
                pick(self.routing.nasal),
                pick(self.routing.fricative),
                out,
            );
        }

        if self.routing.direct_tone {
            if self.routing.fm_tone {
                let fm = &mut self.scratch_buffer[..n];
                self.fm.render(fm);
                for (out_sample, fm_sample) in out.iter_mut().zip(fm.iter()) {
                    *out_sample += *fm_sample * self.direct_level.next();
                }
            } else {
                for (out_sample, tone_sample) in out.iter_mut().zip(self.tone_buffer.iter()) {
                    *out_sample += *tone_sample;
                }
            }
        }

        for out_sample in out.iter_mut() {
            let gain = self.zone_gain.next() * self.master_volume.next();
            *out_sample = soft_clip(*out_sample * gain);
        }
    }
}
