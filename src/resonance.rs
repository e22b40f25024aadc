//! Resonance network: three formant resonators in series on the oral path,
//! a low-pass nasal branch and a band-pass fricative branch, each with its
//! own mix gain into the common output.
//!
//! The network is agnostic to what feeds it; the mode controller decides
//! which excitation buffers arrive at which branch. Formant frequencies ramp
//! over ~50 ms; mix gains ramp over ~20 ms.

use alloc::boxed::Box;
use alloc::vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::svf::{OnePoleLp, Svf, SvfMode};
use crate::utils::{one_pole, Ramped};
use crate::SAMPLE_RATE;

const FORMANT_RAMP_S: f32 = 0.050;
const GAIN_RAMP_S: f32 = 0.020;

/// Default resonance sharpness per formant; lower formants ring narrower.
const FORMANT_Q: [f32; 3] = [15.0, 12.0, 8.0];
const DEFAULT_FORMANTS: [f32; 3] = [550.0, 1600.0, 2450.0];

/// Nasal branch cutoff. The murmur lives below the first formant.
const NASAL_CUTOFF_HZ: f32 = 600.0;

/// The resonant peaks of the series sections stack up to well over unity;
/// this brings the oral branch back into range.
const ORAL_MAKEUP: f32 = 0.25;

#[derive(Debug, Clone)]
struct FormantSection {
    svf: Svf,
    center_hz: f32,
    target_hz: f32,
    q: f32,
}

impl FormantSection {
    fn new(center_hz: f32, q: f32) -> Self {
        let mut svf = Svf::new();
        svf.init();
        Self {
            svf,
            center_hz,
            target_hz: center_hz,
            q,
        }
    }

    #[inline]
    fn retune(&mut self, ramp_coefficient: f32, q_scale: f32) {
        one_pole(&mut self.center_hz, self.target_hz, ramp_coefficient);
        let q = (self.q * q_scale).max(1.0);
        self.svf.set_f_q(self.center_hz / SAMPLE_RATE, q);
    }
}

#[derive(Debug, Clone)]
pub struct ResonanceNetwork {
    sections: [FormantSection; 3],

    nasal_lp: OnePoleLp,

    fricative: Svf,
    fricative_center_hz: f32,
    fricative_target_hz: f32,
    fricative_q: f32,

    oral_gain: Ramped,
    nasal_gain: Ramped,
    fricative_gain: Ramped,

    damping: f32,

    temp: Box<[f32]>,
}

impl ResonanceNetwork {
    pub fn new(block_size: usize) -> Self {
        let mut nasal_lp = OnePoleLp::new();
        nasal_lp.init();
        nasal_lp.set_f(NASAL_CUTOFF_HZ / SAMPLE_RATE);

        let mut fricative = Svf::new();
        fricative.init();

        Self {
            sections: [
                FormantSection::new(DEFAULT_FORMANTS[0], FORMANT_Q[0]),
                FormantSection::new(DEFAULT_FORMANTS[1], FORMANT_Q[1]),
                FormantSection::new(DEFAULT_FORMANTS[2], FORMANT_Q[2]),
            ],
            nasal_lp,
            fricative,
            fricative_center_hz: 4000.0,
            fricative_target_hz: 4000.0,
            fricative_q: 2.0,
            oral_gain: Ramped::new(1.0, GAIN_RAMP_S),
            nasal_gain: Ramped::new(0.0, GAIN_RAMP_S),
            fricative_gain: Ramped::new(0.0, GAIN_RAMP_S),
            damping: 0.0,
            temp: vec![0.0; block_size].into_boxed_slice(),
        }
    }

    /// Clear all filter memory. Tunings and gain targets survive.
    pub fn reset(&mut self) {
        for section in self.sections.iter_mut() {
            section.svf.reset();
        }
        self.nasal_lp.reset();
        self.fricative.reset();
    }

    /// Snap branch gains to mode defaults, bypassing the ramps. Only called
    /// during mode handover while the paths are detached.
    pub fn snap_gains(&mut self, oral: f32, nasal: f32, fricative: f32) {
        self.oral_gain.snap(oral);
        self.nasal_gain.snap(nasal);
        self.fricative_gain.snap(fricative);
    }

    pub fn set_formants(&mut self, f1: f32, f2: f32, f3: f32) {
        self.sections[0].target_hz = f1;
        self.sections[1].target_hz = f2;
        self.sections[2].target_hz = f3;
    }

    /// Ramp targets of the three formant sections.
    pub fn formants(&self) -> (f32, f32, f32) {
        (
            self.sections[0].target_hz,
            self.sections[1].target_hz,
            self.sections[2].target_hz,
        )
    }

    /// Damp formant resonance during obstruents; 0 leaves the configured Q.
    pub fn set_formant_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    pub fn set_fricative_band(&mut self, center_hz: f32, bandwidth_hz: f32) {
        self.fricative_target_hz = center_hz.clamp(200.0, 12000.0);
        self.fricative_q = (self.fricative_target_hz / bandwidth_hz.max(100.0)).clamp(0.5, 20.0);
    }

    pub fn set_oral_gain(&mut self, gain: f32) {
        self.oral_gain.set_target(gain.clamp(0.0, 1.0));
    }

    pub fn set_nasal_gain(&mut self, gain: f32) {
        self.nasal_gain.set_target(gain.clamp(0.0, 1.0));
    }

    pub fn set_fricative_gain(&mut self, gain: f32) {
        self.fricative_gain.set_target(gain.clamp(0.0, 1.0));
    }

    /// Filter one block. Branch inputs may alias the same excitation buffer;
    /// the output is overwritten, not accumulated.
    #[inline]
    pub fn render(&mut self, oral_in: &[f32], nasal_in: &[f32], fricative_in: &[f32], out: &mut [f32]) {
        let block = out.len();

        // Per-block coefficient advance of the formant ramps.
        let ramp = 1.0 - (-(block as f32) / (FORMANT_RAMP_S * SAMPLE_RATE)).exp();
        let q_scale = 1.0 - 0.9 * self.damping;
        for section in self.sections.iter_mut() {
            section.retune(ramp, q_scale);
        }

        one_pole(&mut self.fricative_center_hz, self.fricative_target_hz, ramp);
        self.fricative
            .set_f_q(self.fricative_center_hz / SAMPLE_RATE, self.fricative_q);

        out.fill(0.0);

        // Oral path: three resonant low-pass sections in series. Each one
        // adds a formant peak while passing the spectrum below it, so the
        // higher formants ride the natural rolloff of the lower ones.
        let temp = &mut self.temp[..block];
        temp.copy_from_slice(oral_in);
        for section in self.sections.iter_mut() {
            for sample in temp.iter_mut() {
                *sample = section.svf.process(*sample, SvfMode::LowPass);
            }
        }
        for (out_sample, branch_sample) in out.iter_mut().zip(temp.iter()) {
            *out_sample += *branch_sample * ORAL_MAKEUP * self.oral_gain.next();
        }

        // Nasal branch.
        for (out_sample, in_sample) in out.iter_mut().zip(nasal_in.iter()) {
            *out_sample += self.nasal_lp.process(*in_sample) * self.nasal_gain.next();
        }

        // Fricative branch.
        for (out_sample, in_sample) in out.iter_mut().zip(fricative_in.iter()) {
            *out_sample +=
                self.fricative.process(*in_sample, SvfMode::BandPass) * self.fricative_gain.next();
        }
    }
}
