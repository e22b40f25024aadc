//! Retriggerable energy envelope for transient events.
//!
//! One envelope instance serves both plosive bursts and breath swells; the
//! event logic swaps the timing profile before triggering. Retriggering
//! ramps from the current instantaneous level, never from zero, so bursts
//! landing on an active envelope do not click.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::time_constant_coefficient;
use crate::SAMPLE_RATE;

/// Decay/release settle here rather than at exactly zero. Keeps the
/// exponential segments out of denormal range.
pub const LEVEL_FLOOR: f32 = 1.0e-4;

/// Attack/decay timing pair selected per trigger class.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeProfile {
    pub attack_s: f32,
    pub decay_s: f32,
}

/// Fast burst: plosive release transient.
pub const PLOSIVE_BURST: EnvelopeProfile = EnvelopeProfile {
    attack_s: 0.001,
    decay_s: 0.050,
};

/// Slow swell: breath onset.
pub const BREATH_SWELL: EnvelopeProfile = EnvelopeProfile {
    attack_s: 0.020,
    decay_s: 0.300,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvelopePhase {
    Idle,
    Attack,
    Decay,
    Release,
}

#[derive(Debug, Clone)]
pub struct EnergyEnvelope {
    phase: EnvelopePhase,
    level: f32,
    peak: f32,
    triggered: bool,

    attack_s: f32,
    decay_s: f32,
    sustain: f32,
    release_s: f32,

    attack_step: f32,
    attack_samples_remaining: u32,
    decay_coefficient: f32,
    release_coefficient: f32,
}

impl Default for EnergyEnvelope {
    fn default() -> Self {
        Self {
            phase: EnvelopePhase::Idle,
            level: 0.0,
            peak: 0.0,
            triggered: false,
            attack_s: PLOSIVE_BURST.attack_s,
            decay_s: PLOSIVE_BURST.decay_s,
            sustain: 0.0,
            release_s: 0.100,
            attack_step: 0.0,
            attack_samples_remaining: 0,
            decay_coefficient: 0.0,
            release_coefficient: 0.0,
        }
    }
}

impl EnergyEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        *self = Self::default();
    }

    /// Select the timing profile for the next trigger. Has no effect on a
    /// segment already in flight.
    pub fn set_profile(&mut self, profile: &EnvelopeProfile) {
        self.attack_s = profile.attack_s;
        self.decay_s = profile.decay_s;
    }

    pub fn set_release(&mut self, release_s: f32) {
        self.release_s = release_s.max(0.0);
    }

    /// Decay target level. Zero decays to the floor.
    pub fn set_sustain(&mut self, sustain: f32) {
        self.sustain = sustain.clamp(0.0, 1.0);
    }

    /// Begin the attack segment, cancelling any ramp in flight. The ramp
    /// starts from the current instantaneous level.
    pub fn trigger(&mut self, velocity: f32) {
        self.peak = velocity.clamp(0.0, 1.0);
        self.attack_samples_remaining = (self.attack_s * SAMPLE_RATE).max(1.0) as u32;
        self.attack_step = (self.peak - self.level) / self.attack_samples_remaining as f32;
        self.decay_coefficient = time_constant_coefficient(self.decay_s);
        self.phase = EnvelopePhase::Attack;
        self.triggered = true;
    }

    /// Begin the release segment. No-op unless currently triggered, and
    /// idempotent once released.
    pub fn release(&mut self) {
        if !self.triggered {
            return;
        }
        self.release_coefficient = time_constant_coefficient(self.release_s);
        self.phase = EnvelopePhase::Release;
        self.triggered = false;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != EnvelopePhase::Idle
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.level
    }

    #[inline]
    fn next(&mut self) -> f32 {
        match self.phase {
            EnvelopePhase::Idle => {}
            EnvelopePhase::Attack => {
                self.level += self.attack_step;
                self.attack_samples_remaining -= 1;
                if self.attack_samples_remaining == 0 {
                    self.level = self.peak;
                    self.phase = EnvelopePhase::Decay;
                }
            }
            EnvelopePhase::Decay => {
                let target = self.sustain.max(LEVEL_FLOOR);
                self.level += self.decay_coefficient * (target - self.level);
                if (self.level - target).abs() < LEVEL_FLOOR * 0.5 {
                    self.level = target;
                    if target <= LEVEL_FLOOR {
                        self.phase = EnvelopePhase::Idle;
                    }
                }
            }
            EnvelopePhase::Release => {
                self.level += self.release_coefficient * (LEVEL_FLOOR - self.level);
                if self.level <= LEVEL_FLOOR * 1.5 {
                    self.level = LEVEL_FLOOR;
                    self.phase = EnvelopePhase::Idle;
                }
            }
        }
        self.level
    }

    /// Fill `gain` with per-sample envelope values.
    #[inline]
    pub fn render(&mut self, gain: &mut [f32]) {
        for gain_sample in gain.iter_mut() {
            *gain_sample = self.next();
        }
    }

    /// Advance as [`render`](Self::render) would, without writing a buffer.
    #[inline]
    pub fn skip(&mut self, samples: usize) {
        for _ in 0..samples {
            self.next();
        }
    }
}
