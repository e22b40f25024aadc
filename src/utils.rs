//! Shared DSP math: smoothing, crossfades, clipping, band-limiting helpers
//! and the pseudo random generator used by the noise sources.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::SAMPLE_RATE;

#[inline]
pub fn one_pole(out: &mut f32, in_: f32, coefficient: f32) {
    *out += coefficient * (in_ - *out);
}

#[inline]
pub fn crossfade(a: f32, b: f32, fade: f32) -> f32 {
    a + (b - a) * fade
}

#[inline]
pub fn soft_limit(x: f32) -> f32 {
    x * (27.0 + x * x) / (27.0 + 9.0 * x * x)
}

#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x < -3.0 {
        -1.0
    } else if x > 3.0 {
        1.0
    } else {
        soft_limit(x)
    }
}

/// Polynomial band-limited step, sample containing the discontinuity.
#[inline]
pub fn this_blep_sample(t: f32) -> f32 {
    0.5 * t * t
}

/// Polynomial band-limited step, sample following the discontinuity.
#[inline]
pub fn next_blep_sample(t: f32) -> f32 {
    let t = 1.0 - t;
    -0.5 * t * t
}

/// Convert a smoothing time constant in seconds to a per-sample one-pole
/// coefficient.
#[inline]
pub fn time_constant_coefficient(time_s: f32) -> f32 {
    if time_s <= 0.0 {
        1.0
    } else {
        1.0 - (-1.0 / (time_s * SAMPLE_RATE)).exp()
    }
}

/// First-order ramp toward a target value.
///
/// Every continuous control in the engine goes through one of these: a `set`
/// stores a target, and the render loop pulls the smoothed value one sample
/// at a time. The parameter writer and the render path never share a sample
/// boundary, so a target write is never audible as a step.
#[derive(Debug, Clone, Copy)]
pub struct Ramped {
    value: f32,
    target: f32,
    coefficient: f32,
}

impl Ramped {
    pub fn new(initial: f32, time_s: f32) -> Self {
        Self {
            value: initial,
            target: initial,
            coefficient: time_constant_coefficient(time_s),
        }
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Skip smoothing. Only for mode handover, never while audio is audible.
    #[inline]
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
    }

    #[inline]
    pub fn next(&mut self) -> f32 {
        self.value += self.coefficient * (self.target - self.value);
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }
}

pub mod random {
    //! Fast pseudo random number generator.

    use core::sync::atomic::{AtomicU32, Ordering};

    static RNG_STATE: AtomicU32 = AtomicU32::new(0x21);

    #[inline]
    pub fn seed(seed: u32) {
        RNG_STATE.store(seed, Ordering::Relaxed);
    }

    #[inline]
    pub fn get_word() -> u32 {
        let next = RNG_STATE
            .load(Ordering::Relaxed)
            .wrapping_mul(1664525)
            .wrapping_add(1013904223);
        RNG_STATE.store(next, Ordering::Relaxed);
        next
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn get_float() -> f32 {
        get_word() as f32 / 4294967296.0
    }
}
