//! Noise sources: a looped colored-noise table for aspiration and frication,
//! and a smooth random generator for slow pitch drift.

use alloc::boxed::Box;
use alloc::vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::svf::OnePoleLp;
use crate::utils::random;

/// Length of the precomputed noise loop. Just under 0.7 s at 48 kHz, long
/// enough that the loop point is not audible under the resonance network.
const NOISE_TABLE_SIZE: usize = 32768;

/// Colored noise from a finite precomputed buffer, read in a loop.
///
/// The table is white noise put through a gentle low-pass tilt at build time,
/// so the render path is a table read and nothing else.
#[derive(Debug, Clone)]
pub struct ColoredNoise {
    table: Box<[f32]>,
    position: usize,
}

impl ColoredNoise {
    pub fn new() -> Self {
        let mut table = vec![0.0; NOISE_TABLE_SIZE].into_boxed_slice();
        let mut tilt = OnePoleLp::new();
        tilt.init();
        tilt.set_f(4000.0 / crate::SAMPLE_RATE);

        let mut peak: f32 = 1.0e-6;
        for sample in table.iter_mut() {
            let white = random::get_float() * 2.0 - 1.0;
            // Keep a little of the white component on top of the low-pass
            // body, which reads as breath rather than rumble.
            *sample = tilt.process(white) * 0.85 + white * 0.15;
            peak = peak.max(sample.abs());
        }
        let norm = 1.0 / peak;
        for sample in table.iter_mut() {
            *sample *= norm;
        }

        Self { table, position: 0 }
    }

    pub fn init(&mut self) {
        self.position = 0;
    }

    #[inline]
    pub fn render(&mut self, out: &mut [f32]) {
        for out_sample in out.iter_mut() {
            *out_sample = self.table[self.position];
            self.position += 1;
            if self.position == self.table.len() {
                self.position = 0;
            }
        }
    }
}

impl Default for ColoredNoise {
    fn default() -> Self {
        Self::new()
    }
}

/// Piecewise-smooth random modulation source.
#[derive(Debug, Default, Clone)]
pub struct SmoothRandom {
    phase: f32,
    from: f32,
    interval: f32,
}

impl SmoothRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self) {
        self.phase = 0.0;
        self.from = 0.0;
        self.interval = 0.0;
    }

    /// Advance by `frequency` (normalized) and return a value in `[-1, 1]`.
    #[inline]
    pub fn render(&mut self, frequency: f32) -> f32 {
        self.phase += frequency;

        if self.phase >= 1.0 {
            self.phase -= 1.0;
            self.from += self.interval;
            self.interval = random::get_float() * 2.0 - 1.0 - self.from;
        }

        let t = self.phase * self.phase * (3.0 - 2.0 * self.phase);

        self.from + self.interval * t
    }
}
