#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod articulation;
pub mod classify;
pub mod envelope;
pub mod error;
pub mod excitation;
pub mod fm;
pub mod gesture;
pub mod glottal;
pub mod mapper;
pub mod noise;
pub mod phoneme;
pub mod resonance;
pub mod svf;
pub mod utils;
pub mod voice;
pub mod vowel;

pub use error::{Error, Result};
pub use voice::{SynthMode, Voice};

/// Audio sample rate in Hz.
pub const SAMPLE_RATE: f32 = 48000.0;
