//! Error type for session setup.
//!
//! Only resource-level failures surface as errors: a missing audio sink or
//! pose source is fatal to session start, and a nonsensical configuration is
//! rejected before any audio runs. Everything that can go wrong per tick
//! (missing frames, out-of-range features, stale-mode updates) is absorbed
//! by the update path and never interrupts audio.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No audio output sink could be acquired for the session.
    #[error("no audio sink available")]
    AudioSinkUnavailable,

    /// No camera / pose estimation source could be acquired for the session.
    #[error("no pose source available")]
    PoseSourceUnavailable,

    /// Render block size outside the supported range.
    #[error("invalid block size: {0}")]
    InvalidBlockSize(usize),
}

pub type Result<T> = core::result::Result<T, Error>;
