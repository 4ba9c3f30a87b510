//! Offline polyphonic track renderer.
//!
//! Takes a fixed set of note events (pitch, on-sample, off-sample), an
//! instrument assignment (sine, organ or sampler, each with an ADSR
//! envelope) and renders float32 mono audio, either as one whole buffer or
//! streamed in fixed-size chunks; both modes produce the same signal.

pub mod core;
pub mod error;
pub mod output;

pub use crate::core::{
    Adsr, EngineConfig, Generator, Instrument, NoteEvent, Patch, PatchKind, Pitch, Renderer,
    SampleBank, TimeSignature, Track,
};
pub use crate::error::EngineError;
pub use crate::output::{AudioSink, MemorySink, WavSink};
