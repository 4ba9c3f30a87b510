pub mod adsr;
pub mod envelope;
pub mod instrument;
pub mod note;
pub mod patch;
pub mod pitch;
pub mod render;
pub mod samples;
pub mod track;

// Re-export the types callers actually compose with
pub use self::adsr::Adsr;
pub use self::envelope::EnvelopeSpec;
pub use self::instrument::{Generator, Instrument};
pub use self::note::{NoteKey, NoteSound, NoteState};
pub use self::patch::{Patch, PatchKind};
pub use self::pitch::Pitch;
pub use self::render::{Renderer, DEFAULT_CHUNK_SIZE};
pub use self::samples::SampleBank;
pub use self::track::{EngineConfig, NoteEvent, TimeSignature, Track};
