use std::sync::Arc;

use crate::core::envelope::EnvelopeSpec;
use crate::core::instrument::Instrument;
use crate::core::pitch::Pitch;

/// Lifecycle of a scheduled note within one rendering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    Pending,
    InProgress,
    Done,
}

/// Identity of a sounding event: two notes are the same logical event iff
/// pitch, onset and audible end (including release) all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteKey {
    pub pitch: Pitch,
    pub sample_on: usize,
    pub stop_release: usize,
}

/// One scheduled note bound to an instrument: owns its envelope, its
/// playback cursor and its lifecycle state, and accumulates its output into
/// caller-supplied buffer regions.
#[derive(Debug, Clone)]
pub struct NoteSound {
    pub pitch: Pitch,
    pub sample_on: usize,
    pub sample_off: usize,
    envelope: EnvelopeSpec,
    instrument: Arc<Instrument>,
    sample_rate: u32,
    /// Count of active samples generated so far; the generator's elapsed
    /// time across chunk boundaries.
    samples_rendered: usize,
    state: NoteState,
}

impl NoteSound {
    pub fn new(
        pitch: Pitch,
        sample_on: usize,
        sample_off: usize,
        instrument: Arc<Instrument>,
        sample_rate: u32,
    ) -> Self {
        let envelope = EnvelopeSpec::compute(&instrument.adsr, sample_on, sample_off, sample_rate);
        Self {
            pitch,
            sample_on,
            sample_off,
            envelope,
            instrument,
            sample_rate,
            samples_rendered: 0,
            state: NoteState::Pending,
        }
    }

    pub fn key(&self) -> NoteKey {
        NoteKey {
            pitch: self.pitch,
            sample_on: self.sample_on,
            stop_release: self.envelope.stop_release,
        }
    }

    pub fn state(&self) -> NoteState {
        self.state
    }

    pub fn envelope(&self) -> &EnvelopeSpec {
        &self.envelope
    }

    /// Absolute sample index at which the note is no longer audible.
    pub fn stop_release(&self) -> usize {
        self.envelope.stop_release
    }

    /// Render this note into `chunk`, where `chunk[i]` holds absolute sample
    /// `chunk_start + i`. Output is added to the buffer, not written over
    /// it. Advances the playback cursor by the number of samples of the
    /// note's active range covered by this call.
    pub fn render(&mut self, chunk: &mut [f32], chunk_start: usize) {
        if chunk.is_empty() {
            return;
        }
        self.state = NoteState::InProgress;

        let chunk_end = chunk_start + chunk.len();
        let lo = self.sample_on.max(chunk_start);
        let hi = self.envelope.stop_release.min(chunk_end);

        if lo < hi {
            let n = hi - lo;
            let wave =
                self.instrument
                    .generate(self.samples_rendered, n, self.pitch, self.sample_rate);
            self.samples_rendered += n;

            for (j, &w) in wave.iter().enumerate() {
                let index = lo + j;
                chunk[index - chunk_start] += w * self.envelope.gain_at(index);
            }
        }

        if chunk_end > self.envelope.stop_release {
            self.state = NoteState::Done;
        }
    }

    /// Rewind the playback cursor for a full-track replay. Lifecycle state
    /// is left alone; the next render pass re-enters `InProgress`.
    pub fn reset(&mut self) {
        self.samples_rendered = 0;
    }
}
