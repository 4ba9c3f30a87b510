use log::debug;

use crate::core::note::NoteState;
use crate::core::track::Track;
use crate::error::EngineError;
use crate::output::AudioSink;

pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Scale a buffer so its peak magnitude is 1. Silence is left untouched.
pub fn normalize(data: &mut [f32]) {
    let peak = data.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
    if peak > 0.0 {
        let inv = 1.0 / peak;
        for s in data.iter_mut() {
            *s *= inv;
        }
    }
}

/// The mixed signal must stay within unit amplitude before normalization;
/// anything louder is a rendering bug, not a user error.
fn check_clipping(data: &[f32], offset: usize) -> Result<(), EngineError> {
    for (i, &s) in data.iter().enumerate() {
        if s.abs() > 1.0 {
            return Err(EngineError::AmplitudeOverflow {
                index: offset + i,
                value: s,
            });
        }
    }
    Ok(())
}

/// Mixes a track's notes into an output sink.
///
/// The two rendering modes are interchangeable: for any chunk size, the
/// concatenated chunked output equals the whole-buffer output sample for
/// sample (unnormalized; per-chunk normalization obviously scales each
/// chunk by its own peak).
#[derive(Debug, Clone)]
pub struct Renderer {
    chunk_size: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Render the whole track into a single buffer and hand it to the sink.
    /// The track is reset afterwards, ready for a replay.
    pub fn render_whole(
        &self,
        track: &mut Track,
        sink: &mut dyn AudioSink,
        normalize_output: bool,
    ) -> Result<(), EngineError> {
        let mut master = vec![0.0f32; track.n_samples];
        for note in &mut track.notes {
            note.render(&mut master, 0);
        }
        check_clipping(&master, 0)?;
        if normalize_output {
            normalize(&mut master);
        }
        sink.write(&master)?;
        track.reset();
        Ok(())
    }

    /// Render the track in fixed-size windows (the last one may be short),
    /// streaming each chunk to the sink as it completes.
    ///
    /// Bookkeeping is by note index: notes move from pending to playing when
    /// their onset falls inside the current window, and finished notes are
    /// collected during the pass and dropped after it.
    pub fn render_chunked(
        &self,
        track: &mut Track,
        sink: &mut dyn AudioSink,
        normalize_output: bool,
    ) -> Result<(), EngineError> {
        let mut buffer = vec![0.0f32; self.chunk_size];
        let mut pending: Vec<usize> = (0..track.notes.len()).collect();
        let mut playing: Vec<usize> = Vec::new();

        let mut n = 0;
        while n < track.n_samples {
            let len = self.chunk_size.min(track.n_samples - n);
            let chunk = &mut buffer[..len];
            chunk.fill(0.0);

            pending.retain(|&i| {
                let on = track.notes[i].sample_on;
                if n <= on && on < n + len {
                    playing.push(i);
                    false
                } else {
                    true
                }
            });

            let mut finished: Vec<usize> = Vec::new();
            for &i in &playing {
                track.notes[i].render(chunk, n);
                if track.notes[i].state() == NoteState::Done {
                    finished.push(i);
                }
            }
            if !finished.is_empty() {
                debug!(
                    "chunk at {}: {} of {} playing notes finished",
                    n,
                    finished.len(),
                    playing.len()
                );
                playing.retain(|i| !finished.contains(i));
            }

            check_clipping(chunk, n)?;
            if normalize_output {
                normalize(chunk);
            }
            sink.write(chunk)?;
            n += len;
        }

        track.reset();
        Ok(())
    }
}
