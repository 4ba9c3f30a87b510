use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::instrument::{Generator, Instrument};
use crate::core::note::NoteSound;
use crate::core::pitch::Pitch;
use crate::error::EngineError;

/// Engine-wide context threaded explicitly into construction and rendering
/// (no process-global tuning or sample-rate state).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub sample_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { sample_rate: 44100 }
    }
}

/// Declared meter of the event source. Only /4 meters are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

impl TimeSignature {
    pub fn new(numerator: u8, denominator: u8) -> Result<Self, EngineError> {
        if denominator != 4 {
            return Err(EngineError::UnsupportedTimeSignature { denominator });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn common_time() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}

/// A note-on/note-off pair from the event source, already in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub sample_on: usize,
    pub sample_off: usize,
}

impl NoteEvent {
    pub fn new(pitch: impl Into<Pitch>, sample_on: usize, sample_off: usize) -> Self {
        Self {
            pitch: pitch.into(),
            sample_on,
            sample_off,
        }
    }
}

/// A fixed set of scheduled notes and the total length to render.
///
/// Notes live in an index-addressed arena; the renderer tracks pending and
/// playing notes by index, never by object identity.
#[derive(Debug, Clone)]
pub struct Track {
    pub notes: Vec<NoteSound>,
    pub n_samples: usize,
    pub numerator: u8,
}

impl Track {
    /// Build a track from event triples, one instrument for the whole part.
    ///
    /// The track length is the last note-off rounded up to a whole bar
    /// (derived from tempo and meter), extended if needed so every release
    /// tail fits inside the track.
    pub fn from_events(
        events: &[NoteEvent],
        time_signature: TimeSignature,
        beats_per_minute: f64,
        instrument: Arc<Instrument>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        // A sampler part must have a sample for every pitch it plays;
        // catch that here rather than rendering silence later.
        if let Generator::Sampler(bank) = &instrument.kind {
            for event in events {
                if !bank.contains(event.pitch) {
                    return Err(EngineError::MissingSample {
                        pitch: event.pitch.0,
                    });
                }
            }
        }

        let notes: Vec<NoteSound> = events
            .iter()
            .map(|e| {
                NoteSound::new(
                    e.pitch,
                    e.sample_on,
                    e.sample_off,
                    Arc::clone(&instrument),
                    config.sample_rate,
                )
            })
            .collect();

        let samples_per_beat =
            (60.0 / beats_per_minute * config.sample_rate as f64).round() as usize;
        let samples_per_bar = samples_per_beat * time_signature.numerator as usize;

        let last_off = events.iter().map(|e| e.sample_off).max().unwrap_or(0);
        let bars = last_off.div_ceil(samples_per_bar.max(1));
        let mut n_samples = bars * samples_per_bar;

        // Keep every release tail inside the track.
        if let Some(last_audible) = notes.iter().map(|n| n.stop_release()).max() {
            n_samples = n_samples.max(last_audible);
        }

        info!(
            "track: {} notes, {} bars, {} samples at {} Hz",
            notes.len(),
            bars,
            n_samples,
            config.sample_rate
        );

        Ok(Self {
            notes,
            n_samples,
            numerator: time_signature.numerator,
        })
    }

    /// Mix several parts (each with its own instrument) into one track.
    pub fn merge(parts: impl IntoIterator<Item = Track>) -> Track {
        let mut notes = Vec::new();
        let mut n_samples = 0;
        let mut numerator = 4;
        for (i, part) in parts.into_iter().enumerate() {
            if i == 0 {
                numerator = part.numerator;
            }
            n_samples = n_samples.max(part.n_samples);
            notes.extend(part.notes);
        }
        Track {
            notes,
            n_samples,
            numerator,
        }
    }

    /// Rewind every note's playback cursor for a replay.
    pub fn reset(&mut self) {
        for note in &mut self.notes {
            note.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::adsr::Adsr;
    use crate::core::samples::SampleBank;

    const CONFIG: EngineConfig = EngineConfig { sample_rate: 48000 };

    fn sine() -> Arc<Instrument> {
        Arc::new(Instrument::sine(
            Adsr::new(0.01, 0.05, 0.7, 0.05).unwrap(),
        ))
    }

    #[test]
    fn test_rejects_non_quarter_denominator() {
        assert!(matches!(
            TimeSignature::new(6, 8),
            Err(EngineError::UnsupportedTimeSignature { denominator: 8 })
        ));
        assert!(TimeSignature::new(3, 4).is_ok());
    }

    #[test]
    fn test_length_rounds_up_to_whole_bars() {
        // 120 bpm at 48 kHz: 24000 samples per beat, 96000 per 4/4 bar
        let events = [NoteEvent::new(60u8, 0, 30000)];
        let track = Track::from_events(
            &events,
            TimeSignature::common_time(),
            120.0,
            sine(),
            CONFIG,
        )
        .unwrap();
        assert_eq!(track.n_samples, 96000);
    }

    #[test]
    fn test_length_covers_release_tail() {
        let inst = Arc::new(Instrument::sine(Adsr::new(0.0, 0.01, 0.5, 2.0).unwrap()));
        // Note ends exactly on the bar line; its 2 s release must still fit
        let events = [NoteEvent::new(60u8, 0, 96000)];
        let track = Track::from_events(
            &events,
            TimeSignature::common_time(),
            120.0,
            inst,
            CONFIG,
        )
        .unwrap();
        assert_eq!(track.n_samples, 96000 + 96000);
        assert!(track
            .notes
            .iter()
            .all(|n| n.stop_release() <= track.n_samples));
    }

    #[test]
    fn test_sampler_part_requires_all_pitches() {
        let mut bank = SampleBank::new(48000);
        bank.insert(Pitch(36), vec![0.1; 100]);
        let inst = Arc::new(Instrument::sampler(Adsr::default(), bank));

        let events = [
            NoteEvent::new(36u8, 0, 1000),
            NoteEvent::new(38u8, 1000, 2000),
        ];
        match Track::from_events(
            &events,
            TimeSignature::common_time(),
            120.0,
            inst,
            CONFIG,
        ) {
            Err(EngineError::MissingSample { pitch }) => assert_eq!(pitch, 38),
            other => panic!("expected MissingSample, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_takes_longest_part() {
        let a = Track::from_events(
            &[NoteEvent::new(60u8, 0, 10000)],
            TimeSignature::common_time(),
            120.0,
            sine(),
            CONFIG,
        )
        .unwrap();
        let b = Track::from_events(
            &[NoteEvent::new(48u8, 0, 150000)],
            TimeSignature::common_time(),
            120.0,
            sine(),
            CONFIG,
        )
        .unwrap();
        let merged = Track::merge([a, b]);
        assert_eq!(merged.notes.len(), 2);
        assert_eq!(merged.n_samples, 192000);
    }
}
