use std::f64::consts::PI;

use log::debug;

use crate::core::adsr::Adsr;
use crate::core::pitch::Pitch;
use crate::core::samples::SampleBank;

/// Default per-note amplitude scale.
pub const DEFAULT_AMPLITUDE: f32 = 0.1;

/// Waveform source backing an instrument.
///
/// A closed set: each kind carries its own construction-time data, the ADSR
/// is shared at the `Instrument` level.
#[derive(Debug, Clone)]
pub enum Generator {
    /// Single sine partial at the note's frequency.
    Sine { phase: f64 },
    /// Three sine partials: fundamental, +7 and +19 semitones.
    Organ { phase: f64 },
    /// Pre-loaded per-pitch sample playback.
    Sampler(SampleBank),
}

/// An instrument assignment: waveform generator, amplitude scale and the
/// ADSR every note played through it shares.
#[derive(Debug, Clone)]
pub struct Instrument {
    pub amplitude: f32,
    pub adsr: Adsr,
    pub kind: Generator,
}

impl Instrument {
    pub fn sine(adsr: Adsr) -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            adsr,
            kind: Generator::Sine { phase: 0.0 },
        }
    }

    pub fn organ(adsr: Adsr) -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            adsr,
            kind: Generator::Organ { phase: 0.0 },
        }
    }

    pub fn sampler(adsr: Adsr, bank: SampleBank) -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            adsr,
            kind: Generator::Sampler(bank),
        }
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Generate `n` raw (pre-envelope) waveform samples for a note.
    ///
    /// `cursor` is the number of samples of this note already generated; it
    /// is the generator's notion of elapsed time, which keeps sine phase
    /// continuous across chunk boundaries. Time values are derived from the
    /// integer cursor, so splitting a range into chunks yields exactly the
    /// same output as generating it in one call.
    pub fn generate(&self, cursor: usize, n: usize, pitch: Pitch, sample_rate: u32) -> Vec<f32> {
        let sr = sample_rate as f64;
        let a = self.amplitude as f64;
        match &self.kind {
            Generator::Sine { phase } => {
                let f = pitch.frequency();
                (0..n)
                    .map(|j| {
                        let t = (cursor + j) as f64 / sr;
                        (a * (2.0 * PI * f * t + phase).sin()) as f32
                    })
                    .collect()
            }
            Generator::Organ { phase } => {
                let f0 = pitch.frequency();
                let f1 = pitch.transpose(7).frequency();
                let f2 = pitch.transpose(19).frequency();
                (0..n)
                    .map(|j| {
                        let t = (cursor + j) as f64 / sr;
                        let w = (2.0 * PI * f0 * t + phase).sin()
                            + (2.0 * PI * f1 * t + phase).sin()
                            + (2.0 * PI * f2 * t + phase).sin();
                        (a * w) as f32
                    })
                    .collect()
            }
            Generator::Sampler(bank) => {
                let mut out = vec![0.0f32; n];
                match bank.get(pitch) {
                    Some(src) => {
                        // The cursor may already sit past the end of the
                        // source once an underrun spans several chunks.
                        let start = cursor.min(src.len());
                        let copied = (src.len() - start).min(n);
                        for (o, &s) in out[..copied].iter_mut().zip(&src[start..start + copied]) {
                            *o = self.amplitude * s;
                        }
                        // Source exhausted before the scheduled note end:
                        // the remainder stays silent.
                        if copied < n {
                            debug!(
                                "sample for pitch {} exhausted at cursor {}, zero-filling {} samples",
                                pitch,
                                cursor + copied,
                                n - copied
                            );
                        }
                    }
                    None => {
                        debug!("no sample loaded for pitch {}, rendering silence", pitch);
                    }
                }
                out
            }
        }
    }
}
