use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::core::pitch::Pitch;
use crate::error::EngineError;

/// Pre-loaded sample buffers for the sampler instrument, keyed by pitch.
///
/// Files are validated at load time: float32 WAV, mono, and the same sample
/// rate as the engine. Rendering never touches the filesystem.
#[derive(Debug, Clone)]
pub struct SampleBank {
    sample_rate: u32,
    samples: HashMap<Pitch, Arc<Vec<f32>>>,
}

impl SampleBank {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples: HashMap::new(),
        }
    }

    /// Load a WAV file and assign it to a pitch.
    pub fn load(&mut self, pitch: Pitch, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let path = path.as_ref();
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        if spec.sample_format != hound::SampleFormat::Float || spec.bits_per_sample != 32 {
            return Err(EngineError::SampleFormat {
                path: path.to_path_buf(),
                detail: format!(
                    "expected 32-bit float samples, got {}-bit {:?}",
                    spec.bits_per_sample, spec.sample_format
                ),
            });
        }
        if spec.channels != 1 {
            return Err(EngineError::SampleFormat {
                path: path.to_path_buf(),
                detail: format!("expected mono, got {} channels", spec.channels),
            });
        }
        if spec.sample_rate != self.sample_rate {
            return Err(EngineError::SampleRateMismatch {
                path: path.to_path_buf(),
                expected: self.sample_rate,
                actual: spec.sample_rate,
            });
        }

        let data = reader
            .into_samples::<f32>()
            .collect::<Result<Vec<f32>, _>>()?;
        info!(
            "loaded sample for pitch {}: {} ({} samples)",
            pitch,
            path.display(),
            data.len()
        );
        self.samples.insert(pitch, Arc::new(data));
        Ok(())
    }

    /// Assign an in-memory buffer to a pitch.
    pub fn insert(&mut self, pitch: Pitch, data: Vec<f32>) {
        self.samples.insert(pitch, Arc::new(data));
    }

    pub fn get(&self, pitch: Pitch) -> Option<&[f32]> {
        self.samples.get(&pitch).map(|s| s.as_slice())
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        self.samples.contains_key(&pitch)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, sample_rate: u32, channels: u16, data: &[f32]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in data {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tracksynth-bank-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_valid_sample() {
        let path = temp_path("ok.wav");
        write_wav(&path, 44100, 1, &[0.0, 0.25, -0.25, 0.5]);

        let mut bank = SampleBank::new(44100);
        bank.load(Pitch(36), &path).unwrap();
        assert_eq!(bank.get(Pitch(36)).unwrap(), &[0.0, 0.25, -0.25, 0.5]);
        assert!(!bank.contains(Pitch(37)));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_rejects_sample_rate_mismatch() {
        let path = temp_path("rate.wav");
        write_wav(&path, 22050, 1, &[0.0; 8]);

        let mut bank = SampleBank::new(44100);
        match bank.load(Pitch(36), &path) {
            Err(EngineError::SampleRateMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 44100);
                assert_eq!(actual, 22050);
            }
            other => panic!("expected SampleRateMismatch, got {:?}", other),
        }

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_rejects_integer_wav() {
        let path = temp_path("int.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..8 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let mut bank = SampleBank::new(44100);
        assert!(matches!(
            bank.load(Pitch(36), &path),
            Err(EngineError::SampleFormat { .. })
        ));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_rejects_stereo() {
        let path = temp_path("stereo.wav");
        write_wav(&path, 44100, 2, &[0.0; 8]);

        let mut bank = SampleBank::new(44100);
        assert!(matches!(
            bank.load(Pitch(36), &path),
            Err(EngineError::SampleFormat { .. })
        ));

        std::fs::remove_file(path).ok();
    }
}
