use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;

use super::AudioSink;
use crate::error::EngineError;

/// Sink that streams rendered chunks into a 32-bit float mono WAV file.
pub struct WavSink {
    writer: hound::WavWriter<BufWriter<File>>,
}

impl WavSink {
    pub fn create(path: impl AsRef<Path>, sample_rate: u32) -> Result<Self, EngineError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        info!("writing {} at {} Hz", path.as_ref().display(), sample_rate);
        let writer = hound::WavWriter::create(path, spec)?;
        Ok(Self { writer })
    }

    /// Flush and close the file. Dropping the sink finalizes too, but only
    /// this path reports errors.
    pub fn finalize(self) -> Result<(), EngineError> {
        self.writer.finalize()?;
        Ok(())
    }
}

impl AudioSink for WavSink {
    fn write(&mut self, data: &[f32]) -> Result<(), EngineError> {
        for &sample in data {
            self.writer.write_sample(sample)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_file_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "tracksynth-sink-{}.wav",
            std::process::id()
        ));

        let data = vec![0.0f32, 0.5, -0.5, 1.0];
        let mut sink = WavSink::create(&path, 48000).unwrap();
        sink.write(&data[..2]).unwrap();
        sink.write(&data[2..]).unwrap();
        sink.finalize().unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 48000);
        assert_eq!(reader.spec().channels, 1);
        let read: Vec<f32> = reader.into_samples::<f32>().map(Result::unwrap).collect();
        assert_eq!(read, data);

        std::fs::remove_file(path).ok();
    }
}
