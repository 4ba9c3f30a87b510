mod wav;

pub use self::wav::WavSink;

use crate::error::EngineError;

/// Destination for rendered float32 mono buffers.
///
/// The renderer only ever calls `write` with one chunk (or one whole-track
/// buffer) at a time; device playback, encoding or muxing is the sink's
/// business.
pub trait AudioSink {
    fn write(&mut self, data: &[f32]) -> Result<(), EngineError>;
}

/// Sink that collects everything written into one buffer. Used by tests and
/// by anything that wants the rendered track in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub samples: Vec<f32>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

impl AudioSink for MemorySink {
    fn write(&mut self, data: &[f32]) -> Result<(), EngineError> {
        self.samples.extend_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_concatenates_writes() {
        let mut sink = MemorySink::new();
        sink.write(&[1.0, 2.0]).unwrap();
        sink.write(&[3.0]).unwrap();
        assert_eq!(sink.into_samples(), vec![1.0, 2.0, 3.0]);
    }
}
