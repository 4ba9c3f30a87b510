use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the rendering engine.
///
/// Configuration errors surface at construction/load time; an
/// `AmplitudeOverflow` indicates a rendering bug and aborts the render call
/// that detected it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("adsr {param} out of range: {value}")]
    AdsrOutOfRange { param: &'static str, value: f32 },

    #[error("sample {path}: sample rate {actual} Hz does not match engine rate {expected} Hz (resampling is not supported)")]
    SampleRateMismatch {
        path: PathBuf,
        expected: u32,
        actual: u32,
    },

    #[error("sample {path}: {detail}")]
    SampleFormat { path: PathBuf, detail: String },

    #[error("no sample loaded for pitch {pitch}")]
    MissingSample { pitch: u8 },

    #[error("unsupported time signature denominator: {denominator}")]
    UnsupportedTimeSignature { denominator: u8 },

    #[error("mix exceeded unit amplitude at sample {index}: {value}")]
    AmplitudeOverflow { index: usize, value: f32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("wav: {0}")]
    Wav(#[from] hound::Error),

    #[error("patch: {0}")]
    Json(#[from] serde_json::Error),
}
