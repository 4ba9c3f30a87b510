use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// ADSR amplitude envelope configuration.
///
/// Durations are in seconds, sustain is a level in [0, 1]. Parameter ranges
/// follow the usual hardware-synth limits (attack/decay/release up to 20 s,
/// decay and release at least 1 ms). Immutable once constructed; shared
/// read-only by every note using the same instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Adsr {
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Result<Self, EngineError> {
        if !(0.0..=20.0).contains(&attack) {
            return Err(EngineError::AdsrOutOfRange {
                param: "attack",
                value: attack,
            });
        }
        if !(1e-3..=20.0).contains(&decay) {
            return Err(EngineError::AdsrOutOfRange {
                param: "decay",
                value: decay,
            });
        }
        if !(0.0..=1.0).contains(&sustain) {
            return Err(EngineError::AdsrOutOfRange {
                param: "sustain",
                value: sustain,
            });
        }
        if !(1e-3..=20.0).contains(&release) {
            return Err(EngineError::AdsrOutOfRange {
                param: "release",
                value: release,
            });
        }
        Ok(Self {
            attack,
            decay,
            sustain,
            release,
        })
    }
}

impl Default for Adsr {
    /// Instant attack, minimal decay and release, full sustain.
    fn default() -> Self {
        Self {
            attack: 0.0,
            decay: 1e-3,
            sustain: 1.0,
            release: 1e-3,
        }
    }
}
