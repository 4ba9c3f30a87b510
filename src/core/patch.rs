use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::adsr::Adsr;
use crate::core::instrument::{Generator, Instrument, DEFAULT_AMPLITUDE};
use crate::core::pitch::Pitch;
use crate::core::samples::SampleBank;
use crate::core::track::EngineConfig;
use crate::error::EngineError;

/// Generator shape named by a patch file. The sampler variant carries
/// pitch-to-file assignments resolved at instrument build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PatchKind {
    Sine { phase: f64 },
    Organ { phase: f64 },
    Sampler { samples: BTreeMap<u8, PathBuf> },
}

/// A complete instrument setting, serializable as JSON.
///
/// Loaded values are not trusted: ADSR ranges are re-validated and sample
/// files re-checked when the patch is turned into an `Instrument`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patch {
    pub name: String,
    pub amplitude: f32,
    pub adsr: Adsr,
    pub kind: PatchKind,
}

impl Patch {
    pub fn new(name: impl Into<String>, adsr: Adsr, kind: PatchKind) -> Self {
        Self {
            name: name.into(),
            amplitude: DEFAULT_AMPLITUDE,
            adsr,
            kind,
        }
    }

    /// Save the patch as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a patch from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)?;
        let patch: Self = serde_json::from_str(&contents)?;
        Ok(patch)
    }

    /// Resolve the patch into a playable instrument, validating the ADSR
    /// ranges and loading any sample files against the engine's rate.
    pub fn into_instrument(self, config: EngineConfig) -> Result<Instrument, EngineError> {
        let adsr = Adsr::new(
            self.adsr.attack,
            self.adsr.decay,
            self.adsr.sustain,
            self.adsr.release,
        )?;
        let kind = match self.kind {
            PatchKind::Sine { phase } => Generator::Sine { phase },
            PatchKind::Organ { phase } => Generator::Organ { phase },
            PatchKind::Sampler { samples } => {
                let mut bank = SampleBank::new(config.sample_rate);
                for (pitch, path) in samples {
                    bank.load(Pitch(pitch), path)?;
                }
                Generator::Sampler(bank)
            }
        };
        Ok(Instrument {
            amplitude: self.amplitude,
            adsr,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let patch = Patch::new(
            "soft organ",
            Adsr::new(0.001, 0.15, 0.0, 0.1).unwrap(),
            PatchKind::Organ { phase: 0.0 },
        );

        let path = std::env::temp_dir().join(format!(
            "tracksynth-patch-{}.json",
            std::process::id()
        ));
        patch.save_to_file(&path).unwrap();
        let loaded = Patch::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.name, "soft organ");
        assert_eq!(loaded.adsr, patch.adsr);
        assert!(matches!(loaded.kind, PatchKind::Organ { .. }));

        let inst = loaded.into_instrument(EngineConfig::default()).unwrap();
        assert!(matches!(inst.kind, Generator::Organ { .. }));
    }

    #[test]
    fn test_loaded_adsr_is_revalidated() {
        // Hand-written JSON can carry out-of-range values; building the
        // instrument must reject them.
        let json = r#"{
            "name": "broken",
            "amplitude": 0.1,
            "adsr": { "attack": -5.0, "decay": 0.1, "sustain": 0.5, "release": 0.1 },
            "kind": { "Sine": { "phase": 0.0 } }
        }"#;
        let patch: Patch = serde_json::from_str(json).unwrap();
        assert!(matches!(
            patch.into_instrument(EngineConfig::default()),
            Err(EngineError::AdsrOutOfRange { param: "attack", .. })
        ));
    }
}
