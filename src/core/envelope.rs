use crate::core::adsr::Adsr;

/// Precomputed amplitude envelope for one scheduled note.
///
/// All positions are absolute sample indices. The four segments partition
/// the note's audible range `[sample_on, stop_release)`:
///
/// ```text
/// [sample_on, stop_attack)   linear ramp 0 -> 1
/// [stop_attack, stop_decay)  linear ramp 1 -> s
/// [stop_decay, sample_off)   flat at the nominal sustain level
/// [sample_off, stop_release) linear ramp s -> 0
/// ```
///
/// `s` is the effective sustain level: when the configured decay is longer
/// than the note's remaining duration, the decay segment is truncated and
/// its target raised so the curve never dips below what a proportionally
/// shortened decay would reach.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeSpec {
    pub sample_on: usize,
    pub stop_attack: usize,
    pub stop_decay: usize,
    pub sample_off: usize,
    pub stop_release: usize,

    pub ns_attack: usize,
    pub ns_decay: usize,
    pub ns_sustain: usize,
    pub ns_release: usize,

    /// Nominal sustain level from the ADSR configuration.
    pub sustain: f32,
    /// Effective sustain level `s` the decay ramp targets and the release
    /// ramp starts from.
    pub sustain_effective: f32,
}

impl EnvelopeSpec {
    /// Compute segment boundaries and ramp parameters for a note sounding
    /// over `[sample_on, sample_off)` (off excludes the release tail).
    ///
    /// Degenerate configurations never fail: a zero-length note caps the
    /// attack at the full duration and leaves decay and sustain empty.
    pub fn compute(adsr: &Adsr, sample_on: usize, sample_off: usize, sample_rate: u32) -> Self {
        debug_assert!(sample_off >= sample_on);
        let sr = sample_rate as f64;
        let ns = sample_off - sample_on;

        let ns_release = (adsr.release as f64 * sr).round() as usize;
        let ns_attack = ((adsr.attack as f64 * sr).round() as usize).min(ns);
        let ns_decay_nominal = (adsr.decay as f64 * sr).round() as usize;
        let ns_decay = ns_decay_nominal.min(ns - ns_attack);
        let ns_sustain = ns - ns_attack - ns_decay;

        // Decay target: the level a full nominal decay would have reached at
        // the truncation point. When the decay fits the note this reduces to
        // the nominal sustain level.
        let sustain_effective = if ns_decay > 0 {
            let adjusted = (adsr.sustain as f64 - 1.0) * (ns - ns_attack) as f64
                / ns_decay_nominal as f64
                + 1.0;
            adjusted.max(adsr.sustain as f64) as f32
        } else {
            adsr.sustain
        };

        Self {
            sample_on,
            stop_attack: sample_on + ns_attack,
            stop_decay: sample_on + ns_attack + ns_decay,
            sample_off,
            stop_release: sample_off + ns_release,
            ns_attack,
            ns_decay,
            ns_sustain,
            ns_release,
            sustain: adsr.sustain,
            sustain_effective,
        }
    }

    /// Envelope gain for an absolute sample index.
    ///
    /// Indices outside `[sample_on, stop_release)` yield silence; callers
    /// are expected to have clamped their range already.
    pub fn gain_at(&self, index: usize) -> f32 {
        if index < self.sample_on {
            0.0
        } else if index < self.stop_attack {
            (index - self.sample_on) as f32 / self.ns_attack as f32
        } else if index < self.stop_decay {
            let i = (index - self.stop_attack) as f32;
            1.0 + (self.sustain_effective - 1.0) * i / self.ns_decay as f32
        } else if index < self.sample_off {
            self.sustain
        } else if index < self.stop_release {
            let i = (index - self.sample_off) as f32;
            self.sustain_effective * (1.0 - i / self.ns_release as f32)
        } else {
            0.0
        }
    }
}
