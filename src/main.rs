use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use tracksynth::core::{
    Adsr, EngineConfig, Instrument, NoteEvent, Renderer, TimeSignature, Track,
};
use tracksynth::output::WavSink;

/// Render a short built-in progression to `render.wav`.
fn main() -> Result<()> {
    env_logger::init();

    let config = EngineConfig { sample_rate: 44100 };
    let bpm = 120.0;
    let beat = (60.0 / bpm * config.sample_rate as f64) as usize;

    let bass = Arc::new(
        Instrument::organ(Adsr::new(0.001, 0.15, 0.0, 0.1).context("bass adsr")?)
            .with_amplitude(0.05),
    );
    let lead = Arc::new(
        Instrument::sine(Adsr::new(0.05, 0.1, 1.0, 0.1).context("lead adsr")?)
            .with_amplitude(0.03),
    );

    // Two bars of A minor: root notes under an arpeggiated triad
    let mut bass_events = Vec::new();
    let mut lead_events = Vec::new();
    let triad = [69u8, 72, 76]; // A4, C5, E5
    for bar in 0..2 {
        let bar_start = bar * 4 * beat;
        bass_events.push(NoteEvent::new(45u8, bar_start, bar_start + 3 * beat));
        for (i, &pitch) in triad.iter().enumerate() {
            let on = bar_start + i * beat;
            lead_events.push(NoteEvent::new(pitch, on, on + beat));
        }
    }

    let meter = TimeSignature::common_time();
    let bass_track = Track::from_events(&bass_events, meter, bpm, bass, config)?;
    let lead_track = Track::from_events(&lead_events, meter, bpm, lead, config)?;
    let mut track = Track::merge([bass_track, lead_track]);

    info!(
        "rendering {} notes over {} samples",
        track.notes.len(),
        track.n_samples
    );

    let mut sink = WavSink::create("render.wav", config.sample_rate)?;
    Renderer::new()
        .render_chunked(&mut track, &mut sink, false)
        .context("rendering failed")?;
    sink.finalize()?;

    info!("wrote render.wav");
    Ok(())
}
