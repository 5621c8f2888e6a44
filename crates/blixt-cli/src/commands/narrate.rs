use std::fs;
use std::path::Path;

use colored::Colorize;
use tracing::info;

use blixt_narration::{
    AudioBuffer, GeminiClient, NarrationConfig, SpeechSynthesizer, decode_payload,
};

pub fn run(number: usize, output: Option<&Path>, play: bool) -> Result<(), String> {
    let phase = super::phase(number)?;
    if play && !cfg!(feature = "playback") {
        return Err("this build has no audio output; rebuild with --features playback".into());
    }

    let config = NarrationConfig::from_env();
    let client = GeminiClient::new(config.clone()).map_err(|e| e.to_string())?;
    let step = phase.step();

    println!("  {} {}", "Narrating".bold(), step.title);
    let payload = client
        .synthesize(&step.narration_prompt())
        .map_err(|e| e.to_string())?;
    let buffer =
        decode_payload(&payload, config.sample_rate, config.channels).map_err(|e| e.to_string())?;
    info!(frames = buffer.frame_count(), "narration received");

    println!(
        "  {:.1} s of audio {}",
        buffer.duration().as_secs_f64(),
        format!("({} frames at {} Hz)", buffer.frame_count(), buffer.sample_rate()).dimmed()
    );

    if let Some(path) = output {
        fs::write(path, &payload).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        println!("  Saved to {}", path.display());
    }

    if play {
        play_to_end(&buffer)?;
    }
    Ok(())
}

#[cfg(feature = "playback")]
fn play_to_end(buffer: &AudioBuffer) -> Result<(), String> {
    use blixt_narration::{AudioSink, RodioSink};

    let mut sink = RodioSink::open().map_err(|e| e.to_string())?;
    sink.play(buffer).map_err(|e| e.to_string())?;
    while sink.is_playing() {
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    Ok(())
}

#[cfg(not(feature = "playback"))]
fn play_to_end(_buffer: &AudioBuffer) -> Result<(), String> {
    Err("this build has no audio output".into())
}
