use std::fs;
use std::path::Path;

use colored::Colorize;

use blixt_narration::decode_payload;

pub fn run(file: &Path, rate: u32, channels: u16) -> Result<(), String> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let buffer = decode_payload(&text, rate, channels).map_err(|e| e.to_string())?;

    println!("  {} {}", "Audio".bold(), file.display().to_string().dimmed());
    println!("  Sample rate: {} Hz", buffer.sample_rate());
    println!("  Channels:    {}", buffer.channel_count());
    println!("  Frames:      {}", buffer.frame_count());
    println!("  Duration:    {:.3} s", buffer.duration().as_secs_f64());
    println!("  Peak:        {:.4}", buffer.peak());
    Ok(())
}
