pub mod bolt;
pub mod decode;
pub mod narrate;
pub mod show;
pub mod simulate;
pub mod steps;
pub mod strikes;
pub mod tui;

use blixt_core::Phase;
use serde::Serialize;

/// Resolve a 1-based step number given on the command line.
fn phase(number: usize) -> Result<Phase, String> {
    Phase::from_number(number).map_err(|e| e.to_string())
}

/// Print a value as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| format!("JSON error: {e}"))?;
    println!("{json}");
    Ok(())
}
