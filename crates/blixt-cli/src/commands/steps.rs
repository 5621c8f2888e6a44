use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use blixt_core::{Phase, STEPS};

pub fn run() -> Result<(), String> {
    println!("  {}", "Hur blir en blixt till?".bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Title", "Description", "Scene"]);

    for (step, phase) in STEPS.iter().zip(Phase::all()) {
        table.add_row(vec![
            phase.number().to_string(),
            step.title.to_string(),
            step.description.to_string(),
            scene_summary(phase),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Short description of what the scene shows on a step.
pub(crate) fn scene_summary(phase: Phase) -> String {
    let mut parts = vec![format!("{:?}", phase.motion()).to_lowercase()];
    if phase.shows_freezing_line() {
        parts.push("freezing line".into());
    }
    if phase.shows_updraft() {
        parts.push("updrafts".into());
    }
    if phase.motion().shows_charge() {
        parts.push("charges".into());
    }
    if phase.is_charged() {
        parts.push("ground charge".into());
    }
    if phase.is_final() {
        parts.push("strikes".into());
    }
    parts.join(", ")
}
