use std::collections::BTreeMap;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use blixt_core::MotionPhase;
use blixt_simulation::particle::ChargeStats;
use blixt_simulation::{Charge, SimConfig, Storm, StrikeCategory};

#[derive(Serialize)]
struct Report {
    step: usize,
    motion: MotionPhase,
    frames: u64,
    seed: u64,
    particles: usize,
    groups: Vec<ChargeStats>,
    strikes: BTreeMap<StrikeCategory, usize>,
    label: Option<&'static str>,
}

pub fn run(number: usize, frames: u64, seed: u64, count: usize, json: bool) -> Result<(), String> {
    let phase = super::phase(number)?;
    let config = SimConfig::default()
        .with_seed(seed)
        .with_particle_count(count);
    let mut storm = Storm::with_phase(config, phase).map_err(|e| e.to_string())?;
    storm.run_frames(frames);

    let particles = storm.particles();
    let groups: Vec<ChargeStats> = [Charge::Positive, Charge::Negative]
        .into_iter()
        .filter_map(|c| particles.stats(c))
        .collect();

    let report = Report {
        step: phase.number(),
        motion: phase.motion(),
        frames,
        seed,
        particles: particles.len(),
        groups,
        strikes: storm.events().strike_counts(),
        label: storm.strike_label(),
    };

    if json {
        return super::print_json(&report);
    }

    println!(
        "  {} {} {}",
        "Storm".bold(),
        phase,
        format!("({frames} frames, seed={seed}, {count} particles)").dimmed()
    );
    println!(
        "  Motion: {}{}",
        format!("{:?}", report.motion).to_lowercase(),
        if report.motion.shows_charge() {
            ""
        } else {
            " (charges not yet visible)"
        }
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Charge", "Count", "Mean y", "Min y", "Max y", "Rest y"]);
    for group in &report.groups {
        table.add_row(vec![
            format!("{} ({})", group.charge, group.charge.symbol()),
            group.count.to_string(),
            format!("{:.1}", group.mean_y),
            format!("{:.1}", group.min_y),
            format!("{:.1}", group.max_y),
            if report.motion == MotionPhase::Separation {
                format!("{:.0}", group.charge.rest_height())
            } else {
                "--".to_string()
            },
        ]);
    }
    println!("{table}");

    if phase.is_final() {
        println!();
        let total: usize = report.strikes.values().sum();
        println!("  {} strikes", total.to_string().bold());
        for (category, n) in &report.strikes {
            println!("    {:<14} {n}", category.name());
        }
        if let Some(label) = report.label {
            println!("  Last: {}", label.yellow());
        }
    }
    Ok(())
}
