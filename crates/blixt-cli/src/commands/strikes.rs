use std::collections::BTreeMap;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use blixt_core::Phase;
use blixt_simulation::strike::StrikeTransition;
use blixt_simulation::{SimConfig, StrikeCategory, StrikeTrigger};

#[derive(Serialize)]
struct Report {
    ticks: u32,
    seed: u64,
    counts: BTreeMap<StrikeCategory, usize>,
}

pub fn run(ticks: u32, seed: u64, json: bool) -> Result<(), String> {
    let config = SimConfig::default().with_seed(seed);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut trigger = StrikeTrigger::new(config.strike_interval, config.flash_duration);
    trigger.set_phase(Phase::FINAL);

    let mut counts: BTreeMap<StrikeCategory, usize> =
        StrikeCategory::ALL.iter().map(|c| (*c, 0)).collect();
    for _ in 0..ticks {
        for transition in trigger.advance(config.strike_interval, &mut rng) {
            if let StrikeTransition::Fired(category) = transition {
                *counts.entry(category).or_insert(0) += 1;
            }
        }
    }

    if json {
        return super::print_json(&Report { ticks, seed, counts });
    }

    println!(
        "  {} {}",
        "Strikes".bold(),
        format!("({ticks} firings, seed={seed})").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Label", "Count", "Share"]);
    for (category, n) in &counts {
        let share = if ticks == 0 {
            0.0
        } else {
            *n as f64 * 100.0 / f64::from(ticks)
        };
        table.add_row(vec![
            category.name().to_string(),
            category.label().to_string(),
            n.to_string(),
            format!("{share:.1}%"),
        ]);
    }
    println!("{table}");
    Ok(())
}
