use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

use blixt_core::Point;
use blixt_simulation::BoltSpec;

pub fn run(
    from: &str,
    to: &str,
    segments: usize,
    amplitude: f64,
    seed: u64,
    json: bool,
) -> Result<(), String> {
    let start: Point = from.parse().map_err(|e| format!("--from: {e}"))?;
    let end: Point = to.parse().map_err(|e| format!("--to: {e}"))?;
    if !amplitude.is_finite() {
        return Err(format!("--amplitude must be a finite number, got {amplitude}"));
    }

    let spec = BoltSpec::new(start, end, segments, amplitude);
    let mut rng = StdRng::seed_from_u64(seed);
    let path = spec.generate(&mut rng);

    if json {
        return super::print_json(&path);
    }

    println!(
        "  {} {start} -> {end} {}",
        "Bolt".bold(),
        format!(
            "({} segments, amplitude {amplitude}, seed={seed})",
            segments.max(1)
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "x", "y"]);
    for (i, p) in path.points().iter().enumerate() {
        table.add_row(vec![i.to_string(), format!("{:.1}", p.x), format!("{:.1}", p.y)]);
    }
    println!("{table}");
    Ok(())
}
