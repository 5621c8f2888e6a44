use colored::Colorize;

use blixt_core::step::FUN_FACT;

use super::steps::scene_summary;

pub fn run(number: usize) -> Result<(), String> {
    let phase = super::phase(number)?;
    let step = phase.step();

    println!("  {}", phase.to_string().to_uppercase().yellow().bold());
    println!("  {}", step.title.bold());
    println!("  {}", step.description);
    println!();
    for paragraph in step.paragraphs() {
        println!("  {paragraph}");
    }
    println!();
    println!("  {} {}", "Scene:".dimmed(), scene_summary(phase));

    if phase.is_final() {
        println!();
        println!("  {}", FUN_FACT.red());
    }

    println!();
    println!("  {}", "Narration prompt".bold().underline());
    println!("  {}", step.narration_prompt().dimmed());
    Ok(())
}
