//! Launch the blixt-tui standalone binary.

/// Launch the blixt-tui standalone binary.
pub fn run(step: usize, seed: u64, no_audio: bool) -> Result<(), String> {
    // Validate here so a bad step fails before the terminal is taken over.
    super::phase(step)?;

    let mut command = std::process::Command::new("blixt-tui");
    command
        .arg("--step")
        .arg(step.to_string())
        .arg("--seed")
        .arg(seed.to_string());
    if no_audio {
        command.arg("--no-audio");
    }

    match command.status() {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(format!("blixt-tui exited with {s}")),
        Err(_) => Err(
            "blixt-tui binary not found. Install with: cargo install --path crates/blixt-tui"
                .into(),
        ),
    }
}
