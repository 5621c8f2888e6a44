//! Slideshow state: the storm, the current step, and narration.

use std::sync::Arc;
use std::time::Duration;

use blixt_core::Phase;
use blixt_narration::{
    AudioSink, GeminiClient, NarrationConfig, NarrationError, Narrator, RequestState, SilentSink,
};
use blixt_simulation::{SimConfig, SimResult, Storm};
use tracing::{debug, info, warn};

/// Shown when narration was requested without an API key.
pub const NO_NARRATION: &str = "Uppläsning saknas: ange GEMINI_API_KEY";

/// Storm events kept while the slideshow runs.
pub const EVENT_HISTORY: usize = 256;

/// Storm settings for the slideshow: seeded, with a bounded event log.
pub fn slideshow_config(seed: u64) -> SimConfig {
    SimConfig::default()
        .with_seed(seed)
        .with_max_events(EVENT_HISTORY)
}

/// Main application state.
pub struct SlideshowApp {
    storm: Storm,
    narrator: Option<Narrator>,
    notice: Option<&'static str>,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl SlideshowApp {
    /// Create the slideshow on `start`, with narration if a narrator is given.
    pub fn new(config: SimConfig, start: Phase, narrator: Option<Narrator>) -> SimResult<Self> {
        Ok(Self {
            storm: Storm::with_phase(config, start)?,
            narrator,
            notice: None,
            show_help: false,
            should_quit: false,
        })
    }

    /// The running storm.
    pub fn storm(&self) -> &Storm {
        &self.storm
    }

    /// Current step.
    pub fn phase(&self) -> Phase {
        self.storm.phase()
    }

    /// Go to a step.
    pub fn go_to(&mut self, phase: Phase) {
        if phase != self.phase() {
            debug!(%phase, "step changed");
            self.storm.set_phase(phase);
        }
    }

    /// Next step, stopping at the last.
    pub fn next_step(&mut self) {
        self.go_to(self.phase().next());
    }

    /// Previous step, stopping at the first.
    pub fn prev_step(&mut self) {
        self.go_to(self.phase().prev());
    }

    /// Jump to a 1-based step number. Out-of-range numbers are ignored.
    pub fn jump(&mut self, number: usize) {
        if let Ok(phase) = Phase::from_number(number) {
            self.go_to(phase);
        }
    }

    /// Let real time pass.
    pub fn tick(&mut self, elapsed: Duration) {
        self.storm.update(elapsed);
        if let Some(narrator) = self.narrator.as_mut() {
            narrator.poll();
        }
    }

    /// Narrate the current step. Ignored while a narration is running.
    pub fn narrate(&mut self) {
        let step = self.phase().step();
        let Some(narrator) = self.narrator.as_mut() else {
            self.notice = Some(NO_NARRATION);
            return;
        };
        match narrator.narrate_step(step) {
            Ok(()) => self.notice = None,
            Err(NarrationError::Busy) => debug!("narration already running"),
            Err(e) => warn!(error = %e, "narration not started"),
        }
    }

    /// Whether narration is being fetched or played.
    pub fn is_narrating(&self) -> bool {
        self.narrator.as_ref().is_some_and(Narrator::is_busy)
    }

    /// Narration request state, if narration is available.
    pub fn narration_state(&self) -> Option<&RequestState> {
        self.narrator.as_ref().map(Narrator::state)
    }

    /// A one-off message for the status bar.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Stop narration and ask the loop to exit.
    pub fn quit(&mut self) {
        if let Some(narrator) = self.narrator.as_mut() {
            narrator.cancel();
        }
        self.should_quit = true;
    }
}

/// Build a narrator from the environment, or `None` without an API key.
pub fn narrator_from_env(no_audio: bool) -> Option<Narrator> {
    let config = NarrationConfig::from_env();
    match GeminiClient::new(config.clone()) {
        Ok(client) => {
            info!(model = %config.model, "narration enabled");
            Some(Narrator::new(Arc::new(client), open_sink(no_audio)).with_format(&config))
        }
        Err(e) => {
            info!(reason = %e, "narration disabled");
            None
        }
    }
}

#[cfg(feature = "playback")]
fn open_sink(no_audio: bool) -> Box<dyn AudioSink> {
    if no_audio {
        return Box::new(SilentSink);
    }
    match blixt_narration::RodioSink::open() {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            warn!(error = %e, "no audio device, narration will be silent");
            Box::new(SilentSink)
        }
    }
}

#[cfg(not(feature = "playback"))]
fn open_sink(no_audio: bool) -> Box<dyn AudioSink> {
    if !no_audio {
        debug!("built without playback, narration will be silent");
    }
    Box::new(SilentSink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blixt_narration::{NarrationResult, SpeechSynthesizer};

    fn app(start: Phase) -> SlideshowApp {
        SlideshowApp::new(SimConfig::default(), start, None).unwrap()
    }

    struct Echo;

    impl SpeechSynthesizer for Echo {
        fn synthesize(&self, _prompt: &str) -> NarrationResult<String> {
            std::thread::sleep(Duration::from_millis(100));
            Ok("AEAAwA==".into())
        }
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut app = app(Phase::FIRST);
        app.prev_step();
        assert_eq!(app.phase(), Phase::FIRST);
        for _ in 0..10 {
            app.next_step();
        }
        assert_eq!(app.phase(), Phase::FINAL);
    }

    #[test]
    fn jump_ignores_invalid_numbers() {
        let mut app = app(Phase::FIRST);
        app.jump(3);
        assert_eq!(app.phase().number(), 3);
        app.jump(0);
        app.jump(6);
        assert_eq!(app.phase().number(), 3);
    }

    #[test]
    fn final_step_strikes_and_leaving_clears_label() {
        let mut app = app(Phase::FINAL);
        app.tick(Duration::from_millis(2500));
        assert!(app.storm().is_striking());
        app.tick(Duration::from_millis(200));
        assert!(!app.storm().is_striking());
        assert!(app.storm().strike_label().is_some());
        app.prev_step();
        assert!(app.storm().strike_label().is_none());
    }

    #[test]
    fn long_running_final_step_keeps_event_log_bounded() {
        let mut app = SlideshowApp::new(slideshow_config(42), Phase::FINAL, None).unwrap();
        // Twenty minutes: 480 strikes, each logged when fired and when cleared.
        for _ in 0..12_000 {
            app.tick(Duration::from_millis(100));
        }
        assert_eq!(app.storm().events().len(), EVENT_HISTORY);
        let strikes: usize = app.storm().events().strike_counts().values().sum();
        assert!(strikes <= EVENT_HISTORY);
    }

    #[test]
    fn narrate_without_key_sets_notice() {
        let mut app = app(Phase::FIRST);
        app.narrate();
        assert_eq!(app.notice(), Some(NO_NARRATION));
        assert!(!app.is_narrating());
        assert!(app.narration_state().is_none());
    }

    #[test]
    fn narrate_marks_busy_and_ignores_repeat() {
        let narrator = Narrator::new(Arc::new(Echo), Box::new(SilentSink));
        let mut app =
            SlideshowApp::new(SimConfig::default(), Phase::FIRST, Some(narrator)).unwrap();
        app.narrate();
        assert!(app.is_narrating());
        app.narrate();
        assert!(app.is_narrating());
        app.quit();
        assert!(app.should_quit);
        assert!(!app.is_narrating());
    }
}
