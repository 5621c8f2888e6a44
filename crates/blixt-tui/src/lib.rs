//! Terminal slideshow for Blixt.
//!
//! Shows the storm scene on a braille canvas next to the text card for the
//! current step, with keyboard navigation and optional spoken narration.

pub mod app;
pub mod panel;
pub mod scene;
pub mod shared;
pub mod terminal;
