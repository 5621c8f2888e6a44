//! The five pedagogical steps.
//!
//! Text is Swedish, as shown in the slideshow and read aloud by the
//! narration service.

use serde::Serialize;

/// Number of steps in the sequence.
pub const STEP_COUNT: usize = 5;

/// Extra fact shown alongside the final step.
pub const FUN_FACT: &str = "Visste du? En blixt kan nå temperaturer på 30 000 grader Celsius \
     – fem gånger varmare än solens yta!";

/// Lead-in sentence prepended to every narration prompt.
const PROMPT_PREFIX: &str = "Läs upp följande pedagogiska förklaring om blixtar på svenska";

/// One stage of the explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Zero-based position in the sequence.
    pub id: u8,
    /// Heading, already numbered ("1. ...").
    pub title: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Full explanation.
    pub long_description: &'static str,
}

/// All steps in presentation order.
pub static STEPS: [Step; STEP_COUNT] = [
    Step {
        id: 0,
        title: "1. En gigantisk frysbox",
        description: "Det är iskallt högt uppe i atmosfären.",
        long_description: "Även en varm sommardag sjunker temperaturen ju högre upp man kommer. \
            Ett åskmoln sträcker sig 10-15 km upp. Vid marken är det +25°C, men vid 5 km börjar \
            vattnet frysa (-15°C) och i toppen är det ca -50°C!",
    },
    Step {
        id: 1,
        title: "2. Värmen är motorn",
        description: "Varm luft stiger som i en osynlig skorsten.",
        long_description: "Sommarens värme gör luften lätt, vilket skapar kraftiga uppvindar. \
            Denna motor tar med sig fukt som fryser direkt till ispartiklar och hagel när den \
            når de kalla lagren. Utan denna 'is-maskin' får vi ingen blixt.",
    },
    Step {
        id: 2,
        title: "3. Gnidning & Statisk Elektricitet",
        description: "Miljontals krockar i ismaskinen.",
        long_description: "Inuti molnet virvlar ispartiklar och hagelkorn runt och krockar. \
            Precis som när du gnuggar en ballong mot håret skrapas elektroner loss vid \
            krockarna. Det är här den statiska elektriciteten föds.",
    },
    Step {
        id: 3,
        title: "4. Uppdelning av laddningar",
        description: "Molnet laddas som ett batteri.",
        long_description: "Lätta ispartiklar (+) blåser till toppen, medan tyngre hagelkorn (-) \
            sjunker till botten. Naturen gillar inte obalans, och den enorma spänningen mellan \
            toppen, botten och marken söker en väg ut.",
    },
    Step {
        id: 4,
        title: "5. Gnistan hoppar",
        description: "Urladdningen jämnar ut skillnaden.",
        long_description: "När spänningen blir för hög 'går luften sönder'. Elektriciteten rusar \
            fram: inuti molnet, ut i luften eller ner till marken. När de negativa laddningarna \
            i botten möter positiva från marken smäller det!",
    },
];

impl Step {
    /// The text sent to the speech service for this step.
    pub fn narration_prompt(&self) -> String {
        format!(
            "{PROMPT_PREFIX}: {}. {}. {}",
            self.title, self.description, self.long_description
        )
    }

    /// The long description split into sentences for display.
    ///
    /// Splits on `". "` and restores the full stop the split removed.
    /// Sentences that already end in terminal punctuation are left alone.
    pub fn paragraphs(&self) -> Vec<String> {
        self.long_description
            .split(". ")
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                if s.ends_with(['.', '!', '?']) {
                    s.to_string()
                } else {
                    format!("{s}.")
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_positions() {
        for (i, step) in STEPS.iter().enumerate() {
            assert_eq!(step.id as usize, i);
            assert!(step.title.starts_with(&format!("{}.", i + 1)));
        }
    }

    #[test]
    fn prompt_contains_all_text() {
        let step = &STEPS[2];
        let prompt = step.narration_prompt();
        assert!(prompt.starts_with(PROMPT_PREFIX));
        assert!(prompt.contains(step.title));
        assert!(prompt.contains(step.description));
        assert!(prompt.contains(step.long_description));
    }

    #[test]
    fn paragraphs_restore_full_stops() {
        let paragraphs = STEPS[1].paragraphs();
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs.iter().all(|p| p.ends_with('.')));
        assert_eq!(
            paragraphs[0],
            "Sommarens värme gör luften lätt, vilket skapar kraftiga uppvindar."
        );
    }

    #[test]
    fn paragraphs_keep_exclamation() {
        let paragraphs = STEPS[0].paragraphs();
        let last = paragraphs.last().unwrap();
        assert!(last.ends_with("-50°C!"));
    }

    #[test]
    fn long_descriptions_have_single_spaces() {
        for step in &STEPS {
            assert!(!step.long_description.contains("  "), "{}", step.title);
        }
    }
}
