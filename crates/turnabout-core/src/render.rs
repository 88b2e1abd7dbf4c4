//! App-level view models consumed by a host renderer.

use crate::reveal::Paragraphs;

/// State of the "turn around" cue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TurnCue {
    Hidden,
    /// Breakpoint reached, cue appears after the settle delay.
    Pending,
    /// Cue shown; waiting for the player to resume.
    Shown,
}

/// App-level view model consumed by the host renderer.
#[derive(Clone, Debug)]
pub enum Screen<'a> {
    Ready {
        title: &'a str,
        wpm: u16,
        words: usize,
        turns: usize,
    },
    Prompting {
        title: &'a str,
        paragraphs: Paragraphs<'a>,
        revealed: usize,
        total: usize,
        progress_pct: u8,
        cue: TurnCue,
        wpm: u16,
    },
    Finished {
        title: &'a str,
        words: usize,
        turns_taken: usize,
    },
}
