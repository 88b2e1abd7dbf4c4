//! Timed word-by-word reveal with turn pauses.
//!
//! The engine is polled with a monotonic clock in milliseconds. It keeps at
//! most one pending deadline, stored inside its state value, so replacing the
//! state (for example on [`RevealEngine::exit`]) drops the deadline with it.

use alloc::{string::String, vec::Vec};

use log::{debug, info};

use crate::{
    pacing::{DEFAULT_WPM, MIN_WPM, SETTLE_MS},
    schedule::Breakpoints,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RevealConfig {
    pub wpm: u16,
    pub settle_ms: u16,
    pub finish_settle_ms: u16,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            settle_ms: SETTLE_MS,
            finish_settle_ms: SETTLE_MS,
        }
    }
}

/// Milliseconds between two revealed words. Rates below [`MIN_WPM`] are
/// raised to it.
pub fn tick_interval_ms(wpm: u16) -> u32 {
    60_000 / u32::from(wpm.max(MIN_WPM))
}

/// Externally visible phase.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealPhase {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    Start,
    Resume,
    Reschedule,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RevealError {
    #[error("invalid transition: {attempted:?} while {from:?}")]
    InvalidTransition {
        from: RevealPhase,
        attempted: Transition,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealEvent {
    Revealed { count: usize },
    Paused { breakpoint: usize },
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RevealState {
    Idle,
    Revealing { next_tick_ms: u64 },
    /// Breakpoint reached; the turn cue shows once the settle delay elapses.
    Settling { pause_at_ms: u64 },
    Paused,
    /// Last word shown; finish once the settle delay elapses.
    Finishing { finish_at_ms: u64 },
    Finished,
}

impl RevealState {
    fn phase(self) -> RevealPhase {
        match self {
            Self::Idle => RevealPhase::Idle,
            Self::Revealing { .. } | Self::Settling { .. } | Self::Finishing { .. } => {
                RevealPhase::Running
            }
            Self::Paused => RevealPhase::Paused,
            Self::Finished => RevealPhase::Finished,
        }
    }
}

pub struct RevealEngine {
    config: RevealConfig,
    token_count: usize,
    breakpoints: Breakpoints,
    state: RevealState,
    revealed: usize,
    next_breakpoint: usize,
    paragraph_breaks: Vec<usize>,
    words_since_drain: u32,
}

impl RevealEngine {
    pub fn new(token_count: usize, breakpoints: Breakpoints, config: RevealConfig) -> Self {
        Self {
            config,
            token_count,
            breakpoints,
            state: RevealState::Idle,
            revealed: 0,
            next_breakpoint: 0,
            paragraph_breaks: Vec::new(),
            words_since_drain: 0,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.state.phase()
    }

    /// Whether the turn cue is pending (breakpoint reached, settle delay
    /// running) or shown.
    pub fn awaiting_turn(&self) -> bool {
        matches!(
            self.state,
            RevealState::Settling { .. } | RevealState::Paused
        )
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn next_breakpoint_index(&self) -> usize {
        self.next_breakpoint
    }

    pub fn paragraph_breaks(&self) -> &[usize] {
        &self.paragraph_breaks
    }

    pub fn config(&self) -> RevealConfig {
        self.config
    }

    /// Fraction of tokens revealed; `0.0` for an empty text.
    pub fn progress(&self) -> f32 {
        if self.token_count == 0 {
            0.0
        } else {
            self.revealed as f32 / self.token_count as f32
        }
    }

    pub fn progress_pct(&self) -> u8 {
        if self.token_count == 0 {
            return 0;
        }
        ((self.revealed * 100) / self.token_count).min(100) as u8
    }

    /// Takes effect from the next scheduled tick.
    pub fn set_wpm(&mut self, wpm: u16) {
        self.config.wpm = wpm.max(MIN_WPM);
    }

    /// Replaces the breakpoints for the next run. Rejected mid-run.
    pub fn set_breakpoints(&mut self, breakpoints: Breakpoints) -> Result<(), RevealError> {
        match self.state {
            RevealState::Idle | RevealState::Finished => {
                self.breakpoints = breakpoints;
                Ok(())
            }
            state => Err(RevealError::InvalidTransition {
                from: state.phase(),
                attempted: Transition::Reschedule,
            }),
        }
    }

    pub fn start(&mut self, now_ms: u64) -> Result<(), RevealError> {
        if !matches!(self.state, RevealState::Idle | RevealState::Finished) {
            return Err(RevealError::InvalidTransition {
                from: self.phase(),
                attempted: Transition::Start,
            });
        }

        self.revealed = 0;
        self.next_breakpoint = 0;
        self.paragraph_breaks.clear();
        self.state = RevealState::Revealing {
            next_tick_ms: self.next_tick_at(now_ms),
        };
        info!(
            "reveal: start tokens={} turns={} wpm={}",
            self.token_count,
            self.breakpoints.len(),
            self.config.wpm
        );
        Ok(())
    }

    pub fn resume(&mut self, now_ms: u64) -> Result<(), RevealError> {
        if self.state != RevealState::Paused {
            return Err(RevealError::InvalidTransition {
                from: self.phase(),
                attempted: Transition::Resume,
            });
        }

        if self.paragraph_breaks.last() != Some(&self.revealed) {
            self.paragraph_breaks.push(self.revealed);
        }
        self.next_breakpoint += 1;
        self.state = RevealState::Revealing {
            next_tick_ms: self.next_tick_at(now_ms),
        };
        debug!(
            "reveal: resume at={} next_turn={}",
            self.revealed, self.next_breakpoint
        );
        Ok(())
    }

    /// Cancels the run from any phase. The pending deadline is dropped before
    /// anything else, so no earlier tick can land afterwards.
    pub fn exit(&mut self) {
        let previous = self.state;
        self.state = RevealState::Idle;
        if previous != RevealState::Idle {
            debug!("reveal: exit from {:?} at={}", previous.phase(), self.revealed);
        }
    }

    /// Applies the pending deadline if it is due.
    pub fn tick(&mut self, now_ms: u64) -> Option<RevealEvent> {
        match self.state {
            RevealState::Idle | RevealState::Paused | RevealState::Finished => None,
            RevealState::Revealing { next_tick_ms } => {
                if now_ms < next_tick_ms {
                    return None;
                }
                Some(self.reveal_next(now_ms))
            }
            RevealState::Settling { pause_at_ms } => {
                if now_ms < pause_at_ms {
                    return None;
                }
                self.state = RevealState::Paused;
                debug!(
                    "reveal: paused at={} turn={}",
                    self.revealed, self.next_breakpoint
                );
                Some(RevealEvent::Paused {
                    breakpoint: self.revealed,
                })
            }
            RevealState::Finishing { finish_at_ms } => {
                if now_ms < finish_at_ms {
                    return None;
                }
                Some(self.finish())
            }
        }
    }

    /// Number of words revealed since the previous call.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }

    /// Revealed words joined by single spaces.
    pub fn displayed_text(&self, tokens: &[&str]) -> String {
        tokens[..self.revealed.min(tokens.len())].join(" ")
    }

    /// Revealed words split at the paragraph breaks left by resumed turns.
    pub fn paragraphs<'t>(&'t self, tokens: &'t [&'t str]) -> Paragraphs<'t> {
        Paragraphs {
            tokens: &tokens[..self.revealed.min(tokens.len())],
            breaks: &self.paragraph_breaks,
            start: 0,
        }
    }

    fn reveal_next(&mut self, now_ms: u64) -> RevealEvent {
        if self.revealed >= self.token_count {
            return self.finish();
        }

        self.revealed += 1;
        self.words_since_drain = self.words_since_drain.saturating_add(1);

        self.state = if self.revealed == self.token_count {
            RevealState::Finishing {
                finish_at_ms: now_ms + u64::from(self.config.finish_settle_ms),
            }
        } else if self.breakpoints.get(self.next_breakpoint) == Some(self.revealed) {
            RevealState::Settling {
                pause_at_ms: now_ms + u64::from(self.config.settle_ms),
            }
        } else {
            RevealState::Revealing {
                next_tick_ms: self.next_tick_at(now_ms),
            }
        };

        RevealEvent::Revealed {
            count: self.revealed,
        }
    }

    fn finish(&mut self) -> RevealEvent {
        self.state = RevealState::Finished;
        info!(
            "reveal: finished words={} turns_taken={}",
            self.revealed,
            self.paragraph_breaks.len()
        );
        RevealEvent::Finished
    }

    fn next_tick_at(&self, now_ms: u64) -> u64 {
        now_ms + u64::from(tick_interval_ms(self.config.wpm))
    }
}

/// Iterator over revealed paragraphs, see [`RevealEngine::paragraphs`].
#[derive(Clone, Debug)]
pub struct Paragraphs<'t> {
    tokens: &'t [&'t str],
    breaks: &'t [usize],
    start: usize,
}

impl<'t> Iterator for Paragraphs<'t> {
    type Item = &'t [&'t str];

    fn next(&mut self) -> Option<Self::Item> {
        while self.start < self.tokens.len() {
            let end = match self.breaks.split_first() {
                Some((&first, rest)) => {
                    self.breaks = rest;
                    first.min(self.tokens.len())
                }
                None => self.tokens.len(),
            };

            if end <= self.start {
                continue;
            }
            let paragraph = &self.tokens[self.start..end];
            self.start = end;
            return Some(paragraph);
        }

        None
    }
}

#[cfg(test)]
mod tests;
