//! Session state machine for one speech: input handling, turn scheduling and
//! the reveal loop.

use alloc::{string::String, vec::Vec};

use log::{debug, info, warn};

use crate::{
    input::{InputEvent, InputProvider},
    pacing::PacingConfig,
    render::{Screen, TurnCue},
    reveal::{RevealEngine, RevealError, RevealEvent, RevealPhase},
    schedule::{Breakpoints, JitterSource, schedule},
    segment::{Segments, segment},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// One speech being performed. Each session owns its own reveal engine.
pub struct TeleprompterApp<'a, IN, J>
where
    IN: InputProvider,
    J: JitterSource,
{
    title: &'a str,
    text: &'a str,
    segments: Segments<'a>,
    pacing: PacingConfig,
    /// Author-placed turns; replace the scheduler when present.
    marks: Option<Vec<usize>>,
    input: IN,
    jitter: J,
    engine: RevealEngine,
    /// Breakpoints computed mid-run, installed on the next start.
    pending_breakpoints: Option<Breakpoints>,
    pending_redraw: bool,
}

impl<'a, IN, J> TeleprompterApp<'a, IN, J>
where
    IN: InputProvider,
    J: JitterSource,
{
    pub fn new(
        title: &'a str,
        text: &'a str,
        pacing: PacingConfig,
        input: IN,
        mut jitter: J,
    ) -> Self {
        let pacing = pacing.sanitize();
        let segments = segment(text, &pacing.closing_phrase);
        let breakpoints = schedule(&segments, &pacing.schedule_params(), &mut jitter);
        let engine =
            RevealEngine::new(segments.token_count(), breakpoints, pacing.reveal_config());

        info!(
            "app: \"{}\" words={} sentences={} turns={} wpm={}",
            title,
            segments.token_count(),
            segments.sentence_unit_count(),
            engine.breakpoints().len(),
            pacing.wpm
        );

        Self {
            title,
            text,
            segments,
            pacing,
            marks: None,
            input,
            jitter,
            engine,
            pending_breakpoints: None,
            pending_redraw: true,
        }
    }

    /// Uses author-placed turns instead of scheduled ones.
    pub fn with_marks(mut self, marks: Vec<usize>) -> Self {
        self.marks = Some(marks);
        self.reschedule();
        self
    }

    pub fn title(&self) -> &'a str {
        self.title
    }

    pub fn segments(&self) -> &Segments<'a> {
        &self.segments
    }

    pub fn pacing(&self) -> &PacingConfig {
        &self.pacing
    }

    pub fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    pub fn phase(&self) -> RevealPhase {
        self.engine.phase()
    }

    /// Applies new pacing. The reading rate changes immediately; turn
    /// positions change from the next run.
    pub fn apply_pacing(&mut self, pacing: PacingConfig) {
        let pacing = pacing.sanitize();
        let resegment = pacing.closing_phrase != self.pacing.closing_phrase;
        self.pacing = pacing;
        if resegment {
            self.segments = segment(self.text, &self.pacing.closing_phrase);
        }

        self.engine.set_wpm(self.pacing.wpm);
        self.reschedule();
        self.pending_redraw = true;
    }

    /// Draws a fresh set of turn positions for the next run.
    pub fn reschedule(&mut self) {
        let breakpoints = match &self.marks {
            Some(marks) => Breakpoints::from_marked(&self.segments, marks),
            None => schedule(
                &self.segments,
                &self.pacing.schedule_params(),
                &mut self.jitter,
            ),
        };
        debug!("app: rescheduled turns={:?}", breakpoints.as_slice());

        if let Err(err) = self.engine.set_breakpoints(breakpoints.clone()) {
            debug!("app: deferring new turns to next run ({})", err);
            self.pending_breakpoints = Some(breakpoints);
        } else {
            self.pending_breakpoints = None;
        }
    }

    /// Starts a run. A run after a finished one gets freshly drawn turns.
    pub fn start(&mut self, now_ms: u64) -> Result<(), RevealError> {
        if self.engine.phase() == RevealPhase::Finished {
            self.reschedule();
        }
        if let Some(breakpoints) = self.pending_breakpoints.take()
            && let Err(err) = self.engine.set_breakpoints(breakpoints.clone())
        {
            self.pending_breakpoints = Some(breakpoints);
            return Err(err);
        }

        self.engine.start(now_ms)?;
        self.pending_redraw = true;
        Ok(())
    }

    pub fn resume(&mut self, now_ms: u64) -> Result<(), RevealError> {
        self.engine.resume(now_ms)?;
        self.pending_redraw = true;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.engine.exit();
        self.pending_redraw = true;
    }

    /// Revealed words joined by single spaces.
    pub fn displayed_text(&self) -> String {
        self.engine.displayed_text(self.segments.tokens())
    }

    /// Words revealed since the previous call, for effective-rate reports.
    pub fn drain_word_updates(&mut self) -> u32 {
        self.engine.drain_word_updates()
    }
}

include!("runtime.rs");
include!("view.rs");
