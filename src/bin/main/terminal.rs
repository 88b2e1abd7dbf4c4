//! Incremental stdout renderer.
//!
//! The terminal is append-only, so each redraw prints only what changed since
//! the previous one: new words, paragraph breaks and the turn cue.

use core::fmt::Write as _;
use std::io::{self, Write};

use heapless::String as HeaplessString;
use turnabout_core::render::{Screen, TurnCue};

const HEADER_BYTES: usize = 96;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Shown {
    Nothing,
    Ready,
    Prompting,
    Finished,
}

pub(super) struct TerminalRenderer<W: Write> {
    out: W,
    shown: Shown,
    /// `(wpm, turns)` of the last printed ready banner.
    ready_settings: Option<(u16, usize)>,
    printed_words: usize,
    cue_printed: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: Shown::Nothing,
            ready_settings: None,
            printed_words: 0,
            cue_printed: false,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, screen: Screen<'_>) -> io::Result<()> {
        match screen {
            Screen::Ready {
                title,
                wpm,
                words,
                turns,
            } => {
                if self.shown != Shown::Ready || self.ready_settings != Some((wpm, turns)) {
                    writeln!(self.out, "\n{}", header(title, wpm))?;
                    writeln!(
                        self.out,
                        "{} words, {} turns. Enter starts, q quits.",
                        words, turns
                    )?;
                    writeln!(self.out, "Settings: wpm N, mean F, gran sentence|phrase|word.")?;
                }
                self.shown = Shown::Ready;
                self.ready_settings = Some((wpm, turns));
            }
            Screen::Prompting {
                title,
                paragraphs,
                revealed,
                progress_pct,
                cue,
                wpm,
                ..
            } => {
                if self.shown != Shown::Prompting || revealed < self.printed_words {
                    writeln!(self.out, "\n{}\n", header(title, wpm))?;
                    self.printed_words = 0;
                    self.cue_printed = false;
                }
                self.shown = Shown::Prompting;

                let mut index = 0usize;
                for (paragraph_index, paragraph) in paragraphs.enumerate() {
                    for (word_index, word) in paragraph.iter().enumerate() {
                        if index >= self.printed_words {
                            if index > 0 {
                                let gap = if paragraph_index > 0 && word_index == 0 {
                                    "\n\n"
                                } else {
                                    " "
                                };
                                self.out.write_all(gap.as_bytes())?;
                            }
                            self.out.write_all(word.as_bytes())?;
                        }
                        index += 1;
                    }
                }
                self.printed_words = index;

                match cue {
                    TurnCue::Shown if !self.cue_printed => {
                        writeln!(
                            self.out,
                            "\n\n    >>> TURN AROUND! <<<    ({}% read, Enter resumes)",
                            progress_pct
                        )?;
                        self.cue_printed = true;
                    }
                    TurnCue::Hidden => self.cue_printed = false,
                    TurnCue::Shown | TurnCue::Pending => {}
                }
            }
            Screen::Finished {
                title,
                words,
                turns_taken,
            } => {
                if self.shown != Shown::Finished {
                    writeln!(self.out, "\n\n\"{}\" delivered.", title)?;
                    writeln!(
                        self.out,
                        "{} words, {} turns survived. Enter goes again, q quits.",
                        words, turns_taken
                    )?;
                }
                self.shown = Shown::Finished;
                self.printed_words = 0;
            }
        }

        self.out.flush()
    }
}

/// Title line, truncated to fit a fixed buffer.
fn header(title: &str, wpm: u16) -> HeaplessString<HEADER_BYTES> {
    let mut line = HeaplessString::new();
    if write!(line, "== {} @ {} wpm ==", title, wpm).is_err() {
        line.clear();
        let budget = HEADER_BYTES - 16;
        let mut cut = budget.min(title.len());
        while !title.is_char_boundary(cut) {
            cut -= 1;
        }
        let _ = write!(line, "== {}... ==", &title[..cut]);
    }
    line
}

#[cfg(test)]
mod tests {
    use turnabout_core::{
        reveal::{RevealConfig, RevealEngine, RevealEvent},
        schedule::Breakpoints,
    };

    use super::*;

    const WORDS: [&str; 6] = ["Hear", "me.", "We", "march.", "Onward", "now."];

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    fn prompting<'a>(engine: &'a RevealEngine, cue: TurnCue) -> Screen<'a> {
        Screen::Prompting {
            title: "Rally",
            paragraphs: engine.paragraphs(&WORDS),
            revealed: engine.revealed_count(),
            total: engine.token_count(),
            progress_pct: engine.progress_pct(),
            cue,
            wpm: engine.config().wpm,
        }
    }

    #[test]
    fn header_truncates_long_titles() {
        let title = "é".repeat(200);
        let line = header(&title, 125);
        assert!(line.starts_with("== é"));
        assert!(line.ends_with("... =="));
        assert_eq!(header("Rally", 125).as_str(), "== Rally @ 125 wpm ==");
    }

    #[test]
    fn ready_banner_reprints_only_when_settings_change() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        for _ in 0..3 {
            renderer
                .render(Screen::Ready {
                    title: "Rally",
                    wpm: 125,
                    words: 6,
                    turns: 1,
                })
                .unwrap();
        }

        renderer
            .render(Screen::Ready {
                title: "Rally",
                wpm: 200,
                words: 6,
                turns: 2,
            })
            .unwrap();

        let text = output(renderer);
        assert_eq!(text.matches("6 words, 1 turns").count(), 1);
        assert_eq!(text.matches("== Rally @ 200 wpm ==").count(), 1);
        assert!(text.ends_with(
            "6 words, 2 turns. Enter starts, q quits.\n\
             Settings: wpm N, mean F, gran sentence|phrase|word.\n"
        ));
    }

    #[test]
    fn prompting_appends_words_and_breaks_after_turns() {
        let breakpoints: Breakpoints = [2].into_iter().collect();
        let mut engine = RevealEngine::new(WORDS.len(), breakpoints, RevealConfig::default());
        let mut renderer = TerminalRenderer::new(Vec::new());
        let interval = 480u64;

        engine.start(0).unwrap();
        let mut now = 0;
        while engine.revealed_count() < 2 {
            now += interval;
            engine.tick(now);
            renderer.render(prompting(&engine, TurnCue::Hidden)).unwrap();
        }
        now += 800;
        assert_eq!(engine.tick(now), Some(RevealEvent::Paused { breakpoint: 2 }));
        renderer.render(prompting(&engine, TurnCue::Shown)).unwrap();
        renderer.render(prompting(&engine, TurnCue::Shown)).unwrap();

        engine.resume(now).unwrap();
        while engine.tick(now).is_none_or(|event| event != RevealEvent::Finished) {
            renderer.render(prompting(&engine, TurnCue::Hidden)).unwrap();
            now += 10;
        }

        let text = output(renderer);
        assert_eq!(text.matches("TURN AROUND!").count(), 1);
        assert!(text.contains("Hear me."));
        assert!(text.contains("(33% read, Enter resumes)"));
        assert!(text.ends_with("\n\nWe march. Onward now."));
    }
}
