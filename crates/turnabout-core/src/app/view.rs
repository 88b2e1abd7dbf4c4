impl<IN, J> TeleprompterApp<'_, IN, J>
where
    IN: InputProvider,
    J: JitterSource,
{
    pub fn turn_cue(&self) -> TurnCue {
        match self.engine.phase() {
            RevealPhase::Paused => TurnCue::Shown,
            RevealPhase::Running if self.engine.awaiting_turn() => TurnCue::Pending,
            _ => TurnCue::Hidden,
        }
    }

    pub fn with_screen<R>(&self, f: impl FnOnce(Screen<'_>) -> R) -> R {
        let screen = match self.engine.phase() {
            RevealPhase::Idle => Screen::Ready {
                title: self.title,
                wpm: self.engine.config().wpm,
                words: self.segments.token_count(),
                turns: self.engine.breakpoints().len(),
            },
            RevealPhase::Running | RevealPhase::Paused => Screen::Prompting {
                title: self.title,
                paragraphs: self.engine.paragraphs(self.segments.tokens()),
                revealed: self.engine.revealed_count(),
                total: self.engine.token_count(),
                progress_pct: self.engine.progress_pct(),
                cue: self.turn_cue(),
                wpm: self.engine.config().wpm,
            },
            RevealPhase::Finished => Screen::Finished {
                title: self.title,
                words: self.engine.revealed_count(),
                turns_taken: self.engine.paragraph_breaks().len(),
            },
        };

        f(screen)
    }
}
