impl<IN, J> TeleprompterApp<'_, IN, J>
where
    IN: InputProvider,
    J: JitterSource,
{
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs(now_ms);

        let event = self.engine.tick(now_ms);
        match event {
            Some(RevealEvent::Paused { breakpoint }) => {
                info!(
                    "app: turn around at word {} ({}/{})",
                    breakpoint,
                    self.engine.next_breakpoint_index() + 1,
                    self.engine.breakpoints().len()
                );
            }
            Some(RevealEvent::Finished) => {
                info!("app: \"{}\" survived", self.title);
            }
            Some(RevealEvent::Revealed { .. }) | None => {}
        }

        if event.is_some() || self.pending_redraw {
            self.pending_redraw = false;
            return TickResult::RenderRequested;
        }

        TickResult::NoRender
    }

    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event, now_ms),
                Ok(None) => break,
                Err(_) => {
                    warn!("app: input provider failed; ignoring pending input");
                    break;
                }
            }
        }
    }

    fn apply_input_event(&mut self, event: InputEvent, now_ms: u64) {
        let result = match (event, self.engine.phase()) {
            (InputEvent::Exit, _) => {
                self.exit();
                Ok(())
            }
            (InputEvent::Adjust(change), _) => {
                info!("app: pacing change {:?}", change);
                let pacing = self.pacing.clone().with_change(change);
                self.apply_pacing(pacing);
                Ok(())
            }
            (InputEvent::Press, RevealPhase::Idle | RevealPhase::Finished) => self.start(now_ms),
            (InputEvent::Press, RevealPhase::Paused) => self.resume(now_ms),
            (InputEvent::Press, RevealPhase::Running) => {
                debug!("app: press ignored while running");
                Ok(())
            }
        };

        if let Err(err) = result {
            warn!("app: {}", err);
        }
    }
}
