use alloc::collections::VecDeque;

use super::{InputEvent, InputProvider};

/// Replays a fixed script of events, one per poll, then stays silent.
#[derive(Clone, Debug, Default)]
pub struct MockInput {
    script: VecDeque<InputEvent>,
}

impl MockInput {
    pub const fn new() -> Self {
        Self {
            script: VecDeque::new(),
        }
    }

    pub fn scripted(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            script: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.script.pop_front())
    }
}
