//! Input abstraction layer.

mod mock;

pub use mock::MockInput;

use crate::pacing::PacingChange;

/// Logical actions consumed by the teleprompter app.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Start a run, or resume after a turn.
    Press,
    /// Abandon the current run.
    Exit,
    /// Change one pacing setting. The rate applies at once, turn placement
    /// from the next run.
    Adjust(PacingChange),
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
