//! Line-oriented console input, read on a plain thread and forwarded into a
//! queue that the app drains on every tick.

use core::cell::RefCell;
use std::{
    convert::Infallible,
    io::{self, BufRead},
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use critical_section::Mutex;
use heapless::Deque;
use log::{debug, warn};
use turnabout_core::{
    input::{InputEvent, InputProvider},
    pacing::PacingChange,
};

const INPUT_QUEUE_DEPTH: usize = 8;

static INPUTS: Mutex<RefCell<Deque<InputEvent, INPUT_QUEUE_DEPTH>>> =
    Mutex::new(RefCell::new(Deque::new()));
static QUIT: AtomicBool = AtomicBool::new(false);

fn push_input(event: InputEvent) -> bool {
    critical_section::with(|cs| INPUTS.borrow_ref_mut(cs).push_back(event).is_ok())
}

fn pop_input() -> Option<InputEvent> {
    critical_section::with(|cs| INPUTS.borrow_ref_mut(cs).pop_front())
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Command {
    Input(InputEvent),
    Quit,
}

/// Maps one console line to a command. Settings take one argument:
/// `wpm N`, `mean F` or `gran sentence|phrase|word`.
fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_ascii_lowercase();
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or("");
    let arg = words.next();
    if words.next().is_some() {
        return None;
    }

    let event = match (head, arg) {
        ("" | "s" | "start" | "r" | "resume", None) => InputEvent::Press,
        ("x" | "exit", None) => InputEvent::Exit,
        ("q" | "quit", None) => return Some(Command::Quit),
        ("wpm", Some(value)) => InputEvent::Adjust(PacingChange::Wpm(value.parse().ok()?)),
        ("mean", Some(value)) => {
            InputEvent::Adjust(PacingChange::MeanUnitsPerTurn(value.parse().ok()?))
        }
        ("gran" | "granularity", Some(value)) => {
            InputEvent::Adjust(PacingChange::Granularity(value.parse().ok()?))
        }
        _ => return None,
    };

    Some(Command::Input(event))
}

/// Starts the stdin reader. End of input counts as a quit request.
pub(super) fn spawn_reader() -> io::Result<()> {
    thread::Builder::new()
        .name("console-input".into())
        .spawn(|| {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("console: read failed: {}", err);
                        break;
                    }
                };

                match parse_command(&line) {
                    Some(Command::Input(event)) => {
                        if !push_input(event) {
                            debug!("console: queue full, dropping {:?}", event);
                        }
                    }
                    Some(Command::Quit) => break,
                    None => warn!("console: unrecognized command {:?}", line),
                }
            }

            QUIT.store(true, Ordering::Release);
        })?;

    Ok(())
}

pub(super) fn quit_requested() -> bool {
    QUIT.load(Ordering::Acquire)
}

/// Input provider backed by the console queue.
#[derive(Default, Debug, Clone, Copy)]
pub(super) struct ConsoleInput;

impl InputProvider for ConsoleInput {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(pop_input())
    }
}

#[cfg(test)]
mod tests {
    use turnabout_core::schedule::Granularity;

    use super::*;

    #[test]
    fn maps_lines_to_commands() {
        assert_eq!(parse_command(""), Some(Command::Input(InputEvent::Press)));
        assert_eq!(parse_command("  Resume "), Some(Command::Input(InputEvent::Press)));
        assert_eq!(parse_command("x"), Some(Command::Input(InputEvent::Exit)));
        assert_eq!(parse_command("QUIT"), Some(Command::Quit));
        assert_eq!(parse_command("louder"), None);
        assert_eq!(parse_command("exit now"), None);
    }

    #[test]
    fn settings_commands_become_pacing_changes() {
        assert_eq!(
            parse_command("wpm 150"),
            Some(Command::Input(InputEvent::Adjust(PacingChange::Wpm(150))))
        );
        assert_eq!(
            parse_command(" MEAN 2.5 "),
            Some(Command::Input(InputEvent::Adjust(PacingChange::MeanUnitsPerTurn(2.5))))
        );
        assert_eq!(
            parse_command("gran phrase"),
            Some(Command::Input(InputEvent::Adjust(PacingChange::Granularity(
                Granularity::Phrase
            ))))
        );
        assert_eq!(
            parse_command("granularity word"),
            Some(Command::Input(InputEvent::Adjust(PacingChange::Granularity(
                Granularity::Word
            ))))
        );
    }

    #[test]
    fn malformed_settings_are_rejected() {
        assert_eq!(parse_command("wpm"), None);
        assert_eq!(parse_command("wpm fast"), None);
        assert_eq!(parse_command("wpm 99999"), None);
        assert_eq!(parse_command("mean 1 2"), None);
        assert_eq!(parse_command("gran clause"), None);
    }

    #[test]
    fn queued_events_are_polled_in_order() {
        let mut input = ConsoleInput;
        assert!(push_input(InputEvent::Press));
        assert!(push_input(InputEvent::Exit));

        assert_eq!(input.poll_event(), Ok(Some(InputEvent::Press)));
        assert_eq!(input.poll_event(), Ok(Some(InputEvent::Exit)));
        assert_eq!(input.poll_event(), Ok(None));
    }
}
