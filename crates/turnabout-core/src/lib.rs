//! Core logic for the Turnabout teleprompter: text segmentation, turn-point
//! scheduling and the timed reveal state machine.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod content;
pub mod input;
pub mod markers;
pub mod pacing;
pub mod render;
pub mod reveal;
pub mod schedule;
pub mod segment;
