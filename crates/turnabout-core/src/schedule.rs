//! Turn-point placement.
//!
//! Breakpoints are spread roughly `mean_units_per_turn` sentences apart after a
//! grace period, snapped to the nearest allowed boundary and never placed in
//! the closing section. Placement is randomized through a [`JitterSource`], so
//! callers that need reproducible output inject a seeded or fixed source.

use alloc::vec::Vec;
use core::{ops::Range, str::FromStr};

use log::debug;
use rand::{Rng, RngCore};

use crate::segment::Segments;

/// Minimum token distance between two accepted breakpoints.
pub const MIN_TURN_SPACING: usize = 3;
pub const DEFAULT_MEAN_UNITS_PER_TURN: f32 = 2.0;
const TARGET_JITTER_MIN: f32 = 0.8;
const TARGET_JITTER_SPAN: f32 = 0.4;

/// Where turns may be placed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Granularity {
    #[default]
    Sentence,
    Phrase,
    Word,
}

impl Granularity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Phrase => "phrase",
            Self::Word => "word",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown granularity (expected sentence, phrase or word)")]
pub struct ParseGranularityError;

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("sentence") {
            Ok(Self::Sentence)
        } else if value.eq_ignore_ascii_case("phrase") {
            Ok(Self::Phrase)
        } else if value.eq_ignore_ascii_case("word") {
            Ok(Self::Word)
        } else {
            Err(ParseGranularityError)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleParams {
    pub granularity: Granularity,
    /// Average number of sentences revealed between two turns.
    pub mean_units_per_turn: f32,
    /// Sentences that must be revealed before the first turn is eligible.
    pub grace_units: usize,
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self {
            granularity: Granularity::Sentence,
            mean_units_per_turn: DEFAULT_MEAN_UNITS_PER_TURN,
            grace_units: 2,
        }
    }
}

/// Source of uniform draws in `[0, 1)`.
pub trait JitterSource {
    fn next_unit(&mut self) -> f32;
}

/// Adapts any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngJitter<R>(pub R);

impl<R: RngCore> JitterSource for RngJitter<R> {
    fn next_unit(&mut self) -> f32 {
        self.0.r#gen::<f32>()
    }
}

/// Always returns the same draw. `FixedJitter(0.5)` yields the expected
/// (unjittered) pacing.
#[derive(Clone, Copy, Debug)]
pub struct FixedJitter(pub f32);

impl JitterSource for FixedJitter {
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}

/// Strictly increasing token indices at which the reveal pauses.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Breakpoints {
    points: Vec<usize>,
}

impl Breakpoints {
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Keeps the author-supplied `marks` that respect the scheduler's
    /// invariants: inside `[1, N]`, before the closing boundary and at least
    /// [`MIN_TURN_SPACING`] tokens after the previous kept mark.
    pub fn from_marked(segments: &Segments<'_>, marks: &[usize]) -> Self {
        let total = segments.token_count();
        let mut points: Vec<usize> = Vec::with_capacity(marks.len());

        for &mark in marks {
            if mark == 0 || mark > total || !segments.allows_turn_at(mark) {
                continue;
            }
            if points
                .last()
                .is_none_or(|&last| mark >= last + MIN_TURN_SPACING)
            {
                points.push(mark);
            }
        }

        Self { points }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.points.get(index).copied()
    }

    pub fn contains(&self, token_index: usize) -> bool {
        self.points.binary_search(&token_index).is_ok()
    }
}

/// Collects ascending points, dropping any closer than [`MIN_TURN_SPACING`]
/// to the previously kept one.
impl FromIterator<usize> for Breakpoints {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut points: Vec<usize> = Vec::new();
        for point in iter {
            if point > 0
                && points
                    .last()
                    .is_none_or(|&last| point >= last + MIN_TURN_SPACING)
            {
                points.push(point);
            }
        }
        Self { points }
    }
}

/// Boundaries eligible for a turn under one granularity.
enum Candidates<'s> {
    Listed(&'s [usize]),
    Every(Range<usize>),
}

impl Candidates<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Self::Listed(list) => list.is_empty(),
            Self::Every(range) => range.is_empty(),
        }
    }

    /// First candidate at or after `index`, falling back to the last one.
    fn at_or_after(&self, index: usize) -> Option<usize> {
        match self {
            Self::Listed(list) => {
                let slot = list.partition_point(|&candidate| candidate < index);
                list.get(slot).or_else(|| list.last()).copied()
            }
            Self::Every(range) => {
                if range.is_empty() {
                    None
                } else {
                    Some(index.clamp(range.start, range.end - 1))
                }
            }
        }
    }
}

/// Picks the breakpoints for one run.
pub fn schedule<J: JitterSource + ?Sized>(
    segments: &Segments<'_>,
    params: &ScheduleParams,
    jitter: &mut J,
) -> Breakpoints {
    let candidates = match params.granularity {
        Granularity::Sentence => Candidates::Listed(segments.sentence_ends()),
        Granularity::Phrase => Candidates::Listed(segments.phrase_ends()),
        Granularity::Word => Candidates::Every(segments.word_boundaries()),
    };

    let sentence_ends = segments.sentence_ends();
    let units = sentence_ends.len();
    let grace = params.grace_units;
    if units <= grace || candidates.is_empty() {
        debug!(
            "schedule: no turns (units={} grace={} granularity={})",
            units,
            grace,
            params.granularity.label()
        );
        return Breakpoints::empty();
    }

    let mean = sanitize_mean(params.mean_units_per_turn);
    let base = (units - grace) as f32 / mean;
    let spread = TARGET_JITTER_MIN + unit_draw(jitter) * TARGET_JITTER_SPAN;
    let target = round_half_up(base * spread).max(1);

    let mut points: Vec<usize> = Vec::with_capacity(target);
    let mut unit = (units - 1).min(grace + round_half_up(unit_draw(jitter)));

    if let Some(first) = candidates.at_or_after(sentence_ends[unit])
        && segments.allows_turn_at(first)
    {
        points.push(first);
    }

    while points.len() < target {
        let hop = mean + step_jitter(jitter);
        unit += round_half_up(hop).max(1);
        if unit >= units {
            break;
        }

        let Some(point) = candidates.at_or_after(sentence_ends[unit]) else {
            break;
        };
        if !segments.allows_turn_at(point) {
            break;
        }
        if points
            .last()
            .is_none_or(|&last| point >= last + MIN_TURN_SPACING)
        {
            points.push(point);
        }
    }

    debug!(
        "schedule: units={} grace={} mean={} target={} points={:?}",
        units, grace, mean, target, points
    );

    Breakpoints { points }
}

fn sanitize_mean(mean: f32) -> f32 {
    let mean = if mean.is_finite() && mean != 0.0 {
        mean
    } else {
        DEFAULT_MEAN_UNITS_PER_TURN
    };
    mean.max(1.0)
}

/// Draw clamped into `[0, 1)` so a misbehaving source cannot derail pacing.
fn unit_draw<J: JitterSource + ?Sized>(jitter: &mut J) -> f32 {
    let draw = jitter.next_unit();
    if draw.is_finite() {
        draw.clamp(0.0, 0.999_999)
    } else {
        0.0
    }
}

/// Uniform choice among `-1`, `0` and `+1`.
fn step_jitter<J: JitterSource + ?Sized>(jitter: &mut J) -> f32 {
    let bucket = unit_draw(jitter) * 3.0;
    if bucket < 1.0 {
        -1.0
    } else if bucket < 2.0 {
        0.0
    } else {
        1.0
    }
}

/// Half-up rounding for non-negative values; negative input rounds to zero.
fn round_half_up(value: f32) -> usize {
    if value <= 0.0 {
        0
    } else {
        (value + 0.5) as usize
    }
}
