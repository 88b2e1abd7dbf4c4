//! Pacing presets and user-tunable settings.

use core::str::FromStr;

use crate::{
    reveal::RevealConfig,
    schedule::{DEFAULT_MEAN_UNITS_PER_TURN, Granularity, ScheduleParams},
    segment::ClosingPhrase,
};

pub const DEFAULT_WPM: u16 = 125;
pub const MIN_WPM: u16 = 60;
pub const MAX_WPM: u16 = 600;
pub const SETTLE_MS: u16 = 800;
pub const MAX_MEAN_UNITS_PER_TURN: f32 = 12.0;

/// How confident the speaker claims to be. Higher confidence reads faster and
/// turns less often.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Confidence {
    Low,
    #[default]
    Medium,
    High,
}

impl Confidence {
    pub const fn default_wpm(self) -> u16 {
        match self {
            Self::Low => 110,
            Self::Medium => DEFAULT_WPM,
            Self::High => 140,
        }
    }

    pub const fn default_mean_units_per_turn(self) -> f32 {
        match self {
            Self::Low => 1.0,
            Self::Medium => DEFAULT_MEAN_UNITS_PER_TURN,
            Self::High => 3.0,
        }
    }

    pub const fn default_grace_units(self) -> usize {
        match self {
            Self::High => 3,
            Self::Low | Self::Medium => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown confidence (expected low, medium or high)")]
pub struct ParseConfidenceError;

impl FromStr for Confidence {
    type Err = ParseConfidenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("low") {
            Ok(Self::Low)
        } else if value.eq_ignore_ascii_case("medium") {
            Ok(Self::Medium)
        } else if value.eq_ignore_ascii_case("high") {
            Ok(Self::High)
        } else {
            Err(ParseConfidenceError)
        }
    }
}

/// A single live settings edit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PacingChange {
    Wpm(u16),
    MeanUnitsPerTurn(f32),
    Granularity(Granularity),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PacingConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub granularity: Granularity,
    pub mean_units_per_turn: f32,
    pub grace_units: usize,
    /// Delay between reaching a breakpoint and showing the turn cue.
    pub settle_ms: u16,
    /// Delay between the last word and the finished screen.
    pub finish_settle_ms: u16,
    pub closing_phrase: ClosingPhrase,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self::for_confidence(Confidence::default())
    }
}

impl PacingConfig {
    pub fn for_confidence(confidence: Confidence) -> Self {
        Self {
            wpm: confidence.default_wpm(),
            min_wpm: MIN_WPM,
            max_wpm: MAX_WPM,
            granularity: Granularity::Sentence,
            mean_units_per_turn: confidence.default_mean_units_per_turn(),
            grace_units: confidence.default_grace_units(),
            settle_ms: SETTLE_MS,
            finish_settle_ms: SETTLE_MS,
            closing_phrase: ClosingPhrase::default(),
        }
    }

    pub fn with_wpm(mut self, wpm: u16) -> Self {
        self.wpm = wpm;
        self.sanitize()
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_mean_units_per_turn(mut self, mean: f32) -> Self {
        self.mean_units_per_turn = mean;
        self.sanitize()
    }

    pub fn with_grace_units(mut self, grace_units: usize) -> Self {
        self.grace_units = grace_units;
        self
    }

    pub fn with_closing_phrase(mut self, closing_phrase: ClosingPhrase) -> Self {
        self.closing_phrase = closing_phrase;
        self
    }

    pub fn with_change(self, change: PacingChange) -> Self {
        match change {
            PacingChange::Wpm(wpm) => self.with_wpm(wpm),
            PacingChange::MeanUnitsPerTurn(mean) => self.with_mean_units_per_turn(mean),
            PacingChange::Granularity(granularity) => self.with_granularity(granularity),
        }
    }

    /// Clamps out-of-range values instead of rejecting them.
    pub fn sanitize(mut self) -> Self {
        self.min_wpm = self.min_wpm.max(MIN_WPM);
        self.max_wpm = self.max_wpm.max(self.min_wpm);
        self.wpm = self.wpm.clamp(self.min_wpm, self.max_wpm);
        self.mean_units_per_turn = if self.mean_units_per_turn.is_finite() {
            self.mean_units_per_turn.clamp(1.0, MAX_MEAN_UNITS_PER_TURN)
        } else {
            DEFAULT_MEAN_UNITS_PER_TURN
        };
        self
    }

    pub fn schedule_params(&self) -> ScheduleParams {
        ScheduleParams {
            granularity: self.granularity,
            mean_units_per_turn: self.mean_units_per_turn,
            grace_units: self.grace_units,
        }
    }

    pub fn reveal_config(&self) -> RevealConfig {
        RevealConfig {
            wpm: self.wpm,
            settle_ms: self.settle_ms,
            finish_settle_ms: self.finish_settle_ms,
        }
    }
}
