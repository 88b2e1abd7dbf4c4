use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use turnabout_core::{
    pacing::{Confidence, PacingConfig},
    schedule::Granularity,
    segment::{ClosingPhrase, DEFAULT_CLOSING_PHRASE},
};

#[derive(Debug, Parser)]
#[command(name = "turnabout")]
#[command(about = "Party teleprompter: read the speech aloud, turn around when told")]
pub(super) struct Cli {
    /// Speech text file; the built-in address is used when omitted
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Title shown above the speech
    #[arg(long)]
    pub title: Option<String>,

    /// Pacing preset: low, medium or high
    #[arg(long, default_value = "medium")]
    pub confidence: Confidence,

    /// Words per minute (overrides the preset)
    #[arg(long)]
    pub wpm: Option<u16>,

    /// Where turns may fall: sentence, phrase or word
    #[arg(long, default_value = "sentence")]
    pub granularity: Granularity,

    /// Average sentences between turns (overrides the preset)
    #[arg(long = "mean-turn")]
    pub mean_units_per_turn: Option<f32>,

    /// Sentences read before the first turn (overrides the preset)
    #[arg(long)]
    pub grace: Option<usize>,

    /// Phrase that opens the uninterrupted closing section
    #[arg(long, default_value = DEFAULT_CLOSING_PHRASE)]
    pub closing_phrase: String,

    /// Seed for reproducible turn placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Turn at the speech's own [TURN] markers instead of scheduling
    #[arg(long)]
    pub use_markers: bool,

    /// Log level; RUST_LOG takes precedence when set
    #[arg(long, env = "TURNABOUT_LOG", default_value = "warn")]
    pub log_level: LevelFilter,
}

impl Cli {
    pub fn pacing(&self) -> PacingConfig {
        let mut pacing = PacingConfig::for_confidence(self.confidence)
            .with_granularity(self.granularity)
            .with_closing_phrase(ClosingPhrase::new(&self.closing_phrase));

        if let Some(wpm) = self.wpm {
            pacing = pacing.with_wpm(wpm);
        }
        if let Some(mean) = self.mean_units_per_turn {
            pacing = pacing.with_mean_units_per_turn(mean);
        }
        if let Some(grace) = self.grace {
            pacing = pacing.with_grace_units(grace);
        }

        pacing
    }
}
