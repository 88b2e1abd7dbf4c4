use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};
use log::{error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use turnabout_core::{
    app::{TeleprompterApp, TickResult},
    content::{SAMPLE_SPEECH, SAMPLE_TITLE},
    markers::extract_markers,
    schedule::RngJitter,
};

#[path = "main/cli.rs"]
mod cli;
#[path = "main/console.rs"]
mod console;
#[path = "main/terminal.rs"]
mod terminal;

const REPORT_INTERVAL_SECS: u64 = 5;

struct Speech {
    title: String,
    text: String,
    marks: Option<Vec<usize>>,
}

fn load_speech(cli: &cli::Cli) -> Result<Speech> {
    let raw = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading speech from {}", path.display()))?,
        None => SAMPLE_SPEECH.to_string(),
    };

    let marked = extract_markers(&raw);
    if marked.text.is_empty() {
        warn!("speech is empty; the run will finish immediately");
    }
    if !cli.use_markers && !marked.marks.is_empty() {
        info!(
            "speech carries {} turn markers; pass --use-markers to follow them",
            marked.marks.len()
        );
    }

    let title = cli
        .title
        .clone()
        .or_else(|| cli.file.as_deref().and_then(title_from_path))
        .unwrap_or_else(|| SAMPLE_TITLE.to_string());

    Ok(Speech {
        title,
        text: marked.text,
        marks: cli.use_markers.then_some(marked.marks),
    })
}

fn title_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace(['_', '-'], " "))
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let cli = cli::Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    let code = exit_code(run(cli).await);
    if code != 0 {
        std::process::exit(code);
    }
}

/// Logs a fatal error once and maps it to the process exit status.
fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            error!("{:#}", err);
            1
        }
    }
}

async fn run(cli: cli::Cli) -> Result<()> {
    let speech = load_speech(&cli)?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut app = TeleprompterApp::new(
        &speech.title,
        &speech.text,
        cli.pacing(),
        console::ConsoleInput,
        RngJitter(rng),
    );
    if let Some(marks) = speech.marks.clone() {
        app = app.with_marks(marks);
    }

    console::spawn_reader().context("starting console input")?;

    let mut renderer = terminal::TerminalRenderer::new(std::io::stdout().lock());
    let mut render_fault_logged = false;
    let loop_start = Instant::now();
    let mut report_words = 0u64;
    let mut report_start = Instant::now();

    while !console::quit_requested() {
        let now_ms = loop_start.elapsed().as_millis();
        if app.tick(now_ms) == TickResult::RenderRequested {
            if let Err(err) = app.with_screen(|screen| renderer.render(screen)) {
                if !render_fault_logged {
                    error!("terminal: render failed: {}", err);
                    render_fault_logged = true;
                }
            }
        }

        report_words = report_words.saturating_add(app.drain_word_updates() as u64);

        let elapsed = report_start.elapsed();
        if elapsed >= Duration::from_secs(REPORT_INTERVAL_SECS) {
            if report_words > 0 {
                let elapsed_ms = elapsed.as_millis().max(1);
                let wpm_x100 = report_words * 6_000_000 / elapsed_ms;

                info!(
                    "effective_wpm={}.{:02} words={} elapsed_ms={}",
                    wpm_x100 / 100,
                    wpm_x100 % 100,
                    report_words,
                    elapsed_ms
                );
            }

            report_words = 0;
            report_start = Instant::now();
        }

        Timer::after_millis(1).await;
    }

    info!("console closed, exiting");
    Ok(())
}
