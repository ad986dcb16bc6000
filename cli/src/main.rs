//! spindle CLI - binary entry point and terminal session management.
//!
//! # Event Loop
//!
//! Interactive mode runs a fixed-cadence render loop:
//!
//! 1. Wait for frame tick
//! 2. Poll for one pending key (non-blocking)
//! 3. Advance the spin session by the frame delta
//! 4. Drain spin events into the status line
//! 5. Render frame
//!
//! `spindle plan <slice>` skips the terminal entirely and prints the
//! computed motion plans as JSON.

use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::{Context as _, Result, bail};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use spindle_engine::{
    EventQueue, GameRng, SeededRng, SliceMap, SpinEvent, SpinRequest, SpinResult, SpinRng,
    SpinSession, SpindleConfig, plan_pointer, plan_spinner,
};
use spindle_tui::{SpinView, UiAction, draw, poll_action};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    if let Some((path, file)) = open_log_file() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        tracing::info!(path = %path.display(), "Logging initialized");
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the
    // TUI by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> Option<(PathBuf, File)> {
    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && fs::create_dir_all(parent).is_err()
        {
            continue;
        }
        if let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            return Some((candidate, file));
        }
    }
    None
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.spindle/logs/spindle.log
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".spindle").join("logs").join("spindle.log"));
    }

    // Fallback: ./.spindle/logs/spindle.log
    candidates.push(PathBuf::from(".spindle").join("logs").join("spindle.log"));

    candidates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Interactive TUI session.
    Play,
    /// Print the computed plans for one spin as JSON.
    Plan { slice: u8, seed: Option<u64> },
}

fn parse_args() -> Result<Mode> {
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        None => Ok(Mode::Play),
        Some("plan") => {
            let slice = args
                .next()
                .context("usage: spindle plan <slice> [--seed N]")?
                .parse::<u8>()
                .context("slice must be an integer")?;
            let mut seed = None;
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--seed" => {
                        seed = Some(
                            args.next()
                                .context("--seed needs a value")?
                                .parse::<u64>()
                                .context("seed must be an integer")?,
                        );
                    }
                    other => bail!("unknown argument: {other}"),
                }
            }
            Ok(Mode::Plan { slice, seed })
        }
        Some(other) => bail!("unknown command: {other} (usage: spindle [plan <slice> [--seed N]])"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = SpindleConfig::load().context("invalid configuration")?;

    match parse_args()? {
        Mode::Plan { slice, seed } => run_plan(&config, slice, seed),
        Mode::Play => run_play(&config).await,
    }
}

/// Compute one spin's plans from a fresh rotation state and print them.
fn run_plan(config: &SpindleConfig, slice: u8, seed: Option<u64>) -> Result<()> {
    let tuning = config.tuning();
    let mut rng: Box<dyn SpinRng> = match seed {
        Some(seed) => Box::new(SeededRng::new(seed)),
        None => Box::new(GameRng::new()),
    };

    let request = SpinRequest::new(slice, config.spin_duration())?;
    let pointer = plan_pointer(request.duration, 0.0, &tuning, rng.as_mut())?;
    let spinner = plan_spinner(
        request.duration,
        request.winning_slice,
        pointer.settle_offset,
        0.0,
        &SliceMap::standard(),
        &tuning,
        rng.as_mut(),
    )?;

    let result = SpinResult {
        pointer_final_offset: pointer.settle_offset,
        spinner_final_offset: spinner.final_offset,
        pointer_motion: pointer.motion,
        spinner_motion: spinner.motion,
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// RAII guard for raw mode + alternate screen.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(out))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
    }
}

async fn run_play(config: &SpindleConfig) -> Result<()> {
    let mut session = SpinSession::new(config.tuning(), Box::new(GameRng::new()));
    let mut events = EventQueue::new();
    let mut terminal_session = TerminalSession::new()?;

    let mut slice_entry = String::new();
    let mut status = String::from("type a slice number, then Enter");

    let mut ticker = tokio::time::interval(config.tick());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = Instant::now();

    loop {
        ticker.tick().await;
        let now = Instant::now();
        let delta = now - last_frame;
        last_frame = now;

        if let Some(action) = poll_action(Duration::ZERO)? {
            match action {
                UiAction::Quit => break,
                UiAction::Digit(digit) => {
                    if !session.is_spinning() && slice_entry.len() < 2 {
                        slice_entry.push((b'0' + digit) as char);
                    }
                }
                UiAction::Erase => {
                    slice_entry.pop();
                }
                UiAction::Spin => {
                    request_entered_spin(&mut session, &mut events, &mut slice_entry, &mut status, config);
                }
                UiAction::Rapid => session.set_time_scale(2.0),
                UiAction::Instant => session.skip_to_end(&mut events),
            }
        }

        session.advance(delta, &mut events);

        for event in events.take() {
            match event {
                SpinEvent::Started { winning_slice } => {
                    status = format!("spinning toward slice {winning_slice}...");
                }
                SpinEvent::PointerSettled { offset_degrees } => {
                    tracing::debug!(offset_degrees, "pointer settled");
                }
                SpinEvent::SpinnerRested {
                    absolute_angle_degrees,
                } => {
                    tracing::debug!(absolute_angle_degrees, "wheel at rest");
                }
                SpinEvent::Completed => {
                    status = landing_report(&session);
                }
            }
        }

        let view = SpinView {
            session: &session,
            slice_entry: &slice_entry,
            status: &status,
        };
        terminal_session
            .terminal
            .draw(|frame| draw(frame, &view))?;
    }

    Ok(())
}

fn request_entered_spin(
    session: &mut SpinSession,
    events: &mut EventQueue,
    slice_entry: &mut String,
    status: &mut String,
    config: &SpindleConfig,
) {
    let Ok(raw) = slice_entry.parse::<u8>() else {
        *status = "type a slice number first".to_string();
        return;
    };
    let request = match SpinRequest::new(raw, config.spin_duration()) {
        Ok(request) => request,
        Err(err) => {
            *status = err.to_string();
            return;
        }
    };
    match session.request_spin(request, events) {
        Ok(()) => slice_entry.clear(),
        Err(err) => *status = err.to_string(),
    }
}

fn landing_report(session: &SpinSession) -> String {
    let indicated = session.rotation_state().indicated_degree();
    match session.slices().slice_at(indicated) {
        Some(slice) => format!("landed on slice {slice} ({indicated:.0} deg into the wheel)"),
        None => format!("landed in a gap at {indicated:.0} deg"),
    }
}
