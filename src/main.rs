mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lantern_shooter::compute::{init_state, tick, TickInput};
use lantern_shooter::config::Tuning;
use lantern_shooter::effects::EffectField;
use lantern_shooter::entities::{GameState, GameStatus, UpgradeChoice};
use lantern_shooter::snapshot::Snapshot;

/// How long the final screen stays up before the program exits.
const GAME_OVER_DELAY: Duration = Duration::from_millis(3000);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// 8 frames @ 60 FPS ≈ 133 ms, shorter than any OS key-repeat gap.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "lantern_shooter")]
#[command(about = "Terminal arcade shooter: lanterns, bosses and level-ups")]
struct Args {
    /// Seed for the simulation RNG (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding gameplay tuning values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log output goes; the terminal itself is the game screen
    #[arg(long, default_value = "lantern_shooter.log")]
    log_file: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input sampling ────────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Drain pending key events into `key_frame` and fold them into the input
/// for this frame.  One-shot keys (quit, upgrade digits) act on press only.
fn sample_input(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<KeyCode, u64>,
    frame: u64,
) -> TickInput {
    let mut input = TickInput::default();

    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = ev
        else {
            continue;
        };
        match kind {
            KeyEventKind::Press => {
                key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        input.quit = true
                    }
                    KeyCode::Char(d @ '1'..='3') => {
                        input.upgrade = UpgradeChoice::from_index(d as u8 - b'0');
                    }
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                key_frame.remove(&code);
            }
        }
    }

    let left = any_held(
        key_frame,
        &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        frame,
    );
    let right = any_held(
        key_frame,
        &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        frame,
    );
    let up = any_held(
        key_frame,
        &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
        frame,
    );
    let down = any_held(
        key_frame,
        &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        frame,
    );

    input.move_x = i8::from(right) - i8::from(left);
    input.move_y = i8::from(down) - i8::from(up);
    input.fire = is_held(key_frame, &KeyCode::Char(' '), frame);
    input
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run one session until game over or quit; returns the final state.
///
/// The frame counter here is wall-clock bookkeeping for held keys only; the
/// simulation keeps its own tick counter, which stops while leveling up.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> anyhow::Result<GameState> {
    let frame_len = Duration::from_millis(state.tuning.tick_ms());
    let mut fx_rng = thread_rng();
    let mut effects = EffectField::new();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let input = sample_input(rx, &mut key_frame, frame);
        let before = state.status;
        let sim_frame = state.frame;
        state = tick(&state, &input, rng);

        if state.status != before {
            info!(from = ?before, to = ?state.status, frame = state.frame, "status changed");
        }
        // Events only come from ticks that did work; effects stay frozen
        // on the upgrade screen.
        effects.absorb(&state.events, &mut fx_rng);
        if state.frame != sim_frame || state.status == GameStatus::GameOver {
            effects.update();
        }

        let size = terminal::size().context("querying terminal size")?;
        display::render(out, &Snapshot::capture(&state), &effects, size)
            .context("drawing frame")?;

        match state.status {
            GameStatus::GameOver => {
                thread::sleep(GAME_OVER_DELAY);
                return Ok(state);
            }
            GameStatus::Quit => return Ok(state),
            GameStatus::Playing | GameStatus::LevelingUp => {}
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "starting session");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let result = game_loop(&mut out, init_state(tuning), &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(state) => {
            info!(score = state.score, level = state.player.level, "session ended");
            println!(
                "Final score: {}  Final level: {}",
                state.score, state.player.level
            );
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "session aborted");
            Err(err)
        }
    }
}
