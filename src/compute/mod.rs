//! Pure game-logic functions.
//!
//! `tick` takes an immutable reference to the current `GameState`, the
//! input sampled for this frame and an RNG handle, and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.  The
//! submodules operate on the working copy in place.

pub mod collision;
pub mod firing;
pub mod movement;
pub mod progression;
pub mod spawn;

use rand::Rng;
use tracing::info;

use crate::config::Tuning;
use crate::entities::{GameState, GameStatus, Player, UpgradeChoice};
use crate::events::FrameEvent;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Control signals sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// −1 left, +1 right, 0 idle.
    pub move_x: i8,
    /// −1 up, +1 down, 0 idle.
    pub move_y: i8,
    pub fire: bool,
    /// Only consumed while the game is leveling up.
    pub upgrade: Option<UpgradeChoice>,
    pub quit: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for the given tuning.
pub fn init_state(tuning: Tuning) -> GameState {
    assert!(tuning.tick_rate_hz > 0, "tick rate must be positive");
    assert!(tuning.width > 0.0 && tuning.height > 0.0, "empty playfield");

    GameState {
        player: Player::new(&tuning),
        enemies: Vec::new(),
        boss: None,
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        supplies: Vec::new(),
        score: 0,
        next_boss_milestone: tuning.first_boss_milestone,
        pending_upgrades: 0,
        interrupted: None,
        status: GameStatus::Playing,
        frame: 0,
        events: Vec::new(),
        tuning,
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ───────────────────────────

/// Advance the game by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// While leveling up only the upgrade choice and quit are honoured; the
/// tick counter, and with it every fire-rate timestamp, stays frozen.  The
/// last choice finishes the tick that was cut short by the level-up.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.events.clear();

    match next.status {
        GameStatus::GameOver | GameStatus::Quit => return next,
        GameStatus::LevelingUp => {
            if let Some(choice) = input.upgrade {
                progression::choose_upgrade(&mut next, choice);
            }
            if next.status == GameStatus::Playing {
                if let Some(held) = next.interrupted.take() {
                    finish_tick(&mut next, &held);
                }
            }
        }
        GameStatus::Playing => simulate(&mut next, input, rng),
    }

    if input.quit && next.status != GameStatus::GameOver {
        info!(score = next.score, level = next.player.level, "quit requested");
        next.status = GameStatus::Quit;
    }
    next
}

/// One simulated step: spawn → player fire → enemy fire → player attacks →
/// level-up gate → hits on the player → termination check → movement.
fn simulate(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) {
    state.frame += 1;

    // ── 1. Spawning & boss gate ──────────────────────────────────────────────
    spawn::spawn_step(state, rng);

    // ── 2. Firing ────────────────────────────────────────────────────────────
    firing::player_fire(state, input.fire);
    firing::enemy_fire(state);

    // ── 3. Pickups & player attacks ──────────────────────────────────────────
    collision::player_attacks(state, rng);

    // ── 4. Level-up gate ─────────────────────────────────────────────────────
    // Upgrades are chosen before this tick's damage lands; the rest of the
    // tick waits in `interrupted`.
    if state.pending_upgrades > 0 {
        state.status = GameStatus::LevelingUp;
        state.interrupted = Some(*input);
        return;
    }

    finish_tick(state, input);
}

/// Damage, termination and movement: the part of a tick after the attack
/// pass.
fn finish_tick(state: &mut GameState, input: &TickInput) {
    // ── 5. Hits on the player ────────────────────────────────────────────────
    collision::hits_on_player(state);

    // ── 6. Termination ───────────────────────────────────────────────────────
    if state.player.hp <= 0.0 {
        state.player.hp = 0.0;
        state.status = GameStatus::GameOver;
        state.events.push(FrameEvent::GameOver {
            score: state.score,
            level: state.player.level,
        });
        info!(
            score = state.score,
            level = state.player.level,
            frame = state.frame,
            "game over"
        );
        return;
    }

    // ── 7. Movement & off-screen cleanup ─────────────────────────────────────
    movement::advance(state, input);
}
