//! Experience, level-ups, upgrade choices and the boss milestone gate.

use tracing::{debug, info};

use crate::config::Tuning;
use crate::entities::{GameState, GameStatus, Player, UpgradeChoice};
use crate::events::FrameEvent;

/// XP needed to clear `level`: `floor(50 · level^1.5)`.
pub fn xp_for_level(level: u32) -> u32 {
    (50.0 * f64::from(level).powf(1.5)).floor() as u32
}

/// Add XP; returns `true` when this gain levels the player up.
///
/// A single gain resolves at most one level, even when the remainder still
/// exceeds the new threshold.
pub fn gain_xp(player: &mut Player, amount: u32) -> bool {
    debug_assert!(player.xp_next > 0, "xp threshold must be positive");

    player.xp += amount;
    if player.xp < player.xp_next {
        return false;
    }
    player.xp -= player.xp_next;
    player.level += 1;
    player.xp_next = xp_for_level(player.level);
    true
}

/// Award XP to the player in `state`, queueing an upgrade on level-up.
pub fn award_xp(state: &mut GameState, amount: u32) {
    if gain_xp(&mut state.player, amount) {
        state.pending_upgrades += 1;
        state.events.push(FrameEvent::LevelUp {
            level: state.player.level,
        });
        info!(level = state.player.level, xp_next = state.player.xp_next, "level up");
    }
}

/// Apply exactly one upgrade effect to the player.
pub fn apply_upgrade(player: &mut Player, choice: UpgradeChoice, tuning: &Tuning) {
    match choice {
        UpgradeChoice::Weapon => {
            if player.bullet_count < 3 {
                player.bullet_count += 1;
            } else {
                player.fire_rate_ms = player
                    .fire_rate_ms
                    .saturating_sub(tuning.fire_rate_step_ms)
                    .max(tuning.min_fire_rate_ms);
            }
        }
        UpgradeChoice::Vitality => {
            player.max_hp += tuning.vitality_bonus;
            player.hp = player.max_hp;
        }
        UpgradeChoice::Armor => {
            player.max_shield += tuning.armor_bonus;
            player.shield = player.max_shield;
        }
    }
}

/// Resolve one pending level-up with `choice`; resumes play once none
/// remain.  Ignored outside the leveling-up state.
pub fn choose_upgrade(state: &mut GameState, choice: UpgradeChoice) {
    if state.status != GameStatus::LevelingUp || state.pending_upgrades == 0 {
        return;
    }
    apply_upgrade(&mut state.player, choice, &state.tuning);
    state.pending_upgrades -= 1;
    debug!(?choice, remaining = state.pending_upgrades, "upgrade applied");

    if state.pending_upgrades == 0 {
        state.status = GameStatus::Playing;
    }
}

/// True when the player has reached the next boss milestone and no boss is
/// already alive.
pub fn boss_due(state: &GameState) -> bool {
    !state.in_boss_fight() && state.player.level >= state.next_boss_milestone
}
