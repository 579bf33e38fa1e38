//! Position updates, shield regeneration and off-screen cleanup.

use crate::config::Tuning;
use crate::entities::{Enemy, GameState, Player};

use super::TickInput;

pub fn advance(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let height = tuning.height;

    move_player(&mut state.player, input.move_x, input.move_y, tuning);
    regen_shield(&mut state.player, tuning);

    for enemy in &mut state.enemies {
        enemy.bounds.y += enemy.vy;
    }
    state.enemies.retain(|e| e.bounds.top() <= height);

    if let Some(boss) = state.boss.as_mut() {
        move_boss(boss, tuning);
    }

    for bullet in &mut state.bullets {
        bullet.bounds.y -= tuning.bullet_speed;
    }
    state.bullets.retain(|b| b.bounds.bottom() >= 0.0);

    for bullet in &mut state.enemy_bullets {
        bullet.bounds.y += tuning.enemy_bullet_speed;
    }
    state.enemy_bullets.retain(|b| b.bounds.top() <= height);

    for supply in &mut state.supplies {
        supply.bounds.y += tuning.supply_speed;
    }
    state.supplies.retain(|s| s.bounds.top() <= height);
}

/// Axis-independent movement: holding two directions is faster than one.
pub fn move_player(player: &mut Player, move_x: i8, move_y: i8, tuning: &Tuning) {
    player.bounds.x += f32::from(move_x.signum()) * player.speed;
    player.bounds.y += f32::from(move_y.signum()) * player.speed;
    player.bounds.clamp_within(tuning.width, tuning.height);
}

/// The regen timer counts every simulated tick; past the delay the shield
/// refills a little each tick up to its maximum.
pub fn regen_shield(player: &mut Player, tuning: &Tuning) {
    player.shield_regen_timer = player.shield_regen_timer.saturating_add(1);
    if player.shield_regen_timer > tuning.shield_regen_delay_ticks && player.shield < player.max_shield {
        player.shield = (player.shield + tuning.shield_regen_per_tick).min(player.max_shield);
    }
}

/// Sink until the hover band, always drift sideways, bounce off the walls.
pub fn move_boss(boss: &mut Enemy, tuning: &Tuning) {
    if boss.bounds.y < tuning.boss_band_y {
        boss.bounds.y += boss.vy;
    }
    boss.bounds.x += boss.vx;
    if boss.bounds.left() < 0.0 || boss.bounds.right() > tuning.width {
        boss.vx = -boss.vx;
    }
}
