//! Player and enemy weapon timers.

use crate::entities::{Bullet, Enemy, EnemyBullet, EnemyKind, GameState};

/// Horizontal offsets of the spread pattern for a given barrel count.
pub fn bullet_offsets(bullet_count: u8) -> &'static [f32] {
    match bullet_count {
        0 | 1 => &[0.0],
        2 => &[-15.0, 15.0],
        _ => &[-25.0, 0.0, 25.0],
    }
}

/// Fire from the player's nose if the trigger is held and the fire-rate
/// window has elapsed.
pub fn player_fire(state: &mut GameState, fire_held: bool) {
    let now = state.now_ms();
    let player = &mut state.player;
    if !fire_held || now.saturating_sub(player.last_shot_ms) <= player.fire_rate_ms {
        return;
    }

    let cx = player.bounds.center_x();
    let top = player.bounds.top();
    if player.is_laser {
        state
            .bullets
            .push(Bullet::laser(cx, top, state.tuning.laser_damage));
    } else {
        for offset in bullet_offsets(player.bullet_count) {
            state
                .bullets
                .push(Bullet::standard(cx + offset, top, state.tuning.bullet_damage));
        }
    }
    player.last_shot_ms = now;
}

/// Every enemy, boss included, fires straight down on its own timer.
pub fn enemy_fire(state: &mut GameState) {
    let now = state.now_ms();
    let normal_ms = state.tuning.enemy_fire_interval_ms;
    let boss_ms = state.tuning.boss_fire_interval_ms;

    for enemy in state.enemies.iter_mut().chain(state.boss.iter_mut()) {
        let interval = match enemy.kind {
            EnemyKind::Normal => normal_ms,
            EnemyKind::Boss => boss_ms,
        };
        if let Some(bullet) = try_fire(enemy, now, interval) {
            state.enemy_bullets.push(bullet);
        }
    }
}

fn try_fire(enemy: &mut Enemy, now: u64, interval_ms: u64) -> Option<EnemyBullet> {
    if now.saturating_sub(enemy.last_shot_ms) <= interval_ms {
        return None;
    }
    enemy.last_shot_ms = now;
    Some(EnemyBullet::centered(
        enemy.bounds.center_x(),
        enemy.bounds.bottom(),
    ))
}
