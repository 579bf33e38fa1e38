//! Enemy spawning and the boss-fight transition.

use rand::Rng;
use tracing::{debug, info};

use crate::config::SPAWN_MARGIN;
use crate::entities::{Enemy, GameState};
use crate::events::{EffectColor, FrameEvent};

use super::progression;

/// Roll for a normal enemy, then start a boss fight if the milestone is
/// reached.  Nothing spawns while a boss is alive.
pub fn spawn_step(state: &mut GameState, rng: &mut impl Rng) {
    if state.in_boss_fight() {
        return;
    }

    if rng.gen_bool(state.tuning.enemy_spawn_chance) {
        let x = rng.gen_range(SPAWN_MARGIN..=state.tuning.width - SPAWN_MARGIN);
        let speed = rng.gen_range(state.tuning.enemy_speed_min..=state.tuning.enemy_speed_max);
        let now = state.now_ms();
        state.enemies.push(Enemy::normal(x, speed, now));
        debug!(x, speed, frame = state.frame, "enemy spawned");
    }

    if progression::boss_due(state) {
        begin_boss_fight(state);
    }
}

/// Clear the field of normal enemies and bring in a boss sized for the
/// player's current level.
pub fn begin_boss_fight(state: &mut GameState) {
    for enemy in state.enemies.drain(..) {
        state.events.push(FrameEvent::Explosion {
            x: enemy.bounds.center_x(),
            y: enemy.bounds.center_y(),
            color: EffectColor::Gold,
            count: 20,
            size: 6,
        });
    }

    let boss = Enemy::boss(state.player.level, &state.tuning, state.now_ms());
    info!(
        hp = boss.hp,
        level = state.player.level,
        milestone = state.next_boss_milestone,
        "boss fight started"
    );
    state.events.push(FrameEvent::BossSpawned { hp: boss.hp });
    state.boss = Some(boss);
}
