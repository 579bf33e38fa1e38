//! Collision & damage resolution, in a fixed order:
//! pickups, bullets vs lanterns, bullets vs boss, then hits on the player.
//!
//! The first three make up the player's attack pass.  Hits on the player
//! are a separate pass so a level-up earned in between can be chosen first.

use rand::Rng;
use tracing::{debug, info};

use crate::config::Tuning;
use crate::entities::{GameState, Player, Supply, SupplyKind};
use crate::events::{EffectColor, FrameEvent};

use super::progression;

/// Pickups, then player bullets against lanterns and the boss.
pub fn player_attacks(state: &mut GameState, rng: &mut impl Rng) {
    collect_supplies(state);
    bullets_vs_enemies(state);
    bullets_vs_boss(state, rng);
}

// ── Pickups ──────────────────────────────────────────────────────────────────

pub fn apply_supply(player: &mut Player, kind: SupplyKind, tuning: &Tuning) {
    match kind {
        SupplyKind::Weapon => {
            if player.bullet_count >= 3 {
                player.is_laser = true;
            } else {
                player.bullet_count += 1;
            }
        }
        SupplyKind::Heal => {
            player.hp = (player.hp + tuning.heal_amount).min(player.max_hp);
        }
        SupplyKind::Shield => {
            player.max_shield += tuning.shield_pickup_bonus;
            player.shield = player.max_shield;
        }
    }
}

fn collect_supplies(state: &mut GameState) {
    let player_box = state.player.bounds;
    let (picked, left): (Vec<Supply>, Vec<Supply>) = state
        .supplies
        .drain(..)
        .partition(|s| s.bounds.overlaps(&player_box));
    state.supplies = left;

    for supply in picked {
        apply_supply(&mut state.player, supply.kind, &state.tuning);
        state.events.push(FrameEvent::Explosion {
            x: player_box.center_x(),
            y: player_box.center_y(),
            color: EffectColor::Gold,
            count: 20,
            size: 5,
        });
        debug!(kind = ?supply.kind, "supply collected");
    }
}

// ── Player bullets ───────────────────────────────────────────────────────────

/// Every lantern touching a bullet dies.  A standard bullet is spent once it
/// has hit something; a laser keeps going.
fn bullets_vs_enemies(state: &mut GameState) {
    if state.enemies.is_empty() {
        return;
    }

    let mut kills = 0u32;
    let mut spent: Vec<usize> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let before = state.enemies.len();
        let events = &mut state.events;
        state.enemies.retain(|enemy| {
            if !enemy.bounds.overlaps(&bullet.bounds) {
                return true;
            }
            events.push(FrameEvent::Explosion {
                x: enemy.bounds.center_x(),
                y: enemy.bounds.center_y(),
                color: EffectColor::Red,
                count: 18,
                size: 5,
            });
            false
        });

        let hits = (before - state.enemies.len()) as u32;
        if hits > 0 && !bullet.is_laser {
            spent.push(bi);
        }
        kills += hits;
    }

    remove_indices(&mut state.bullets, &spent);

    // XP is granted one kill at a time so each kill may signal its own level.
    let (kill_score, kill_xp) = (state.tuning.kill_score, state.tuning.kill_xp);
    for _ in 0..kills {
        state.score += kill_score;
        progression::award_xp(state, kill_xp);
    }
}

/// Damage the boss with every overlapping bullet.  On death the fight ends,
/// the milestone advances and a weapon supply drops where the boss was.
fn bullets_vs_boss(state: &mut GameState, rng: &mut impl Rng) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    let events = &mut state.events;
    let mut defeated = false;
    state.bullets.retain(|bullet| {
        if defeated || !bullet.bounds.overlaps(&boss.bounds) {
            return true;
        }
        boss.hp -= bullet.damage;
        events.push(FrameEvent::Explosion {
            x: bullet.bounds.center_x(),
            y: bullet.bounds.top(),
            color: EffectColor::Gold,
            count: 10,
            size: 4,
        });
        if boss.hp <= 0 {
            defeated = true;
        }
        bullet.is_laser
    });

    if !defeated {
        return;
    }
    let Some(boss) = state.boss.take() else {
        return;
    };

    let (cx, cy) = (boss.bounds.center_x(), boss.bounds.center_y());
    for _ in 0..3 {
        state.events.push(FrameEvent::Explosion {
            x: cx + rng.gen_range(-50.0f32..=50.0),
            y: cy + rng.gen_range(-30.0f32..=30.0),
            color: EffectColor::Gold,
            count: 25,
            size: 7,
        });
    }
    state.events.push(FrameEvent::Firework {
        x: cx,
        y: cy,
        color: EffectColor::Gold,
    });
    state.events.push(FrameEvent::BossDefeated { x: cx, y: cy });

    state.score += state.tuning.boss_score;
    state.next_boss_milestone += state.tuning.boss_milestone_step;
    state.supplies.push(Supply::centered(SupplyKind::Weapon, cx, cy));
    info!(
        score = state.score,
        next_milestone = state.next_boss_milestone,
        "boss defeated"
    );
}

// ── Hits on the player ───────────────────────────────────────────────────────

/// One hit: the shield soaks first and any deficit spills onto HP.
pub fn take_hit(player: &mut Player, damage: f32) {
    player.shield_regen_timer = 0;
    if player.shield > 0.0 {
        player.shield -= damage;
        if player.shield < 0.0 {
            player.hp += player.shield;
            player.shield = 0.0;
        }
    } else {
        player.hp -= damage;
    }
    player.hp = player.hp.max(0.0);
}

/// Two independent checks: enemy bullets, then lantern bodies.  Each
/// consumes everything it touched and, if anything did, lands one hit, so a
/// single tick can hurt the player twice.  The boss body is harmless.
pub fn hits_on_player(state: &mut GameState) {
    let player_box = state.player.bounds;
    let damage = state.tuning.hit_damage;

    let bullets_before = state.enemy_bullets.len();
    state
        .enemy_bullets
        .retain(|b| !b.bounds.overlaps(&player_box));
    if state.enemy_bullets.len() < bullets_before {
        take_hit(&mut state.player, damage);
        debug!(hp = state.player.hp, shield = state.player.shield, "hit by bullet");
    }

    let enemies_before = state.enemies.len();
    state.enemies.retain(|e| !e.bounds.overlaps(&player_box));
    if state.enemies.len() < enemies_before {
        take_hit(&mut state.player, damage);
        debug!(hp = state.player.hp, shield = state.player.shield, "rammed");
    }
}

fn remove_indices<T>(items: &mut Vec<T>, sorted: &[usize]) {
    let mut idx = 0;
    let mut cursor = sorted.iter().peekable();
    items.retain(|_| {
        let drop = cursor.peek() == Some(&&idx);
        if drop {
            cursor.next();
        }
        idx += 1;
        !drop
    });
}
