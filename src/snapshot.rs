/// Read-only view of a `GameState` for the presentation layer.

use crate::entities::{Bounds, EnemyKind, GameState, GameStatus, SupplyKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    Boss,
    Bullet,
    Laser,
    EnemyBullet,
    Supply(SupplyKind),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteView {
    pub kind: SpriteKind,
    pub bounds: Bounds,
    pub facing: Facing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerHud {
    pub hp: f32,
    pub max_hp: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_next: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub player: PlayerHud,
    pub score: u32,
    pub in_boss_fight: bool,
    pub boss_hp: Option<i32>,
    pub status: GameStatus,
    pub pending_upgrades: u32,
    pub width: f32,
    pub height: f32,
    /// Back to front: pickups, enemies, boss, projectiles, then the player.
    pub sprites: Vec<SpriteView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Snapshot {
        let p = &state.player;
        let mut sprites = Vec::with_capacity(
            1 + state.enemies.len()
                + state.bullets.len()
                + state.enemy_bullets.len()
                + state.supplies.len()
                + usize::from(state.boss.is_some()),
        );

        sprites.extend(state.supplies.iter().map(|s| SpriteView {
            kind: SpriteKind::Supply(s.kind),
            bounds: s.bounds,
            facing: Facing::Down,
        }));
        sprites.extend(state.enemies.iter().map(|e| SpriteView {
            kind: SpriteKind::Enemy,
            bounds: e.bounds,
            facing: Facing::Down,
        }));
        if let Some(boss) = &state.boss {
            debug_assert_eq!(boss.kind, EnemyKind::Boss);
            sprites.push(SpriteView {
                kind: SpriteKind::Boss,
                bounds: boss.bounds,
                facing: if boss.vx < 0.0 { Facing::Left } else { Facing::Right },
            });
        }
        sprites.extend(state.bullets.iter().map(|b| SpriteView {
            kind: if b.is_laser { SpriteKind::Laser } else { SpriteKind::Bullet },
            bounds: b.bounds,
            facing: Facing::Up,
        }));
        sprites.extend(state.enemy_bullets.iter().map(|b| SpriteView {
            kind: SpriteKind::EnemyBullet,
            bounds: b.bounds,
            facing: Facing::Down,
        }));
        sprites.push(SpriteView {
            kind: SpriteKind::Player,
            bounds: p.bounds,
            facing: Facing::Up,
        });

        Snapshot {
            player: PlayerHud {
                hp: p.hp,
                max_hp: p.max_hp,
                shield: p.shield,
                max_shield: p.max_shield,
                level: p.level,
                xp: p.xp,
                xp_next: p.xp_next,
            },
            score: state.score,
            in_boss_fight: state.in_boss_fight(),
            boss_hp: state.boss.as_ref().map(|b| b.hp),
            status: state.status,
            pending_upgrades: state.pending_upgrades,
            width: state.tuning.width,
            height: state.tuning.height,
            sprites,
        }
    }
}
