/// All game entity types: pure data, no game rules.
///
/// Every entity is a value record living in exactly one collection of
/// `GameState`.  Entities never point at each other; collisions are
/// geometric queries over the collections.

use crate::compute::TickInput;
use crate::config::Tuning;
use crate::events::FrameEvent;

// ── Extents ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: (f32, f32) = (70.0, 70.0);
pub const ENEMY_SIZE: (f32, f32) = (45.0, 55.0);
pub const BOSS_SIZE: (f32, f32) = (180.0, 140.0);
pub const BULLET_SIZE: (f32, f32) = (10.0, 25.0);
pub const LASER_SIZE: (f32, f32) = (20.0, 100.0);
pub const ENEMY_BULLET_SIZE: (f32, f32) = (16.0, 16.0);
pub const SUPPLY_SIZE: (f32, f32) = (40.0, 40.0);

/// Player spawn point, measured up from the bottom edge.
pub const PLAYER_SPAWN_LIFT: f32 = 100.0;
/// Top edge of a freshly spawned normal enemy.
pub const ENEMY_SPAWN_Y: f32 = -60.0;
/// Centre line of a freshly spawned boss.
pub const BOSS_SPAWN_CENTER_Y: f32 = -100.0;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, (w, h): (f32, f32)) -> Self {
        Bounds { x, y, w, h }
    }

    pub fn from_center(cx: f32, cy: f32, (w, h): (f32, f32)) -> Self {
        Bounds {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Move the rectangle fully inside `[0, width] × [0, height]`.
    /// A rectangle larger than the area on some axis is centred on that axis.
    pub fn clamp_within(&mut self, width: f32, height: f32) {
        self.x = clamp_axis(self.x, self.w, width);
        self.y = clamp_axis(self.y, self.h, height);
    }
}

fn clamp_axis(pos: f32, extent: f32, limit: f32) -> f32 {
    if extent >= limit {
        (limit - extent) / 2.0
    } else {
        pos.clamp(0.0, limit - extent)
    }
}

// ── Status & choices ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Waiting for an upgrade choice; the simulation clock is frozen.
    LevelingUp,
    GameOver,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeChoice {
    /// Extra barrel, or faster fire once all three barrels are unlocked.
    Weapon,
    /// +max HP and a full heal.
    Vitality,
    /// +max shield and a full recharge.
    Armor,
}

impl UpgradeChoice {
    pub const ALL: [UpgradeChoice; 3] = [
        UpgradeChoice::Weapon,
        UpgradeChoice::Vitality,
        UpgradeChoice::Armor,
    ];

    /// Map the 1-based menu index to a choice.
    pub fn from_index(index: u8) -> Option<UpgradeChoice> {
        match index {
            1 => Some(UpgradeChoice::Weapon),
            2 => Some(UpgradeChoice::Vitality),
            3 => Some(UpgradeChoice::Armor),
            _ => None,
        }
    }
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupplyKind {
    Weapon,
    Heal,
    Shield,
}

#[derive(Clone, Debug)]
pub struct Supply {
    pub kind: SupplyKind,
    pub bounds: Bounds,
}

impl Supply {
    pub fn centered(kind: SupplyKind, cx: f32, cy: f32) -> Supply {
        Supply {
            kind,
            bounds: Bounds::from_center(cx, cy, SUPPLY_SIZE),
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub bounds: Bounds,
    pub damage: i32,
    /// Lasers pierce: they survive hits and keep travelling until off-screen.
    pub is_laser: bool,
}

impl Bullet {
    pub fn standard(cx: f32, cy: f32, damage: i32) -> Bullet {
        Bullet {
            bounds: Bounds::from_center(cx, cy, BULLET_SIZE),
            damage,
            is_laser: false,
        }
    }

    pub fn laser(cx: f32, cy: f32, damage: i32) -> Bullet {
        Bullet {
            bounds: Bounds::from_center(cx, cy, LASER_SIZE),
            damage,
            is_laser: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EnemyBullet {
    pub bounds: Bounds,
}

impl EnemyBullet {
    pub fn centered(cx: f32, cy: f32) -> EnemyBullet {
        EnemyBullet {
            bounds: Bounds::from_center(cx, cy, ENEMY_BULLET_SIZE),
        }
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub bounds: Bounds,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub shield: f32,
    pub max_shield: f32,
    /// Ticks since the last damage; regeneration starts past the delay.
    pub shield_regen_timer: u32,
    pub level: u32,
    pub xp: u32,
    pub xp_next: u32,
    /// Barrels fired per shot, 1..=3.
    pub bullet_count: u8,
    pub fire_rate_ms: u64,
    pub is_laser: bool,
    pub last_shot_ms: u64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Player {
        Player {
            bounds: Bounds::from_center(
                tuning.width / 2.0,
                tuning.height - PLAYER_SPAWN_LIFT,
                PLAYER_SIZE,
            ),
            speed: tuning.player_speed,
            hp: tuning.player_max_hp,
            max_hp: tuning.player_max_hp,
            shield: tuning.player_max_shield,
            max_shield: tuning.player_max_shield,
            shield_regen_timer: 0,
            level: 1,
            xp: 0,
            xp_next: 50,
            bullet_count: 1,
            fire_rate_ms: tuning.player_fire_rate_ms,
            is_laser: false,
            last_shot_ms: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    Boss,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub bounds: Bounds,
    pub hp: i32,
    /// Horizontal velocity; only the boss moves sideways.
    pub vx: f32,
    /// Vertical velocity.  For the boss this is the descent rate, applied
    /// only above the hover band.
    pub vy: f32,
    pub last_shot_ms: u64,
}

impl Enemy {
    /// A one-hit lantern whose top-left corner starts at `(x, ENEMY_SPAWN_Y)`.
    pub fn normal(x: f32, speed: f32, now_ms: u64) -> Enemy {
        Enemy {
            kind: EnemyKind::Normal,
            bounds: Bounds::new(x, ENEMY_SPAWN_Y, ENEMY_SIZE),
            hp: 1,
            vx: 0.0,
            vy: speed,
            last_shot_ms: now_ms,
        }
    }

    /// Boss sized for a player of `player_level`, centred above the screen.
    pub fn boss(player_level: u32, tuning: &Tuning, now_ms: u64) -> Enemy {
        Enemy {
            kind: EnemyKind::Boss,
            bounds: Bounds::from_center(tuning.width / 2.0, BOSS_SPAWN_CENTER_Y, BOSS_SIZE),
            hp: boss_hp(player_level, tuning),
            vx: tuning.boss_speed,
            vy: tuning.boss_descent_speed,
            last_shot_ms: now_ms,
        }
    }
}

pub fn boss_hp(player_level: u32, tuning: &Tuning) -> i32 {
    tuning.boss_base_hp + tuning.boss_hp_per_level * player_level as i32
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so `tick` can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// At most one boss is ever alive; `Some` means a boss fight is on.
    pub boss: Option<Enemy>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub supplies: Vec<Supply>,
    pub score: u32,
    pub next_boss_milestone: u32,
    /// Level-ups still waiting for an upgrade choice.
    pub pending_upgrades: u32,
    /// Input of a tick cut short by a level-up.  Its damage, termination and
    /// movement steps run once the last upgrade is chosen.
    pub interrupted: Option<TickInput>,
    pub status: GameStatus,
    /// Simulated ticks so far; frozen while leveling up.
    pub frame: u64,
    /// Events produced by the most recent tick.
    pub events: Vec<FrameEvent>,
    pub tuning: Tuning,
}

impl GameState {
    pub fn in_boss_fight(&self) -> bool {
        self.boss.is_some()
    }

    /// Simulation time in milliseconds, derived from the tick counter.
    pub fn now_ms(&self) -> u64 {
        self.frame * 1000 / self.tuning.tick_rate_hz
    }
}
