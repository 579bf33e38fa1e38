/// Gameplay tuning: every constant the simulation reads.
///
/// `Tuning::default()` is the stock game.  A TOML file may override any
/// subset of the fields; missing keys keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Horizontal margin used when placing a freshly spawned normal enemy.
pub const SPAWN_MARGIN: f32 = 50.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // ── Playfield & clock ────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,
    pub tick_rate_hz: u64,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub player_max_hp: f32,
    pub player_max_shield: f32,
    pub player_fire_rate_ms: u64,
    pub min_fire_rate_ms: u64,
    pub fire_rate_step_ms: u64,
    pub shield_regen_delay_ticks: u32,
    pub shield_regen_per_tick: f32,

    // ── Projectiles & pickups ────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub laser_damage: i32,
    pub enemy_bullet_speed: f32,
    pub supply_speed: f32,
    pub heal_amount: f32,
    pub shield_pickup_bonus: f32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_spawn_chance: f64,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_fire_interval_ms: u64,
    pub hit_damage: f32,

    // ── Boss ─────────────────────────────────────────────────────────────────
    pub boss_base_hp: i32,
    pub boss_hp_per_level: i32,
    pub boss_speed: f32,
    pub boss_descent_speed: f32,
    pub boss_band_y: f32,
    pub boss_fire_interval_ms: u64,
    pub first_boss_milestone: u32,
    pub boss_milestone_step: u32,

    // ── Rewards & upgrades ───────────────────────────────────────────────────
    pub kill_score: u32,
    pub kill_xp: u32,
    pub boss_score: u32,
    pub vitality_bonus: f32,
    pub armor_bonus: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 700.0,
            tick_rate_hz: 60,

            player_speed: 7.0,
            player_max_hp: 100.0,
            player_max_shield: 50.0,
            player_fire_rate_ms: 450,
            min_fire_rate_ms: 120,
            fire_rate_step_ms: 60,
            shield_regen_delay_ticks: 180,
            shield_regen_per_tick: 0.3,

            bullet_speed: 18.0,
            bullet_damage: 30,
            laser_damage: 60,
            enemy_bullet_speed: 6.0,
            supply_speed: 2.0,
            heal_amount: 50.0,
            shield_pickup_bonus: 10.0,

            enemy_spawn_chance: 0.04,
            enemy_speed_min: 2.0,
            enemy_speed_max: 4.0,
            enemy_fire_interval_ms: 2000,
            hit_damage: 20.0,

            boss_base_hp: 1000,
            boss_hp_per_level: 60,
            boss_speed: 2.0,
            boss_descent_speed: 2.0,
            boss_band_y: 120.0,
            boss_fire_interval_ms: 700,
            first_boss_milestone: 10,
            boss_milestone_step: 5,

            kill_score: 10,
            kill_xp: 35,
            boss_score: 2000,
            vitality_bonus: 20.0,
            armor_bonus: 20.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = toml::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values the simulation treats as invariant violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let floats = [
            ("width", self.width),
            ("height", self.height),
            ("player_speed", self.player_speed),
            ("player_max_hp", self.player_max_hp),
            ("player_max_shield", self.player_max_shield),
            ("shield_regen_per_tick", self.shield_regen_per_tick),
            ("bullet_speed", self.bullet_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("supply_speed", self.supply_speed),
            ("heal_amount", self.heal_amount),
            ("shield_pickup_bonus", self.shield_pickup_bonus),
            ("enemy_speed_min", self.enemy_speed_min),
            ("enemy_speed_max", self.enemy_speed_max),
            ("hit_damage", self.hit_damage),
            ("boss_speed", self.boss_speed),
            ("boss_descent_speed", self.boss_descent_speed),
            ("boss_band_y", self.boss_band_y),
            ("vitality_bonus", self.vitality_bonus),
            ("armor_bonus", self.armor_bonus),
        ];
        if let Some((field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(*field, "must be a finite number"));
        }

        // Speeds and damages move or hurt something every tick.
        let positive = [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("supply_speed", self.supply_speed),
            ("enemy_speed_min", self.enemy_speed_min),
            ("boss_speed", self.boss_speed),
            ("boss_descent_speed", self.boss_descent_speed),
            ("hit_damage", self.hit_damage),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(invalid(*field, "must be positive"));
        }
        if self.bullet_damage <= 0 {
            return Err(invalid("bullet_damage", "must be positive"));
        }
        if self.laser_damage <= 0 {
            return Err(invalid("laser_damage", "must be positive"));
        }
        if self.boss_base_hp <= 0 {
            return Err(invalid("boss_base_hp", "must be positive"));
        }

        if self.width <= SPAWN_MARGIN * 2.0 {
            return Err(invalid("width", format!("must exceed {}", SPAWN_MARGIN * 2.0)));
        }
        if self.height <= 0.0 {
            return Err(invalid("height", "must be positive"));
        }
        if self.tick_rate_hz == 0 {
            return Err(invalid("tick_rate_hz", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.enemy_spawn_chance) {
            return Err(invalid("enemy_spawn_chance", "must lie in [0, 1]"));
        }
        if self.enemy_speed_min > self.enemy_speed_max {
            return Err(invalid("enemy_speed_min", "must not exceed enemy_speed_max"));
        }
        if self.player_max_hp <= 0.0 {
            return Err(invalid("player_max_hp", "must be positive"));
        }
        if self.player_max_shield < 0.0 {
            return Err(invalid("player_max_shield", "must not be negative"));
        }
        if self.min_fire_rate_ms > self.player_fire_rate_ms {
            return Err(invalid(
                "min_fire_rate_ms",
                "must not exceed player_fire_rate_ms",
            ));
        }
        Ok(())
    }

    /// Length of one simulated tick in milliseconds (truncated).
    pub fn tick_ms(&self) -> u64 {
        1000 / self.tick_rate_hz
    }
}
