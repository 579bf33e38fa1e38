/// Transient notifications emitted by one tick.
///
/// None of these feed back into the simulation; the presentation layer may
/// drop or replay them freely.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectColor {
    Gold,
    Red,
    Cyan,
    White,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    /// Burst of `count` particles no larger than `size` centred on (x, y).
    Explosion {
        x: f32,
        y: f32,
        color: EffectColor,
        count: u32,
        size: u32,
    },
    Firework {
        x: f32,
        y: f32,
        color: EffectColor,
    },
    LevelUp { level: u32 },
    BossSpawned { hp: i32 },
    BossDefeated { x: f32, y: f32 },
    GameOver { score: u32, level: u32 },
}
