/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable snapshot of the
/// game.  No game logic is performed; this module only translates the
/// 900×700 playfield into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use lantern_shooter::effects::EffectField;
use lantern_shooter::entities::{GameStatus, SupplyKind};
use lantern_shooter::events::EffectColor;
use lantern_shooter::snapshot::{Facing, Snapshot, SpriteKind, SpriteView};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkYellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HP: Color = Color::Green;
const C_SHIELD: Color = Color::Cyan;
const C_XP: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_BOSS: Color = Color::DarkRed;
const C_BULLET: Color = Color::Yellow;
const C_LASER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_SUPPLY_WEAPON: Color = Color::Yellow;
const C_SUPPLY_HEAL: Color = Color::Red;
const C_SUPPLY_SHIELD: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Width of the HP and shield gauges in cells.
const GAUGE_CELLS: usize = 12;
/// Boss bar scale: one full bar is 300 units, each unit 4 hp.
const BOSS_BAR_UNITS: i32 = 300;
const BOSS_BAR_CELLS: usize = 24;

// ── Glyph art ─────────────────────────────────────────────────────────────────

// Player (2 rows, 3 cols):
//   ▲       ← nose
//  /█\      ← fuselage + wings
const ART_PLAYER: &[&str] = &["▲", "/█\\"];
// Lantern:
//  (◎)
//   ╨
const ART_LANTERN: &[&str] = &["(◎)", "╨"];
const ART_BOSS_LEFT: &[&str] = &["◀╔═══════╗", " ║ ◉   ◉ ║", " ╚═══════╝"];
const ART_BOSS_RIGHT: &[&str] = &["╔═══════╗▶", "║ ◉   ◉ ║ ", "╚═══════╝ "];
const ART_BULLET: &[&str] = &["║"];
const ART_LASER: &[&str] = &["┃", "┃"];
const ART_ENEMY_BULLET: &[&str] = &["●"];
const ART_SUPPLY_WEAPON: &[&str] = &["★"];
const ART_SUPPLY_HEAL: &[&str] = &["♥"];
const ART_SUPPLY_SHIELD: &[&str] = &["◆"];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world coordinates onto the cells between the borders
/// (rows 2 ..= rows-3, columns 1 ..= cols-2).
#[derive(Clone, Copy)]
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    fn inner_w(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_h(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.world_w || y >= self.world_h {
            return None;
        }
        let col = 1 + (x / self.world_w * self.inner_w()) as u16;
        let row = 2 + (y / self.world_h * self.inner_h()) as u16;
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    effects: &EffectField,
    (cols, rows): (u16, u16),
) -> std::io::Result<()> {
    let view = Viewport {
        cols,
        rows,
        world_w: snap.width,
        world_h: snap.height,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, snap, &view)?;
    if let Some(hp) = snap.boss_hp {
        draw_boss_bar(out, hp, &view)?;
    }

    for sprite in &snap.sprites {
        draw_sprite(out, sprite, &view)?;
    }
    draw_effects(out, effects, &view)?;
    draw_xp_bar(out, snap, &view)?;

    match snap.status {
        GameStatus::LevelingUp => draw_upgrade_menu(out, snap, &view)?,
        GameStatus::GameOver => draw_game_over(out, snap, &view)?,
        GameStatus::Playing | GameStatus::Quit => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("║"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("║"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

/// `current / maximum` as a run of filled and empty cells.
fn gauge(current: f32, maximum: f32, cells: usize) -> String {
    let ratio = if maximum > 0.0 {
        (current / maximum).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * cells as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(cells - filled))
}

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let p = &snap.player;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HP))?;
    out.queue(Print(format!(
        "HP {} {:>3.0}/{:<3.0} ",
        gauge(p.hp, p.max_hp, GAUGE_CELLS),
        p.hp,
        p.max_hp
    )))?;
    out.queue(style::SetForegroundColor(C_SHIELD))?;
    out.queue(Print(format!(
        "SH {} {:>3.0}/{:<3.0}",
        gauge(p.shield, p.max_shield, GAUGE_CELLS),
        p.shield,
        p.max_shield
    )))?;

    let right = format!("LV {:>2}  Score {:>7}", p.level, snap.score);
    let rx = view
        .cols
        .saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&right))?;

    Ok(())
}

/// Boss health sits on the top border: `min(300, hp / 4)` out of 300.
fn draw_boss_bar<W: Write>(out: &mut W, hp: i32, view: &Viewport) -> std::io::Result<()> {
    let units = (hp.max(0) / 4).min(BOSS_BAR_UNITS);
    let bar = gauge(units as f32, BOSS_BAR_UNITS as f32, BOSS_BAR_CELLS);
    let text = format!(" BOSS {} {} ", bar, hp.max(0));
    let x = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(x, 1))?;
    out.queue(style::SetForegroundColor(C_BOSS))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Experience fills the last row left to right.
fn draw_xp_bar<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let label = format!(" XP {:>4}/{:<4} ", snap.player.xp, snap.player.xp_next);
    let cells = (view.cols as usize).saturating_sub(label.chars().count() + 2);
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_XP))?;
    out.queue(Print(&label))?;
    out.queue(Print(gauge(
        snap.player.xp as f32,
        snap.player.xp_next as f32,
        cells,
    )))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, sprite: &SpriteView, view: &Viewport) -> std::io::Result<()> {
    let b = &sprite.bounds;
    let Some((col, row)) = view.cell(b.center_x(), b.center_y()) else {
        return Ok(());
    };

    let (art, color) = match sprite.kind {
        SpriteKind::Player => (ART_PLAYER, C_PLAYER),
        SpriteKind::Enemy => (ART_LANTERN, C_ENEMY),
        SpriteKind::Boss => match sprite.facing {
            Facing::Left => (ART_BOSS_LEFT, C_BOSS),
            _ => (ART_BOSS_RIGHT, C_BOSS),
        },
        SpriteKind::Bullet => (ART_BULLET, C_BULLET),
        SpriteKind::Laser => (ART_LASER, C_LASER),
        SpriteKind::EnemyBullet => (ART_ENEMY_BULLET, C_BULLET_ENEMY),
        SpriteKind::Supply(SupplyKind::Weapon) => (ART_SUPPLY_WEAPON, C_SUPPLY_WEAPON),
        SpriteKind::Supply(SupplyKind::Heal) => (ART_SUPPLY_HEAL, C_SUPPLY_HEAL),
        SpriteKind::Supply(SupplyKind::Shield) => (ART_SUPPLY_SHIELD, C_SUPPLY_SHIELD),
    };

    out.queue(style::SetForegroundColor(color))?;
    let bottom = view.rows.saturating_sub(2);
    for (i, line) in art.iter().enumerate() {
        let y = row + i as u16;
        if y >= bottom {
            break;
        }
        let half = line.chars().count() as u16 / 2;
        let x = col.saturating_sub(half).max(1);
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

fn effect_color(color: EffectColor) -> Color {
    match color {
        EffectColor::Gold => Color::Yellow,
        EffectColor::Red => Color::Red,
        EffectColor::Cyan => Color::Cyan,
        EffectColor::White => Color::White,
    }
}

fn draw_effects<W: Write>(out: &mut W, effects: &EffectField, view: &Viewport) -> std::io::Result<()> {
    for p in &effects.particles {
        if let Some((col, row)) = view.cell(p.x, p.y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(effect_color(p.color)))?;
            out.queue(Print(if p.alpha() > 0.5 { "*" } else { "·" }))?;
        }
    }
    for fw in &effects.fireworks {
        out.queue(style::SetForegroundColor(effect_color(fw.color)))?;
        for (x, y, size) in fw.sparks() {
            if let Some((col, row)) = view.cell(x, y) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(if size > 2 { "✦" } else { "+" }))?;
            }
        }
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered_lines<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
    view: &Viewport,
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_upgrade_menu<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let title = format!("║   LEVEL UP  (LV {:>2})           ║", snap.player.level);
    let mut lines: Vec<(String, Color)> = vec![
        ("╔══════════════════════════════╗".to_string(), Color::Yellow),
        (title, Color::Yellow),
        ("╚══════════════════════════════╝".to_string(), Color::Yellow),
        ("1. Weapon    more barrels / faster fire".to_string(), Color::White),
        ("2. Vitality  +20 max HP, full heal     ".to_string(), Color::Green),
        ("3. Armor     +20 max shield, recharge  ".to_string(), Color::Cyan),
    ];
    if snap.pending_upgrades > 1 {
        lines.push((
            format!("{} more upgrades waiting", snap.pending_upgrades - 1),
            C_HINT,
        ));
    }
    lines.push(("Press 1-3 to choose".to_string(), C_HINT));
    draw_centered_lines(out, &lines, view)
}

fn draw_game_over<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>6}", snap.score), Color::Yellow),
        (format!("Final Level: {:>6}", snap.player.level), Color::White),
    ];
    draw_centered_lines(out, &lines, view)
}
