/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// world coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use one_hit_man::entities::{
    BeamHazard, BeamOrientation, BeamPhase, GameState, GameStatus, Projectile, ProjectileKind,
    VehicleClass,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LEVEL: Color = Color::Yellow;
const C_HUD_HEAVY: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_BOSS: Color = Color::DarkRed;
const C_WARNING: Color = Color::DarkGrey;
const C_BEAM_WARNING: Color = Color::DarkYellow;
const C_BEAM_ARMING: Color = Color::Yellow;
const C_BEAM_DAMAGE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Terminal size the frame is drawn into.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Play area spans rows 2..rows-2 and columns 1..cols-1.
    fn play_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn play_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// World position → terminal cell, `None` when outside the play area.
    fn cell(&self, state: &GameState, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= state.arena.width || y >= state.arena.height {
            return None;
        }
        let col = 1 + (x / state.arena.width * self.play_cols()) as u16;
        let row = 2 + (y / state.arena.height * self.play_rows()) as u16;
        Some((col, row))
    }

    /// World length along x → whole columns, at least one.
    fn cols_for(&self, state: &GameState, length: f32) -> u16 {
        ((length / state.arena.width * self.play_cols()).round() as u16).max(1)
    }

    fn rows_for(&self, state: &GameState, length: f32) -> u16 {
        ((length / state.arena.height * self.play_rows()).round() as u16).max(1)
    }
}

/// Green → yellow → red as the vulnerability window runs out.
pub fn window_color(ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    if ratio > 0.5 {
        let red = (255.0 * (1.0 - (ratio - 0.5) * 2.0)) as u8;
        Color::Rgb { r: red, g: 255, b: 0 }
    } else {
        let green = (255.0 * ratio * 2.0) as u8;
        Color::Rgb { r: 255, g: green, b: 0 }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for beam in &state.beams {
        draw_beam(out, state, view, beam)?;
    }
    draw_boss(out, state, view)?;
    for projectile in &state.projectiles {
        draw_projectile(out, state, view, projectile)?;
    }
    draw_player(out, state, view)?;
    draw_controls_hint(out, view)?;

    match state.status {
        GameStatus::Playing => {}
        GameStatus::Victory | GameStatus::Defeat => draw_result(out, state, view)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let boss = &state.boss;

    // Level and vehicle, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("LV {}  {}", boss.level, boss.vehicle_name())))?;
    if boss.heavy {
        out.queue(style::SetForegroundColor(C_HUD_HEAVY))?;
        out.queue(Print("  !! MEGA BOSS !!"))?;
    }

    // Attack window, right
    let (label, color) = if state.vulnerability.open {
        (
            format!("ATTACK NOW {:>4.1}s", state.vulnerability.timer / 60.0),
            window_color(state.vulnerability.time_ratio()),
        )
    } else {
        (format!("Survived {:>5.1}s", state.survival_ticks / 60.0), Color::White)
    };
    let rx = view.cols.saturating_sub(label.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&label))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_beam<W: Write>(
    out: &mut W,
    state: &GameState,
    view: Viewport,
    beam: &BeamHazard,
) -> std::io::Result<()> {
    // Telegraph brightens over its last third.
    let warning_color = if beam.warning_progress() > 0.66 {
        C_BEAM_ARMING
    } else {
        C_BEAM_WARNING
    };
    let (glyph, color) = match (beam.phase(), beam.orientation) {
        (BeamPhase::Warning, BeamOrientation::Vertical) => ("┆", warning_color),
        (BeamPhase::Warning, BeamOrientation::Horizontal) => ("┄", warning_color),
        (BeamPhase::Damaging, _) => ("█", C_BEAM_DAMAGE),
        (BeamPhase::Done, _) => return Ok(()),
    };
    out.queue(style::SetForegroundColor(color))?;

    let half = beam.width / 2.0;
    match beam.orientation {
        BeamOrientation::Vertical => {
            let Some((first, _)) = view.cell(state, (beam.position - half).max(0.0), 0.0) else {
                return Ok(());
            };
            let span = view.cols_for(state, beam.width);
            for col in first..(first + span).min(view.cols.saturating_sub(1)) {
                for row in 2..view.rows.saturating_sub(2) {
                    out.queue(cursor::MoveTo(col, row))?;
                    out.queue(Print(glyph))?;
                }
            }
        }
        BeamOrientation::Horizontal => {
            let Some((_, first)) = view.cell(state, 0.0, (beam.position - half).max(0.0)) else {
                return Ok(());
            };
            let span = view.rows_for(state, beam.width);
            let line = glyph.repeat(view.cols.saturating_sub(2) as usize);
            for row in first..(first + span).min(view.rows.saturating_sub(2)) {
                out.queue(cursor::MoveTo(1, row))?;
                out.queue(Print(&line))?;
            }
        }
    }
    Ok(())
}

fn draw_boss<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let boss = &state.boss;
    let Some((cx, cy)) = view.cell(state, boss.x, boss.y) else {
        return Ok(());
    };
    let half_w = view.cols_for(state, boss.size / 2.0);
    let half_h = view.rows_for(state, boss.size / 2.0);

    let color = if state.vulnerability.open {
        window_color(state.vulnerability.time_ratio())
    } else {
        C_BOSS
    };
    let fill = match boss.vehicle_class() {
        VehicleClass::Plane => "▓",
        VehicleClass::Helicopter => "▒",
    };
    out.queue(style::SetForegroundColor(color))?;

    // Ellipse of cells around the centre.
    for dy in -(half_h as i32)..=half_h as i32 {
        for dx in -(half_w as i32)..=half_w as i32 {
            let nx = dx as f32 / half_w as f32;
            let ny = dy as f32 / half_h as f32;
            if nx * nx + ny * ny > 1.0 {
                continue;
            }
            let col = cx as i32 + dx;
            let row = cy as i32 + dy;
            if col < 1 || row < 2 || col >= view.cols as i32 - 1 || row >= view.rows as i32 - 2 {
                continue;
            }
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(fill))?;
        }
    }

    // Nose shows the heading.
    let nose_x = boss.x + boss.rotation.cos() * boss.size / 2.0;
    let nose_y = boss.y + boss.rotation.sin() * boss.size / 2.0;
    if let Some((col, row)) = view.cell(state, nose_x, nose_y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("◆"))?;
    }
    Ok(())
}

fn projectile_glyph(kind: &ProjectileKind) -> (&'static str, Color) {
    match kind {
        ProjectileKind::Normal => ("•", Color::Red),
        ProjectileKind::Fast => ("·", Color::DarkYellow),
        ProjectileKind::Large => ("●", Color::Blue),
        ProjectileKind::Homing => ("◉", Color::Magenta),
        ProjectileKind::Bouncing => ("o", Color::Green),
        ProjectileKind::Spiral { .. } => ("*", Color::Rgb { r: 255, g: 140, b: 200 }),
        ProjectileKind::Splitting { .. } => ("◎", Color::Yellow),
        ProjectileKind::Accelerating => ("»", Color::Cyan),
        ProjectileKind::Wave => ("~", Color::DarkMagenta),
    }
}

fn draw_projectile<W: Write>(
    out: &mut W,
    state: &GameState,
    view: Viewport,
    projectile: &Projectile,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(state, projectile.x, projectile.y) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    if projectile.is_active() {
        let (glyph, color) = projectile_glyph(&projectile.kind);
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    } else {
        out.queue(style::SetForegroundColor(C_WARNING))?;
        out.queue(Print("+"))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    // Blink every other frame while flickering.
    if state.player.is_flickering() && state.frame % 2 == 0 {
        return Ok(());
    }
    let Some((col, row)) = view.cell(state, state.player.x, state.player.y) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("▲"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD / ↑↓←→ : Move   Ram the boss while it glows   ESC : Menu   Q : Quit"))?;
    Ok(())
}

// ── Result overlay ────────────────────────────────────────────────────────────

const VICTORY_BOX: [&str; 3] = [
    "╔════════════════════╗",
    "║      VICTORY!      ║",
    "╚════════════════════╝",
];
const GAME_OVER_BOX: [&str; 3] = [
    "╔════════════════════╗",
    "║     GAME  OVER     ║",
    "╚════════════════════╝",
];

fn draw_result<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let (lines, color) = match state.status {
        GameStatus::Victory => (&VICTORY_BOX, Color::Green),
        _ => (&GAME_OVER_BOX, Color::Red),
    };
    let detail = match state.status {
        GameStatus::Victory => format!("Reward: ${}", state.reward),
        _ => format!("Survived {:.1}s", state.survival_ticks / 60.0),
    };

    let cx = view.cols / 2;
    let total_rows = lines.len() + 2;
    let start_row = (view.rows / 2).saturating_sub(total_rows as u16 / 2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let detail_row = start_row + lines.len() as u16;
    out.queue(cursor::MoveTo(cx.saturating_sub(detail.chars().count() as u16 / 2), detail_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&detail))?;

    let hint = "R - Play Again  ESC - Menu  Q - Quit";
    out.queue(cursor::MoveTo(cx.saturating_sub(hint.chars().count() as u16 / 2), detail_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
