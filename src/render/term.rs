//! Terminal compositor
//!
//! Maps the logical 800x600 screen onto terminal cells and draws a composed
//! [`Scene`] with crossterm. No game logic here; this module only translates
//! a scene into terminal commands.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::PowerUpKind;

use super::sprites::{Frame, SpriteSheet};
use super::{Hud, Scene};

/// Logical pixels per terminal cell
const CELL_W: f32 = 10.0;
const CELL_H: f32 = 20.0;
/// Play area starts below the HUD row
const TOP_ROW: u16 = 1;

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_PLANET: Color = Color::DarkMagenta;

/// Fixed backdrop star count
const STAR_COUNT: u32 = 70;

pub struct TermRenderer {
    sheet: SpriteSheet,
}

impl Default for TermRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TermRenderer {
    pub fn new() -> Self {
        Self {
            sheet: SpriteSheet::generate(),
        }
    }

    /// Render one complete frame
    pub fn draw<W: Write>(&self, out: &mut W, scene: &Scene) -> std::io::Result<()> {
        let (term_w, term_h) = terminal::size()?;

        out.queue(terminal::Clear(terminal::ClearType::All))?;

        draw_starfield(out, scene.tick, term_w, term_h)?;
        draw_planet(out, term_w, term_h)?;

        for sprite in &scene.sprites {
            let frame = self.sheet.frame(sprite.key, sprite.frame);
            let col = (sprite.pos.x / CELL_W).round() as i32;
            let row = (sprite.pos.y / CELL_H).round() as i32 + TOP_ROW as i32;
            draw_frame(out, frame, col, row, term_w, term_h)?;
        }

        draw_hud(out, &scene.hud, term_w, term_h)?;
        draw_controls_hint(out, term_h)?;

        if scene.game_over {
            draw_game_over(out, scene.hud.score, term_w, term_h)?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, term_h.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

/// Draw a sprite frame centered on (col, row), skipping transparent cells
fn draw_frame<W: Write>(
    out: &mut W,
    frame: &Frame,
    col: i32,
    row: i32,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    let start_col = col - frame.width() as i32 / 2;
    let start_row = row - frame.height() as i32 / 2;

    out.queue(style::SetForegroundColor(frame.color))?;
    for (ry, line) in frame.rows.iter().enumerate() {
        let y = start_row + ry as i32;
        if y < TOP_ROW as i32 || y >= term_h.saturating_sub(1) as i32 {
            continue;
        }
        for (rx, glyph) in line.chars().enumerate() {
            if glyph == ' ' {
                continue;
            }
            let x = start_col + rx as i32;
            if x < 0 || x >= term_w as i32 {
                continue;
            }
            out.queue(cursor::MoveTo(x as u16, y as u16))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

/// Deterministic starfield with a slow twinkle
fn draw_starfield<W: Write>(out: &mut W, tick: u64, term_w: u16, term_h: u16) -> std::io::Result<()> {
    for i in 0..STAR_COUNT {
        let hash = i.wrapping_mul(2654435761).wrapping_add(97);
        let x = (hash % 1000) as f32 / 1000.0 * SCREEN_WIDTH;
        let y = ((hash >> 10) % 1000) as f32 / 1000.0 * SCREEN_HEIGHT;

        let col = (x / CELL_W) as i32;
        let row = (y / CELL_H) as i32 + TOP_ROW as i32;
        if col < 0 || col >= term_w as i32 || row < TOP_ROW as i32 || row >= term_h as i32 - 1 {
            continue;
        }

        // Each star blinks on its own cadence
        let phase = (tick / 8).wrapping_add(hash as u64) % 4;
        let (glyph, color) = match phase {
            0 => ('·', Color::DarkGrey),
            1 => ('·', Color::Grey),
            2 => ('+', Color::White),
            _ => ('·', Color::Grey),
        };
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_planet<W: Write>(out: &mut W, term_w: u16, term_h: u16) -> std::io::Result<()> {
    let planet = Frame {
        rows: vec![
            "  ▄▄▄  ".to_string(),
            " █████ ".to_string(),
            "  ▀▀▀  ".to_string(),
        ],
        color: C_PLANET,
    };
    // Upper-right quadrant, matching the backdrop's fixed planet position
    let col = ((SCREEN_WIDTH - 150.0) / CELL_W) as i32;
    let row = (150.0 / CELL_H) as i32 + TOP_ROW as i32;
    draw_frame(out, &planet, col, row, term_w, term_h)
}

/// HUD row: score left, power-up center, lives right; FPS bottom-right when
/// diagnostics are on.
fn draw_hud<W: Write>(out: &mut W, hud: &Hud, term_w: u16, term_h: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}   Wave: {}", hud.score, hud.wave)))?;

    if let Some((kind, secs)) = hud.powerup {
        let color = match kind {
            PowerUpKind::Triple => Color::Green,
            PowerUpKind::Laser => Color::Cyan,
            PowerUpKind::Multi => Color::DarkYellow,
        };
        let text = format!("{}: {}s", kind.label(), secs);
        let cx = (term_w / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(cx, 0))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(&text))?;
    }

    let hearts: String = "♥".repeat(hud.lives as usize);
    let lives_text = format!("Lives: {hearts}");
    let rx = term_w.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    if let Some(fps) = hud.fps {
        let fps_text = format!("FPS: {fps}");
        let rx = term_w.saturating_sub(fps_text.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, term_h.saturating_sub(2)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(&fps_text))?;
    }

    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, term_h: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term_h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   F : Diagnostics"))?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    score: u32,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {score}");
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = term_w / 2;
    let start_row = (term_h / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
