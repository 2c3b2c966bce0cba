//! Procedural sprite generation
//!
//! Every sprite is built at startup as terminal cell art: a grid of glyphs
//! with a color, spaces transparent. Animation variants (thrust, wing beats,
//! egg rotation, explosion growth) are separate frames; the sim picks the
//! frame index, nothing here reads game state.

use crossterm::style::Color;

use crate::consts::EXPLOSION_FRAMES;
use crate::sim::PowerUpKind;

use super::SpriteKey;

/// One sprite frame: rows of glyphs, spaces transparent
#[derive(Debug, Clone)]
pub struct Frame {
    pub rows: Vec<String>,
    pub color: Color,
}

impl Frame {
    fn new(rows: &[&str], color: Color) -> Self {
        Self {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            color,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// The full sprite inventory, generated once at startup
pub struct SpriteSheet {
    ship: [Frame; 2],
    enemy: [Frame; 2],
    egg: [Frame; 4],
    bullet: [Frame; 3],
    laser: Frame,
    powerup_triple: Frame,
    powerup_laser: Frame,
    powerup_multi: Frame,
    explosion: Vec<Frame>,
}

impl SpriteSheet {
    pub fn generate() -> Self {
        Self {
            ship: ship_frames(),
            enemy: enemy_frames(),
            egg: egg_frames(),
            bullet: bullet_frames(),
            laser: Frame::new(&["┃┃", "┃┃"], Color::Cyan),
            powerup_triple: Frame::new(&["[T]"], Color::Green),
            powerup_laser: Frame::new(&["[L]"], Color::Cyan),
            powerup_multi: Frame::new(&["[M]"], Color::DarkYellow),
            explosion: explosion_frames(),
        }
    }

    /// Look up the frame for a sprite instance. Out-of-range indices clamp
    /// to the last frame rather than panic.
    pub fn frame(&self, key: SpriteKey, frame: usize) -> &Frame {
        fn pick<const N: usize>(frames: &[Frame; N], i: usize) -> &Frame {
            &frames[i.min(N - 1)]
        }
        match key {
            SpriteKey::Ship => pick(&self.ship, frame),
            SpriteKey::Enemy => pick(&self.enemy, frame),
            SpriteKey::Egg => pick(&self.egg, frame),
            SpriteKey::Bullet => pick(&self.bullet, frame),
            SpriteKey::Laser => &self.laser,
            SpriteKey::PowerUp(PowerUpKind::Triple) => &self.powerup_triple,
            SpriteKey::PowerUp(PowerUpKind::Laser) => &self.powerup_laser,
            SpriteKey::PowerUp(PowerUpKind::Multi) => &self.powerup_multi,
            SpriteKey::Explosion => &self.explosion[frame.min(self.explosion.len() - 1)],
        }
    }
}

/// Ship with a flickering engine flame under the hull
fn ship_frames() -> [Frame; 2] {
    let hull = ["  ▲  ", "▟███▙"];
    [
        Frame::new(&[hull[0], hull[1], "  ╹  "], Color::White),
        Frame::new(&[hull[0], hull[1], "  ╽  "], Color::White),
    ]
}

/// Wing-up / wing-down beat
fn enemy_frames() -> [Frame; 2] {
    [
        Frame::new(&["/o.o\\", "\\_v_/"], Color::Red),
        Frame::new(&["\\o.o/", "/_v_\\"], Color::Red),
    ]
}

/// Four rotation steps, one per quarter turn
fn egg_frames() -> [Frame; 4] {
    [
        Frame::new(&["()"], Color::Yellow),
        Frame::new(&["//"], Color::Yellow),
        Frame::new(&["=="], Color::Yellow),
        Frame::new(&["\\\\"], Color::Yellow),
    ]
}

/// Vertical, left-leaning, right-leaning
fn bullet_frames() -> [Frame; 3] {
    [
        Frame::new(&["║"], Color::Cyan),
        Frame::new(&["\\"], Color::Cyan),
        Frame::new(&["/"], Color::Cyan),
    ]
}

/// Expanding ring, hot core fading to embers
fn explosion_frames() -> Vec<Frame> {
    let last = (EXPLOSION_FRAMES - 1) as f32;
    (0..EXPLOSION_FRAMES)
        .map(|i| {
            let t = i as f32 / last;
            let radius = 0.4 + t * 2.6;
            let glyph = match i {
                0..=2 => '#',
                3..=5 => '*',
                6..=7 => '+',
                _ => '.',
            };
            let color = if i < 4 { Color::Yellow } else { Color::Red };

            let rows = (0..3)
                .map(|ry| {
                    (0..7)
                        .map(|rx| {
                            // Terminal cells are roughly twice as tall as wide
                            let dx = (rx as f32 - 3.0) * 0.7;
                            let dy = (ry as f32 - 1.0) * 1.4;
                            let d = (dx * dx + dy * dy).sqrt();
                            if (d - radius).abs() < 0.8 { glyph } else { ' ' }
                        })
                        .collect()
                })
                .collect();

            Frame { rows, color }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_has_all_explosion_frames() {
        let sheet = SpriteSheet::generate();
        for i in 0..EXPLOSION_FRAMES {
            assert!(sheet.frame(SpriteKey::Explosion, i).height() > 0);
        }
    }

    #[test]
    fn out_of_range_frame_clamps() {
        let sheet = SpriteSheet::generate();
        let last = sheet.frame(SpriteKey::Egg, 3);
        let clamped = sheet.frame(SpriteKey::Egg, 99);
        assert_eq!(last.rows, clamped.rows);
    }

    #[test]
    fn frames_have_consistent_row_widths() {
        let sheet = SpriteSheet::generate();
        for key in [SpriteKey::Ship, SpriteKey::Enemy] {
            let frame = sheet.frame(key, 0);
            let w = frame.width();
            assert!(frame.rows.iter().all(|r| r.chars().count() == w));
        }
    }

    #[test]
    fn early_explosion_ring_is_nonempty() {
        let sheet = SpriteSheet::generate();
        let frame = sheet.frame(SpriteKey::Explosion, 0);
        let ink: usize = frame
            .rows
            .iter()
            .map(|r| r.chars().filter(|c| *c != ' ').count())
            .sum();
        assert!(ink > 0);
    }
}
