//! Rendering collaborator
//!
//! The simulation never draws. [`compose`] flattens a [`GameState`] into a
//! [`Scene`]: sprite instances (key + frame index + position + rotation)
//! plus a HUD model. A backend turns the scene into pixels; the terminal
//! compositor in [`term`] is the one shipped here.

pub mod sprites;
pub mod term;

use glam::Vec2;

use crate::sim::{GamePhase, GameState, PowerUpKind, ProjectileKind};

/// Keys into the procedurally generated sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKey {
    Ship,
    Enemy,
    Egg,
    Bullet,
    Laser,
    PowerUp(PowerUpKind),
    Explosion,
}

/// One sprite to draw this frame. Position is the sprite center in logical
/// screen space; rotation is degrees clockwise (backends may approximate).
#[derive(Debug, Clone, Copy)]
pub struct SpriteInstance {
    pub key: SpriteKey,
    pub frame: usize,
    pub pos: Vec2,
    pub rotation: f32,
}

/// HUD model, observational only
#[derive(Debug, Clone, Copy)]
pub struct Hud {
    pub score: u32,
    pub lives: u8,
    pub wave: u32,
    /// Active power-up and remaining whole seconds
    pub powerup: Option<(PowerUpKind, u32)>,
    /// Present only while the diagnostics overlay is on
    pub fps: Option<u32>,
}

/// Everything a backend needs for one frame
#[derive(Debug, Clone)]
pub struct Scene {
    /// Tick counter, drives background animation
    pub tick: u64,
    pub sprites: Vec<SpriteInstance>,
    pub hud: Hud,
    pub game_over: bool,
}

/// Flatten the current game state into a drawable scene.
///
/// Draw order is back-to-front: enemies, eggs, power-ups, ship, shots,
/// explosions.
pub fn compose(state: &GameState, now: f64, fps: Option<u32>) -> Scene {
    let mut sprites = Vec::new();

    for enemy in &state.enemies {
        // Wings beat on the sine of the per-enemy phase
        let frame = if enemy.wing_phase.sin() >= 0.0 { 0 } else { 1 };
        sprites.push(SpriteInstance {
            key: SpriteKey::Enemy,
            frame,
            pos: enemy.pos,
            rotation: 0.0,
        });
    }

    for egg in &state.eggs {
        sprites.push(SpriteInstance {
            key: SpriteKey::Egg,
            frame: (egg.rotation / 90.0) as usize % 4,
            pos: egg.pos,
            rotation: egg.rotation,
        });
    }

    for powerup in &state.powerups {
        sprites.push(SpriteInstance {
            key: SpriteKey::PowerUp(powerup.kind),
            frame: 0,
            pos: powerup.pos + powerup.bob_offset(),
            rotation: 0.0,
        });
    }

    if state.phase == GamePhase::Playing {
        sprites.push(SpriteInstance {
            key: SpriteKey::Ship,
            // Engine thrust flickers every few ticks
            frame: (state.time_ticks / 6 % 2) as usize,
            pos: state.player.pos,
            rotation: 0.0,
        });

        for projectile in &state.player.projectiles {
            let (key, frame, rotation) = match projectile.kind {
                ProjectileKind::Basic => (SpriteKey::Bullet, 0, 0.0),
                ProjectileKind::Laser => (SpriteKey::Laser, 0, 0.0),
                ProjectileKind::Angled { angle_deg } => {
                    // Lean the glyph with the flight path
                    let frame = if angle_deg < 0.0 {
                        1
                    } else if angle_deg > 0.0 {
                        2
                    } else {
                        0
                    };
                    (SpriteKey::Bullet, frame, angle_deg)
                }
            };
            sprites.push(SpriteInstance {
                key,
                frame,
                pos: projectile.pos,
                rotation,
            });
        }
    }

    for explosion in &state.explosions {
        sprites.push(SpriteInstance {
            key: SpriteKey::Explosion,
            frame: explosion.frame_index(),
            pos: explosion.pos,
            rotation: 0.0,
        });
    }

    Scene {
        tick: state.time_ticks,
        sprites,
        hud: Hud {
            score: state.score,
            lives: state.lives,
            wave: state.wave,
            powerup: state
                .player
                .current_powerup()
                .zip(state.player.powerup_secs_left(now)),
            fps,
        },
        game_over: state.phase == GamePhase::GameOver,
    }
}
