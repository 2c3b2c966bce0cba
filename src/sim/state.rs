//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; waiting for restart or quit
    GameOver,
}

/// Simulation events consumed by the audio/frontend collaborators.
///
/// The sim never calls into audio directly; it records what happened and the
/// frontend drains the list once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    EnemyDestroyed,
    PlayerHit,
    PowerUpCollected,
    WaveCleared,
    GameOver,
}

/// Power-up kinds dropped by destroyed enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Three bullets in a spread pattern
    Triple,
    /// One wide laser bolt
    Laser,
    /// Five bullets fanned out from vertical
    Multi,
}

impl PowerUpKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Triple => "Triple Shot",
            PowerUpKind::Laser => "Laser Beam",
            PowerUpKind::Multi => "Multi Shot",
        }
    }
}

/// A power-up currently modifying the player's shooting, with its wall-clock
/// expiry. Bundling the two keeps the active flag and the deadline consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    /// Wall-clock seconds at which the effect ends
    pub until: f64,
}

/// Projectile variant tag. One entity type covers all three; the tag only
/// selects the collision footprint and the sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileKind {
    Basic,
    Laser,
    /// Fired at an angle from vertical; kept for sprite rotation
    Angled { angle_deg: f32 },
}

/// A player projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn basic(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -BULLET_SPEED),
            kind: ProjectileKind::Basic,
        }
    }

    pub fn laser(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -BULLET_SPEED),
            kind: ProjectileKind::Laser,
        }
    }

    /// Angle is measured from vertical, so 0 degrees flies straight up
    pub fn angled(pos: Vec2, angle_deg: f32) -> Self {
        let theta = angle_deg.to_radians();
        Self {
            pos,
            vel: Vec2::new(theta.sin(), -theta.cos()) * BULLET_SPEED,
            kind: ProjectileKind::Angled { angle_deg },
        }
    }

    /// Collision footprint, by kind
    pub fn size(&self) -> Vec2 {
        match self.kind {
            ProjectileKind::Laser => Vec2::new(LASER_WIDTH, LASER_HEIGHT),
            _ => Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// True once the projectile is fully outside the screen on any side
    pub fn off_screen(&self) -> bool {
        let half = self.size() / 2.0;
        self.pos.x + half.x < 0.0
            || self.pos.x - half.x > SCREEN_WIDTH
            || self.pos.y + half.y < 0.0
            || self.pos.y - half.y > SCREEN_HEIGHT
    }
}

/// The player's ship. Owns its live projectiles.
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
    pub powerup: Option<ActivePowerUp>,
    pub projectiles: Vec<Projectile>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, PLAYER_SPAWN_Y),
            cooldown: 0,
            powerup: None,
            projectiles: Vec::new(),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Move horizontally by `direction` (-1.0 or 1.0), clamped so the hull
    /// stays on screen.
    pub fn move_by(&mut self, direction: f32) {
        let half = PLAYER_WIDTH / 2.0;
        self.pos.x = (self.pos.x + direction * PLAYER_SPEED).clamp(half, SCREEN_WIDTH - half);
    }

    /// Fire according to the active power-up. No-op while cooling down.
    /// Returns whether a shot actually left the ship.
    pub fn shoot(&mut self) -> bool {
        if self.cooldown > 0 {
            return false;
        }

        let muzzle = Vec2::new(self.pos.x, self.pos.y - PLAYER_HEIGHT / 2.0);
        match self.powerup.map(|p| p.kind) {
            Some(PowerUpKind::Triple) => {
                self.projectiles.push(Projectile::basic(muzzle));
                self.projectiles
                    .push(Projectile::basic(muzzle + Vec2::new(-TRIPLE_SPREAD, 10.0)));
                self.projectiles
                    .push(Projectile::basic(muzzle + Vec2::new(TRIPLE_SPREAD, 10.0)));
            }
            Some(PowerUpKind::Laser) => {
                self.projectiles.push(Projectile::laser(muzzle));
            }
            Some(PowerUpKind::Multi) => {
                for angle in MULTI_ANGLES_DEG {
                    self.projectiles.push(Projectile::angled(muzzle, angle));
                }
            }
            None => {
                self.projectiles.push(Projectile::basic(muzzle));
            }
        }

        self.cooldown = SHOOT_COOLDOWN_TICKS;
        true
    }

    /// Per-tick upkeep: cooldown, projectile motion, power-up expiry.
    pub fn update(&mut self, now: f64) {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }

        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles.retain(|p| !p.off_screen());

        if let Some(active) = self.powerup {
            if now >= active.until {
                self.powerup = None;
            }
        }
    }

    pub fn activate_powerup(&mut self, kind: PowerUpKind, now: f64) {
        self.powerup = Some(ActivePowerUp {
            kind,
            until: now + POWERUP_DURATION_SECS,
        });
    }

    pub fn current_powerup(&self) -> Option<PowerUpKind> {
        self.powerup.map(|p| p.kind)
    }

    /// Whole seconds left on the active power-up, for the HUD
    pub fn powerup_secs_left(&self, now: f64) -> Option<u32> {
        self.powerup
            .map(|p| (p.until - now).max(0.0).ceil() as u32)
    }
}

/// One member of the marching formation
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Center position
    pub pos: Vec2,
    /// Horizontal direction, -1.0 or 1.0; flipped collectively at edges
    pub direction: f32,
    /// Wing-flap animation phase, radians
    pub wing_phase: f32,
    pub wing_speed: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            direction: 1.0,
            wing_phase: rng.random_range(0.0..std::f32::consts::TAU),
            wing_speed: rng.random_range(0.1..0.15),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn advance(&mut self) {
        self.pos.x += ENEMY_SPEED * self.direction;
        self.wing_phase = (self.wing_phase + self.wing_speed) % std::f32::consts::TAU;
    }

    /// True when this member has reached a screen edge while moving toward it
    pub fn at_edge(&self) -> bool {
        let half = ENEMY_WIDTH / 2.0;
        (self.pos.x - half <= 0.0 && self.direction < 0.0)
            || (self.pos.x + half >= SCREEN_WIDTH && self.direction > 0.0)
    }
}

/// A falling egg. Hitting the player costs a life.
#[derive(Debug, Clone)]
pub struct Egg {
    pub pos: Vec2,
    /// Degrees, wraps at 360
    pub rotation: f32,
    pub spin: f32,
}

impl Egg {
    pub fn new(pos: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            rotation: 0.0,
            spin: rng.random_range(-2.0..2.0),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(EGG_WIDTH, EGG_HEIGHT)
    }

    pub fn update(&mut self) {
        self.pos.y += EGG_FALL_SPEED;
        self.rotation = (self.rotation + self.spin).rem_euclid(360.0);
    }

    pub fn off_screen(&self) -> bool {
        self.pos.y - EGG_HEIGHT / 2.0 > SCREEN_HEIGHT
    }
}

/// A falling power-up pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Bob animation phase, radians; wraps at 2π. Render-only.
    pub bob_phase: f32,
    pub bob_speed: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            kind,
            bob_phase: 0.0,
            bob_speed: rng.random_range(0.05..0.1),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(POWERUP_SIZE, POWERUP_SIZE)
    }

    pub fn update(&mut self) {
        self.pos.y += POWERUP_FALL_SPEED;
        self.bob_phase = (self.bob_phase + self.bob_speed) % std::f32::consts::TAU;
    }

    /// Sinusoidal drift applied at draw time; collisions use `pos` alone
    pub fn bob_offset(&self) -> Vec2 {
        Vec2::new(self.bob_phase.sin() * 5.0, self.bob_phase.cos() * 3.0)
    }

    pub fn off_screen(&self) -> bool {
        self.pos.y - POWERUP_SIZE / 2.0 > SCREEN_HEIGHT
    }
}

/// A cosmetic explosion animation. No collision, no score effect.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    /// Fractional frame index
    pub frame: f32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, frame: 0.0 }
    }

    /// Advance the animation; returns whether it is still alive
    pub fn update(&mut self) -> bool {
        self.frame += EXPLOSION_FRAME_STEP;
        self.frame < EXPLOSION_FRAMES as f32
    }

    pub fn frame_index(&self) -> usize {
        (self.frame as usize).min(EXPLOSION_FRAMES - 1)
    }
}

/// Complete session state. Everything the simulation mutates lives here;
/// update functions take it by `&mut` reference.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed, reused on restart for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u32,
    pub lives: u8,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// 1-based wave counter, for the HUD and logs
    pub wave: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub eggs: Vec<Egg>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Events recorded this tick, drained by the frontend
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session. The first wave is spawned by the caller (or by
    /// the first tick, which treats an empty formation as cleared).
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: STARTING_LIVES,
            phase: GamePhase::Playing,
            time_ticks: 0,
            wave: 0,
            player: Player::new(),
            enemies: Vec::new(),
            eggs: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Drain the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
