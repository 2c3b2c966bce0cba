//! Egg Storm - a single-screen wave shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `render`: Scene composition and terminal output
//! - `audio`: Synthesized sound effects and music
//! - `settings`: User preferences

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick rate
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / TICK_HZ as f64;

    /// Logical screen dimensions (all sim coordinates live in this space)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player ship defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Horizontal movement per tick while a direction key is held
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Ship center sits 50 px above the bottom edge
    pub const PLAYER_SPAWN_Y: f32 = SCREEN_HEIGHT - 50.0;
    /// Ticks between shots
    pub const SHOOT_COOLDOWN_TICKS: u32 = 15;
    pub const STARTING_LIVES: u8 = 3;

    /// Projectile defaults
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 20.0;
    /// Speed per tick, shared by every projectile kind
    pub const BULLET_SPEED: f32 = 10.0;
    /// Laser bolts fly like bullets but carry a wider collision footprint
    pub const LASER_WIDTH: f32 = 20.0;
    pub const LASER_HEIGHT: f32 = 30.0;
    /// Lateral offset of the two side bullets in a triple shot
    pub const TRIPLE_SPREAD: f32 = 15.0;
    /// Multi-shot fan, degrees from vertical (0 = straight up)
    pub const MULTI_ANGLES_DEG: [f32; 5] = [-30.0, -15.0, 0.0, 15.0, 30.0];

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 50.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;
    /// Horizontal movement per tick
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Per-enemy, per-tick chance of dropping an egg
    pub const EGG_DROP_CHANCE: f64 = 0.003;
    pub const SCORE_PER_KILL: u32 = 10;

    /// Egg defaults
    pub const EGG_WIDTH: f32 = 20.0;
    pub const EGG_HEIGHT: f32 = 25.0;
    pub const EGG_FALL_SPEED: f32 = 3.0;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_FALL_SPEED: f32 = 3.0;
    /// Chance a destroyed enemy drops a power-up
    pub const POWERUP_DROP_CHANCE: f64 = 0.3;
    /// Active power-up window, wall-clock seconds
    pub const POWERUP_DURATION_SECS: f64 = 20.0;

    /// Explosion animation length
    pub const EXPLOSION_FRAMES: usize = 10;
    /// Fractional frame advance per tick
    pub const EXPLOSION_FRAME_STEP: f32 = 0.5;

    /// Wave formation: fixed column count, rows scale with score
    pub const WAVE_COLS: u32 = 8;
    pub const WAVE_BASE_ROWS: u32 = 3;
    pub const WAVE_MAX_ROWS: u32 = 5;
    /// One extra row per this many points
    pub const WAVE_SCORE_PER_ROW: u32 = 200;
    /// Grid cell top-left = (col * spacing + offset, row * spacing + offset)
    pub const WAVE_COL_SPACING: f32 = 80.0;
    pub const WAVE_ROW_SPACING: f32 = 60.0;
    pub const WAVE_LEFT_OFFSET: f32 = 100.0;
    pub const WAVE_TOP_OFFSET: f32 = 50.0;
    /// Vertical step applied to the whole wave on formation reversal
    pub const FORMATION_DROP: f32 = 20.0;

    /// Inward inset applied to enemy and egg/player hitboxes
    pub const HITBOX_INSET: f32 = 5.0;
}
