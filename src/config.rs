//! Gameplay tuning and runtime configuration.

use crate::error::GameError;

// ── Fixed gameplay constants ──────────────────────────────────────────────────

/// Ticks a ship waits between shots (half a second at 60 Hz).
pub const COOLDOWN_PERIOD: u32 = 30;

pub const START_LIVES: i32 = 5;
pub const START_WAVE_LENGTH: u32 = 5;
/// Extra enemies added to every new wave.
pub const WAVE_GROWTH: u32 = 2;
pub const PLAYER_HEALTH: i32 = 100;
pub const ENEMY_HEALTH: i32 = 100;

/// Damage dealt by one enemy bolt reaching the player.
pub const PROJECTILE_DAMAGE: i32 = 10;
/// Damage dealt by an enemy ship ramming the player.
pub const RAM_DAMAGE: i32 = 20;

/// Horizontal spawn offset of enemy bolts, centring them under the sprite.
pub const ENEMY_MUZZLE_OFFSET: f32 = -20.0;

/// Player spawn row, in logical units.
pub const PLAYER_START_Y: f32 = 450.0;
/// Extra room kept below the player for its health bar.
pub const PLAYER_BOTTOM_MARGIN: f32 = 15.0;

pub const HEALTH_BAR_GAP: f32 = 10.0;
pub const HEALTH_BAR_HEIGHT: f32 = 10.0;

/// Enemies spawn with x in `SPAWN_X_MIN .. width - SPAWN_X_RIGHT_MARGIN`.
pub const SPAWN_X_MIN: i32 = 50;
pub const SPAWN_X_RIGHT_MARGIN: i32 = 100;
/// Enemies spawn above the screen so a wave trickles in rather than arriving at once.
pub const SPAWN_Y_MIN: i32 = -1200;
pub const SPAWN_Y_MAX: i32 = -100;

/// An enemy fires with probability 1 / (ENEMY_FIRE_SECONDS * fps) per tick.
pub const ENEMY_FIRE_SECONDS: u32 = 10;

/// How long "Game Over" stays on screen.
pub const LOST_DISPLAY_SECONDS: u32 = 3;

const MIN_WIDTH: u32 = 200;
const MIN_HEIGHT: u32 = 560;
/// Keeps the derived tick counts well inside `u32`.
const MAX_FPS: u32 = 1000;

// ── Runtime configuration ─────────────────────────────────────────────────────

/// Window size, tick rate and velocities for one run of the program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    /// Logical window width.
    pub width: u32,
    /// Logical window height.
    pub height: u32,
    /// Target ticks per second.
    pub fps: u32,
    pub player_velocity: f32,
    pub enemy_velocity: f32,
    /// Speed of every bolt; player bolts travel at the negated value.
    pub projectile_velocity: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            fps: 60,
            player_velocity: 3.0,
            enemy_velocity: 1.0,
            projectile_velocity: 4.0,
        }
    }
}

impl GameConfig {
    pub fn screen_width(&self) -> f32 {
        self.width as f32
    }

    pub fn screen_height(&self) -> f32 {
        self.height as f32
    }

    /// Number of ticks the "Game Over" overlay is shown for.
    pub fn lost_display_ticks(&self) -> u32 {
        self.fps * LOST_DISPLAY_SECONDS
    }

    /// Denominator of the per-tick enemy fire chance.
    pub fn enemy_fire_odds(&self) -> u32 {
        self.fps * ENEMY_FIRE_SECONDS
    }

    /// Reject windows too small for the spawn band or the player's start row,
    /// and tick rates outside `1..=MAX_FPS`.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.fps == 0 {
            return Err(GameError::InvalidConfig("tick rate must be positive".into()));
        }
        if self.fps > MAX_FPS {
            return Err(GameError::InvalidConfig(format!(
                "tick rate {} is above the maximum of {}",
                self.fps, MAX_FPS
            )));
        }
        if self.width < MIN_WIDTH {
            return Err(GameError::InvalidConfig(format!(
                "width {} is below the minimum of {}",
                self.width, MIN_WIDTH
            )));
        }
        if self.height < MIN_HEIGHT {
            return Err(GameError::InvalidConfig(format!(
                "height {} is below the minimum of {}",
                self.height, MIN_HEIGHT
            )));
        }
        Ok(())
    }
}
