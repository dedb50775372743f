//! Game entities: projectiles, ships and the per-session state.
//!
//! Player and enemy share one `Ship` record and differ only through the
//! `Craft` trait: where their bolts spawn, what their bolts can hit and
//! whether a health bar is drawn.

use std::str::FromStr;
use std::sync::Arc;

use crate::assets::{AssetCache, ShipSprites, Sprite};
use crate::collision::{collide, Collidable, Mask};
use crate::config::{
    GameConfig, COOLDOWN_PERIOD, ENEMY_HEALTH, ENEMY_MUZZLE_OFFSET, HEALTH_BAR_GAP,
    HEALTH_BAR_HEIGHT, PLAYER_HEALTH, PROJECTILE_DAMAGE,
};
use crate::error::GameError;
use crate::render::{Rect, Surface, HEALTH_BAR_BACK, HEALTH_BAR_FILL};

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A bolt travelling vertically. Direction is the sign of the velocity it is
/// advanced with: negative moves up, positive moves down.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    sprite: Arc<Sprite>,
}

impl Projectile {
    pub fn new(x: f32, y: f32, sprite: Arc<Sprite>) -> Self {
        Self { x, y, sprite }
    }

    pub fn advance(&mut self, velocity: f32) {
        self.y += velocity;
    }

    /// True once the bolt has left `[0, screen_height]` vertically.
    pub fn is_out_of_bounds(&self, screen_height: f32) -> bool {
        self.y < 0.0 || self.y > screen_height
    }

    pub fn overlaps(&self, other: &(impl Collidable + ?Sized)) -> bool {
        collide(self, other)
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.blit(&self.sprite, self.x, self.y);
    }
}

impl Collidable for Projectile {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        self.sprite.mask()
    }
}

// ── Shared ship record ────────────────────────────────────────────────────────

/// State common to every ship: position, health, gun cooldown and live bolts.
#[derive(Clone, Debug)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub health: i32,
    /// Refractory timer in `0..=COOLDOWN_PERIOD`; the gun is ready only at 0.
    pub cooldown: u32,
    /// Live bolts in fire order.
    pub projectiles: Vec<Projectile>,
    sprites: ShipSprites,
}

impl Ship {
    pub fn new(x: f32, y: f32, health: i32, sprites: ShipSprites) -> Self {
        Self {
            x,
            y,
            health,
            cooldown: 0,
            projectiles: Vec::new(),
            sprites,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprites.ship
    }

    pub fn width(&self) -> f32 {
        self.sprites.ship.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.sprites.ship.height() as f32
    }

    /// Once a shot has started the timer it counts up every tick; on reaching
    /// the period it wraps back to 0 and the gun is ready again.
    pub fn tick_cooldown(&mut self) {
        if self.cooldown >= COOLDOWN_PERIOD {
            self.cooldown = 0;
        } else if self.cooldown > 0 {
            self.cooldown += 1;
        }
    }

    /// Spawn a bolt at the ship's position shifted by `offset_x`.
    /// Returns false, and does nothing, while the gun is cooling down.
    pub fn fire(&mut self, offset_x: f32) -> bool {
        if self.cooldown != 0 {
            return false;
        }
        self.projectiles.push(Projectile::new(
            self.x + offset_x,
            self.y,
            Arc::clone(&self.sprites.projectile),
        ));
        self.cooldown = 1;
        true
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.blit(&self.sprites.ship, self.x, self.y);
        for projectile in &self.projectiles {
            projectile.render(surface);
        }
    }
}

impl Collidable for Ship {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        self.sprites.ship.mask()
    }
}

/// Behaviour shared by the player and enemies on top of their `Ship`.
pub trait Craft {
    fn ship(&self) -> &Ship;
    fn ship_mut(&mut self) -> &mut Ship;

    /// Horizontal offset applied to new bolts.
    fn muzzle_offset(&self) -> f32 {
        0.0
    }

    /// Fire if the gun is ready. Returns whether a bolt was spawned.
    fn shoot(&mut self) -> bool {
        let offset = self.muzzle_offset();
        self.ship_mut().fire(offset)
    }

    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.ship().render(surface);
    }

    fn width(&self) -> f32 {
        self.ship().width()
    }

    fn height(&self) -> f32 {
        self.ship().height()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Rectangles of the health bar drawn under the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    pub background: Rect,
    /// `None` once health is at or below zero: nothing green is drawn.
    pub fill: Option<Rect>,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub ship: Ship,
    pub max_health: i32,
}

impl Player {
    pub fn new(x: f32, y: f32, assets: &AssetCache) -> Self {
        Self::with_sprites(x, y, PLAYER_HEALTH, assets.player.clone())
    }

    pub fn with_sprites(x: f32, y: f32, health: i32, sprites: ShipSprites) -> Self {
        Self {
            ship: Ship::new(x, y, health, sprites),
            max_health: health,
        }
    }

    /// Move bolts by `velocity`, dropping those that leave the screen. A bolt
    /// destroys every live enemy it overlaps and is then spent. Returns the
    /// number of enemies destroyed.
    pub fn update_projectiles(
        &mut self,
        velocity: f32,
        screen_height: f32,
        enemies: &mut Vec<Enemy>,
    ) -> usize {
        self.ship.tick_cooldown();

        let mut destroyed = vec![false; enemies.len()];
        self.ship.projectiles.retain_mut(|projectile| {
            projectile.advance(velocity);
            if projectile.is_out_of_bounds(screen_height) {
                return false;
            }
            let mut hit = false;
            for (i, enemy) in enemies.iter().enumerate() {
                if !destroyed[i] && projectile.overlaps(enemy) {
                    destroyed[i] = true;
                    hit = true;
                }
            }
            !hit
        });

        let kills = destroyed.iter().filter(|&&d| d).count();
        let mut index = 0;
        enemies.retain(|_| {
            let keep = !destroyed[index];
            index += 1;
            keep
        });
        kills
    }

    pub fn health_bar(&self) -> HealthBar {
        let width = self.ship.width();
        let top = self.ship.y + self.ship.height() + HEALTH_BAR_GAP;
        let background = Rect::new(self.ship.x, top, width, HEALTH_BAR_HEIGHT);
        let fill_width = width * (self.ship.health as f32 / self.max_health as f32);
        let fill = (fill_width > 0.0)
            .then(|| Rect::new(self.ship.x, top, fill_width, HEALTH_BAR_HEIGHT));
        HealthBar { background, fill }
    }
}

impl Craft for Player {
    fn ship(&self) -> &Ship {
        &self.ship
    }

    fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.ship.render(surface);
        let bar = self.health_bar();
        surface.fill_rect(bar.background, HEALTH_BAR_BACK);
        if let Some(fill) = bar.fill {
            surface.fill_rect(fill, HEALTH_BAR_FILL);
        }
    }
}

impl Collidable for Player {
    fn position(&self) -> (f32, f32) {
        self.ship.position()
    }

    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyColor {
    Red,
    Blue,
    Green,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Blue, EnemyColor::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyColor::Red => "red",
            EnemyColor::Blue => "blue",
            EnemyColor::Green => "green",
        }
    }
}

impl FromStr for EnemyColor {
    type Err = GameError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "red" => Ok(EnemyColor::Red),
            "blue" => Ok(EnemyColor::Blue),
            "green" => Ok(EnemyColor::Green),
            other => Err(GameError::UnknownColor(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub ship: Ship,
    pub color: EnemyColor,
}

impl Enemy {
    pub fn new(x: f32, y: f32, color: EnemyColor, assets: &AssetCache) -> Self {
        Self {
            ship: Ship::new(x, y, ENEMY_HEALTH, assets.enemy(color).clone()),
            color,
        }
    }

    /// Build from a textual colour tag; only red, blue and green exist.
    pub fn from_tag(x: f32, y: f32, tag: &str, assets: &AssetCache) -> Result<Self, GameError> {
        Ok(Self::new(x, y, tag.parse()?, assets))
    }

    /// Drift vertically; positive velocity moves toward the player.
    pub fn drift(&mut self, velocity: f32) {
        self.ship.y += velocity;
    }

    /// Move bolts toward the player. A bolt that leaves the screen is dropped;
    /// one that hits the player deals `PROJECTILE_DAMAGE` and is spent.
    /// Returns the number of hits.
    pub fn update_projectiles(
        &mut self,
        velocity: f32,
        screen_height: f32,
        player: &mut Player,
    ) -> usize {
        self.ship.tick_cooldown();

        let mut hits = 0;
        self.ship.projectiles.retain_mut(|projectile| {
            projectile.advance(velocity);
            if projectile.is_out_of_bounds(screen_height) {
                return false;
            }
            if projectile.overlaps(&*player) {
                player.ship.health -= PROJECTILE_DAMAGE;
                hits += 1;
                return false;
            }
            true
        });
        hits
    }
}

impl Craft for Enemy {
    fn ship(&self) -> &Ship {
        &self.ship
    }

    fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    fn muzzle_offset(&self) -> f32 {
        ENEMY_MUZZLE_OFFSET
    }
}

impl Collidable for Enemy {
    fn position(&self) -> (f32, f32) {
        self.ship.position()
    }

    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// "Game Over" is on screen; gameplay is frozen.
    Lost,
    /// The overlay has run its course; the session is done.
    Finished,
}

/// One playthrough, from the menu's confirm to the end of the "Game Over" overlay.
/// Cloneable so `compute::tick` can return a fresh copy.
#[derive(Clone, Debug)]
pub struct Session {
    pub player: Player,
    /// Live enemies; order carries no meaning.
    pub enemies: Vec<Enemy>,
    /// Waves cleared so far.
    pub level: u32,
    pub lives: i32,
    /// Size of the most recently spawned wave.
    pub wave_length: u32,
    pub status: GameStatus,
    /// Ticks spent in the lost state.
    pub lost_ticks: u32,
    pub frame: u64,
    pub config: GameConfig,
}
