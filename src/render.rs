//! Drawing interface and frame composition.
//!
//! The core never talks to a terminal. It composes each frame through the
//! `Surface` trait, in logical window units with the origin at the top-left.

use crate::assets::{AssetCache, Sprite};
use crate::entities::{Craft, GameStatus, Session};

pub type Rgb = [u8; 3];

// ── Colour palette ────────────────────────────────────────────────────────────

pub const TEXT: Rgb = [255, 255, 255];
pub const HEALTH_BAR_BACK: Rgb = [255, 0, 0];
pub const HEALTH_BAR_FILL: Rgb = [0, 255, 0];

/// Axis-aligned rectangle in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    /// HUD labels.
    Main,
    /// Menu prompt and "Game Over".
    Large,
}

/// What the presentation layer must offer the game.
pub trait Surface {
    /// Logical (width, height).
    fn size(&self) -> (f32, f32);
    /// Draw the solid pixels of `sprite` with its top-left at `(x, y)`.
    fn blit(&mut self, sprite: &Sprite, x: f32, y: f32);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    /// Draw `text` with its top-left at `(x, y)`.
    fn draw_text(&mut self, text: &str, size: FontSize, x: f32, y: f32, color: Rgb);
    /// Logical (width, height) `text` would occupy.
    fn text_size(&self, text: &str, size: FontSize) -> (f32, f32);
}

// ── Frames ────────────────────────────────────────────────────────────────────

pub const MENU_PROMPT: &str = "Press Enter to Begin";
pub const GAME_OVER: &str = "Game Over";
const GAME_OVER_Y: f32 = 280.0;
const HUD_MARGIN: f32 = 10.0;

pub fn draw_menu<S: Surface + ?Sized>(surface: &mut S, assets: &AssetCache) {
    let (width, height) = surface.size();
    surface.blit(&assets.background, 0.0, 0.0);
    let (label_w, _) = surface.text_size(MENU_PROMPT, FontSize::Large);
    surface.draw_text(
        MENU_PROMPT,
        FontSize::Large,
        width / 2.0 - label_w / 2.0,
        height / 2.0 - 30.0,
        TEXT,
    );
}

/// Background, HUD, enemies, the player and, once lost, the "Game Over" overlay.
pub fn draw_session<S: Surface + ?Sized>(surface: &mut S, session: &Session, assets: &AssetCache) {
    let (width, _) = surface.size();
    surface.blit(&assets.background, 0.0, 0.0);

    let lives = format!("Lives: {}", session.lives);
    let level = format!("Level: {}", session.level);
    surface.draw_text(&lives, FontSize::Main, HUD_MARGIN, HUD_MARGIN, TEXT);
    let (level_w, _) = surface.text_size(&level, FontSize::Main);
    surface.draw_text(&level, FontSize::Main, width - level_w - HUD_MARGIN, HUD_MARGIN, TEXT);

    for enemy in &session.enemies {
        enemy.render(surface);
    }
    session.player.render(surface);

    if session.status != GameStatus::Playing {
        let (label_w, _) = surface.text_size(GAME_OVER, FontSize::Large);
        surface.draw_text(
            GAME_OVER,
            FontSize::Large,
            width / 2.0 - label_w / 2.0,
            GAME_OVER_Y,
            TEXT,
        );
    }
}
