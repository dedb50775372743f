//! Sprite resources, loaded once at startup and shared read-only.
//!
//! `AssetCache::builtin` draws every visual procedurally so the game runs with
//! no files on disk; `AssetCache::load` reads the classic PNG set from a
//! directory instead. Ships and projectiles hold `Arc` handles into the cache.

use std::path::Path;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::info;

use crate::collision::Mask;
use crate::entities::EnemyColor;
use crate::error::GameError;
use crate::render::Rgb;

/// Pixels with alpha above this count as solid for collisions and drawing.
pub const ALPHA_THRESHOLD: u8 = 127;

// ── Sprite ────────────────────────────────────────────────────────────────────

/// An immutable RGBA image plus the opacity mask derived from it.
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    mask: Mask,
}

impl Sprite {
    /// Wrap raw row-major RGBA pixels. The mask is computed here and never again.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Self {
        assert_eq!(
            pixels.len(),
            (width * height) as usize,
            "pixel buffer does not match {width}x{height}"
        );
        let mask = Mask::from_fn(width, height, |x, y| {
            pixels[(y * width + x) as usize][3] > ALPHA_THRESHOLD
        });
        Self { width, height, pixels, mask }
    }

    /// Paint a sprite pixel by pixel; `None` leaves the pixel transparent.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut paint: impl FnMut(u32, u32) -> Option<Rgb>,
    ) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(match paint(x, y) {
                    Some([r, g, b]) => [r, g, b, 255],
                    None => [0, 0, 0, 0],
                });
            }
        }
        Self::from_rgba(width, height, pixels)
    }

    /// A fully opaque rectangle.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Self {
        Self::from_fn(width, height, |_, _| Some(color))
    }

    pub fn from_image(image: &RgbaImage) -> Self {
        let pixels = image.pixels().map(|p| p.0).collect();
        Self::from_rgba(image.width(), image.height(), pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Colour at `(x, y)` if that pixel is solid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[(y * self.width + x) as usize];
        (a > ALPHA_THRESHOLD).then_some([r, g, b])
    }
}

impl std::fmt::Debug for Sprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sprite")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

// ── Cache ─────────────────────────────────────────────────────────────────────

/// The visual of a ship and of the bolts it fires.
#[derive(Clone, Debug)]
pub struct ShipSprites {
    pub ship: Arc<Sprite>,
    pub projectile: Arc<Sprite>,
}

impl ShipSprites {
    pub fn new(ship: Sprite, projectile: Sprite) -> Self {
        Self {
            ship: Arc::new(ship),
            projectile: Arc::new(projectile),
        }
    }
}

/// Every visual the game needs, resolved once before the menu is shown.
#[derive(Clone, Debug)]
pub struct AssetCache {
    pub player: ShipSprites,
    pub red: ShipSprites,
    pub blue: ShipSprites,
    pub green: ShipSprites,
    /// Already scaled to the window size.
    pub background: Arc<Sprite>,
}

impl AssetCache {
    /// Ship and bolt sprites for one enemy palette entry.
    pub fn enemy(&self, color: EnemyColor) -> &ShipSprites {
        match color {
            EnemyColor::Red => &self.red,
            EnemyColor::Blue => &self.blue,
            EnemyColor::Green => &self.green,
        }
    }

    /// Procedurally drawn sprites sized like the classic PNG set.
    pub fn builtin(width: u32, height: u32) -> Self {
        const YELLOW: Rgb = [255, 214, 0];
        const RED: Rgb = [220, 40, 40];
        const BLUE: Rgb = [60, 110, 255];
        const GREEN: Rgb = [40, 200, 80];

        Self {
            player: ShipSprites::new(player_ship(YELLOW), bolt(YELLOW)),
            red: ShipSprites::new(enemy_ship(RED), bolt(RED)),
            blue: ShipSprites::new(enemy_ship(BLUE), bolt(BLUE)),
            green: ShipSprites::new(enemy_ship(GREEN), bolt(GREEN)),
            background: Arc::new(starfield(width, height)),
        }
    }

    /// Load the PNG set from `dir`. Any missing or corrupt file aborts startup.
    pub fn load(dir: &Path, width: u32, height: u32) -> Result<Self, GameError> {
        let pair = |ship: &str, laser: &str| -> Result<ShipSprites, GameError> {
            Ok(ShipSprites::new(
                Sprite::from_image(&open_rgba(&dir.join(ship))?),
                Sprite::from_image(&open_rgba(&dir.join(laser))?),
            ))
        };

        let background = open_rgba(&dir.join("background-black.png"))?;
        let background = imageops::resize(&background, width, height, FilterType::Nearest);

        let cache = Self {
            player: pair("pixel_ship_yellow.png", "pixel_laser_yellow.png")?,
            red: pair("pixel_ship_red_small.png", "pixel_laser_red.png")?,
            blue: pair("pixel_ship_blue_small.png", "pixel_laser_blue.png")?,
            green: pair("pixel_ship_green_small.png", "pixel_laser_green.png")?,
            background: Arc::new(Sprite::from_image(&background)),
        };
        info!(dir = %dir.display(), "loaded sprite set");
        Ok(cache)
    }
}

fn open_rgba(path: &Path) -> Result<RgbaImage, GameError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| GameError::AssetLoad {
            path: path.to_path_buf(),
            source,
        })
}

// ── Procedural art ────────────────────────────────────────────────────────────

fn shade(color: Rgb, factor: f32) -> Rgb {
    color.map(|c| (c as f32 * factor).min(255.0) as u8)
}

/// 100x90 arrowhead: a tapering fuselage with swept wings.
fn player_ship(color: Rgb) -> Sprite {
    Sprite::from_fn(100, 90, |x, y| {
        let dx = (x as f32 - 50.0).abs();
        let y = y as f32;
        let fuselage = (8.0..82.0).contains(&y) && dx <= 4.0 + (y - 8.0) * 0.22;
        let wings = (48.0..76.0).contains(&y) && dx <= 44.0 - (76.0 - y) * 0.8;
        if (24.0..40.0).contains(&y) && dx <= 4.0 {
            Some([120, 220, 255])
        } else if fuselage {
            Some(color)
        } else if wings {
            Some(shade(color, 0.75))
        } else {
            None
        }
    })
}

/// 50x40 inverted hull with a nose cannon pointing down.
fn enemy_ship(color: Rgb) -> Sprite {
    Sprite::from_fn(50, 40, |x, y| {
        let dx = (x as f32 - 25.0).abs();
        let y = y as f32;
        let hull = (4.0..36.0).contains(&y) && dx <= 3.0 + (36.0 - y) * 0.5;
        let cannon = (36.0..39.0).contains(&y) && dx <= 2.0;
        if (10.0..16.0).contains(&y) && dx <= 3.0 {
            Some([240, 240, 240])
        } else if hull {
            Some(color)
        } else if cannon {
            Some(shade(color, 0.6))
        } else {
            None
        }
    })
}

/// 100x90 transparent frame with a glowing bolt in the middle.
fn bolt(color: Rgb) -> Sprite {
    Sprite::from_fn(100, 90, |x, y| {
        let nx = (x as f32 - 50.0) / 4.0;
        let ny = (y as f32 - 45.0) / 14.0;
        let d = nx * nx + ny * ny;
        if d <= 0.3 {
            Some([255, 255, 255])
        } else if d <= 1.0 {
            Some(color)
        } else {
            None
        }
    })
}

/// Black sky with a sparse, fixed scattering of stars.
fn starfield(width: u32, height: u32) -> Sprite {
    Sprite::from_fn(width, height, |x, y| {
        let h = x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663);
        if h % 997 == 0 {
            Some([180, 180, 200])
        } else {
            Some([0, 0, 0])
        }
    })
}
