//! Pixel-accurate collision detection.
//!
//! Every sprite carries a binary opacity mask computed once when the sprite is
//! built. Two objects collide when at least one opaque pixel of each lands on
//! the same screen pixel; transparent padding around a sprite never counts.

/// Per-pixel opacity bitmap, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Build a mask by asking `solid` about every pixel.
    pub fn from_fn(width: u32, height: u32, mut solid: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(solid(x, y));
            }
        }
        Self { width, height, bits }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at `(x, y)`; anything outside the bitmap is transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First pixel (in this mask's coordinates) where both masks are opaque,
    /// with `other` placed at `offset` relative to this mask's origin.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (dx, dy) = offset;
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (self.width as i32).min(dx + other.width as i32);
        let y_end = (self.height as i32).min(dy + other.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return Some((x, y));
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("opaque", &self.count())
            .finish()
    }
}

/// Anything with a screen position and an opacity mask.
pub trait Collidable {
    /// Top-left corner in logical screen units.
    fn position(&self) -> (f32, f32);
    fn mask(&self) -> &Mask;
}

/// Pixel-mask overlap test between two positioned objects.
///
/// Positions are floored to whole pixels before taking the offset, so
/// `collide(a, b) == collide(b, a)` always holds.
pub fn collide(a: &(impl Collidable + ?Sized), b: &(impl Collidable + ?Sized)) -> bool {
    let (ax, ay) = a.position();
    let (bx, by) = b.position();
    let offset = (
        bx.floor() as i32 - ax.floor() as i32,
        by.floor() as i32 - ay.floor() as i32,
    );
    a.mask().overlap(b.mask(), offset).is_some()
}
