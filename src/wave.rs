//! Wave progression: a fresh, larger wave every time the roster is cleared.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::assets::AssetCache;
use crate::config::{SPAWN_X_MIN, SPAWN_X_RIGHT_MARGIN, SPAWN_Y_MAX, SPAWN_Y_MIN, WAVE_GROWTH};
use crate::entities::{Enemy, EnemyColor, Session};

pub fn random_color(rng: &mut impl Rng) -> EnemyColor {
    *EnemyColor::ALL.choose(rng).unwrap_or(&EnemyColor::Red)
}

/// Advance to the next level and add `wave_length` enemies to the roster.
///
/// Each enemy starts above the screen at a random height so the wave trickles
/// in instead of arriving as a single line.
pub fn spawn_wave(session: &mut Session, assets: &AssetCache, rng: &mut impl Rng) {
    session.level += 1;
    session.wave_length += WAVE_GROWTH;

    let x_max = session.config.width as i32 - SPAWN_X_RIGHT_MARGIN;
    for _ in 0..session.wave_length {
        let x = rng.gen_range(SPAWN_X_MIN..x_max);
        let y = rng.gen_range(SPAWN_Y_MIN..SPAWN_Y_MAX);
        let color = random_color(rng);
        session.enemies.push(Enemy::new(x as f32, y as f32, color, assets));
    }

    info!(
        level = session.level,
        wave_length = session.wave_length,
        "wave spawned"
    );
}
