#![allow(dead_code)]

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invader::assets::{AssetCache, ShipSprites, Sprite};
use space_invader::compute::init_session;
use space_invader::config::GameConfig;
use space_invader::entities::Session;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Fully opaque rectangles, so hit tests reduce to simple geometry.
pub fn solid_assets() -> AssetCache {
    let pair = |w, h, color| {
        ShipSprites::new(Sprite::solid(w, h, color), Sprite::solid(4, 10, color))
    };
    AssetCache {
        player: pair(40, 30, [255, 214, 0]),
        red: pair(20, 20, [220, 40, 40]),
        blue: pair(20, 20, [60, 110, 255]),
        green: pair(20, 20, [40, 200, 80]),
        background: Arc::new(Sprite::solid(600, 600, [0, 0, 0])),
    }
}

pub fn builtin_assets() -> AssetCache {
    AssetCache::builtin(600, 600)
}

pub fn fresh_session(assets: &AssetCache) -> Session {
    init_session(GameConfig::default(), assets)
}
