/// Session logic.
///
/// `tick` takes an immutable reference to the current `Session` (plus the
/// tick's input and an RNG handle) and returns a brand-new `Session`. Side
/// effects are limited to the injected RNG.

use rand::Rng;
use tracing::{debug, info};

use crate::assets::AssetCache;
use crate::collision::collide;
use crate::config::{
    GameConfig, PLAYER_BOTTOM_MARGIN, PLAYER_START_Y, RAM_DAMAGE, START_LIVES, START_WAVE_LENGTH,
};
use crate::entities::{Craft, GameStatus, Player, Session};
use crate::input::TickInput;
use crate::wave::spawn_wave;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh session: level 0, full lives, empty roster, player near the bottom centre.
pub fn init_session(config: GameConfig, assets: &AssetCache) -> Session {
    let player = Player::new(config.screen_width() / 2.0 - 25.0, PLAYER_START_Y, assets);
    info!(width = config.width, height = config.height, "session started");
    Session {
        player,
        enemies: Vec::new(),
        level: 0,
        lives: START_LIVES,
        wave_length: START_WAVE_LENGTH,
        status: GameStatus::Playing,
        lost_ticks: 0,
        frame: 0,
        config,
    }
}

// ── Input-driven movement ────────────────────────────────────────────────────

/// Apply held direction keys. A step is taken only if the whole sprite stays
/// inside the window, with extra room at the bottom for the health bar.
pub fn move_player(player: &mut Player, input: &TickInput, config: &GameConfig) {
    let step = config.player_velocity;
    let ship = &mut player.ship;
    let (w, h) = (ship.width(), ship.height());

    if input.left && ship.x - step > 0.0 {
        ship.x -= step;
    }
    if input.right && ship.x + step + w < config.screen_width() {
        ship.x += step;
    }
    if input.up && ship.y - step > 0.0 {
        ship.y -= step;
    }
    if input.down && ship.y + step + h + PLAYER_BOTTOM_MARGIN < config.screen_height() {
        ship.y += step;
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the session by one frame.
///
/// Order within a frame:
/// 1. loss check, then the frozen "Game Over" countdown if lost
/// 2. a new wave when the roster is empty
/// 3. player movement and fire
/// 4. each enemy drifts, moves its bolts against the player, maybe fires,
///    then is removed if it rammed the player or escaped past the bottom
/// 5. player bolts against the remaining roster
pub fn tick(
    state: &Session,
    input: &TickInput,
    assets: &AssetCache,
    rng: &mut impl Rng,
) -> Session {
    let mut s = state.clone();
    s.frame += 1;

    // ── 1. Loss ──────────────────────────────────────────────────────────────
    if s.status == GameStatus::Finished {
        return s;
    }
    if s.lives <= 0 || s.player.ship.health <= 0 {
        if s.status == GameStatus::Playing {
            info!(level = s.level, lives = s.lives, health = s.player.ship.health, "game lost");
        }
        s.status = GameStatus::Lost;
        s.lost_ticks += 1;
    }
    if s.status == GameStatus::Lost {
        if s.lost_ticks > s.config.lost_display_ticks() {
            s.status = GameStatus::Finished;
            info!(level = s.level, "session finished");
        }
        return s;
    }

    // ── 2. Next wave ─────────────────────────────────────────────────────────
    if s.enemies.is_empty() {
        spawn_wave(&mut s, assets, rng);
    }

    // ── 3. Player input ──────────────────────────────────────────────────────
    move_player(&mut s.player, input, &s.config);
    if input.fire {
        s.player.shoot();
    }

    // ── 4. Enemies ───────────────────────────────────────────────────────────
    let config = s.config;
    let screen_height = config.screen_height();
    let mut removed = vec![false; s.enemies.len()];

    for (i, enemy) in s.enemies.iter_mut().enumerate() {
        enemy.drift(config.enemy_velocity);
        let hits =
            enemy.update_projectiles(config.projectile_velocity, screen_height, &mut s.player);
        if hits > 0 {
            debug!(hits, health = s.player.ship.health, "player hit by enemy fire");
        }
        if rng.gen_ratio(1, config.enemy_fire_odds()) {
            enemy.shoot();
        }

        if collide(&*enemy, &s.player) {
            s.player.ship.health -= RAM_DAMAGE;
            removed[i] = true;
            debug!(health = s.player.ship.health, "enemy rammed player");
        } else if enemy.ship.y + enemy.height() > screen_height {
            s.lives -= 1;
            removed[i] = true;
            debug!(lives = s.lives, "enemy escaped");
        }
    }

    let mut index = 0;
    s.enemies.retain(|_| {
        let keep = !removed[index];
        index += 1;
        keep
    });

    // ── 5. Player bolts ──────────────────────────────────────────────────────
    let kills = s
        .player
        .update_projectiles(-config.projectile_velocity, screen_height, &mut s.enemies);
    if kills > 0 {
        debug!(kills, remaining = s.enemies.len(), "enemies destroyed");
    }

    s
}
