mod common;

use std::sync::Arc;

use proptest::prelude::*;

use space_invader::assets::Sprite;
use space_invader::config::{COOLDOWN_PERIOD, ENEMY_MUZZLE_OFFSET};
use space_invader::entities::*;
use space_invader::error::GameError;

use common::*;

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_out_of_bounds_edges() {
    let sprite = Arc::new(Sprite::solid(4, 10, [255, 0, 0]));
    let at = |y| Projectile::new(10.0, y, Arc::clone(&sprite));
    assert!(at(-0.5).is_out_of_bounds(600.0));
    assert!(!at(0.0).is_out_of_bounds(600.0));
    assert!(!at(600.0).is_out_of_bounds(600.0));
    assert!(at(600.5).is_out_of_bounds(600.0));
}

#[test]
fn projectile_direction_is_velocity_sign() {
    let sprite = Arc::new(Sprite::solid(4, 10, [255, 0, 0]));
    let mut up = Projectile::new(0.0, 100.0, Arc::clone(&sprite));
    let mut down = Projectile::new(0.0, 100.0, sprite);
    up.advance(-4.0);
    down.advance(4.0);
    assert_eq!(up.y, 96.0);
    assert_eq!(down.y, 104.0);
}

proptest! {
    #[test]
    fn projectile_advance_has_no_drift(y0 in -600i32..600, v in -10i32..=10, k in 0u32..300) {
        let mut p = Projectile::new(0.0, y0 as f32, Arc::new(Sprite::solid(2, 2, [1, 1, 1])));
        for _ in 0..k {
            p.advance(v as f32);
        }
        prop_assert_eq!(p.y, (y0 + k as i32 * v) as f32);
    }

    #[test]
    fn cooldown_stays_in_range(shots in proptest::collection::vec(any::<bool>(), 1..200)) {
        let assets = solid_assets();
        let mut player = Player::new(100.0, 100.0, &assets);
        for shoot in shots {
            let before = player.ship.cooldown;
            let count = player.ship.projectiles.len();
            if shoot {
                let fired = player.shoot();
                prop_assert_eq!(fired, before == 0);
                prop_assert_eq!(player.ship.projectiles.len(), count + fired as usize);
            }
            player.ship.tick_cooldown();
            prop_assert!(player.ship.cooldown <= COOLDOWN_PERIOD);
        }
    }
}

// ── Cooldown & shooting ───────────────────────────────────────────────────────

#[test]
fn shoot_starts_cooldown_and_blocks_second_shot() {
    let assets = solid_assets();
    let mut player = Player::new(100.0, 200.0, &assets);
    assert!(player.shoot());
    assert_eq!(player.ship.cooldown, 1);
    assert!(!player.shoot());
    assert_eq!(player.ship.projectiles.len(), 1);
    let p = &player.ship.projectiles[0];
    assert_eq!((p.x, p.y), (100.0, 200.0));
}

#[test]
fn cooldown_counts_up_then_wraps_to_zero() {
    let assets = solid_assets();
    let mut player = Player::new(0.0, 0.0, &assets);

    // Idle timer stays at zero
    player.ship.tick_cooldown();
    assert_eq!(player.ship.cooldown, 0);

    player.shoot();
    for expected in 2..=COOLDOWN_PERIOD {
        player.ship.tick_cooldown();
        assert_eq!(player.ship.cooldown, expected);
    }
    player.ship.tick_cooldown();
    assert_eq!(player.ship.cooldown, 0);
    assert!(player.shoot());
}

#[test]
fn enemy_bolts_spawn_offset_left() {
    let assets = solid_assets();
    let mut enemy = Enemy::new(200.0, 50.0, EnemyColor::Blue, &assets);
    assert!(enemy.shoot());
    let p = &enemy.ship.projectiles[0];
    assert_eq!(p.x, 200.0 + ENEMY_MUZZLE_OFFSET);
    assert_eq!(p.y, 50.0);
}

// ── Enemy construction ────────────────────────────────────────────────────────

#[test]
fn color_tags_parse() {
    assert_eq!("red".parse::<EnemyColor>().unwrap(), EnemyColor::Red);
    assert_eq!("blue".parse::<EnemyColor>().unwrap(), EnemyColor::Blue);
    assert_eq!("green".parse::<EnemyColor>().unwrap(), EnemyColor::Green);
    for color in EnemyColor::ALL {
        assert_eq!(color.as_str().parse::<EnemyColor>().unwrap(), color);
    }
}

#[test]
fn unknown_color_tag_is_rejected() {
    let assets = solid_assets();
    let err = Enemy::from_tag(0.0, 0.0, "purple", &assets).unwrap_err();
    assert!(matches!(err, GameError::UnknownColor(ref tag) if tag == "purple"));
    assert!(err.to_string().contains("purple"));
}

#[test]
fn enemy_from_tag_picks_palette_sprites() {
    let assets = builtin_assets();
    let enemy = Enemy::from_tag(10.0, 20.0, "green", &assets).unwrap();
    assert_eq!(enemy.color, EnemyColor::Green);
    assert_eq!(enemy.width(), 50.0);
    assert_eq!(enemy.height(), 40.0);
}

#[test]
fn enemy_drifts_down() {
    let assets = solid_assets();
    let mut enemy = Enemy::new(0.0, -100.0, EnemyColor::Red, &assets);
    enemy.drift(1.0);
    enemy.drift(1.0);
    assert_eq!(enemy.ship.y, -98.0);
}

// ── Enemy fire against the player ─────────────────────────────────────────────

#[test]
fn enemy_bolt_hit_damages_player_and_is_spent() {
    let assets = solid_assets();
    let mut player = Player::new(100.0, 400.0, &assets);
    let mut enemy = Enemy::new(100.0, 100.0, EnemyColor::Red, &assets);
    let sprite = Arc::clone(&assets.red.projectile);
    // Lands on the player's top edge after one 4-unit step
    enemy.ship.projectiles.push(Projectile::new(110.0, 396.0, sprite));

    let hits = enemy.update_projectiles(4.0, 600.0, &mut player);

    assert_eq!(hits, 1);
    assert_eq!(player.ship.health, 90);
    assert!(enemy.ship.projectiles.is_empty());

    let bar = player.health_bar();
    let fill = bar.fill.unwrap();
    assert!((fill.width - 0.9 * player.width()).abs() < 1e-4);
    assert_eq!(bar.background.width, player.width());
}

#[test]
fn enemy_bolt_leaving_screen_is_dropped_without_damage() {
    let assets = solid_assets();
    let mut player = Player::new(100.0, 400.0, &assets);
    let mut enemy = Enemy::new(300.0, 100.0, EnemyColor::Red, &assets);
    enemy.ship.projectiles.push(Projectile::new(300.0, 598.0, Arc::clone(&assets.red.projectile)));
    enemy.ship.projectiles.push(Projectile::new(300.0, 200.0, Arc::clone(&assets.red.projectile)));

    let hits = enemy.update_projectiles(4.0, 600.0, &mut player);

    assert_eq!(hits, 0);
    assert_eq!(player.ship.health, 100);
    assert_eq!(enemy.ship.projectiles.len(), 1);
    assert_eq!(enemy.ship.projectiles[0].y, 204.0);
}

// ── Player fire against the roster ────────────────────────────────────────────

#[test]
fn player_bolt_destroys_enemy_without_self_damage() {
    let assets = solid_assets();
    let mut player = Player::new(100.0, 400.0, &assets);
    let mut enemies = vec![
        Enemy::new(100.0, 300.0, EnemyColor::Red, &assets),
        Enemy::new(400.0, 300.0, EnemyColor::Green, &assets),
    ];
    player
        .ship
        .projectiles
        .push(Projectile::new(105.0, 318.0, Arc::clone(&assets.player.projectile)));

    let kills = player.update_projectiles(-4.0, 600.0, &mut enemies);

    assert_eq!(kills, 1);
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].color, EnemyColor::Green);
    assert!(player.ship.projectiles.is_empty());
    assert_eq!(player.ship.health, 100);
}

#[test]
fn player_bolt_destroys_every_enemy_it_overlaps() {
    let assets = solid_assets();
    let mut player = Player::new(100.0, 400.0, &assets);
    let mut enemies = vec![
        Enemy::new(100.0, 300.0, EnemyColor::Red, &assets),
        Enemy::new(102.0, 305.0, EnemyColor::Blue, &assets),
    ];
    player
        .ship
        .projectiles
        .push(Projectile::new(105.0, 314.0, Arc::clone(&assets.player.projectile)));

    // The bolt covers y 310..320, inside both hulls
    assert_eq!(player.update_projectiles(-4.0, 600.0, &mut enemies), 2);
    assert!(enemies.is_empty());
    assert!(player.ship.projectiles.is_empty());
}

#[test]
fn two_bolts_can_destroy_two_enemies_in_one_tick() {
    let assets = solid_assets();
    let mut player = Player::new(100.0, 400.0, &assets);
    let mut enemies = vec![
        Enemy::new(100.0, 300.0, EnemyColor::Red, &assets),
        Enemy::new(300.0, 300.0, EnemyColor::Blue, &assets),
        Enemy::new(500.0, 300.0, EnemyColor::Green, &assets),
    ];
    for x in [105.0, 505.0] {
        player
            .ship
            .projectiles
            .push(Projectile::new(x, 314.0, Arc::clone(&assets.player.projectile)));
    }

    assert_eq!(player.update_projectiles(-4.0, 600.0, &mut enemies), 2);
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].color, EnemyColor::Blue);
}

#[test]
fn second_bolt_passes_an_enemy_already_destroyed_this_tick() {
    let assets = solid_assets();
    let mut player = Player::new(100.0, 400.0, &assets);
    let mut enemies = vec![Enemy::new(100.0, 300.0, EnemyColor::Red, &assets)];
    for y in [314.0, 318.0] {
        player
            .ship
            .projectiles
            .push(Projectile::new(105.0, y, Arc::clone(&assets.player.projectile)));
    }

    assert_eq!(player.update_projectiles(-4.0, 600.0, &mut enemies), 1);
    assert!(enemies.is_empty());
    assert_eq!(player.ship.projectiles.len(), 1);
    assert_eq!(player.ship.projectiles[0].y, 314.0);
}

// ── Health bar ────────────────────────────────────────────────────────────────

#[test]
fn health_bar_sits_below_sprite() {
    let assets = solid_assets();
    let player = Player::new(100.0, 400.0, &assets);
    let bar = player.health_bar();
    assert_eq!(bar.background.x, 100.0);
    assert_eq!(bar.background.y, 400.0 + 30.0 + 10.0);
    assert_eq!(bar.background.height, 10.0);
    assert_eq!(bar.fill, Some(bar.background));
}

#[test]
fn health_bar_draws_no_fill_when_health_is_gone() {
    let assets = solid_assets();
    let mut player = Player::new(0.0, 0.0, &assets);
    player.ship.health = 0;
    assert!(player.health_bar().fill.is_none());
    player.ship.health = -20;
    assert!(player.health_bar().fill.is_none());
}

// ── Session ───────────────────────────────────────────────────────────────────

#[test]
fn session_clone_is_independent() {
    let assets = solid_assets();
    let original = fresh_session(&assets);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.ship.x = 99.0;
    cloned.lives = 1;
    cloned.enemies.push(Enemy::new(5.0, 5.0, EnemyColor::Red, &assets));

    assert_eq!(original.player.ship.x, 275.0);
    assert_eq!(original.lives, 5);
    assert!(original.enemies.is_empty());
}
