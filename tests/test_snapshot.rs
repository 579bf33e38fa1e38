use lantern_shooter::compute::init_state;
use lantern_shooter::config::Tuning;
use lantern_shooter::entities::*;
use lantern_shooter::snapshot::{Facing, Snapshot, SpriteKind};

#[test]
fn fresh_game_shows_only_the_player() {
    let snap = Snapshot::capture(&init_state(Tuning::default()));
    assert_eq!(snap.sprites.len(), 1);
    assert_eq!(snap.sprites[0].kind, SpriteKind::Player);
    assert_eq!(snap.player.hp, 100.0);
    assert_eq!(snap.player.xp_next, 50);
    assert!(!snap.in_boss_fight);
    assert_eq!(snap.boss_hp, None);
    assert_eq!(snap.status, GameStatus::Playing);
    assert_eq!((snap.width, snap.height), (900.0, 700.0));
}

#[test]
fn sprites_are_layered_back_to_front() {
    let mut s = init_state(Tuning::default());
    s.supplies
        .push(Supply::centered(SupplyKind::Heal, 100.0, 100.0));
    s.enemies.push(Enemy::normal(200.0, 3.0, 0));
    s.boss = Some(Enemy::boss(10, &s.tuning, 0));
    s.bullets.push(Bullet::laser(300.0, 300.0, 60));
    s.enemy_bullets.push(EnemyBullet::centered(400.0, 400.0));

    let kinds: Vec<SpriteKind> = Snapshot::capture(&s)
        .sprites
        .iter()
        .map(|v| v.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SpriteKind::Supply(SupplyKind::Heal),
            SpriteKind::Enemy,
            SpriteKind::Boss,
            SpriteKind::Laser,
            SpriteKind::EnemyBullet,
            SpriteKind::Player,
        ]
    );
}

#[test]
fn boss_hud_and_facing() {
    let mut s = init_state(Tuning::default());
    let mut boss = Enemy::boss(10, &s.tuning, 0);
    boss.vx = -2.0;
    s.boss = Some(boss);

    let snap = Snapshot::capture(&s);
    assert!(snap.in_boss_fight);
    assert_eq!(snap.boss_hp, Some(1600));
    let view = snap
        .sprites
        .iter()
        .find(|v| v.kind == SpriteKind::Boss)
        .unwrap();
    assert_eq!(view.facing, Facing::Left);
}

#[test]
fn pending_upgrades_are_visible() {
    let mut s = init_state(Tuning::default());
    s.status = GameStatus::LevelingUp;
    s.pending_upgrades = 2;
    let snap = Snapshot::capture(&s);
    assert_eq!(snap.status, GameStatus::LevelingUp);
    assert_eq!(snap.pending_upgrades, 2);
}
