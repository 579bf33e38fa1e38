use lantern_shooter::compute::collision::{apply_supply, hits_on_player, player_attacks, take_hit};
use lantern_shooter::compute::init_state;
use lantern_shooter::config::Tuning;
use lantern_shooter::entities::*;
use lantern_shooter::events::{EffectColor, FrameEvent};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(Tuning {
        enemy_spawn_chance: 0.0,
        ..Tuning::default()
    })
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Both collision passes, in tick order.
fn resolve(state: &mut GameState, rng: &mut StdRng) {
    player_attacks(state, rng);
    hits_on_player(state);
}

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-3, "{a} != {b}");
}

fn lantern_at(x: f32, y: f32) -> Enemy {
    let mut e = Enemy::normal(x, 3.0, 0);
    e.bounds.y = y;
    e
}

// ── Supplies ──────────────────────────────────────────────────────────────────

#[test]
fn weapon_supply_adds_barrel_then_laser() {
    let tuning = Tuning::default();
    let mut p = Player::new(&tuning);
    apply_supply(&mut p, SupplyKind::Weapon, &tuning);
    assert_eq!(p.bullet_count, 2);
    apply_supply(&mut p, SupplyKind::Weapon, &tuning);
    assert_eq!(p.bullet_count, 3);
    assert!(!p.is_laser);
    apply_supply(&mut p, SupplyKind::Weapon, &tuning);
    assert_eq!(p.bullet_count, 3);
    assert!(p.is_laser);
}

#[test]
fn heal_supply_caps_at_max_hp() {
    let tuning = Tuning::default();
    let mut p = Player::new(&tuning);
    p.hp = 30.0;
    apply_supply(&mut p, SupplyKind::Heal, &tuning);
    assert_close(p.hp, 80.0);
    apply_supply(&mut p, SupplyKind::Heal, &tuning);
    assert_close(p.hp, 100.0);
}

#[test]
fn shield_supply_raises_and_refills() {
    let tuning = Tuning::default();
    let mut p = Player::new(&tuning);
    p.shield = 5.0;
    apply_supply(&mut p, SupplyKind::Shield, &tuning);
    assert_close(p.max_shield, 60.0);
    assert_close(p.shield, 60.0);
}

#[test]
fn supply_pickup_resolves_before_damage() {
    let mut s = make_state();
    s.player.hp = 50.0;
    s.supplies
        .push(Supply::centered(SupplyKind::Heal, 450.0, 600.0));
    s.enemy_bullets.push(EnemyBullet::centered(450.0, 600.0));
    resolve(&mut s, &mut seeded_rng());

    assert!(s.supplies.is_empty());
    assert!(s.enemy_bullets.is_empty());
    assert_close(s.player.hp, 100.0);
    assert_close(s.player.shield, 30.0);
    assert!(s.events.iter().any(|e| matches!(
        e,
        FrameEvent::Explosion {
            color: EffectColor::Gold,
            count: 20,
            size: 5,
            ..
        }
    )));
}

#[test]
fn distant_supply_is_left_alone() {
    let mut s = make_state();
    s.supplies
        .push(Supply::centered(SupplyKind::Weapon, 100.0, 100.0));
    resolve(&mut s, &mut seeded_rng());
    assert_eq!(s.supplies.len(), 1);
    assert_eq!(s.player.bullet_count, 1);
}

// ── Bullets vs lanterns ───────────────────────────────────────────────────────

#[test]
fn standard_bullet_kills_and_is_spent() {
    let mut s = make_state();
    s.enemies.push(lantern_at(300.0, 300.0));
    s.bullets.push(Bullet::standard(322.0, 330.0, 30));
    resolve(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 10);
    assert_eq!(s.player.xp, 35);
    assert_eq!(
        s.events
            .iter()
            .filter(|e| matches!(
                e,
                FrameEvent::Explosion {
                    color: EffectColor::Red,
                    ..
                }
            ))
            .count(),
        1
    );
}

#[test]
fn standard_bullet_hits_every_overlapping_lantern() {
    let mut s = make_state();
    // Two lanterns stacked under one bullet
    s.enemies.push(lantern_at(300.0, 300.0));
    s.enemies.push(lantern_at(305.0, 310.0));
    s.bullets.push(Bullet::standard(322.0, 330.0, 30));
    resolve(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 20);
}

#[test]
fn laser_pierces_and_levels_up_once() {
    let mut s = make_state();
    s.enemies.push(lantern_at(300.0, 200.0));
    s.enemies.push(lantern_at(300.0, 320.0));
    s.bullets.push(Bullet::laser(322.0, 300.0, 60)); // spans y 250..350
    resolve(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.score, 20);
    // 35 + 35 = 70: level 2 with 20 carried over
    assert_eq!(s.player.level, 2);
    assert_eq!(s.player.xp, 20);
    assert_eq!(s.pending_upgrades, 1);
}

#[test]
fn edge_contact_is_not_a_hit() {
    let mut s = make_state();
    s.enemies.push(lantern_at(300.0, 300.0));
    // Bullet spans x 290..300, touching the lantern's left edge
    s.bullets.push(Bullet::standard(295.0, 320.0, 30));
    resolve(&mut s, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.score, 0);
}

// ── Bullets vs boss ───────────────────────────────────────────────────────────

fn boss_on_screen(s: &mut GameState, hp: i32) {
    let mut boss = Enemy::boss(10, &s.tuning, 0);
    boss.bounds = Bounds::from_center(450.0, 200.0, BOSS_SIZE);
    boss.hp = hp;
    s.boss = Some(boss);
}

#[test]
fn laser_chips_boss_each_tick() {
    let mut s = make_state();
    boss_on_screen(&mut s, 1000);
    let mut rng = seeded_rng();
    for _ in 0..5 {
        s.bullets.clear();
        s.bullets.push(Bullet::laser(450.0, 220.0, 60));
        resolve(&mut s, &mut rng);
        assert_eq!(s.bullets.len(), 1);
    }
    assert_eq!(s.boss.as_ref().unwrap().hp, 700);
    assert!(s.in_boss_fight());
}

#[test]
fn standard_bullets_are_consumed_by_boss() {
    let mut s = make_state();
    boss_on_screen(&mut s, 1000);
    s.bullets.push(Bullet::standard(430.0, 220.0, 30));
    s.bullets.push(Bullet::standard(470.0, 220.0, 30));
    s.bullets.push(Bullet::standard(100.0, 220.0, 30)); // misses
    resolve(&mut s, &mut seeded_rng());
    assert_eq!(s.boss.as_ref().unwrap().hp, 940);
    assert_eq!(s.bullets.len(), 1);
    assert_close(s.bullets[0].bounds.center_x(), 100.0);
}

#[test]
fn boss_defeat_rewards_and_drops_weapon() {
    let mut s = make_state();
    s.next_boss_milestone = 10;
    boss_on_screen(&mut s, 30);
    s.bullets.push(Bullet::standard(450.0, 220.0, 30));
    resolve(&mut s, &mut seeded_rng());

    assert!(s.boss.is_none());
    assert_eq!(s.score, 2000);
    assert_eq!(s.next_boss_milestone, 15);
    assert_eq!(s.supplies.len(), 1);
    assert_eq!(s.supplies[0].kind, SupplyKind::Weapon);
    assert_close(s.supplies[0].bounds.center_x(), 450.0);
    assert_close(s.supplies[0].bounds.center_y(), 200.0);

    assert!(s
        .events
        .contains(&FrameEvent::BossDefeated { x: 450.0, y: 200.0 }));
    assert!(s
        .events
        .iter()
        .any(|e| matches!(e, FrameEvent::Firework { .. })));
    let big_bursts = s
        .events
        .iter()
        .filter(|e| matches!(e, FrameEvent::Explosion { count: 25, .. }))
        .count();
    assert_eq!(big_bursts, 3);
}

#[test]
fn boss_body_does_not_hurt_player() {
    let mut s = make_state();
    let mut boss = Enemy::boss(10, &s.tuning, 0);
    boss.bounds = Bounds::from_center(450.0, 600.0, BOSS_SIZE);
    s.boss = Some(boss);
    resolve(&mut s, &mut seeded_rng());
    assert_close(s.player.hp, 100.0);
    assert_close(s.player.shield, 50.0);
    assert!(s.boss.is_some());
}

// ── Hits on the player ────────────────────────────────────────────────────────

#[test]
fn attack_pass_leaves_the_player_untouched() {
    let mut s = make_state();
    s.enemy_bullets.push(EnemyBullet::centered(450.0, 600.0));
    s.enemies.push(lantern_at(430.0, 570.0));
    player_attacks(&mut s, &mut seeded_rng());
    assert_close(s.player.shield, 50.0);
    assert_eq!(s.enemy_bullets.len(), 1);
    assert_eq!(s.enemies.len(), 1);

    hits_on_player(&mut s);
    assert_close(s.player.shield, 10.0);
}

#[test]
fn shield_absorbs_before_hp() {
    let tuning = Tuning::default();
    let mut p = Player::new(&tuning);
    p.shield_regen_timer = 500;
    take_hit(&mut p, 20.0);
    assert_close(p.shield, 30.0);
    assert_close(p.hp, 100.0);
    assert_eq!(p.shield_regen_timer, 0);
}

#[test]
fn shield_overflow_spills_onto_hp() {
    let tuning = Tuning::default();
    let mut p = Player::new(&tuning);
    p.shield = 10.0;
    take_hit(&mut p, 20.0);
    assert_close(p.shield, 0.0);
    assert_close(p.hp, 90.0);
}

#[test]
fn hp_never_goes_negative() {
    let tuning = Tuning::default();
    let mut p = Player::new(&tuning);
    p.shield = 0.0;
    p.hp = 5.0;
    take_hit(&mut p, 20.0);
    assert_close(p.hp, 0.0);
}

#[test]
fn bullet_and_ram_in_one_tick_hit_twice() {
    let mut s = make_state();
    s.enemy_bullets.push(EnemyBullet::centered(450.0, 600.0));
    s.enemy_bullets.push(EnemyBullet::centered(460.0, 590.0));
    s.enemies.push(lantern_at(430.0, 570.0));
    resolve(&mut s, &mut seeded_rng());

    // Two bullets count as one hit; the ram is a second one
    assert_close(s.player.shield, 10.0);
    assert_close(s.player.hp, 100.0);
    assert!(s.enemy_bullets.is_empty());
    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 0);
}
