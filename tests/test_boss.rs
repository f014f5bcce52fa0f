use one_hit_man::boss::*;
use one_hit_man::entities::*;
use one_hit_man::patterns::Pattern;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn arena() -> Arena {
    Arena { width: 1200.0, height: 800.0 }
}

fn make_boss(level: i32, rng: &mut StdRng) -> BossState {
    BossState::new(600.0, 133.0, level, rng)
}

/// Run `ticks` boss updates with the player parked at the bottom centre.
fn run(
    boss: &mut BossState,
    ticks: u32,
    rng: &mut StdRng,
) -> (Vec<Projectile>, Vec<BeamHazard>) {
    let mut projectiles = Vec::new();
    let mut beams = Vec::new();
    for _ in 0..ticks {
        boss.update(&mut projectiles, &mut beams, (600.0, 700.0), &arena(), 1.0, rng);
    }
    (projectiles, beams)
}

// ── Level tables ──────────────────────────────────────────────────────────────

#[test]
fn heavy_level_three_boss() {
    let mut rng = seeded_rng();
    let boss = make_boss(3, &mut rng);
    assert!(boss.heavy);
    assert_eq!(boss.size, 150.0);
    assert_eq!(boss.money_reward(), 1100);
}

#[test]
fn regular_boss_is_smaller() {
    let mut rng = seeded_rng();
    let boss = make_boss(4, &mut rng);
    assert!(!boss.heavy);
    assert_eq!(boss.size, 70.0);
    assert_eq!(boss.money_reward(), 300);
}

#[test]
fn pattern_unlock_grows_every_third_level() {
    assert_eq!(pattern_unlock_count(1), 3);
    assert_eq!(pattern_unlock_count(3), 3);
    assert_eq!(pattern_unlock_count(4), 6);
    assert_eq!(pattern_unlock_count(6), 6);
    assert_eq!(pattern_unlock_count(7), 9);
    assert_eq!(pattern_unlock_count(10), 12);
    assert_eq!(pattern_unlock_count(40), 12);
    assert_eq!(pattern_unlock_count(0), 1);
}

#[test]
fn intervals_shrink_to_their_floor() {
    assert_eq!(shoot_interval(1), 55.0);
    assert_eq!(shoot_interval(8), 20.0);
    assert_eq!(shoot_interval(500), 20.0);
    assert_eq!(beam_interval(1), 290.0);
    assert_eq!(beam_interval(12), 180.0);
    assert_eq!(beam_interval(500), 180.0);
}

#[test]
fn beam_count_and_width() {
    assert_eq!(beam_count(2), 1);
    assert_eq!(beam_count(5), 2);
    assert_eq!(beam_count(8), 3);
    assert_eq!(beam_width(2), 50.0);
}

#[test]
fn negative_level_becomes_one() {
    assert_eq!(clamp_level(-5), 1);
    assert_eq!(clamp_level(0), 1);
    let mut rng = seeded_rng();
    let boss = make_boss(-3, &mut rng);
    assert_eq!(boss.level, 1);
    assert_eq!(boss.pattern_unlock, 3);
}

#[test]
fn huge_levels_saturate_instead_of_overflowing() {
    assert_eq!(clamp_level(i32::MAX), MAX_LEVEL);
    assert_eq!(money_reward(u32::MAX, true), u32::MAX);
    assert_eq!(money_reward(u32::MAX, false), u32::MAX);
    assert_eq!(pattern_unlock_count(u32::MAX), 12);
    assert_eq!(polygon_sides(u32::MAX), 20);

    let mut rng = seeded_rng();
    let boss = make_boss(30_000_000, &mut rng);
    assert_eq!(boss.level, MAX_LEVEL);
    assert_eq!(boss.money_reward(), 500 + 999 * 200);
}

#[test]
fn vehicle_names_alternate() {
    assert_eq!(vehicle_class(1), VehicleClass::Plane);
    assert_eq!(vehicle_class(2), VehicleClass::Helicopter);
    assert_eq!(vehicle_name(1), "[PLANE] MIG-15");
    assert_eq!(vehicle_name(2), "[HELI] UH-1 HUEY");
    assert_eq!(vehicle_name(3), "[PLANE] MIG-21");
    assert_eq!(vehicle_name(21), "[PLANE] MIG-15");
}

#[test]
fn polygon_sides_capped() {
    assert_eq!(polygon_sides(1), 3);
    assert_eq!(polygon_sides(30), 20);
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_boss_faces_down_and_is_idle() {
    let mut rng = seeded_rng();
    let boss = make_boss(5, &mut rng);
    assert!((boss.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!((boss.vx, boss.vy), (0.0, 0.0));
    assert!(boss.pattern_index < boss.pattern_unlock);
    assert_eq!(boss.shoot_timer, 0.0);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn level_one_fires_once_after_55_ticks() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(1, &mut rng);
    boss.pattern_index = 0;

    let (projectiles, _) = run(&mut boss, 54, &mut rng);
    assert!(projectiles.is_empty());
    assert_eq!(boss.pattern_index, 0);

    let (projectiles, _) = run(&mut boss, 1, &mut rng);
    assert_eq!(boss.pattern_index, 1);
    assert_eq!(boss.current_pattern(), Pattern::Ring);
    assert_eq!(projectiles.len(), 10);
    assert_eq!(boss.shoot_timer, 0.0);
}

#[test]
fn pattern_index_cycles_within_unlock() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(4, &mut rng);
    let mut seen = Vec::new();
    for _ in 0..12 {
        let mut projectiles = Vec::new();
        let mut beams = Vec::new();
        while projectiles.is_empty() {
            boss.update(&mut projectiles, &mut beams, (600.0, 700.0), &arena(), 1.0, &mut rng);
        }
        assert!(boss.pattern_index < boss.pattern_unlock);
        seen.push(boss.pattern_index);
    }
    for pair in seen.windows(2) {
        assert_eq!(pair[1], (pair[0] + 1) % 6);
    }
}

#[test]
fn boss_only_appends_projectiles() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(2, &mut rng);
    let mut projectiles = vec![Projectile::new(1.0, 1.0, 0.0, 0.0, ProjectileKind::Normal)];
    let mut beams = Vec::new();
    for _ in 0..200 {
        boss.update(&mut projectiles, &mut beams, (600.0, 700.0), &arena(), 1.0, &mut rng);
    }
    assert!(projectiles.len() > 1);
    assert_eq!((projectiles[0].x, projectiles[0].y), (1.0, 1.0));
}

// ── Beams ─────────────────────────────────────────────────────────────────────

#[test]
fn level_one_never_spawns_beams() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(1, &mut rng);
    let (_, beams) = run(&mut boss, 1000, &mut rng);
    assert!(beams.is_empty());
}

#[test]
fn level_two_spawns_beams_inside_the_arena() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(2, &mut rng);
    let (_, beams) = run(&mut boss, 600, &mut rng);
    assert!(!beams.is_empty());
    for beam in &beams {
        assert_eq!(beam.width, 50.0);
        match beam.orientation {
            BeamOrientation::Vertical => {
                assert!(beam.position >= 240.0 && beam.position <= 960.0)
            }
            BeamOrientation::Horizontal => {
                assert!(beam.position >= 240.0 && beam.position <= 640.0)
            }
        }
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[test]
fn speed_never_exceeds_level_cap() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(7, &mut rng);
    let cap = max_speed_for(7);
    let mut projectiles = Vec::new();
    let mut beams = Vec::new();
    for _ in 0..2000 {
        boss.update(&mut projectiles, &mut beams, (600.0, 700.0), &arena(), 1.0, &mut rng);
        assert!(boss.speed() <= cap + 1e-4);
        projectiles.clear();
    }
}

#[test]
fn boss_stays_in_the_upper_third() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(1, &mut rng);
    let mut projectiles = Vec::new();
    let mut beams = Vec::new();
    for _ in 0..2000 {
        boss.update(&mut projectiles, &mut beams, (600.0, 700.0), &arena(), 1.0, &mut rng);
        assert!(boss.x >= boss.size && boss.x <= 1200.0 - boss.size);
        assert!(boss.y >= boss.size && boss.y <= 800.0 / 3.0);
        projectiles.clear();
    }
}

#[test]
fn boss_moves_toward_its_target() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(1, &mut rng);
    boss.target_x = 900.0;
    boss.target_y = 200.0;
    boss.retarget_after = 1000.0;
    run(&mut boss, 30, &mut rng);
    assert!(boss.x > 600.0);
    assert!(boss.y > 133.0);
}

#[test]
fn rotation_settles_on_target_heading() {
    let mut rng = seeded_rng();
    let mut boss = make_boss(1, &mut rng);
    // Target straight right: heading 0, a quarter turn from facing down.
    boss.target_x = 1100.0;
    boss.target_y = 133.0;
    boss.retarget_after = 1000.0;
    run(&mut boss, 40, &mut rng);
    assert!(boss.rotation.abs() < 0.2);
}

#[test]
fn tiny_arena_does_not_panic() {
    let mut rng = seeded_rng();
    let tiny = Arena { width: 50.0, height: 50.0 };
    let mut boss = BossState::new(25.0, 10.0, 3, &mut rng);
    let mut projectiles = Vec::new();
    let mut beams = Vec::new();
    for _ in 0..300 {
        boss.update(&mut projectiles, &mut beams, (25.0, 40.0), &tiny, 1.0, &mut rng);
    }
    assert!(boss.x.is_finite() && boss.y.is_finite());
}
