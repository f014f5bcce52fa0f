use one_hit_man::combat::*;
use one_hit_man::entities::*;
use one_hit_man::projectile::SPLIT_AGE;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn arena() -> Arena {
    Arena { width: 1200.0, height: 800.0 }
}

fn make_boss() -> BossState {
    let mut rng = StdRng::seed_from_u64(42);
    BossState::new(600.0, 133.0, 1, &mut rng)
}

fn active(x: f32, y: f32, vx: f32, vy: f32, kind: ProjectileKind) -> Projectile {
    let mut p = Projectile::new(x, y, vx, vy, kind);
    p.warning_timer = 0.0;
    p
}

fn damaging_beam(position: f32, width: f32, orientation: BeamOrientation) -> BeamHazard {
    let mut beam = BeamHazard::new(position, width, orientation);
    beam.update(100.0);
    beam
}

fn open_window() -> VulnerabilityWindow {
    let mut window = VulnerabilityWindow::default();
    window.open_for(600.0);
    window
}

// ── Loss test ─────────────────────────────────────────────────────────────────

#[test]
fn damaging_horizontal_beam_defeats_player() {
    let beam = damaging_beam(500.0, 60.0, BeamOrientation::Horizontal);
    let warning = Projectile::new(100.0, 510.0, 0.0, 0.0, ProjectileKind::Normal);
    assert!(player_defeated(100.0, 510.0, &[warning], &[beam.clone()]));
    assert!(player_defeated(100.0, 510.0, &[], &[beam]));
}

#[test]
fn warning_hazards_are_harmless() {
    let beam = BeamHazard::new(500.0, 60.0, BeamOrientation::Horizontal);
    let warning = Projectile::new(100.0, 500.0, 0.0, 0.0, ProjectileKind::Normal);
    assert!(!player_defeated(100.0, 500.0, &[warning], &[beam]));
}

#[test]
fn projectile_hit_skips_inactive_entries() {
    let projectiles = vec![
        Projectile::new(50.0, 50.0, 0.0, 0.0, ProjectileKind::Normal),
        active(200.0, 200.0, 0.0, 0.0, ProjectileKind::Normal),
        active(50.0, 51.0, 0.0, 0.0, ProjectileKind::Large),
    ];
    assert_eq!(projectile_hit(50.0, 50.0, &projectiles), Some(2));
    assert_eq!(projectile_hit(400.0, 400.0, &projectiles), None);
}

// ── Win test ──────────────────────────────────────────────────────────────────

#[test]
fn ramming_only_wins_while_window_open() {
    let boss = make_boss();
    let player = Player::new(boss.x + 20.0, boss.y, 0);
    assert!(!boss_defeated(&player, &boss, &VulnerabilityWindow::default()));
    assert!(boss_defeated(&player, &boss, &open_window()));
}

#[test]
fn boss_contact_reach_is_half_sizes() {
    let boss = make_boss(); // size 70 → reach 10 + 35
    let window = open_window();
    assert!(boss_defeated(&Player::new(boss.x + 44.0, boss.y, 0), &boss, &window));
    assert!(!boss_defeated(&Player::new(boss.x + 46.0, boss.y, 0), &boss, &window));
}

// ── Resolution order ──────────────────────────────────────────────────────────

#[test]
fn boss_contact_beats_same_tick_hit() {
    let boss = make_boss();
    let player = Player::new(boss.x, boss.y + 30.0, 0);
    let projectiles = vec![active(player.x, player.y, 0.0, 0.0, ProjectileKind::Normal)];
    let beams = vec![damaging_beam(player.x, 40.0, BeamOrientation::Vertical)];

    let contact = resolve(&player, &boss, &projectiles, &beams, &open_window());
    assert_eq!(contact, Contact::Boss);
    assert_eq!(contact.outcome(), Outcome::BossDefeated);

    let contact = resolve(&player, &boss, &projectiles, &beams, &VulnerabilityWindow::default());
    assert_eq!(contact, Contact::Projectile(0));
    assert_eq!(contact.outcome(), Outcome::PlayerDefeated);
}

#[test]
fn beam_contact_after_projectiles() {
    let boss = make_boss();
    let player = Player::new(300.0, 600.0, 0);
    let beams = vec![
        damaging_beam(900.0, 40.0, BeamOrientation::Vertical),
        damaging_beam(600.0, 40.0, BeamOrientation::Horizontal),
    ];
    let contact = resolve(&player, &boss, &[], &beams, &VulnerabilityWindow::default());
    assert_eq!(contact, Contact::Beam(1));
}

#[test]
fn nothing_touched_is_survival() {
    let boss = make_boss();
    let player = Player::new(300.0, 600.0, 0);
    let contact = resolve(&player, &boss, &[], &[], &open_window());
    assert_eq!(contact, Contact::None);
    assert_eq!(contact.outcome(), Outcome::Survive);
}

// ── Vulnerability window ──────────────────────────────────────────────────────

#[test]
fn window_duration_is_capped() {
    let mut window = VulnerabilityWindow::default();
    window.open_for(5000.0);
    assert!(window.open);
    assert_eq!(window.timer, VULNERABILITY_MAX_TICKS);
    assert_eq!(window.time_ratio(), 1.0);
}

#[test]
fn zero_duration_does_not_open() {
    let mut window = VulnerabilityWindow::default();
    window.open_for(0.0);
    assert!(!window.open);
}

#[test]
fn window_closes_when_timer_runs_out() {
    let mut window = VulnerabilityWindow::default();
    window.open_for(3.0);
    assert!(!window.tick(1.0));
    assert!(!window.tick(1.0));
    assert!(window.tick(1.0));
    assert!(!window.open);
    assert_eq!(window.timer, 0.0);
    // Closed windows stay closed.
    assert!(!window.tick(1.0));
}

#[test]
fn time_ratio_tracks_remaining_fraction() {
    let mut window = VulnerabilityWindow::default();
    window.open_for(600.0);
    assert!((window.time_ratio() - 0.5).abs() < 1e-6);
}

// ── advance ───────────────────────────────────────────────────────────────────

#[test]
fn advance_sweeps_off_screen_projectiles() {
    let mut projectiles = vec![
        active(-19.0, 400.0, -5.0, 0.0, ProjectileKind::Normal),
        active(600.0, 400.0, 1.0, 0.0, ProjectileKind::Normal),
        active(5.0, 400.0, -30.0, 0.0, ProjectileKind::Bouncing),
    ];
    let mut beams = Vec::new();
    let report = advance(&mut projectiles, &mut beams, (0.0, 0.0), &arena(), 1.0);
    assert_eq!(report.off_screen, 1);
    assert_eq!(projectiles.len(), 2);
    assert_eq!(projectiles[0].x, 601.0);
}

#[test]
fn advance_bursts_splitters_once() {
    let mut parent = active(600.0, 400.0, 2.5, 0.0, ProjectileKind::splitting());
    parent.age = SPLIT_AGE;
    let mut projectiles = vec![parent];
    let mut beams = Vec::new();

    let report = advance(&mut projectiles, &mut beams, (0.0, 0.0), &arena(), 1.0);
    assert_eq!(report.splits, 1);
    assert_eq!(report.off_screen, 0);
    assert_eq!(projectiles.len(), 3);
    assert!(projectiles.iter().all(|p| p.kind == ProjectileKind::Normal));

    let report = advance(&mut projectiles, &mut beams, (0.0, 0.0), &arena(), 1.0);
    assert_eq!(report.splits, 0);
    assert_eq!(projectiles.len(), 3);
}

#[test]
fn advance_drops_finished_beams() {
    let mut projectiles = Vec::new();
    let mut beams = vec![
        damaging_beam(300.0, 40.0, BeamOrientation::Vertical),
        BeamHazard::new(500.0, 40.0, BeamOrientation::Vertical),
    ];
    beams[0].update(49.0); // elapsed 149

    let report = advance(&mut projectiles, &mut beams, (0.0, 0.0), &arena(), 1.0);
    assert_eq!(report.beams_expired, 1);
    assert_eq!(beams.len(), 1);
    assert_eq!(beams[0].position, 500.0);
}
