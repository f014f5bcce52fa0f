/// Run orchestration.
///
/// `tick` takes an immutable reference to the current `GameState` (plus the
/// held input, the elapsed-time multiplier and an RNG handle) and returns a
/// brand-new `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::combat::{self, Contact};
use crate::config::GameConfig;
use crate::entities::{
    BossState, GameState, GameStatus, Player, PlayerInput, Upgrades, VulnerabilityWindow,
};

// ── Upgrade tables ───────────────────────────────────────────────────────────

/// Bullets never get slower than half speed, however many levels are bought.
pub const MIN_BULLET_SLOW_FACTOR: f32 = 0.5;

/// One-shot velocity factor applied to each projectile as it spawns.
pub fn bullet_slow_factor(upgrades: &Upgrades, per_level: f32) -> f32 {
    (1.0 - upgrades.bullet_slow as f32 * per_level).clamp(MIN_BULLET_SLOW_FACTOR, 1.0)
}

/// Chance that a projectile hit is shrugged off.
pub fn lucky_dodge_chance(upgrades: &Upgrades, per_level: f32, cap: f32) -> f32 {
    (upgrades.lucky_dodge as f32 * per_level).min(cap).max(0.0)
}

/// Negative or non-finite elapsed time counts as no time at all. Capping
/// long frames is the caller's choice.
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.max(0.0)
    } else {
        0.0
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh fight for `level` (clamped to >= 1) using the config's arena,
/// upgrades and rules.
pub fn init_state(config: &GameConfig, level: i32, rng: &mut impl Rng) -> GameState {
    let arena = config.arena();
    let boss = BossState::new(arena.width / 2.0, arena.height / 6.0, level, rng);
    let player = Player::new(
        arena.width / 2.0,
        (arena.height - 100.0).max(0.0),
        config.upgrades.speed,
    );
    log::info!(
        "Level {} start: {} (heavy: {}, patterns: {})",
        boss.level,
        boss.vehicle_name(),
        boss.heavy,
        boss.pattern_unlock
    );
    GameState {
        arena,
        player,
        boss,
        projectiles: Vec::new(),
        beams: Vec::new(),
        vulnerability: VulnerabilityWindow::default(),
        closed_timer: 0.0,
        upgrades: config.upgrades,
        rules: config.rules(),
        status: GameStatus::Playing,
        frame: 0,
        survival_ticks: 0.0,
        reward: 0,
        lucky_dodges: 0,
    }
}

// ── Per-frame tick (nearly pure: RNG is injected) ──────────────────────────

/// Advance the fight by one frame.  `dt` is the elapsed-time multiplier
/// (1.0 at the nominal 60 Hz).  A finished fight is returned unchanged.
pub fn tick(
    state: &GameState,
    input: PlayerInput,
    dt: f32,
    rng: &mut impl Rng,
) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let dt = sanitize_dt(dt);
    let mut next = state.clone();
    next.frame += 1;
    next.survival_ticks += dt;
    let arena = next.arena;

    // ── 1. Player ────────────────────────────────────────────────────────────
    next.player.update(input, &arena, dt);
    let aim = next.player.position();

    // ── 2. Boss moves and fires ──────────────────────────────────────────────
    let first_new = next.projectiles.len();
    next.boss
        .update(&mut next.projectiles, &mut next.beams, aim, &arena, dt, rng);

    let slow = bullet_slow_factor(&next.upgrades, next.rules.bullet_slow_per_level);
    if slow < 1.0 {
        for projectile in &mut next.projectiles[first_new..] {
            projectile.apply_slow(slow);
        }
    }

    // ── 3. Projectiles and beams ─────────────────────────────────────────────
    combat::advance(&mut next.projectiles, &mut next.beams, aim, &arena, dt);

    // ── 4. Vulnerability window ──────────────────────────────────────────────
    update_vulnerability(&mut next, dt);

    // ── 5. Contacts ──────────────────────────────────────────────────────────
    let contact = combat::resolve(
        &next.player,
        &next.boss,
        &next.projectiles,
        &next.beams,
        &next.vulnerability,
    );
    match contact {
        Contact::None => {}
        Contact::Boss => {
            next.status = GameStatus::Victory;
            next.reward = next.boss.money_reward();
            log::info!(
                "Boss L{} defeated at frame {}, reward {}",
                next.boss.level,
                next.frame,
                next.reward
            );
        }
        Contact::Projectile(index) => {
            let projectile = next.projectiles.remove(index);
            let chance = lucky_dodge_chance(
                &next.upgrades,
                next.rules.lucky_dodge_per_level,
                next.rules.lucky_dodge_cap,
            );
            if chance > 0.0 && rng.gen::<f32>() < chance {
                next.player.trigger_flicker();
                next.lucky_dodges += 1;
                log::debug!("Lucky dodge through a {} projectile", projectile.kind.label());
                // The dodge covers that projectile only; a live beam still kills.
                if combat::beam_hit(next.player.x, next.player.y, &next.beams).is_some() {
                    next.status = GameStatus::Defeat;
                    log::info!("Player caught in a beam at frame {}", next.frame);
                }
            } else {
                next.status = GameStatus::Defeat;
                log::info!(
                    "Player hit by a {} projectile at frame {}",
                    projectile.kind.label(),
                    next.frame
                );
            }
        }
        Contact::Beam(_) => {
            next.status = GameStatus::Defeat;
            log::info!("Player caught in a beam at frame {}", next.frame);
        }
    }

    log::trace!(
        "frame {}: {} projectiles, {} beams, window open: {}",
        next.frame,
        next.projectiles.len(),
        next.beams.len(),
        next.vulnerability.open
    );
    next
}

/// The timing rule for the window: closed for `vulnerability_interval`
/// ticks, then open for `vulnerability_duration`.
fn update_vulnerability(state: &mut GameState, dt: f32) {
    if state.vulnerability.open {
        if state.vulnerability.tick(dt) {
            state.closed_timer = 0.0;
            log::debug!("Vulnerability window closed");
        }
        return;
    }

    state.closed_timer += dt;
    if state.closed_timer >= state.rules.vulnerability_interval {
        state.closed_timer = 0.0;
        state.vulnerability.open_for(state.rules.vulnerability_duration);
        log::debug!(
            "Vulnerability window open for {} ticks",
            state.vulnerability.timer
        );
    }
}
