/// Combat resolver: advances the shared projectile and beam collections,
/// answers the win/loss questions, and runs the vulnerability window.
///
/// Resolution order is boss contact first, then projectiles, then beams:
/// ramming the boss during the window is the win, even if a bullet lands the
/// same tick.

use crate::entities::{
    Arena, BeamHazard, BossState, Player, Projectile, ProjectileKind, VulnerabilityWindow,
};
use crate::player::PLAYER_HIT_RADIUS;

/// Upper bound on the vulnerability countdown.
pub const VULNERABILITY_MAX_TICKS: f32 = 1200.0;

// ── Vulnerability window ──────────────────────────────────────────────────────

impl VulnerabilityWindow {
    /// Open (or re-open) for `duration` ticks, capped at the maximum.
    pub fn open_for(&mut self, duration: f32) {
        let duration = duration.min(VULNERABILITY_MAX_TICKS);
        if duration > 0.0 {
            self.open = true;
            self.timer = duration;
        }
    }

    /// Count down while open. Returns true on the tick the window shuts.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.open {
            return false;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer = 0.0;
            self.open = false;
            return true;
        }
        false
    }

    /// Remaining fraction of a full window, 0..=1.
    pub fn time_ratio(&self) -> f32 {
        (self.timer / VULNERABILITY_MAX_TICKS).clamp(0.0, 1.0)
    }
}

// ── Contact tests ─────────────────────────────────────────────────────────────

/// What the player touched this tick, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    None,
    /// Player rammed the boss while the window was open.
    Boss,
    /// Index into the projectile collection.
    Projectile(usize),
    /// Index into the beam collection.
    Beam(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Survive,
    BossDefeated,
    PlayerDefeated,
}

impl Contact {
    pub fn outcome(&self) -> Outcome {
        match self {
            Contact::None => Outcome::Survive,
            Contact::Boss => Outcome::BossDefeated,
            Contact::Projectile(_) | Contact::Beam(_) => Outcome::PlayerDefeated,
        }
    }
}

/// Win test. Touching the boss outside the window does nothing.
pub fn boss_defeated(player: &Player, boss: &BossState, window: &VulnerabilityWindow) -> bool {
    window.open && player.touches_boss(boss)
}

/// First active projectile overlapping the point, if any.
pub fn projectile_hit(x: f32, y: f32, projectiles: &[Projectile]) -> Option<usize> {
    projectiles
        .iter()
        .position(|p| p.collides_with(x, y, PLAYER_HIT_RADIUS))
}

/// First beam in its damaging phase covering the point, if any.
pub fn beam_hit(x: f32, y: f32, beams: &[BeamHazard]) -> Option<usize> {
    beams.iter().position(|b| b.hits(x, y))
}

/// Loss test: any active projectile or damaging beam on the point.
pub fn player_defeated(x: f32, y: f32, projectiles: &[Projectile], beams: &[BeamHazard]) -> bool {
    projectile_hit(x, y, projectiles).is_some() || beam_hit(x, y, beams).is_some()
}

pub fn resolve(
    player: &Player,
    boss: &BossState,
    projectiles: &[Projectile],
    beams: &[BeamHazard],
    window: &VulnerabilityWindow,
) -> Contact {
    if boss_defeated(player, boss, window) {
        return Contact::Boss;
    }
    if let Some(index) = projectile_hit(player.x, player.y, projectiles) {
        return Contact::Projectile(index);
    }
    if let Some(index) = beam_hit(player.x, player.y, beams) {
        return Contact::Beam(index);
    }
    Contact::None
}

// ── Per-tick advance ─────────────────────────────────────────────────────────

/// Counters from one `advance` call, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub splits: usize,
    pub off_screen: usize,
    pub beams_expired: usize,
}

/// Move every projectile and beam one tick, burst eligible splitters into
/// their children, and sweep what is gone.
pub fn advance(
    projectiles: &mut Vec<Projectile>,
    beams: &mut Vec<BeamHazard>,
    target: (f32, f32),
    arena: &Arena,
    dt: f32,
) -> AdvanceReport {
    let mut report = AdvanceReport::default();
    let mut children = Vec::new();

    for projectile in projectiles.iter_mut() {
        projectile.update(target, arena, dt);
        if projectile.should_split() {
            projectile.mark_split();
            children.extend(projectile.split_children());
            report.splits += 1;
        }
    }

    let before = projectiles.len();
    // Burst parents go along with everything that left the arena.
    projectiles.retain(|p| {
        !p.is_off_screen(arena) && p.kind != ProjectileKind::Splitting { has_split: true }
    });
    report.off_screen = before - projectiles.len() - report.splits;
    projectiles.extend(children);

    for beam in beams.iter_mut() {
        beam.update(dt);
    }
    let before = beams.len();
    beams.retain(|b| !b.is_done());
    report.beams_expired = before - beams.len();

    if report.splits > 0 {
        log::debug!("{} splitting projectile(s) burst", report.splits);
    }
    report
}
