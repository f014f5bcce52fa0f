/// All game entity types: pure data, no logic.
///
/// Behaviour lives next door: `projectile`, `beam`, `boss`, `player` and
/// `combat` add the `impl` blocks, `compute` drives a whole run.

use serde::Deserialize;

// ── Arena & input ─────────────────────────────────────────────────────────────

/// Playfield size in world units. Origin is the top-left corner, +y points down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

/// Directions held this tick. Produced by the frontend, consumed by `Player`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 + 0.15 per speed upgrade level.
    pub speed_multiplier: f32,
    /// Ticks of flicker left after a lucky dodge.
    pub flicker_timer: f32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Behaviour tag of a projectile. Variants that need per-projectile state
/// carry it inline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileKind {
    Normal,
    /// Smaller hitbox, fired at high speed.
    Fast,
    /// Bigger hitbox, fired slowly.
    Large,
    /// Turns 2% of its angular error toward the player each tick.
    Homing,
    /// Reflects off the walls, never leaves the arena.
    Bouncing,
    /// Heading is the launch heading plus `sin(phase) * 0.5`.
    Spiral { phase: f32 },
    /// Bursts into three children once older than 60 ticks.
    Splitting { has_split: bool },
    /// Speeds up with age, at most 5% per tick.
    Accelerating,
    /// Sways sideways on a sine of its age.
    Wave,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub kind: ProjectileKind,
    /// Telegraph countdown. Inert (no motion, no collision) while positive.
    pub warning_timer: f32,
    /// Ticks since the warning expired.
    pub age: f32,
}

// ── Beam hazards ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamOrientation {
    /// Full-height strip centred on x = position.
    Vertical,
    /// Full-width strip centred on y = position.
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeamPhase {
    Warning,
    Damaging,
    Done,
}

#[derive(Clone, Debug)]
pub struct BeamHazard {
    /// x for a vertical beam, y for a horizontal one.
    pub position: f32,
    pub width: f32,
    pub orientation: BeamOrientation,
    /// Ticks since the beam was spawned; the phase is derived from it.
    pub elapsed: f32,
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Cosmetic sprite family. Does not affect physics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleClass {
    Plane,
    Helicopter,
}

#[derive(Clone, Debug)]
pub struct BossState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub ax: f32,
    pub ay: f32,
    pub rotation: f32,
    pub target_rotation: f32,
    pub angular_velocity: f32,
    /// Difficulty tier, always >= 1.
    pub level: u32,
    /// Every third level is a heavy ("mega") boss.
    pub heavy: bool,
    pub size: f32,
    pub shoot_timer: f32,
    pub shoot_interval: f32,
    /// Index of the last pattern fired, always < `pattern_unlock`.
    pub pattern_index: usize,
    /// Number of patterns this level may cycle through.
    pub pattern_unlock: usize,
    pub target_x: f32,
    pub target_y: f32,
    pub move_timer: f32,
    /// Re-target threshold, rolled in 60..120 every time a target is picked.
    pub retarget_after: f32,
    pub beam_timer: f32,
    pub beam_interval: f32,
    /// Ticks this boss has been alive; drives the spiral volley rotation.
    pub age: f32,
}

// ── Vulnerability window ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VulnerabilityWindow {
    pub open: bool,
    /// Ticks left while open, never above `VULNERABILITY_MAX_TICKS`.
    pub timer: f32,
}

// ── Progression inputs ────────────────────────────────────────────────────────

/// Upgrade levels owned by the external progression store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Upgrades {
    pub speed: u32,
    pub bullet_slow: u32,
    pub lucky_dodge: u32,
}

/// Run-wide tuning copied out of `GameConfig` when a run starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunRules {
    /// Closed ticks before the vulnerability window reopens.
    pub vulnerability_interval: f32,
    /// Ticks the window stays open.
    pub vulnerability_duration: f32,
    pub bullet_slow_per_level: f32,
    pub lucky_dodge_per_level: f32,
    pub lucky_dodge_cap: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Victory,
    Defeat,
}

/// One boss fight. Cloneable so `compute::tick` can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub arena: Arena,
    pub player: Player,
    pub boss: BossState,
    pub projectiles: Vec<Projectile>,
    pub beams: Vec<BeamHazard>,
    pub vulnerability: VulnerabilityWindow,
    /// Ticks the window has been closed since it last shut.
    pub closed_timer: f32,
    pub upgrades: Upgrades,
    pub rules: RunRules,
    pub status: GameStatus,
    pub frame: u64,
    pub survival_ticks: f32,
    /// Money earned, set on victory.
    pub reward: u32,
    pub lucky_dodges: u32,
}
