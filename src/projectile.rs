/// Projectile lifecycle and per-type motion.
///
/// A projectile spends `WARNING_DURATION` ticks as a telegraph (no motion,
/// no collision), then moves according to its `ProjectileKind`.  Removal is
/// the caller's business: `is_off_screen`, a confirmed hit, or a split.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::entities::{Arena, Projectile, ProjectileKind};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Base hitbox diameter.
pub const PROJECTILE_SIZE: f32 = 8.0;
pub const WARNING_DURATION: f32 = 45.0;
/// Distance past an arena edge before a projectile counts as gone.
pub const OFF_SCREEN_MARGIN: f32 = 20.0;
/// Bouncing projectiles reflect this far inside the walls.
pub const BOUNCE_MARGIN: f32 = 10.0;
/// A splitting projectile bursts once its age exceeds this.
pub const SPLIT_AGE: f32 = 60.0;
pub const SPLIT_CHILDREN: usize = 3;

const HOMING_TURN_RATE: f32 = 0.02;
const SPIRAL_PHASE_STEP: f32 = 0.08;
const SPIRAL_WOBBLE: f32 = 0.5;
const ACCEL_PER_AGE: f32 = 0.01;
const ACCEL_CAP: f32 = 1.05;
const WAVE_FREQUENCY: f32 = 0.2;
const WAVE_AMPLITUDE: f32 = 2.0;

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

impl ProjectileKind {
    pub fn spiral() -> Self {
        ProjectileKind::Spiral { phase: 0.0 }
    }

    pub fn splitting() -> Self {
        ProjectileKind::Splitting { has_split: false }
    }

    /// Hitbox diameter for this kind.
    pub fn hitbox_size(&self) -> f32 {
        match self {
            ProjectileKind::Fast => PROJECTILE_SIZE - 2.0,
            ProjectileKind::Large | ProjectileKind::Splitting { .. } => PROJECTILE_SIZE + 4.0,
            _ => PROJECTILE_SIZE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectileKind::Normal => "normal",
            ProjectileKind::Fast => "fast",
            ProjectileKind::Large => "large",
            ProjectileKind::Homing => "homing",
            ProjectileKind::Bouncing => "bouncing",
            ProjectileKind::Spiral { .. } => "spiral",
            ProjectileKind::Splitting { .. } => "splitting",
            ProjectileKind::Accelerating => "accelerating",
            ProjectileKind::Wave => "wave",
        }
    }
}

impl Projectile {
    /// A fresh projectile in its warning phase.
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, kind: ProjectileKind) -> Self {
        Projectile {
            x,
            y,
            vx,
            vy,
            kind,
            warning_timer: WARNING_DURATION,
            age: 0.0,
        }
    }

    /// Launch along `angle` (radians) at `speed`.
    pub fn aimed(x: f32, y: f32, angle: f32, speed: f32, kind: ProjectileKind) -> Self {
        Projectile::new(x, y, angle.cos() * speed, angle.sin() * speed, kind)
    }

    pub fn is_active(&self) -> bool {
        self.warning_timer <= 0.0
    }

    pub fn speed(&self) -> f32 {
        self.vx.hypot(self.vy)
    }

    pub fn heading(&self) -> f32 {
        self.vy.atan2(self.vx)
    }

    fn set_heading(&mut self, angle: f32) {
        let speed = self.speed();
        self.vx = angle.cos() * speed;
        self.vy = angle.sin() * speed;
    }

    /// Advance one tick. `target` is the player position, only Homing reads it.
    pub fn update(&mut self, target: (f32, f32), arena: &Arena, dt: f32) {
        if self.warning_timer > 0.0 {
            self.warning_timer -= dt;
            return;
        }

        self.age += dt;

        match self.kind {
            ProjectileKind::Normal
            | ProjectileKind::Fast
            | ProjectileKind::Large
            | ProjectileKind::Splitting { .. } => {}
            ProjectileKind::Homing => {
                let desired = (target.1 - self.y).atan2(target.0 - self.x);
                let heading = self.heading();
                let error = wrap_angle(desired - heading);
                self.set_heading(heading + error * HOMING_TURN_RATE * dt);
            }
            ProjectileKind::Bouncing => {
                // Always reflect inward so a wall hit can't flip back and forth.
                if self.x < BOUNCE_MARGIN {
                    self.vx = self.vx.abs();
                } else if self.x > arena.width - BOUNCE_MARGIN {
                    self.vx = -self.vx.abs();
                }
                if self.y < BOUNCE_MARGIN {
                    self.vy = self.vy.abs();
                } else if self.y > arena.height - BOUNCE_MARGIN {
                    self.vy = -self.vy.abs();
                }
            }
            ProjectileKind::Spiral { phase } => {
                // Heading is always launch heading + sin(phase) * wobble.
                let base = self.heading() - phase.sin() * SPIRAL_WOBBLE;
                let phase = phase + SPIRAL_PHASE_STEP * dt;
                self.kind = ProjectileKind::Spiral { phase };
                self.set_heading(base + phase.sin() * SPIRAL_WOBBLE);
            }
            ProjectileKind::Accelerating => {
                let factor = (1.0 + self.age * ACCEL_PER_AGE).min(ACCEL_CAP).powf(dt);
                self.vx *= factor;
                self.vy *= factor;
            }
            ProjectileKind::Wave => {
                let perpendicular = self.heading() + FRAC_PI_2;
                let offset = (self.age * WAVE_FREQUENCY).sin() * WAVE_AMPLITUDE * dt;
                self.x += perpendicular.cos() * offset;
                self.y += perpendicular.sin() * offset;
            }
        }

        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    /// One-shot velocity scale. Not remembered: reapply for a lasting effect.
    pub fn apply_slow(&mut self, factor: f32) {
        self.vx *= factor;
        self.vy *= factor;
    }

    pub fn is_off_screen(&self, arena: &Arena) -> bool {
        if self.kind == ProjectileKind::Bouncing {
            return false;
        }
        self.x < -OFF_SCREEN_MARGIN
            || self.x > arena.width + OFF_SCREEN_MARGIN
            || self.y < -OFF_SCREEN_MARGIN
            || self.y > arena.height + OFF_SCREEN_MARGIN
    }

    /// Circle test against a point target with its own hit radius.
    /// Always false during the warning phase.
    pub fn collides_with(&self, px: f32, py: f32, hit_radius: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        let dx = self.x - px;
        let dy = self.y - py;
        let reach = self.kind.hitbox_size() / 2.0 + hit_radius;
        dx * dx + dy * dy < reach * reach
    }

    pub fn should_split(&self) -> bool {
        matches!(self.kind, ProjectileKind::Splitting { has_split: false }) && self.age > SPLIT_AGE
    }

    pub fn mark_split(&mut self) {
        if let ProjectileKind::Splitting { has_split } = &mut self.kind {
            *has_split = true;
        }
    }

    /// Children of a burst: evenly spread Normal shots starting at the parent
    /// heading, at the parent speed, already active.
    pub fn split_children(&self) -> Vec<Projectile> {
        let heading = self.heading();
        let speed = self.speed();
        (0..SPLIT_CHILDREN)
            .map(|i| {
                let angle = heading + TAU * i as f32 / SPLIT_CHILDREN as f32;
                let mut child = Projectile::aimed(self.x, self.y, angle, speed, ProjectileKind::Normal);
                child.warning_timer = 0.0;
                child
            })
            .collect()
    }
}
