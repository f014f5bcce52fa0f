/// Boss controller: steering, rotation, pattern and beam dispatch.
///
/// Everything level-dependent is a small pure function so the formulas can be
/// checked on their own.  The boss only appends to the projectile and beam
/// collections; it never removes from them.

use std::f32::consts::FRAC_PI_2;

use rand::{Rng, RngCore};

use crate::entities::{Arena, BeamHazard, BeamOrientation, BossState, Projectile, VehicleClass};
use crate::patterns::{self, Pattern, Volley, PATTERN_COUNT};
use crate::projectile::wrap_angle;

// ── Tuning ────────────────────────────────────────────────────────────────────

pub const BASE_SIZE: f32 = 100.0;
pub const MAX_SPEED: f32 = 2.5;
pub const ACCELERATION: f32 = 0.15;
pub const FRICTION: f32 = 0.92;
pub const ANGULAR_ACCELERATION: f32 = 0.08;
pub const ANGULAR_FRICTION: f32 = 0.85;
/// No steering force inside this distance from the target.
pub const DEAD_ZONE: f32 = 10.0;
/// Velocity factor applied to the axis that hit an arena bound.
pub const WALL_BOUNCE: f32 = -0.5;
pub const BEAM_MIN_LEVEL: u32 = 2;
/// Highest level a boss is built for; anything above plays as this.
pub const MAX_LEVEL: u32 = 999;

const RETARGET_MIN: f32 = 60.0;
const RETARGET_SPREAD: f32 = 60.0;
const SPIRAL_OFFSET_PER_TICK: f32 = 0.1;

const PLANE_NAMES: [&str; 10] = [
    "MIG-15", "MIG-21", "MIG-29", "SU-27", "SU-57",
    "F-86 SABRE", "F-4 PHANTOM", "F-15 EAGLE", "F-22 RAPTOR", "F-35 LIGHTNING",
];

const HELICOPTER_NAMES: [&str; 10] = [
    "UH-1 HUEY", "AH-64 APACHE", "MI-24 HIND", "CH-47 CHINOOK", "MI-28 HAVOC",
    "AH-1 COBRA", "KA-52 ALLIGATOR", "UH-60 BLACK HAWK", "MI-26 HALO", "AH-64E GUARDIAN",
];

// ── Level tables ─────────────────────────────────────────────────────────────

/// Levels below 1 are treated as level 1, levels above `MAX_LEVEL` as `MAX_LEVEL`.
pub fn clamp_level(level: i32) -> u32 {
    level.clamp(1, MAX_LEVEL as i32) as u32
}

pub fn is_heavy(level: u32) -> bool {
    level % 3 == 0
}

pub fn size_for(heavy: bool) -> f32 {
    // 150% / 70% of the base, kept exact in f32.
    if heavy {
        BASE_SIZE * 3.0 / 2.0
    } else {
        BASE_SIZE * 7.0 / 10.0
    }
}

/// Three more patterns every third level, at most twelve, never zero.
pub fn pattern_unlock_count(level: u32) -> usize {
    let heavy_bosses_seen = (level as usize).saturating_add(2) / 3;
    (heavy_bosses_seen * 3).min(PATTERN_COUNT).max(1)
}

/// Ticks between volleys: `max(20, 60 - 5L)`.
pub fn shoot_interval(level: u32) -> f32 {
    (60 - 5 * i64::from(level)).max(20) as f32
}

/// Ticks between beam spawns: `max(180, 300 - 10L)`.
pub fn beam_interval(level: u32) -> f32 {
    (300 - 10 * i64::from(level)).max(180) as f32
}

pub fn beam_count(level: u32) -> usize {
    1 + usize::from(level >= 5) + usize::from(level >= 8)
}

pub fn beam_width(level: u32) -> f32 {
    40.0 + level as f32 * 5.0
}

pub fn acceleration_for(level: u32) -> f32 {
    ACCELERATION * (1.0 + level as f32 * 0.05)
}

pub fn max_speed_for(level: u32) -> f32 {
    MAX_SPEED * (1.0 + level as f32 * 0.1)
}

pub fn money_reward(level: u32, heavy: bool) -> u32 {
    if heavy {
        level.saturating_mul(200).saturating_add(500)
    } else {
        level.saturating_mul(50).saturating_add(100)
    }
}

/// Odd levels fly planes, even levels helicopters.
pub fn vehicle_class(level: u32) -> VehicleClass {
    if level % 2 == 1 {
        VehicleClass::Plane
    } else {
        VehicleClass::Helicopter
    }
}

pub fn vehicle_name(level: u32) -> String {
    let level = level.max(1);
    match vehicle_class(level) {
        VehicleClass::Plane => format!("[PLANE] {}", PLANE_NAMES[((level - 1) / 2 % 10) as usize]),
        VehicleClass::Helicopter => {
            format!("[HELI] {}", HELICOPTER_NAMES[((level / 2 - 1) % 10) as usize])
        }
    }
}

/// Side count when the boss is drawn as a plain polygon.
pub fn polygon_sides(level: u32) -> u32 {
    level.saturating_add(2).min(20)
}

// ── Controller ───────────────────────────────────────────────────────────────

impl BossState {
    /// A boss for `level`, parked at (x, y) and facing down.
    pub fn new<R: Rng>(x: f32, y: f32, level: i32, rng: &mut R) -> Self {
        let level = clamp_level(level);
        let heavy = is_heavy(level);
        let pattern_unlock = pattern_unlock_count(level);
        BossState {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            ax: 0.0,
            ay: 0.0,
            rotation: FRAC_PI_2,
            target_rotation: FRAC_PI_2,
            angular_velocity: 0.0,
            level,
            heavy,
            size: size_for(heavy),
            shoot_timer: 0.0,
            shoot_interval: shoot_interval(level),
            pattern_index: rng.gen_range(0..pattern_unlock),
            pattern_unlock,
            target_x: x,
            target_y: y,
            move_timer: 0.0,
            retarget_after: RETARGET_MIN + rng.gen::<f32>() * RETARGET_SPREAD,
            // First beam lands 2-3 seconds early.
            beam_timer: rng.gen_range(120.0..180.0),
            beam_interval: beam_interval(level),
            age: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vx.hypot(self.vy)
    }

    pub fn money_reward(&self) -> u32 {
        money_reward(self.level, self.heavy)
    }

    pub fn vehicle_class(&self) -> VehicleClass {
        vehicle_class(self.level)
    }

    pub fn vehicle_name(&self) -> String {
        vehicle_name(self.level)
    }

    pub fn current_pattern(&self) -> Pattern {
        Pattern::from_index(self.pattern_index)
    }

    /// Advance one tick: move, turn, then fire whatever timers expired.
    /// New projectiles and beams are appended; nothing is removed.
    pub fn update<R: Rng>(
        &mut self,
        projectiles: &mut Vec<Projectile>,
        beams: &mut Vec<BeamHazard>,
        aim: (f32, f32),
        arena: &Arena,
        dt: f32,
        rng: &mut R,
    ) {
        self.age += dt;
        self.steer(arena, dt, rng);
        self.turn(dt);

        self.shoot_timer += dt;
        if self.shoot_timer >= self.shoot_interval {
            self.shoot_timer = 0.0;
            self.shoot(projectiles, aim, rng);
        }

        if self.level >= BEAM_MIN_LEVEL {
            self.beam_timer += dt;
            if self.beam_timer >= self.beam_interval {
                self.beam_timer = 0.0;
                self.spawn_beams(beams, arena, rng);
            }
        }
    }

    fn steer<R: Rng>(&mut self, arena: &Arena, dt: f32, rng: &mut R) {
        self.move_timer += dt;
        if self.move_timer >= self.retarget_after {
            self.move_timer = 0.0;
            self.retarget_after = RETARGET_MIN + rng.gen::<f32>() * RETARGET_SPREAD;
            let span_x = (arena.width - self.size * 2.0).max(0.0);
            let span_y = (arena.height / 2.5 - self.size * 2.0).max(0.0);
            self.target_x = self.size + rng.gen::<f32>() * span_x;
            self.target_y = self.size + rng.gen::<f32>() * span_y;
        }

        let dx = self.target_x - self.x;
        let dy = self.target_y - self.y;
        let distance = dx.hypot(dy);
        if distance > DEAD_ZONE {
            let strength = acceleration_for(self.level);
            self.ax = dx / distance * strength * dt;
            self.ay = dy / distance * strength * dt;
            self.vx += self.ax;
            self.vy += self.ay;
            self.target_rotation = dy.atan2(dx);
        } else {
            self.ax = 0.0;
            self.ay = 0.0;
        }

        let friction = FRICTION.powf(dt);
        self.vx *= friction;
        self.vy *= friction;

        let speed = self.speed();
        let max_speed = max_speed_for(self.level);
        if speed > max_speed {
            self.vx = self.vx / speed * max_speed;
            self.vy = self.vy / speed * max_speed;
        }

        self.x += self.vx * dt;
        self.y += self.vy * dt;

        // Bounds can invert (tiny arenas); min-then-max keeps us from panicking.
        let (left, right) = (self.size, arena.width - self.size);
        if self.x < left || self.x > right {
            self.x = self.x.min(right).max(left);
            self.vx *= WALL_BOUNCE;
        }
        let (top, bottom) = (self.size, arena.height / 3.0);
        if self.y < top || self.y > bottom {
            self.y = self.y.min(bottom).max(top);
            self.vy *= WALL_BOUNCE;
        }
    }

    fn turn(&mut self, dt: f32) {
        let difference = wrap_angle(self.target_rotation - self.rotation);
        self.angular_velocity += difference * ANGULAR_ACCELERATION * dt;
        self.angular_velocity *= ANGULAR_FRICTION.powf(dt);
        self.rotation += self.angular_velocity * dt;
    }

    fn shoot<R: Rng>(&mut self, projectiles: &mut Vec<Projectile>, aim: (f32, f32), rng: &mut R) {
        let unlock = self.pattern_unlock.max(1);
        self.pattern_index = (self.pattern_index + 1) % unlock;
        let pattern = self.current_pattern();

        let before = projectiles.len();
        let rng: &mut dyn RngCore = rng;
        let mut volley = Volley {
            origin: (self.x, self.y),
            level: self.level,
            aim,
            spiral_offset: self.age * SPIRAL_OFFSET_PER_TICK,
            rng,
        };
        patterns::fire(pattern, &mut volley, projectiles);

        log::debug!(
            "boss L{} fired {} ({} projectiles)",
            self.level,
            pattern.name(),
            projectiles.len() - before
        );
    }

    fn spawn_beams<R: Rng>(&mut self, beams: &mut Vec<BeamHazard>, arena: &Arena, rng: &mut R) {
        let orientation = if rng.gen_bool(0.5) {
            BeamOrientation::Vertical
        } else {
            BeamOrientation::Horizontal
        };
        let count = beam_count(self.level);
        let width = beam_width(self.level);
        for _ in 0..count {
            let position = match orientation {
                BeamOrientation::Vertical => arena.width * (0.2 + rng.gen::<f32>() * 0.6),
                BeamOrientation::Horizontal => arena.height * (0.3 + rng.gen::<f32>() * 0.5),
            };
            beams.push(BeamHazard::new(position, width, orientation));
        }
        log::debug!("boss L{} spawned {} {:?} beam(s)", self.level, count, orientation);
    }
}
