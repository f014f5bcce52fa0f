/// The boss's twelve bullet-emission recipes.
///
/// Each generator only appends to the output collection.  Aimed patterns read
/// the player position captured in `Volley::aim` once, at fire time.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use rand::{Rng, RngCore};

use crate::entities::{Projectile, ProjectileKind};

pub const PATTERN_COUNT: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Spiral,
    Ring,
    AimedFan,
    SineWave,
    RandomSpray,
    TracerBurst,
    HeavyRing,
    HomingSalvo,
    SpiralRing,
    SplitRing,
    AcceleratingFan,
    WaveFan,
}

impl Pattern {
    pub const ALL: [Pattern; PATTERN_COUNT] = [
        Pattern::Spiral,
        Pattern::Ring,
        Pattern::AimedFan,
        Pattern::SineWave,
        Pattern::RandomSpray,
        Pattern::TracerBurst,
        Pattern::HeavyRing,
        Pattern::HomingSalvo,
        Pattern::SpiralRing,
        Pattern::SplitRing,
        Pattern::AcceleratingFan,
        Pattern::WaveFan,
    ];

    pub fn from_index(index: usize) -> Pattern {
        Pattern::ALL[index % PATTERN_COUNT]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Spiral => "spiral",
            Pattern::Ring => "ring",
            Pattern::AimedFan => "aimed fan",
            Pattern::SineWave => "sine wave",
            Pattern::RandomSpray => "random spray",
            Pattern::TracerBurst => "tracer burst",
            Pattern::HeavyRing => "heavy ring",
            Pattern::HomingSalvo => "homing salvo",
            Pattern::SpiralRing => "spiral ring",
            Pattern::SplitRing => "split ring",
            Pattern::AcceleratingFan => "accelerating fan",
            Pattern::WaveFan => "wave fan",
        }
    }
}

/// Everything a generator may read when it fires.
pub struct Volley<'a> {
    pub origin: (f32, f32),
    pub level: u32,
    /// Player position at fire time.
    pub aim: (f32, f32),
    /// Rotation applied to the spiral volley.
    pub spiral_offset: f32,
    pub rng: &'a mut dyn RngCore,
}

impl Volley<'_> {
    fn angle_to_aim(&self) -> f32 {
        (self.aim.1 - self.origin.1).atan2(self.aim.0 - self.origin.0)
    }

    fn shot(&self, angle: f32, speed: f32, kind: ProjectileKind) -> Projectile {
        Projectile::aimed(self.origin.0, self.origin.1, angle, speed, kind)
    }
}

type Generator = fn(&mut Volley<'_>, &mut Vec<Projectile>);

const GENERATORS: [Generator; PATTERN_COUNT] = [
    spiral,
    ring,
    aimed_fan,
    sine_wave,
    random_spray,
    tracer_burst,
    heavy_ring,
    homing_salvo,
    spiral_ring,
    split_ring,
    accelerating_fan,
    wave_fan,
];

/// Run `pattern`, appending its projectiles to `out`.
pub fn fire(pattern: Pattern, volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    GENERATORS[pattern as usize](volley, out);
}

// ── Generators ───────────────────────────────────────────────────────────────

fn push_ring(
    volley: &Volley<'_>,
    out: &mut Vec<Projectile>,
    count: u32,
    speed: f32,
    offset: f32,
    kind: ProjectileKind,
) {
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32 + offset;
        out.push(volley.shot(angle, speed, kind));
    }
}

/// Downward quarter-circle fan: π/4 up to, not including, 3π/4.
fn fan_angle(i: u32, count: u32) -> f32 {
    FRAC_PI_4 + FRAC_PI_2 * i as f32 / count as f32
}

fn spiral(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let count = volley.level.saturating_add(6);
    push_ring(volley, out, count, 3.0, volley.spiral_offset, ProjectileKind::Normal);
}

fn ring(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let count = volley.level.saturating_mul(2).saturating_add(8);
    push_ring(volley, out, count, 2.5, 0.0, ProjectileKind::Normal);
}

fn aimed_fan(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let center = volley.angle_to_aim();
    for i in -3..=3 {
        out.push(volley.shot(center + i as f32 * 0.2, 4.0, ProjectileKind::Normal));
    }
}

fn sine_wave(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let count = volley.level.saturating_mul(2).saturating_add(10);
    for i in 0..count {
        let speed = 2.0 + (i as f32 * 0.5).sin() * 1.5;
        out.push(volley.shot(fan_angle(i, count), speed, ProjectileKind::Normal));
    }
}

fn random_spray(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let count = volley.level.saturating_add(5);
    for _ in 0..count {
        let angle = volley.rng.gen::<f32>() * TAU;
        let speed = 2.0 + volley.rng.gen::<f32>() * 2.0;
        out.push(volley.shot(angle, speed, ProjectileKind::Normal));
    }
}

fn tracer_burst(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let center = volley.angle_to_aim();
    for _ in 0..volley.level.saturating_add(5) {
        let jitter = (volley.rng.gen::<f32>() - 0.5) * 0.5;
        out.push(volley.shot(center + jitter, 6.0, ProjectileKind::Fast));
    }
}

fn heavy_ring(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let count = volley.level.saturating_add(4);
    push_ring(volley, out, count, 1.5, 0.0, ProjectileKind::Large);
}

fn homing_salvo(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let center = volley.angle_to_aim();
    for i in 0..2 {
        let angle = center + (i as f32 - 0.5) * 0.3;
        out.push(volley.shot(angle, 2.5, ProjectileKind::Homing));
    }
    if volley.level >= 3 {
        push_ring(volley, out, 6, 3.0, 0.0, ProjectileKind::Bouncing);
    }
}

fn spiral_ring(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let count = volley.level.saturating_add(5);
    push_ring(volley, out, count, 2.0, 0.0, ProjectileKind::spiral());
}

fn split_ring(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let count = 3 + volley.level / 2;
    push_ring(volley, out, count, 2.5, 0.0, ProjectileKind::splitting());
}

fn accelerating_fan(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let center = volley.angle_to_aim();
    for i in -2..=2 {
        out.push(volley.shot(center + i as f32 * 0.3, 1.5, ProjectileKind::Accelerating));
    }
}

fn wave_fan(volley: &mut Volley<'_>, out: &mut Vec<Projectile>) {
    let count = volley.level.saturating_add(8);
    for i in 0..count {
        out.push(volley.shot(fan_angle(i, count), 2.5, ProjectileKind::Wave));
    }
}
