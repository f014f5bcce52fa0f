/// The player's ship: acceleration, per-axis friction, edge bounce.

use crate::entities::{Arena, BossState, Player, PlayerInput};

pub const PLAYER_SIZE: f32 = 20.0;
/// Radius used against projectiles; the visible ship is much bigger.
pub const PLAYER_HIT_RADIUS: f32 = 2.0;
pub const PLAYER_MAX_SPEED: f32 = 6.0;
pub const PLAYER_ACCELERATION: f32 = 0.5;
pub const PLAYER_FRICTION: f32 = 0.85;
pub const FLICKER_DURATION: f32 = 15.0;
/// Speed bonus per speed upgrade level.
pub const SPEED_PER_UPGRADE: f32 = 0.15;

const DIAGONAL_SCALE: f32 = 0.707;
const EDGE_BOUNCE: f32 = -0.3;

impl Player {
    pub fn new(x: f32, y: f32, speed_upgrade: u32) -> Self {
        Player {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            speed_multiplier: 1.0 + speed_upgrade as f32 * SPEED_PER_UPGRADE,
            flicker_timer: 0.0,
        }
    }

    pub fn update(&mut self, input: PlayerInput, arena: &Arena, dt: f32) {
        if self.flicker_timer > 0.0 {
            self.flicker_timer = (self.flicker_timer - dt).max(0.0);
        }

        let mut ax = 0.0;
        let mut ay = 0.0;
        if input.up {
            ay -= PLAYER_ACCELERATION;
        }
        if input.down {
            ay += PLAYER_ACCELERATION;
        }
        if input.left {
            ax -= PLAYER_ACCELERATION;
        }
        if input.right {
            ax += PLAYER_ACCELERATION;
        }
        if ax != 0.0 && ay != 0.0 {
            ax *= DIAGONAL_SCALE;
            ay *= DIAGONAL_SCALE;
        }

        self.vx += ax * dt;
        self.vy += ay * dt;

        // Friction only on axes the player isn't pushing.
        let friction = PLAYER_FRICTION.powf(dt);
        if ax == 0.0 {
            self.vx *= friction;
        }
        if ay == 0.0 {
            self.vy *= friction;
        }

        let max_speed = PLAYER_MAX_SPEED * self.speed_multiplier;
        let speed = self.vx.hypot(self.vy);
        if speed > max_speed {
            self.vx = self.vx / speed * max_speed;
            self.vy = self.vy / speed * max_speed;
        }

        self.x += self.vx * dt;
        self.y += self.vy * dt;

        if self.x < PLAYER_SIZE {
            self.x = PLAYER_SIZE;
            self.vx *= EDGE_BOUNCE;
        }
        if self.x > arena.width - PLAYER_SIZE {
            self.x = arena.width - PLAYER_SIZE;
            self.vx *= EDGE_BOUNCE;
        }
        if self.y < PLAYER_SIZE {
            self.y = PLAYER_SIZE;
            self.vy *= EDGE_BOUNCE;
        }
        if self.y > arena.height - PLAYER_SIZE {
            self.y = arena.height - PLAYER_SIZE;
            self.vy *= EDGE_BOUNCE;
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Ship footprint touching the boss footprint.
    pub fn touches_boss(&self, boss: &BossState) -> bool {
        let dx = self.x - boss.x;
        let dy = self.y - boss.y;
        let reach = PLAYER_SIZE / 2.0 + boss.size / 2.0;
        dx * dx + dy * dy < reach * reach
    }

    pub fn trigger_flicker(&mut self) {
        self.flicker_timer = FLICKER_DURATION;
    }

    pub fn is_flickering(&self) -> bool {
        self.flicker_timer > 0.0
    }
}
