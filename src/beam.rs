/// Beam hazards: a telegraphed strip across the whole arena.
///
/// `Warning → Damaging → Done`, driven by one elapsed-ticks counter.

use crate::entities::{BeamHazard, BeamOrientation, BeamPhase};

pub const BEAM_WARNING_TICKS: f32 = 90.0;
pub const BEAM_DAMAGE_TICKS: f32 = 60.0;

impl BeamHazard {
    pub fn new(position: f32, width: f32, orientation: BeamOrientation) -> Self {
        BeamHazard {
            position,
            width: width.max(0.0),
            orientation,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn phase(&self) -> BeamPhase {
        if self.elapsed < BEAM_WARNING_TICKS {
            BeamPhase::Warning
        } else if self.elapsed < BEAM_WARNING_TICKS + BEAM_DAMAGE_TICKS {
            BeamPhase::Damaging
        } else {
            BeamPhase::Done
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase() == BeamPhase::Done
    }

    /// Fraction of the warning phase already elapsed, 0..=1. Used to ramp
    /// the telegraph on screen.
    pub fn warning_progress(&self) -> f32 {
        (self.elapsed / BEAM_WARNING_TICKS).clamp(0.0, 1.0)
    }

    /// Whether a point lies inside the strip, whatever the phase.
    pub fn band_contains(&self, x: f32, y: f32) -> bool {
        let axis = match self.orientation {
            BeamOrientation::Vertical => x,
            BeamOrientation::Horizontal => y,
        };
        (axis - self.position).abs() <= self.width / 2.0
    }

    /// Whether the beam hurts a point right now.
    pub fn hits(&self, x: f32, y: f32) -> bool {
        self.phase() == BeamPhase::Damaging && self.band_contains(x, y)
    }
}
