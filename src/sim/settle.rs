//! Post-landing roll physics
//!
//! A landed ball gets a small random horizontal impulse with a cross-wise
//! spin, damped out over a bounded window. This is a cosmetic settle, not a
//! rigid-body solve.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// One-shot impulse seeding the settle motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollImpulse {
    pub linear: Vec3,
    pub angular: Vec3,
}

/// Draw a roll impulse: direction uniform over a horizontal disk, spin
/// derived cross-wise from the linear component so the ball appears to
/// roll in the direction it moves.
pub fn roll_impulse(rng: &mut Pcg32, tuning: &Tuning) -> RollImpulse {
    let mut dir = Vec3::ZERO;
    // Resample the rare degenerate draw at the disk center
    while dir.length_squared() < 1e-6 {
        dir = Vec3::new(
            rng.random_range(-0.5..=0.5),
            0.0,
            rng.random_range(-0.5..=0.5),
        );
    }
    let linear = dir.normalize() * tuning.roll_impulse;
    let k = tuning.roll_spin_factor;
    RollImpulse {
        linear,
        angular: Vec3::new(linear.z * k, 0.0, -linear.x * k),
    }
}

/// In-progress settle motion for the landed ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettleMotion {
    pub vel: Vec3,
    pub angular_vel: Vec3,
    /// Seconds of motion remaining
    pub remaining: f32,
}

impl SettleMotion {
    pub fn new(impulse: RollImpulse, tuning: &Tuning) -> Self {
        Self {
            vel: impulse.linear,
            angular_vel: impulse.angular,
            remaining: tuning.settle_secs,
        }
    }

    /// Advance by `dt`, returning the position delta to apply to the ball,
    /// or `None` once the settle window has expired.
    pub fn advance(&mut self, dt: f32, damping: f32) -> Option<Vec3> {
        if self.remaining <= 0.0 {
            return None;
        }
        let step = dt.min(self.remaining);
        let delta = self.vel * step;
        let decay = (-damping * step).exp();
        self.vel *= decay;
        self.angular_vel *= decay;
        self.remaining -= step;
        Some(delta)
    }

    pub fn finished(&self) -> bool {
        self.remaining <= 0.0
    }
}
