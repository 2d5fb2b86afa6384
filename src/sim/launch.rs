//! Launch parameters and closed-form trajectory sampling
//!
//! The arc is a linear lerp plus a parabolic lift term rather than
//! integrated ballistics: the ball lands exactly on the target at `t = 1`
//! no matter how the tick intervals happen to divide the flight.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Immutable parameters for one throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub start: Vec3,
    pub target: Vec3,
    /// Peak lift above the straight start-target line
    pub arc_height: f32,
    /// Total flight time in seconds
    pub duration: f32,
}

impl Launch {
    /// Build a launch toward a target point, deriving arc height and flight
    /// duration from the throw distance. The tuning floors keep very short
    /// throws from degenerating into zero-height, zero-time flights.
    pub fn toward(start: Vec3, target: Vec3, tuning: &Tuning) -> Self {
        let distance = start.distance(target);
        Self {
            start,
            target,
            arc_height: (distance * tuning.arc_height_factor).max(tuning.min_arc_height),
            duration: (distance * tuning.duration_factor).max(tuning.min_flight_duration),
        }
    }

    /// Position at elapsed fraction `t` in `[0, 1]`.
    ///
    /// Exactly `start` at 0 and `target` at 1; the lift term is zero at both
    /// endpoints and peaks at `arc_height` at `t = 0.5`.
    pub fn position(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        // Written as (1-t)*a + t*b so the endpoints are bit-exact
        let linear = self.start * (1.0 - t) + self.target * t;
        let lift = self.arc_height * 4.0 * t * (1.0 - t);
        Vec3::new(linear.x, linear.y + lift, linear.z)
    }

    /// Elapsed seconds mapped to arc fraction, clamped to `[0, 1]`
    #[inline]
    pub fn fraction(&self, elapsed: f32) -> f32 {
        (elapsed / self.duration).clamp(0.0, 1.0)
    }
}
