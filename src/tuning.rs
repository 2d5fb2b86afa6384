//! Data-driven gameplay tuning
//!
//! Every magic number of the throw core lives here so the host app can load
//! overrides from JSON without recompiling.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Launch derivation ===
    /// Arc peak height as a fraction of throw distance
    pub arc_height_factor: f32,
    /// Floor on arc height (prevents flat near-zero throws)
    pub min_arc_height: f32,
    /// Flight duration as a fraction of throw distance (seconds per meter)
    pub duration_factor: f32,
    /// Floor on flight duration (seconds)
    pub min_flight_duration: f32,
    /// How far in front of the launch point the synthetic target sits
    /// when no creature is anchored (meters)
    pub fallback_target_distance: f32,

    // === Landing and settle ===
    /// Resting y for the landed ball (ground plane plus ball radius)
    pub ball_rest_height: f32,
    /// Seconds the captured creature takes to shrink away
    pub capture_shrink_secs: f32,
    /// Magnitude of the random horizontal roll impulse (m/s)
    pub roll_impulse: f32,
    /// Spin derived per unit of linear roll velocity (rad/s per m/s)
    pub roll_spin_factor: f32,
    /// Seconds of post-landing roll before the ball is considered at rest
    pub settle_secs: f32,
    /// Exponential damping rate applied to the roll (per second)
    pub settle_damping: f32,

    // === Hit testing ===
    /// Ball collision radius (meters)
    pub ball_radius: f32,
    /// Creature collision radius (meters)
    pub creature_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arc_height_factor: 0.5,
            min_arc_height: 0.2,
            duration_factor: 0.4,
            min_flight_duration: 0.6,
            fallback_target_distance: 1.0,

            ball_rest_height: 0.03,
            capture_shrink_secs: 0.25,
            roll_impulse: 0.35,
            roll_spin_factor: 8.0,
            settle_secs: 0.8,
            settle_damping: 3.0,

            ball_radius: 0.03,
            creature_radius: 0.15,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize for editing/diffing
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_launch_floors() {
        let t = Tuning::default();
        assert_eq!(t.min_arc_height, 0.2);
        assert_eq!(t.min_flight_duration, 0.6);
        assert_eq!(t.arc_height_factor, 0.5);
        assert_eq!(t.duration_factor, 0.4);
        assert_eq!(t.fallback_target_distance, 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let t = Tuning::default();
        let json = t.to_json().unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back.roll_impulse, t.roll_impulse);
        assert_eq!(back.settle_secs, t.settle_secs);
    }

    #[test]
    fn test_partial_override_rejected() {
        // Tuning files must be complete; a bare object is an error
        assert!(Tuning::from_json("{}").is_err());
    }
}
