//! Critter Toss - throw-and-capture simulation core
//!
//! Core modules:
//! - `sim`: Deterministic throw simulation (trajectory, lifecycle, settle physics)
//! - `tuning`: Data-driven gameplay constants
//!
//! The core renders nothing. It produces entity positions over time and
//! discrete lifecycle events for an external renderer/UI to display, driven
//! by one periodic tick plus discrete gesture/reset events.

pub mod sim;
pub mod tuning;

pub use sim::{Phase, SimEvent, SimState};
pub use tuning::Tuning;

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
}

/// Distance between two points projected onto the ground plane (y ignored)
#[inline]
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Drop a point straight down to the given rest height
#[inline]
pub fn pin_to_ground(p: Vec3, rest_y: f32) -> Vec3 {
    Vec3::new(p.x, rest_y, p.z)
}
