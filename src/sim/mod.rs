//! Deterministic throw-and-capture simulation
//!
//! Everything the renderer needs is queryable by entity id or delivered as
//! a [`SimEvent`]; no module in here touches a scene graph, the clock, or
//! any other host facility.

pub mod arena;
pub mod hit;
pub mod launch;
pub mod schedule;
pub mod session;
pub mod settle;

pub use arena::{Arena, Entity, EntityId, EntityKind};
pub use launch::Launch;
pub use schedule::{DeferredAction, Scheduler, SessionToken};
pub use session::{ArmError, Phase, SimEvent, SimState};
pub use settle::{RollImpulse, SettleMotion, roll_impulse};
