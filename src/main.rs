//! Critter Toss headless demo
//!
//! Drives one scripted throw at the fixed timestep and logs every lifecycle
//! event, then resets. Useful for eyeballing the sequence without a
//! renderer attached (`RUST_LOG=debug` for per-transition detail).

use glam::Vec3;

use critter_toss::consts::SIM_DT;
use critter_toss::sim::{Phase, SimEvent, SimState};
use critter_toss::tuning::Tuning;

fn main() {
    env_logger::init();

    let mut sim = SimState::new(42, Tuning::default());
    sim.place_creature(Vec3::new(0.0, 0.05, -0.5));
    for entity in sim.entities() {
        log::info!("spawned {:?} #{} at {:?}", entity.kind, entity.id.0, entity.pos);
    }

    let start = Vec3::new(0.0, 0.3, -0.8);
    let creature = sim.creature_position();
    if let Err(err) = sim.arm(start, creature) {
        log::error!("arm failed: {err}");
        return;
    }
    log::info!("throw armed from {start:?}");

    // Drive until the ball comes to rest (bounded, in case of bad tuning)
    let budget = (10.0 / SIM_DT) as u32;
    'ticks: for _ in 0..budget {
        for event in sim.advance(SIM_DT) {
            log::info!("t={:.2}s event: {event:?}", sim.time());
            if matches!(event, SimEvent::Settled(_)) {
                break 'ticks;
            }
        }
    }

    for event in sim.reset() {
        log::info!("t={:.2}s event: {event:?}", sim.time());
    }
    log::info!(
        "final phase {:?}, creature back at {:?}",
        sim.phase(),
        sim.creature_position()
    );
    debug_assert_eq!(sim.phase(), Phase::Idle);
}
