//! Throw lifecycle state machine
//!
//! Owns the single active throw: arms on gesture release, advances on the
//! external tick, resolves every completed flight as a capture, and hands
//! the landed ball to the settle physics. All delayed side effects go
//! through the sim-time scheduler so a reset can cancel them before they
//! touch a torn-down session.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::arena::{Arena, Entity, EntityId, EntityKind};
use super::hit::ground_circles_touch;
use super::launch::Launch;
use super::schedule::{DeferredAction, Scheduler, SessionToken};
use super::settle::{SettleMotion, roll_impulse};
use crate::pin_to_ground;
use crate::tuning::Tuning;

/// Discrete stage of the throw lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No throw in progress; arm is permitted
    #[default]
    Idle,
    /// Ball following its trajectory
    InFlight,
    /// Ball landed; creature shrinking away
    Resolving,
    /// Post-landing roll in progress; waiting for an explicit reset
    Settling,
}

/// Notifications pushed to collaborators (renderer, haptics, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Ball reached the target point
    Landed(Vec3),
    /// Creature finished its shrink and left the arena
    CreatureCaptured,
    /// Post-landing roll came to rest
    Settled(Vec3),
    /// Session tore down and returned to Idle
    Reset,
}

/// Rejected requests; never fatal, state is left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArmError {
    #[error("throw already in progress (phase {phase:?})")]
    NotIdle { phase: Phase },
}

/// Bookkeeping for the active throw
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThrowState {
    launch: Launch,
    elapsed: f32,
    /// Weak handle to the targeted creature; the arena owns its lifetime
    target: Option<EntityId>,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    /// Simulation clock in seconds, advanced only by `advance`
    time: f32,
    phase: Phase,
    token: SessionToken,
    scheduler: Scheduler,
    arena: Arena,
    ball: EntityId,
    creature: Option<EntityId>,
    /// Where the creature was first anchored; reset restores it here
    creature_home: Option<Vec3>,
    throw: Option<ThrowState>,
    /// Landing point of the current throw, set on entering Resolving
    landing: Option<Vec3>,
    /// Sim time at which the current throw landed
    landed_at: Option<f32>,
    settle: Option<SettleMotion>,
}

impl SimState {
    /// Create a fresh state with one ball and no creature anchored
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut arena = Arena::new();
        let ball = arena.spawn(EntityKind::Ball, Vec3::ZERO);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            time: 0.0,
            phase: Phase::Idle,
            token: SessionToken::default(),
            scheduler: Scheduler::default(),
            arena,
            ball,
            creature: None,
            creature_home: None,
            throw: None,
            landing: None,
            landed_at: None,
            settle: None,
        }
    }

    /// Anchor the creature at a surface point, replacing any existing one.
    /// Reset restores the creature to this placement.
    pub fn place_creature(&mut self, pos: Vec3) -> EntityId {
        if let Some(old) = self.creature.take() {
            self.arena.despawn(old);
        }
        let id = self.arena.spawn(EntityKind::Creature, pos);
        self.creature = Some(id);
        self.creature_home = Some(pos);
        id
    }

    // === Queries ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn ball_id(&self) -> EntityId {
        self.ball
    }

    pub fn creature_id(&self) -> Option<EntityId> {
        self.creature
    }

    pub fn ball_position(&self) -> Option<Vec3> {
        self.arena.get(self.ball).map(|e| e.pos)
    }

    pub fn creature_position(&self) -> Option<Vec3> {
        self.creature.and_then(|id| self.arena.get(id)).map(|e| e.pos)
    }

    /// Parameters of the active throw, if one is in progress
    pub fn launch(&self) -> Option<Launch> {
        self.throw.as_ref().map(|t| t.launch)
    }

    /// Arena lookup for renderers subscribing by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.arena.get(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.arena.iter()
    }

    /// Ground-plane contact between the resting ball and the creature, for
    /// the collision-trigger collaborator to decide on a reset
    pub fn ball_touches_creature(&self) -> bool {
        match (self.ball_position(), self.creature_position()) {
            (Some(ball), Some(creature)) => ground_circles_touch(
                ball,
                self.tuning.ball_radius,
                creature,
                self.tuning.creature_radius,
            ),
            _ => false,
        }
    }

    // === Transitions ===

    /// Arm a throw from a gesture release. Only permitted from `Idle`; the
    /// target is the creature's position, or a synthetic point one
    /// fallback-distance in front of the launch when none is anchored.
    pub fn arm(
        &mut self,
        launch_start: Vec3,
        creature_position: Option<Vec3>,
    ) -> Result<(), ArmError> {
        if self.phase != Phase::Idle {
            log::warn!("arm rejected while {:?}", self.phase);
            return Err(ArmError::NotIdle { phase: self.phase });
        }

        let target = creature_position.unwrap_or_else(|| {
            launch_start + Vec3::new(0.0, 0.0, -self.tuning.fallback_target_distance)
        });
        let launch = Launch::toward(launch_start, target, &self.tuning);
        // The capture only fires for a real creature; a synthetic target
        // still flies and settles
        let captured_target = if creature_position.is_some() {
            self.creature
        } else {
            None
        };

        if let Some(ball) = self.arena.get_mut(self.ball) {
            ball.pos = launch_start;
        }
        self.throw = Some(ThrowState {
            launch,
            elapsed: 0.0,
            target: captured_target,
        });
        self.phase = Phase::InFlight;
        log::debug!(
            "armed throw: start {:?} target {:?} duration {:.2}s",
            launch.start,
            launch.target,
            launch.duration
        );
        Ok(())
    }

    /// Advance the simulation by one tick. Ticks arrive in non-decreasing
    /// time order; a negative `dt` is clamped to zero. Returns the events
    /// this tick produced; current phase and positions are queryable
    /// afterwards.
    pub fn advance(&mut self, dt: f32) -> Vec<SimEvent> {
        let dt = if dt < 0.0 {
            log::warn!("negative tick dt {dt}, clamped to 0");
            0.0
        } else {
            dt
        };
        self.time += dt;

        let mut events = Vec::new();
        match self.phase {
            Phase::Idle => {}
            Phase::InFlight => self.advance_flight(dt, &mut events),
            Phase::Resolving => self.advance_resolving(&mut events),
            Phase::Settling => self.advance_settling(dt, &mut events),
        }
        events
    }

    /// Tear down the current session and return to `Idle`. Valid from any
    /// phase; a no-op from `Idle` (no event fired). Cancels every deferred
    /// action of the session, replaces the ball with a fresh one, and
    /// restores the creature to its initial placement.
    pub fn reset(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::Idle {
            return events;
        }

        // Stale deferred callbacks must never touch the next session
        self.scheduler.cancel(self.token);
        self.token = self.token.next();

        self.throw = None;
        self.settle = None;
        self.landing = None;
        self.landed_at = None;

        // Fresh ball for the next session
        self.arena.despawn(self.ball);
        self.ball = self.arena.spawn(EntityKind::Ball, Vec3::ZERO);

        // Creature comes back at its anchor: transform restored if it is
        // still present, respawned if the capture removed it
        if let Some(home) = self.creature_home {
            let restored = match self.creature {
                Some(id) => {
                    if let Some(creature) = self.arena.get_mut(id) {
                        creature.pos = home;
                        creature.scale = 1.0;
                        true
                    } else {
                        false
                    }
                }
                None => false,
            };
            if !restored {
                self.creature = Some(self.arena.spawn(EntityKind::Creature, home));
            }
        }

        self.phase = Phase::Idle;
        events.push(SimEvent::Reset);
        log::debug!("session reset at t={:.2}", self.time);
        events
    }

    // === Per-phase tick bodies ===

    fn advance_flight(&mut self, dt: f32, events: &mut Vec<SimEvent>) {
        let Some(throw) = self.throw.as_mut() else {
            return;
        };
        throw.elapsed += dt;
        let launch = throw.launch;
        let has_creature = throw.target.is_some();

        if throw.elapsed < launch.duration {
            let t = throw.elapsed / launch.duration;
            if let Some(ball) = self.arena.get_mut(self.ball) {
                ball.pos = launch.position(t);
            }
            return;
        }

        // Overshoot past t=1 is discarded: elapsed clamps and the ball
        // snaps to the exact target, never an extrapolated position
        throw.elapsed = launch.duration;
        if let Some(ball) = self.arena.get_mut(self.ball) {
            ball.pos = launch.target;
        }
        self.landing = Some(launch.target);
        self.landed_at = Some(self.time);
        self.phase = Phase::Resolving;
        events.push(SimEvent::Landed(launch.target));
        log::debug!("landed at {:?} (t={:.2})", launch.target, self.time);

        let fire_at = self.time + self.tuning.capture_shrink_secs;
        if has_creature {
            self.scheduler
                .schedule(fire_at, self.token, DeferredAction::DetachCreature);
        }
        self.scheduler
            .schedule(fire_at, self.token, DeferredAction::BeginSettle);
    }

    fn advance_resolving(&mut self, events: &mut Vec<SimEvent>) {
        // Creature shrink is a linear tween from full scale to zero over
        // the shrink window
        if let Some(landed_at) = self.landed_at {
            let window = self.tuning.capture_shrink_secs.max(f32::EPSILON);
            let progress = ((self.time - landed_at) / window).clamp(0.0, 1.0);
            if let Some(id) = self.throw.as_ref().and_then(|t| t.target) {
                if let Some(creature) = self.arena.get_mut(id) {
                    creature.scale = 1.0 - progress;
                }
            }
        }
        self.fire_due(events);
    }

    fn advance_settling(&mut self, dt: f32, events: &mut Vec<SimEvent>) {
        let damping = self.tuning.settle_damping;
        let rest_y = self.tuning.ball_rest_height;
        let step = match self.settle.as_mut() {
            Some(motion) => motion.advance(dt, damping),
            None => return,
        };
        match step {
            Some(delta) => {
                if let Some(ball) = self.arena.get_mut(self.ball) {
                    ball.pos += delta;
                    // The roll stays on the ground plane
                    ball.pos.y = rest_y;
                }
            }
            None => {
                self.settle = None;
                if let Some(rest) = self.ball_position() {
                    events.push(SimEvent::Settled(rest));
                    log::debug!("settled at {:?} (t={:.2})", rest, self.time);
                }
            }
        }
    }

    fn fire_due(&mut self, events: &mut Vec<SimEvent>) {
        for action in self.scheduler.drain_due(self.time, self.token) {
            match action {
                DeferredAction::DetachCreature => {
                    if let Some(id) = self.creature.take() {
                        self.arena.despawn(id);
                        events.push(SimEvent::CreatureCaptured);
                        log::debug!("creature captured (t={:.2})", self.time);
                    }
                }
                DeferredAction::BeginSettle => {
                    if let Some(landing) = self.landing {
                        let rest = pin_to_ground(landing, self.tuning.ball_rest_height);
                        if let Some(ball) = self.arena.get_mut(self.ball) {
                            ball.pos = rest;
                        }
                    }
                    let impulse = roll_impulse(&mut self.rng, &self.tuning);
                    self.settle = Some(SettleMotion::new(impulse, &self.tuning));
                    self.phase = Phase::Settling;
                }
            }
        }
    }
}
