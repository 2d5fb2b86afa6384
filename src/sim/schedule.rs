//! Sim-time deferred action queue
//!
//! Delayed side effects (creature detach after its shrink, settle kickoff
//! after landing) are keyed to simulation time and drained by the tick, so
//! tests drive time without wall-clock sleeps. Every record carries the
//! session token that scheduled it; `reset` bumps the token, turning any
//! still-queued record from the old session into a silent no-op.

use serde::{Deserialize, Serialize};

/// Monotonic token identifying one throw session
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct SessionToken(pub u64);

impl SessionToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Side effects that run at a later simulation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Remove the fully-shrunk creature from the arena
    DetachCreature,
    /// Pin the ball to ground rest and kick off the roll
    BeginSettle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Scheduled {
    fire_at: f32,
    token: SessionToken,
    action: DeferredAction,
}

/// Pending deferred actions, drained in fire-time order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    queue: Vec<Scheduled>,
}

impl Scheduler {
    pub fn schedule(&mut self, fire_at: f32, token: SessionToken, action: DeferredAction) {
        self.queue.push(Scheduled {
            fire_at,
            token,
            action,
        });
    }

    /// Drop every record belonging to `token`
    pub fn cancel(&mut self, token: SessionToken) {
        self.queue.retain(|s| s.token != token);
    }

    /// Remove all records due at or before `now` and return the actions for
    /// the current session, ordered by fire time (ties keep insertion
    /// order). Due records from stale sessions are discarded unfired.
    pub fn drain_due(&mut self, now: f32, token: SessionToken) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.queue.retain(|s| {
            if s.fire_at <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| {
            a.fire_at
                .partial_cmp(&b.fire_at)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        due.into_iter()
            .filter(|s| s.token == token)
            .map(|s| s.action)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_respects_fire_order() {
        let mut sched = Scheduler::default();
        let token = SessionToken(0);
        sched.schedule(2.0, token, DeferredAction::BeginSettle);
        sched.schedule(1.0, token, DeferredAction::DetachCreature);

        assert!(sched.drain_due(0.5, token).is_empty());
        let fired = sched.drain_due(3.0, token);
        assert_eq!(
            fired,
            vec![DeferredAction::DetachCreature, DeferredAction::BeginSettle]
        );
        assert!(sched.is_empty());
    }

    #[test]
    fn test_same_fire_time_keeps_insertion_order() {
        let mut sched = Scheduler::default();
        let token = SessionToken(0);
        sched.schedule(1.0, token, DeferredAction::DetachCreature);
        sched.schedule(1.0, token, DeferredAction::BeginSettle);
        let fired = sched.drain_due(1.0, token);
        assert_eq!(
            fired,
            vec![DeferredAction::DetachCreature, DeferredAction::BeginSettle]
        );
    }

    #[test]
    fn test_cancel_removes_session_records() {
        let mut sched = Scheduler::default();
        let old = SessionToken(0);
        sched.schedule(1.0, old, DeferredAction::DetachCreature);
        sched.cancel(old);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_stale_token_records_dropped_unfired() {
        let mut sched = Scheduler::default();
        let old = SessionToken(0);
        let current = old.next();
        sched.schedule(1.0, old, DeferredAction::DetachCreature);
        sched.schedule(1.0, current, DeferredAction::BeginSettle);

        let fired = sched.drain_due(1.0, current);
        assert_eq!(fired, vec![DeferredAction::BeginSettle]);
        // The stale record is gone, not deferred again
        assert!(sched.is_empty());
    }
}
