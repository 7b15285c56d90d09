use std::sync::Arc;
use std::sync::RwLock;

use crate::shared::Motion;
use crate::shared::UnitSnapshot;

/// Mutable fields of one elevator unit. `claimed` reserves the unit for a
/// dispatched command from the moment of assignment until the trip (door
/// cycle included) has completed.
struct UnitStatus {
    floor: u8,
    motion: Motion,
    claimed: bool,
}

/// Shared handle to a unit's status, held by both the controller's pool and
/// the unit's worker thread. Reads take the shared lock so concurrent status
/// queries never block each other; every mutation takes the exclusive lock.
#[derive(Clone)]
pub struct StatusCell {
    inner: Arc<RwLock<UnitStatus>>,
}

impl StatusCell {
    pub fn new(start_floor: u8) -> StatusCell {
        StatusCell {
            inner: Arc::new(RwLock::new(UnitStatus {
                floor: start_floor,
                motion: Motion::Idle,
                claimed: false,
            })),
        }
    }

    pub fn floor(&self) -> u8 {
        self.inner.read().unwrap().floor
    }

    pub fn motion(&self) -> Motion {
        self.inner.read().unwrap().motion
    }

    /// Snapshot of an assignable unit, or `None` if it is claimed or
    /// mid-trip. Check and snapshot happen under one lock acquisition.
    pub fn idle_snapshot(&self, id: u8) -> Option<UnitSnapshot> {
        let status = self.inner.read().unwrap();
        if !status.claimed && status.motion.accepts_assignment() {
            Some(UnitSnapshot {
                id,
                current_floor: status.floor,
            })
        } else {
            None
        }
    }

    /// Reserve the unit for one command. Fails if the unit is mid-trip or
    /// another dispatcher already claimed it.
    pub fn try_claim(&self) -> bool {
        let mut status = self.inner.write().unwrap();
        if !status.claimed && status.motion.accepts_assignment() {
            status.claimed = true;
            true
        } else {
            false
        }
    }

    /// Make the unit assignable again, once its trip has fully completed or
    /// when a handoff had to be abandoned.
    pub fn release(&self) {
        self.inner.write().unwrap().claimed = false;
    }

    pub fn set_motion(&self, motion: Motion) {
        self.inner.write().unwrap().motion = motion;
    }

    pub fn ascend(&self) -> u8 {
        let mut status = self.inner.write().unwrap();
        status.floor += 1;
        status.floor
    }

    pub fn descend(&self) -> u8 {
        let mut status = self.inner.write().unwrap();
        status.floor -= 1;
        status.floor
    }
}
