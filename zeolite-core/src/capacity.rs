use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::session::Session;

/// Slot demand versus available capacity, computed before any placement
/// work runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub requested: usize,
    pub capacity: usize,
    pub overflow: usize,
}

/// Total slots the sessions ask for.
pub fn requested_slots(sessions: &[Session]) -> usize {
    sessions.iter().map(|session| session.length).sum()
}

/// Checks that `requested` slots fit into `capacity` empty cells.
///
/// This is deterministic, so an over-subscribed instance is rejected before
/// any randomized search is wasted on it.
pub fn check_capacity(requested: usize, capacity: usize) -> Result<CapacityReport, ScheduleError> {
    if requested > capacity {
        return Err(ScheduleError::OverSubscribed {
            requested,
            capacity,
            overflow: requested - capacity,
        });
    }
    Ok(CapacityReport {
        requested,
        capacity,
        overflow: 0,
    })
}
