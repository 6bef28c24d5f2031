//! Zeolite core - contiguous slot-grid placement for conference schedules
//!
//! Sessions are packed onto a `blocks x rooms` grid so that a session
//! spanning several blocks occupies consecutive blocks in a single room.
//! Placement is randomized first-fit with whole-try backtracking; leftover
//! capacity is filled by a second, single-pass phase.

pub mod capacity;
pub mod error;
pub mod fill;
pub mod grid;
pub mod place;
pub mod schedule;
pub mod session;

pub use capacity::{CapacityReport, check_capacity, requested_slots};
pub use error::ScheduleError;
pub use fill::fill_sessions;
pub use grid::Grid;
pub use place::{SortStrategy, place_sessions};
pub use schedule::{PlanConfig, ScheduleRun, plan, plan_many};
pub use session::Session;
