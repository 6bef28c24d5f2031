use thiserror::Error;

/// Failures of one scheduling run. Every variant is fatal to its run; the
/// permutation loop isolates them per index instead of aborting the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// More slots requested than the grid (or its remaining empty cells)
    /// can hold. Detected before any search.
    #[error("{requested} slots requested but only {capacity} available ({overflow} over)")]
    OverSubscribed {
        requested: usize,
        capacity: usize,
        overflow: usize,
    },

    /// A session could not be placed in any of the allowed tries. `name` is
    /// the session that failed on the last try.
    #[error("could not place \"{name}\" after {tries} tries")]
    PlacementExhausted { name: String, tries: usize },

    /// A session did not fit into the remaining empty cells. The inventory
    /// is fixed, so there is nothing to retry.
    #[error("no room for \"{name}\" among the {remaining} remaining empty slots")]
    FillExhausted { name: String, remaining: usize },
}
