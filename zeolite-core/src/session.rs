use serde::{Deserialize, Serialize};

/// One schedulable session: a display name and how many consecutive blocks
/// it needs.
///
/// Working groups and BOFs use the same shape; which phase handles a session
/// is decided by the list it arrives in, not by a field. Lengths are clamped
/// into `[1, max_length]` at ingestion, so the engine can assume
/// `1 <= length <= blocks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub length: usize,
}

impl Session {
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Session {
            name: name.into(),
            length,
        }
    }
}
