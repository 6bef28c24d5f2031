use std::path::Path;

use tracing::warn;
use zeolite_core::Session;

use crate::config::ClassConfig;
use crate::error::ZeoError;

/// Reads sessions from a CSV export using the configured column indices.
///
/// Rows with too few columns or a blank name cell are skipped. Only the
/// first line of the name cell is kept; registration exports pack extra
/// detail into the lines below it. A length that does not parse as an
/// integer is fatal; one that parses but falls outside `[1, max_length]`
/// is clamped with a warning.
pub fn read_sessions(path: &Path, columns: &ClassConfig) -> Result<Vec<Session>, ZeoError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let max_column = columns.name_column.max(columns.length_column);

    let header = reader.headers()?;
    if header.len() <= max_column {
        return Err(ZeoError::BadInput {
            path: path.to_path_buf(),
            message: format!(
                "header has {} columns, but the configuration expects column {}",
                header.len(),
                max_column
            ),
        });
    }

    let mut sessions = Vec::new();
    // Row 1 is the header; data rows start at 2 for messages.
    for (offset, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() <= max_column {
            continue;
        }

        let name_cell = record.get(columns.name_column).unwrap_or("").trim();
        let Some(name) = name_cell
            .lines()
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            continue;
        };

        let length_cell = record.get(columns.length_column).unwrap_or("").trim();
        let requested: i64 = length_cell.parse().map_err(|_| ZeoError::BadInput {
            path: path.to_path_buf(),
            message: format!(
                "row {}: length for \"{name}\" must be an integer (got {length_cell:?})",
                offset + 2
            ),
        })?;

        sessions.push(Session::new(name, clamp_length(name, requested, columns.max_length)));
    }
    Ok(sessions)
}

fn clamp_length(name: &str, requested: i64, max_length: usize) -> usize {
    if requested < 1 {
        warn!(session = name, requested, "length below 1, defaulting to 1");
        1
    } else if requested as usize > max_length {
        warn!(session = name, requested, max_length, "length capped");
        max_length
    } else {
        requested as usize
    }
}
