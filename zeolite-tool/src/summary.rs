use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ZeoError;

/// Builds the utilization report for one schedule file: slots filled over
/// capacity, then per-session slot counts sorted by name.
///
/// Dimensions are taken from the file itself (header width, row count), so
/// this works on schedules written under any grid configuration.
pub fn summarize(path: &Path) -> Result<String, ZeoError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let rooms = reader.headers()?.len();
    if rooms == 0 {
        return Err(ZeoError::BadInput {
            path: path.to_path_buf(),
            message: "no header row".to_string(),
        });
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut filled = 0usize;
    let mut blocks = 0usize;
    for record in reader.records() {
        let record = record?;
        blocks += 1;
        for room in 0..rooms {
            let cell = record.get(room).map(str::trim).unwrap_or("");
            if !cell.is_empty() {
                filled += 1;
                *counts.entry(cell.to_string()).or_default() += 1;
            }
        }
    }

    let capacity = blocks * rooms;
    let percentage = if capacity > 0 {
        filled as f64 / capacity as f64 * 100.0
    } else {
        0.0
    };

    let mut lines = vec![
        format!("Schedule: {}", path.display()),
        format!("{filled}/{capacity} slots filled ({percentage:.1}%)"),
        String::new(),
    ];
    for (name, count) in &counts {
        let word = if *count == 1 { "slot" } else { "slots" };
        lines.push(format!("{name}: {count} {word}"));
    }
    Ok(lines.join("\n"))
}
