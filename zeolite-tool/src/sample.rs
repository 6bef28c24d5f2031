use std::path::Path;

use crate::config::ClassConfig;
use crate::error::ZeoError;

const GROUP_NAMES: [&str; 7] = [
    "WG: Data Science",
    "WG: Machine Learning",
    "WG: High Performance Computing",
    "WG: Climate Modeling",
    "WG: Quantum Computing",
    "WG: Cybersecurity",
    "WG: Edge Computing",
];
const GROUP_LENGTHS: [usize; 7] = [2, 3, 1, 5, 1, 4, 2];

const BOF_NAMES: [&str; 6] = [
    "BOF: Future of AI",
    "BOF: Open Source Tools",
    "BOF: Career Development",
    "BOF: Diversity in Tech",
    "BOF: Networking Session",
    "BOF: Industry Trends",
];
const BOF_LENGTHS: [usize; 6] = [1, 2, 1, 1, 2, 1];

/// Writes a synthetic working-group CSV honoring the configured column
/// indices. Returns how many rows were written.
pub fn write_sample_groups(
    path: &Path,
    columns: &ClassConfig,
    count: usize,
) -> Result<usize, ZeoError> {
    write_sample(
        path,
        columns,
        "Name of Group",
        "Quantity of Sessions Needed",
        &GROUP_NAMES,
        &GROUP_LENGTHS,
        count,
    )
}

/// Writes a synthetic BOF CSV honoring the configured column indices.
pub fn write_sample_bofs(
    path: &Path,
    columns: &ClassConfig,
    count: usize,
) -> Result<usize, ZeoError> {
    write_sample(
        path,
        columns,
        "BOF Title",
        "Session Count",
        &BOF_NAMES,
        &BOF_LENGTHS,
        count,
    )
}

fn write_sample(
    path: &Path,
    columns: &ClassConfig,
    name_header: &str,
    length_header: &str,
    names: &[&str],
    lengths: &[usize],
    count: usize,
) -> Result<usize, ZeoError> {
    // A few filler columns past the widest index, like real exports have.
    let width = columns.name_column.max(columns.length_column) + 3;
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<String> = (0..width).map(|i| format!("Column_{i}")).collect();
    header[columns.name_column] = name_header.to_string();
    header[columns.length_column] = length_header.to_string();
    writer.write_record(&header)?;

    let rows = count.min(names.len());
    for i in 0..rows {
        let mut row = vec![String::new(); width];
        row[columns.name_column] = names[i].to_string();
        row[columns.length_column] = lengths[i].to_string();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::read_sessions;

    #[test]
    fn generated_groups_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.csv");
        let config = Config::default();

        let written = write_sample_groups(&path, &config.groups, 5).unwrap();
        assert_eq!(written, 5);

        let sessions = read_sessions(&path, &config.groups).unwrap();
        assert_eq!(sessions.len(), 5);
        assert_eq!(sessions[0].name, "WG: Data Science");
        // Lengths above groups.max_length come back capped.
        assert!(sessions.iter().all(|s| s.length <= config.groups.max_length));
    }

    #[test]
    fn generated_bofs_sit_in_wide_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bofs.csv");
        let config = Config::default();

        write_sample_bofs(&path, &config.bofs, 4).unwrap();
        let sessions = read_sessions(&path, &config.bofs).unwrap();
        assert_eq!(sessions.len(), 4);
        assert!(sessions.iter().all(|s| s.length <= config.bofs.max_length));
    }
}
