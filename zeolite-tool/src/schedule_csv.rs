use std::path::Path;

use zeolite_core::Grid;

use crate::error::ZeoError;

/// Writes a schedule CSV: a `Room 1..Room N` header, then one row per
/// block with empty cells as empty strings.
pub fn write_schedule(grid: &Grid, path: &Path) -> Result<(), ZeoError> {
    let mut writer = csv::Writer::from_path(path)?;

    let header: Vec<String> = (1..=grid.rooms()).map(|room| format!("Room {room}")).collect();
    writer.write_record(&header)?;

    for block in 0..grid.blocks() {
        let row: Vec<&str> = grid
            .row(block)
            .iter()
            .map(|cell| cell.as_deref().unwrap_or(""))
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a schedule CSV produced by [`write_schedule`] into a grid of the
/// configured dimensions. Blank or whitespace-only cells are empty slots.
pub fn read_schedule(path: &Path, blocks: usize, rooms: usize) -> Result<Grid, ZeoError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let header = reader.headers()?;
    if header.len() < rooms {
        return Err(ZeoError::BadInput {
            path: path.to_path_buf(),
            message: format!("header names {} rooms, expected {rooms}", header.len()),
        });
    }

    let mut grid = Grid::new(blocks, rooms);
    let mut records = reader.records();
    for block in 0..blocks {
        let Some(record) = records.next() else {
            return Err(ZeoError::BadInput {
                path: path.to_path_buf(),
                message: format!("fewer than {blocks} schedule rows"),
            });
        };
        let record = record?;
        for room in 0..rooms {
            let cell = record.get(room).map(str::trim).unwrap_or("");
            if !cell.is_empty() {
                grid.set(block, room, Some(cell.to_string()));
            }
        }
    }
    Ok(grid)
}
