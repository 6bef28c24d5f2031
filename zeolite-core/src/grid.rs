/// Occupancy matrix for one schedule: `blocks` time blocks by `rooms`
/// parallel rooms.
///
/// Each cell holds the occupying session name or nothing. A session of
/// length `L` placed at `(start, room)` occupies cells
/// `(start .. start + L, room)`; the placement phases guarantee runs never
/// overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    blocks: usize,
    rooms: usize,
    cells: Vec<Option<String>>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(blocks: usize, rooms: usize) -> Self {
        Grid {
            blocks,
            rooms,
            cells: vec![None; blocks * rooms],
        }
    }

    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn rooms(&self) -> usize {
        self.rooms
    }

    /// Total number of cells.
    pub fn capacity(&self) -> usize {
        self.blocks * self.rooms
    }

    fn index(&self, block: usize, room: usize) -> usize {
        block * self.rooms + room
    }

    /// Occupant of a cell, or `None` for an empty or out-of-range cell.
    pub fn get(&self, block: usize, room: usize) -> Option<&str> {
        if block >= self.blocks || room >= self.rooms {
            return None;
        }
        self.cells[self.index(block, room)].as_deref()
    }

    /// Sets a single cell. Callers pass in-range coordinates.
    pub fn set(&mut self, block: usize, room: usize, occupant: Option<String>) {
        let index = self.index(block, room);
        self.cells[index] = occupant;
    }

    /// Whether `length` consecutive cells starting at `(start, room)` are
    /// all empty. A run that would extend past the last block is never free.
    pub fn run_is_empty(&self, start: usize, room: usize, length: usize) -> bool {
        if room >= self.rooms || start + length > self.blocks {
            return false;
        }
        (start..start + length).all(|block| self.cells[self.index(block, room)].is_none())
    }

    /// Occupies `length` consecutive cells starting at `(start, room)`.
    /// Callers check [`run_is_empty`](Self::run_is_empty) first.
    pub fn place_run(&mut self, start: usize, room: usize, length: usize, name: &str) {
        for block in start..start + length {
            let index = self.index(block, room);
            self.cells[index] = Some(name.to_string());
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.capacity() - self.occupied_count()
    }

    /// All empty cells as `(block, room)` pairs, block-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for block in 0..self.blocks {
            for room in 0..self.rooms {
                if self.cells[self.index(block, room)].is_none() {
                    cells.push((block, room));
                }
            }
        }
        cells
    }

    /// Blocks in which every room is empty.
    pub fn empty_blocks(&self) -> Vec<usize> {
        (0..self.blocks)
            .filter(|&block| (0..self.rooms).all(|room| self.cells[self.index(block, room)].is_none()))
            .collect()
    }

    /// One block's cells across all rooms, for serialization.
    pub fn row(&self, block: usize) -> &[Option<String>] {
        let start = block * self.rooms;
        &self.cells[start..start + self.rooms]
    }
}
