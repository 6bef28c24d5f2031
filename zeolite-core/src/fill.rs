use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::ScheduleError;
use crate::grid::Grid;
use crate::place::{SortStrategy, shuffled_order};
use crate::session::Session;

/// Packs sessions into whatever cells of `grid` are still empty.
///
/// Empty cells are visited in one random order; each session takes the
/// first visited cell from which `length` consecutive empty blocks extend
/// in that room. For single-block sessions, the common case, this is a
/// direct cell assignment. There is no retry loop: the cell inventory is
/// fixed, so reshuffling it cannot create capacity that does not exist.
///
/// The grid keeps whatever was placed before a failure; the caller decides
/// whether a partial fill is usable.
pub fn fill_sessions(
    grid: &mut Grid,
    sessions: &[Session],
    strategy: SortStrategy,
    rng: &mut StdRng,
) -> Result<(), ScheduleError> {
    let mut empties = grid.empty_cells();
    empties.shuffle(rng);

    let order = shuffled_order(sessions, strategy, rng);
    for session in order {
        // Cells taken by an earlier session fail the run check and are
        // skipped; the inventory never needs rebuilding.
        let spot = empties
            .iter()
            .copied()
            .find(|&(block, room)| grid.run_is_empty(block, room, session.length));

        match spot {
            Some((block, room)) => {
                grid.place_run(block, room, session.length, &session.name);
                debug!(session = %session.name, block, room, "filled");
            }
            None => {
                return Err(ScheduleError::FillExhausted {
                    name: session.name.clone(),
                    remaining: grid.empty_count(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    #[test]
    fn fills_scattered_single_cells() {
        // Three empty cells scattered across two rooms.
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Some("Fixed".to_string()));

        let bofs = vec![
            Session::new("B1", 1),
            Session::new("B2", 1),
            Session::new("B3", 1),
        ];
        fill_sessions(&mut grid, &bofs, SortStrategy::LargestFirst, &mut rng()).unwrap();

        assert_eq!(grid.empty_count(), 0);
    }

    #[test]
    fn multi_block_fill_needs_contiguous_run() {
        // Empties at (0,0), (2,0) and (1,1): no two in the same room are
        // adjacent, so a two-block session cannot fit.
        let mut grid = Grid::new(3, 2);
        grid.set(1, 0, Some("X".to_string()));
        grid.set(0, 1, Some("X".to_string()));
        grid.set(2, 1, Some("X".to_string()));

        let bofs = vec![
            Session::new("B1", 1),
            Session::new("B2", 1),
            Session::new("Pair", 2),
        ];
        let err =
            fill_sessions(&mut grid, &bofs, SortStrategy::LargestFirst, &mut rng()).unwrap_err();

        // largest_first walks the two-block session before any single.
        assert_eq!(
            err,
            ScheduleError::FillExhausted {
                name: "Pair".to_string(),
                remaining: 3,
            }
        );
    }

    #[test]
    fn multi_block_fill_uses_runs_in_one_room() {
        let mut grid = Grid::new(3, 2);
        grid.set(0, 0, Some("X".to_string()));
        grid.set(2, 1, Some("X".to_string()));

        let bofs = vec![Session::new("Pair", 2), Session::new("Single", 1)];
        fill_sessions(&mut grid, &bofs, SortStrategy::LargestFirst, &mut rng()).unwrap();

        let pair_cells: Vec<(usize, usize)> = (0..3)
            .flat_map(|b| (0..2).map(move |r| (b, r)))
            .filter(|&(b, r)| grid.get(b, r) == Some("Pair"))
            .collect();
        assert_eq!(pair_cells.len(), 2);
        assert_eq!(pair_cells[0].1, pair_cells[1].1);
        assert_eq!(pair_cells[1].0, pair_cells[0].0 + 1);
    }

    #[test]
    fn full_grid_rejects_any_fill() {
        let mut grid = Grid::new(2, 1);
        grid.place_run(0, 0, 2, "Fixed");

        let err = fill_sessions(
            &mut grid,
            &[Session::new("B", 1)],
            SortStrategy::LargestFirst,
            &mut rng(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ScheduleError::FillExhausted {
                name: "B".to_string(),
                remaining: 0,
            }
        );
    }
}
