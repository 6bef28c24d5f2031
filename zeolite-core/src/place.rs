use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::debug;

use crate::error::ScheduleError;
use crate::grid::Grid;
use crate::session::Session;

/// Order in which a try walks the sessions after the initial shuffle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    #[default]
    LargestFirst,
    SmallestFirst,
    AsIs,
}

impl std::str::FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "largest_first" => Ok(SortStrategy::LargestFirst),
            "smallest_first" => Ok(SortStrategy::SmallestFirst),
            "as_is" => Ok(SortStrategy::AsIs),
            _ => Err(format!("unknown sort strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortStrategy::LargestFirst => write!(f, "largest_first"),
            SortStrategy::SmallestFirst => write!(f, "smallest_first"),
            SortStrategy::AsIs => write!(f, "as_is"),
        }
    }
}

/// Shuffles the sessions, then applies the strategy. The sort is stable, so
/// equal-length sessions keep their shuffled relative order; that is where
/// placement diversity across permutations comes from.
pub(crate) fn shuffled_order<'a>(
    sessions: &'a [Session],
    strategy: SortStrategy,
    rng: &mut StdRng,
) -> Vec<&'a Session> {
    let mut order: Vec<&Session> = sessions.iter().collect();
    order.shuffle(rng);
    match strategy {
        SortStrategy::LargestFirst => order.sort_by(|a, b| b.length.cmp(&a.length)),
        SortStrategy::SmallestFirst => order.sort_by(|a, b| a.length.cmp(&b.length)),
        SortStrategy::AsIs => {}
    }
    order
}

/// Places every session into `grid`, each occupying `length` consecutive
/// blocks in one room.
///
/// Each try reshuffles the session order and searches first-fit: start
/// blocks in increasing order, rooms in fresh random order per start block.
/// A try that cannot place a session is discarded wholesale and a new one
/// begins; `grid` only changes once a try places everything. Returns the
/// number of tries consumed.
pub fn place_sessions(
    grid: &mut Grid,
    sessions: &[Session],
    max_tries: usize,
    strategy: SortStrategy,
    rng: &mut StdRng,
) -> Result<usize, ScheduleError> {
    if sessions.is_empty() {
        return Ok(0);
    }

    let mut last_failed = String::new();
    for attempt in 1..=max_tries {
        let order = shuffled_order(sessions, strategy, rng);
        let mut scratch = grid.clone();
        match place_once(&mut scratch, &order, rng) {
            Ok(()) => {
                *grid = scratch;
                return Ok(attempt);
            }
            Err(name) => {
                debug!(attempt, session = %name, "try failed, reshuffling");
                last_failed = name;
            }
        }
    }

    Err(ScheduleError::PlacementExhausted {
        name: last_failed,
        tries: max_tries,
    })
}

/// One first-fit pass over `order`. On failure returns the name of the
/// session that did not fit.
fn place_once(grid: &mut Grid, order: &[&Session], rng: &mut StdRng) -> Result<(), String> {
    'sessions: for session in order {
        let max_start = grid.blocks().saturating_sub(session.length);
        for start in 0..=max_start {
            let mut rooms: Vec<usize> = (0..grid.rooms()).collect();
            rooms.shuffle(rng);
            for room in rooms {
                if grid.run_is_empty(start, room, session.length) {
                    grid.place_run(start, room, session.length, &session.name);
                    continue 'sessions;
                }
            }
        }
        return Err(session.name.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn sort_strategies_order_by_length() {
        let sessions = vec![
            Session::new("A", 1),
            Session::new("B", 3),
            Session::new("C", 2),
        ];

        let order = shuffled_order(&sessions, SortStrategy::LargestFirst, &mut rng());
        let lengths: Vec<usize> = order.iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![3, 2, 1]);

        let order = shuffled_order(&sessions, SortStrategy::SmallestFirst, &mut rng());
        let lengths: Vec<usize> = order.iter().map(|s| s.length).collect();
        assert_eq!(lengths, vec![1, 2, 3]);

        let order = shuffled_order(&sessions, SortStrategy::AsIs, &mut rng());
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn places_all_sessions_contiguously() {
        let sessions = vec![
            Session::new("Alpha", 5),
            Session::new("Beta", 3),
            Session::new("Gamma", 1),
        ];
        let mut grid = Grid::new(5, 8);
        let tries =
            place_sessions(&mut grid, &sessions, 100, SortStrategy::LargestFirst, &mut rng())
                .unwrap();

        assert!(tries >= 1);
        assert_eq!(grid.occupied_count(), 9);
        for session in &sessions {
            let cells: Vec<(usize, usize)> = (0..grid.blocks())
                .flat_map(|b| (0..grid.rooms()).map(move |r| (b, r)))
                .filter(|&(b, r)| grid.get(b, r) == Some(session.name.as_str()))
                .collect();
            assert_eq!(cells.len(), session.length);
            let room = cells[0].1;
            assert!(cells.iter().all(|&(_, r)| r == room));
            for pair in cells.windows(2) {
                assert_eq!(pair[1].0, pair[0].0 + 1);
            }
        }
    }

    #[test]
    fn empty_session_list_needs_no_tries() {
        let mut grid = Grid::new(5, 8);
        let tries =
            place_sessions(&mut grid, &[], 100, SortStrategy::LargestFirst, &mut rng()).unwrap();
        assert_eq!(tries, 0);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn failed_tries_leave_grid_untouched() {
        // One room of five blocks already split by a fixed session, so a
        // five-block session can never fit.
        let mut grid = Grid::new(5, 1);
        grid.set(2, 0, Some("Fixed".to_string()));
        let before = grid.clone();

        let sessions = vec![Session::new("Long", 5)];
        let err = place_sessions(&mut grid, &sessions, 9, SortStrategy::LargestFirst, &mut rng())
            .unwrap_err();

        assert_eq!(
            err,
            ScheduleError::PlacementExhausted {
                name: "Long".to_string(),
                tries: 9,
            }
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let sessions = vec![
            Session::new("A", 2),
            Session::new("B", 2),
            Session::new("C", 1),
        ];
        let mut first = Grid::new(4, 3);
        let mut second = Grid::new(4, 3);
        place_sessions(
            &mut first,
            &sessions,
            50,
            SortStrategy::LargestFirst,
            &mut StdRng::seed_from_u64(11),
        )
        .unwrap();
        place_sessions(
            &mut second,
            &sessions,
            50,
            SortStrategy::LargestFirst,
            &mut StdRng::seed_from_u64(11),
        )
        .unwrap();

        assert_eq!(first, second);
    }
}
