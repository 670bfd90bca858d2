use crate::color::{next_color, Color};
use crate::glow::dice::Dice;
use crate::glow::grid::Grid;
use crate::glow::hex::WALK_STEPS;

/// A scheduled recolor of one cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Activation {
    /// Position of the cell in the grid
    pub index: usize,
    pub color: Color,
    /// Milliseconds on the animation clock
    pub time: u64,
}

/// Applies every pending activation whose time has passed and drops it from the queue.
/// Entries that are not due yet stay queued. Returns how many were applied.
pub fn process_due(grid: &mut Grid, pending: &mut Vec<Activation>, now: u64) -> usize {
    let mut applied = 0;
    // back to front so removals don't shift unvisited entries
    for i in (0..pending.len()).rev() {
        let activation = pending[i];
        if activation.time >= now {
            continue;
        }
        if let Some(cell) = grid.get_mut(activation.index) {
            cell.paint(activation.color);
            applied += 1;
        }
        pending.remove(i);
    }
    applied
}

/// Random walk from a random cell through unvisited neighbours. The walk stops after
/// `length` steps, or early once six random neighbour picks in a row come up empty.
pub fn build_random_path(
    grid: &Grid,
    length: usize,
    now: u64,
    dice: &mut Dice,
) -> Vec<Activation> {
    if grid.is_empty() {
        return Vec::new();
    }

    let color = next_color(dice, false);
    let mut time = now + dice.int(10, 20) as u64;
    let root = dice.index(grid.len());

    let mut path = vec![Activation { index: root, color, time }];
    let mut current = root;

    for _ in 0..length {
        time += dice.int(15, 25) as u64;

        let next = match next_neighbour(grid, current, &path, dice) {
            Some(next) => next,
            None => break,
        };
        path.push(Activation { index: next, color, time });
        current = next;
    }

    path
}

fn next_neighbour(
    grid: &Grid,
    index: usize,
    visited: &[Activation],
    dice: &mut Dice,
) -> Option<usize> {
    let cell = grid.get(index)?;
    for _ in 0..WALK_STEPS.len() {
        let (dc, dr) = WALK_STEPS[dice.index(WALK_STEPS.len())];
        let Some(next) = grid.find_offset(cell.col + dc, cell.row + dr) else {
            continue;
        };
        if !visited.iter().any(|a| a.index == next) {
            return Some(next);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid() -> Grid {
        Grid::new(200., 200., 10., &mut Dice::from_seed((9, 9)))
    }

    #[test]
    fn only_due_entries_are_applied() {
        let mut grid = grid();
        for cell in grid.cells_mut() {
            cell.clean = true;
        }
        let red = Color::new_rgb(1., 0., 0.);
        let blue = Color::new_rgb(0., 0., 1.);
        let now = 1_000;
        let mut pending = vec![
            Activation { index: 3, color: red, time: now - 10 },
            Activation { index: 7, color: blue, time: now + 10 },
        ];

        assert_eq!(process_due(&mut grid, &mut pending, now), 1);

        assert_eq!(pending, vec![Activation { index: 7, color: blue, time: now + 10 }]);
        let dirty: Vec<usize> = grid
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.clean)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(dirty, vec![3]);
        assert_eq!(grid.cells()[3].color, red);
        assert_ne!(grid.cells()[7].color, blue);
    }

    #[test]
    fn entry_at_now_waits() {
        let mut grid = grid();
        let mut pending = vec![Activation {
            index: 0,
            color: Color::new_rgb(1., 1., 1.),
            time: 50,
        }];
        assert_eq!(process_due(&mut grid, &mut pending, 50), 0);
        assert_eq!(pending.len(), 1);
        assert_eq!(process_due(&mut grid, &mut pending, 51), 1);
        assert!(pending.is_empty());
    }

    #[test]
    fn processes_every_due_entry_in_one_pass() {
        let mut grid = grid();
        let color = Color::new_rgb(0., 1., 0.);
        let mut pending: Vec<Activation> = (0..10)
            .map(|i| Activation { index: i, color, time: i as u64 * 10 })
            .collect();
        assert_eq!(process_due(&mut grid, &mut pending, 45), 5);
        let left: Vec<usize> = pending.iter().map(|a| a.index).collect();
        assert_eq!(left, vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn random_walk_visits_adjacent_unique_cells() {
        let grid = grid();
        let mut dice = Dice::from_seed((21, 12));
        for _ in 0..20 {
            let path = build_random_path(&grid, 40, 0, &mut dice);
            assert!(!path.is_empty() && path.len() <= 41);

            let unique: HashSet<usize> = path.iter().map(|a| a.index).collect();
            assert_eq!(unique.len(), path.len());

            for pair in path.windows(2) {
                let a = &grid.cells()[pair[0].index];
                let b = &grid.cells()[pair[1].index];
                assert!(WALK_STEPS.contains(&(b.col - a.col, b.row - a.row)));
                assert!(pair[1].time >= pair[0].time + 15 && pair[1].time <= pair[0].time + 25);
                assert_eq!(pair[0].color, pair[1].color);
            }
        }
    }
}
