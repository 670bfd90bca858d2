//! Branching light trees.
//!
//! A tree starts at a random cell and shoots a straight branch in a direction chosen
//! to point away from the nearest grid edges. Every branch that is long enough forks
//! into two shorter branches turned one compass step to either side, and so on until
//! the remaining length runs out.

use std::ops::Range;

use crate::color::{next_color, Color};
use crate::glow::dice::Dice;
use crate::glow::grid::Grid;
use crate::glow::hex::Direction;
use crate::glow::path::Activation;

/// Directions a tree may start in, indexed by the root's `[y zone][x zone]`.
/// Corners only point inwards, the middle of the grid allows all eight.
const ZONE_DIRECTIONS: [[&[usize]; 3]; 3] = [
    [&[2], &[2, 3, 4], &[4]],
    [&[0, 1, 2], &[0, 1, 2, 3, 4, 5, 6, 7], &[4, 5, 6]],
    [&[0], &[0, 7, 6], &[6]],
];

/// Number of forks grown from the end of every branch.
pub const CHILDREN: usize = 2;

/// Delay range between two lit cells of a branch, in milliseconds.
const STEP_MS: (i64, i64) = (25, 45);

/// One straight segment of a tree.
#[derive(Clone, Debug)]
pub struct Branch {
    /// Cell the branch starts from
    pub root: usize,
    pub direction: Direction,
    /// Length actually grown, after shrinking away from the grid edge
    pub distance: i32,
    pub parent: Option<usize>,
    /// Cell the forks start from, absent when the last step missed the grid
    pub end: Option<usize>,
    /// Number of forks that actually grew from `end`
    pub children: usize,
    /// Entries of `TreePath::entries` produced by this branch
    pub entries: Range<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct TreePath {
    pub entries: Vec<Activation>,
    pub branches: Vec<Branch>,
}

impl TreePath {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn allowed_directions(zone: (usize, usize)) -> &'static [usize] {
    let (x, y) = zone;
    ZONE_DIRECTIONS[y.min(2)][x.min(2)]
}

/// Grows a tree of `length` from a random root. The first entry is the root itself,
/// lit slightly after `now`.
pub fn build_tree_path(grid: &Grid, length: i32, now: u64, dice: &mut Dice) -> TreePath {
    if grid.is_empty() {
        return TreePath::default();
    }

    let time = now + dice.int(10, 20) as u64;
    let color = next_color(dice, false);
    let root = dice.index(grid.len());

    let mut builder = TreeBuilder {
        grid,
        dice,
        color,
        path: TreePath::default(),
    };
    builder.path.entries.push(Activation { index: root, color, time });

    let zone = grid.cells()[root].zone();
    let direction = builder
        .dice
        .pick(allowed_directions(zone))
        .map(|&d| Direction::from_index(d))
        .unwrap_or(Direction::Bottom);

    builder.grow(Some(root), length, time, direction, CHILDREN, None);
    builder.path
}

struct TreeBuilder<'a> {
    grid: &'a Grid,
    dice: &'a mut Dice,
    color: Color,
    path: TreePath,
}

impl TreeBuilder<'_> {
    fn jitter(&mut self) -> u64 {
        self.dice.int(STEP_MS.0, STEP_MS.1) as u64
    }

    fn grow(
        &mut self,
        root: Option<usize>,
        mut distance: i32,
        time: u64,
        direction: Direction,
        children: usize,
        parent: Option<usize>,
    ) -> Option<usize> {
        let root = root?;
        let root_cube = self.grid.get(root)?.cube;

        // Aim at an even distance so the half steps of the diagonals stay on the
        // grid. Off-grid targets shrink the branch until one fits.
        let (target_distance, target_cube, target) = loop {
            if distance <= 0 {
                return None;
            }
            let target_distance = distance + distance % 2;
            let target_cube = direction.target(root_cube, target_distance);
            match self.grid.find_cube(target_cube) {
                Some(target) => break (target_distance, target_cube, target),
                None => distance -= 1,
            }
        };
        let include_target = distance % 2 == 0;

        let id = self.path.branches.len();
        let first = self.path.entries.len();
        self.path.branches.push(Branch {
            root,
            direction,
            distance,
            parent,
            end: None,
            children: 0,
            entries: first..first,
        });

        let mut time = time;
        let mut end = None;
        for i in 1..=distance {
            time += self.jitter();

            let t = i as f64 / target_distance as f64;
            // rounding can leave the grid right at its edge, that step stays dark
            let Some(index) = self.grid.find_cube(root_cube.lerp(target_cube, t)) else {
                continue;
            };
            self.path.entries.push(Activation { index, color: self.color, time });

            if i == distance && !include_target {
                end = Some(index);
            }
        }

        if include_target {
            end = Some(target);
            let at = time + self.jitter();
            self.path.entries.push(Activation {
                index: target,
                color: self.color,
                time: at,
            });
        }
        self.path.branches[id].entries.end = self.path.entries.len();
        self.path.branches[id].end = end;

        let child_distance = distance - 2;
        if child_distance <= 0 {
            return Some(id);
        }

        for i in 0..children {
            let delta = ((i / 2) as i32).max(1);
            let turn = if i % 2 == 0 { -delta } else { delta };
            let child = self.grow(
                end,
                child_distance,
                time,
                direction.rotate(turn),
                CHILDREN,
                Some(id),
            );
            if child.is_some() {
                self.path.branches[id].children += 1;
            }
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(640., 480., 10., &mut Dice::from_seed((1, 1)))
    }

    const LENGTHS: [i32; 6] = [3, 4, 7, 10, 16, 20];

    fn trees(count: usize) -> Vec<(i32, TreePath)> {
        let grid = grid();
        let mut dice = Dice::from_seed((7, 31));
        LENGTHS
            .iter()
            .cycle()
            .take(count)
            .map(|&length| (length, build_tree_path(&grid, length, 1_000, &mut dice)))
            .collect()
    }

    #[test]
    fn zone_table_points_inwards() {
        assert_eq!(allowed_directions((0, 0)), &[2]);
        assert_eq!(allowed_directions((2, 2)), &[6]);
        assert_eq!(allowed_directions((1, 1)).len(), 8);
        for y in 0..3 {
            for x in 0..3 {
                let allowed = allowed_directions((x, y));
                assert!(!allowed.is_empty());
                assert!(allowed.iter().all(|&d| d < Direction::COUNT));
            }
        }
    }

    #[test]
    fn root_is_first_entry() {
        for (_, tree) in trees(50) {
            let root = tree.entries[0];
            assert!(root.time >= 1_010 && root.time <= 1_020);
            if let Some(first) = tree.branches.first() {
                assert_eq!(first.root, root.index);
                assert_eq!(first.parent, None);
            }
            assert!(tree.entries.iter().all(|e| e.color == root.color));
        }
    }

    #[test]
    fn branch_entries_stay_within_branch_reach() {
        let grid = grid();
        for (_, tree) in trees(200) {
            for branch in &tree.branches {
                let root = grid.cells()[branch.root].cube;
                let reach = branch.distance + branch.distance % 2;
                for entry in &tree.entries[branch.entries.clone()] {
                    let cube = grid.cells()[entry.index].cube;
                    assert!(cube.distance(root) <= reach, "{branch:?}");
                }
            }
        }
    }

    #[test]
    fn forks_and_shrinks() {
        let (mut children, mut full) = (0, 0);
        for (length, tree) in trees(200) {
            for (id, branch) in tree.branches.iter().enumerate() {
                assert!(branch.distance >= 1);
                let grown = tree
                    .branches
                    .iter()
                    .filter(|b| b.parent == Some(id))
                    .count();
                assert_eq!(branch.children, grown, "{branch:?}");
                assert!(branch.children <= CHILDREN);
                if branch.distance <= 2 || branch.end.is_none() {
                    assert_eq!(branch.children, 0);
                }
                if branch.children == CHILDREN {
                    full += 1;
                }

                match branch.parent {
                    Some(parent) => {
                        children += 1;
                        let parent = &tree.branches[parent];
                        assert!(branch.distance <= parent.distance - 2);
                        assert_eq!(Some(branch.root), parent.end);
                        let turn = (branch.direction.index() as i32
                            - parent.direction.index() as i32)
                            .rem_euclid(Direction::COUNT as i32);
                        assert!(turn == 1 || turn == 7, "{turn}");
                    }
                    None => assert!(branch.distance <= length),
                }
            }
        }
        assert!(children > 0, "no tree ever forked");
        assert!(full > 0, "no branch ever grew every fork");
    }

    #[test]
    fn sample_covers_long_trees() {
        let trees = trees(60);
        assert!(trees.iter().any(|(length, _)| *length == 20));
        let forked = trees
            .iter()
            .filter(|(_, tree)| tree.branches.iter().any(|b| b.parent.is_some()))
            .count();
        assert!(forked > 0);
    }

    #[test]
    fn branch_times_increase() {
        for (_, tree) in trees(100) {
            for branch in &tree.branches {
                let entries = &tree.entries[branch.entries.clone()];
                for pair in entries.windows(2) {
                    assert!(pair[1].time >= pair[0].time + 25);
                }
            }
        }
    }

    #[test]
    fn empty_grid_gives_empty_tree() {
        let mut dice = Dice::from_seed((1, 2));
        let tree = build_tree_path(&Grid::default(), 10, 0, &mut dice);
        assert!(tree.is_empty());
        assert!(tree.branches.is_empty());
    }

    #[test]
    fn zero_length_lights_only_the_root() {
        let grid = grid();
        let mut dice = Dice::from_seed((4, 2));
        let tree = build_tree_path(&grid, 0, 0, &mut dice);
        assert_eq!(tree.len(), 1);
        assert!(tree.branches.is_empty());
    }
}
