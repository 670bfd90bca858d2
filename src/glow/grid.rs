use std::collections::HashMap;
use std::f64::consts::PI;

use crate::color::{next_color, Color};
use crate::glow::dice::Dice;
use crate::glow::hex::{Cube, Point};

/// One hexagon of the background.
#[derive(Clone, Debug)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
    /// Pixel center
    pub cx: f64,
    pub cy: f64,
    pub cube: Cube,
    pub radius: f64,
    pub border: f64,
    pub color: Color,
    /// Already drawn with `color`, skipped by the renderer.
    pub clean: bool,
    /// Grid bounds, kept on the cell for zone classification.
    pub cols: i32,
    pub rows: i32,
}

impl Cell {
    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// Which third of the grid the cell falls into, horizontally then vertically.
    pub fn zone(&self) -> (usize, usize) {
        let x = (self.col as f64 * 100. / self.cols as f64).ceil();
        let y = (self.row as f64 * 100. / self.rows as f64).ceil();
        (get_pos(x), get_pos(y))
    }

    /// Changes the color and queues a redraw.
    pub fn paint(&mut self, color: Color) {
        self.color = color;
        self.clean = false;
    }
}

/// Buckets a percentage into thirds.
pub fn get_pos(percent: f64) -> usize {
    if percent <= 33.34 {
        0
    } else if percent < 66.67 {
        1
    } else {
        2
    }
}

/// Row and column counts that overfill a `width` x `height` viewport. Columns get
/// extra slack because the hex layout packs them tighter than `2 * radius`.
pub fn dimensions(width: f64, height: f64, radius: f64) -> (i32, i32) {
    let d = 2. * radius;

    let rows = (height / d).floor() as i32 + 1;

    let mut cols = (width / d).floor() as i32 + 1;
    cols += (cols as f64 * radius / d).ceil() as i32;

    (cols, rows)
}

/// Fixed-size collection of cells with lookup by offset and by cube coordinate.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: Vec<Cell>,
    by_offset: HashMap<(i32, i32), usize>,
    by_cube: HashMap<Cube, usize>,
    cols: i32,
    rows: i32,
}

impl Grid {
    /// Builds and lays out a grid for the viewport, every cell starts dirty.
    pub fn new(width: f64, height: f64, radius: f64, dice: &mut Dice) -> Self {
        let mut grid = Self::build(width, height, radius, dice);
        grid.configure();
        grid
    }

    /// Creates one cell per `(col, row)` on a plain square lattice.
    pub fn build(width: f64, height: f64, radius: f64, dice: &mut Dice) -> Self {
        let d = 2. * radius;
        let (cols, rows) = dimensions(width, height, radius);

        let mut cells = Vec::with_capacity((cols * rows).max(0) as usize);
        for row in 0..rows {
            let y = row as f64 * d;
            for col in 0..cols {
                let x = col as f64 * d;
                cells.push(Cell {
                    col,
                    row,
                    cx: x + radius,
                    cy: y + radius,
                    cube: Cube::from_offset(col, row),
                    radius,
                    border: dice.float(1., (radius / 4.).max(1.)),
                    color: next_color(dice, true),
                    clean: false,
                    cols,
                    rows,
                });
            }
        }

        let mut grid = Self {
            cells,
            cols,
            rows,
            ..Default::default()
        };
        grid.reindex();
        grid
    }

    /// Moves the square lattice into the staggered hex layout: columns are pulled
    /// together by half a radius each and odd columns drop by the inner radius.
    pub fn configure(&mut self) {
        for cell in self.cells.iter_mut() {
            let inner = (PI / 6.).cos() * cell.radius;
            let radius_offset = (cell.radius - inner) * 2.;
            let vertical_offset = radius_offset * cell.row as f64;

            cell.cx = cell.cx - cell.radius - cell.col as f64 * (cell.radius / 2.);
            cell.cy = cell.cy - vertical_offset + inner * (cell.col % 2) as f64;
            cell.clean = false;
        }
    }

    fn reindex(&mut self) {
        self.by_offset = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| ((cell.col, cell.row), i))
            .collect();
        self.by_cube = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (cell.cube, i))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub fn find_offset(&self, col: i32, row: i32) -> Option<usize> {
        self.by_offset.get(&(col, row)).copied()
    }

    pub fn find_cube(&self, cube: Cube) -> Option<usize> {
        self.by_cube.get(&cube).copied()
    }
}
