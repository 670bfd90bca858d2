use crate::color::Color;
use crate::glow::canvas::Surface;
use crate::glow::dice::Dice;
use crate::glow::grid::Grid;
use crate::glow::hex::{hexagon_corners, Point};

/// Strokes one hexagon outline. The stroke is pulled inwards so a thick border
/// stays inside `radius`.
pub fn draw_hex<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    radius: f64,
    color: Color,
    border: f64,
    angle: f64,
) {
    let rotated = angle != 0.;
    if rotated {
        surface.save();
        surface.translate(center.x, center.y);
        surface.rotate(angle);
        surface.translate(-center.x, -center.y);
    }

    let r = radius - border / 2. - 1.;
    let corners = hexagon_corners(center, r);

    surface.begin_path();
    surface.move_to(corners[0]);
    for corner in &corners[1..] {
        surface.line_to(*corner);
    }
    surface.close_path();
    surface.stroke(color, border);

    if rotated {
        surface.restore();
    }
}

/// Draws every dirty cell as an outer hexagon plus a randomly sized inner one in the
/// same color, then marks it clean. Returns how many cells were drawn.
pub fn draw_grid<S: Surface + ?Sized>(
    grid: &mut Grid,
    surface: &mut S,
    dice: &mut Dice,
    angle: f64,
) -> usize {
    let mut drawn = 0;
    for cell in grid.cells_mut().iter_mut().filter(|cell| !cell.clean) {
        draw_hex(surface, cell.center(), cell.radius, cell.color, cell.border, angle);

        // nested
        let radius = dice.int(3, (cell.radius - 2.) as i64) as f64;
        let border = dice.float(1., cell.radius / 6.);
        draw_hex(surface, cell.center(), radius, cell.color, border, angle);

        cell.clean = true;
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glow::canvas::{Blend, PixelCanvas};

    /// Counts strokes instead of drawing.
    #[derive(Default)]
    struct CountingSurface {
        strokes: usize,
        points: usize,
        depth: i32,
        max_depth: i32,
    }

    impl Surface for CountingSurface {
        fn width(&self) -> u32 { 100 }
        fn height(&self) -> u32 { 100 }
        fn begin_path(&mut self) {}
        fn move_to(&mut self, _: Point) { self.points += 1 }
        fn line_to(&mut self, _: Point) { self.points += 1 }
        fn close_path(&mut self) {}
        fn stroke(&mut self, _: Color, _: f64) { self.strokes += 1 }
        fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: Color) {}
        fn set_blend(&mut self, _: Blend) {}
        fn save(&mut self) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
        }
        fn restore(&mut self) { self.depth -= 1 }
        fn translate(&mut self, _: f64, _: f64) {}
        fn rotate(&mut self, _: f64) {}
    }

    fn grid(dice: &mut Dice) -> Grid {
        Grid::new(100., 100., 10., dice)
    }

    #[test]
    fn full_pass_cleans_everything() {
        let mut dice = Dice::from_seed((2, 3));
        let mut grid = grid(&mut dice);
        let mut surface = CountingSurface::default();

        assert_eq!(draw_grid(&mut grid, &mut surface, &mut dice, 0.), 54);
        assert_eq!(surface.strokes, 108);
        assert_eq!(surface.points, 108 * 6);
        assert!(grid.cells().iter().all(|c| c.clean));
        assert_eq!(surface.max_depth, 0);
    }

    #[test]
    fn only_dirty_cells_are_redrawn() {
        let mut dice = Dice::from_seed((2, 3));
        let mut grid = grid(&mut dice);
        draw_grid(&mut grid, &mut CountingSurface::default(), &mut dice, 0.);

        grid.get_mut(17).unwrap().paint(Color::new_rgb(1., 0., 0.));
        let mut surface = CountingSurface::default();
        assert_eq!(draw_grid(&mut grid, &mut surface, &mut dice, 0.), 1);
        assert_eq!(surface.strokes, 2);

        let mut surface = CountingSurface::default();
        assert_eq!(draw_grid(&mut grid, &mut surface, &mut dice, 0.), 0);
        assert_eq!(surface.strokes, 0);
    }

    #[test]
    fn rotation_is_scoped_per_hexagon() {
        let mut dice = Dice::from_seed((2, 3));
        let mut grid = grid(&mut dice);
        let mut surface = CountingSurface::default();
        draw_grid(&mut grid, &mut surface, &mut dice, 0.3);
        assert_eq!(surface.max_depth, 1);
        assert_eq!(surface.depth, 0);
    }

    #[test]
    fn draws_pixels() {
        let mut canvas = PixelCanvas::new(40, 40);
        draw_hex(&mut canvas, Point::new(20., 20.), 10., Color::new_rgb(1., 1., 1.), 1., 0.);
        // stroke radius is 10 - 0.5 - 1
        assert!(canvas.pixel(29, 20).unwrap()[3] > 0.);
        assert!(canvas.pixel(12, 20).unwrap()[3] > 0.);
        assert_eq!(canvas.pixel(20, 20), Some([0.; 4]));
    }
}
