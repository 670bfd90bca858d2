use std::f64::consts::PI;

/// Cube coordinates of a cell, always satisfying `x + y + z == 0`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default, Hash)]
pub struct Cube {
    pub x: i32,
    pub z: i32,
    pub y: i32,
}

impl Cube {
    pub fn new(x: i32, z: i32, y: i32) -> Self {
        debug_assert_eq!(x + y + z, 0);
        Self { x, z, y }
    }

    /// Converts an odd-q offset coordinate to cube coordinates.
    pub fn from_offset(col: i32, row: i32) -> Self {
        let x = col;
        let z = row - (col - (col & 1)) / 2;
        Self { x, z, y: -x - z }
    }

    /// Converts back to an odd-q `(col, row)` offset coordinate.
    pub fn to_offset(&self) -> (i32, i32) {
        (self.x, self.z + (self.x - (self.x & 1)) / 2)
    }

    pub fn add(&self, other: Cube) -> Self {
        Self {
            x: self.x + other.x,
            z: self.z + other.z,
            y: self.y + other.y,
        }
    }
    pub fn subtract(&self, other: Cube) -> Self {
        Self {
            x: self.x - other.x,
            z: self.z - other.z,
            y: self.y - other.y,
        }
    }

    /// Distance to origin
    pub fn length(&self) -> i32 { (self.x.abs() + self.z.abs() + self.y.abs()) / 2 }
    /// Distance to another cell
    pub fn distance(&self, other: Cube) -> i32 {
        self.subtract(other).length()
    }

    /// Point `t` of the way from `self` towards `other`, snapped back onto the grid.
    pub fn lerp(&self, other: Cube, t: f64) -> Self {
        round_cube(
            self.x as f64 + (other.x - self.x) as f64 * t,
            self.z as f64 + (other.z - self.z) as f64 * t,
            self.y as f64 + (other.y - self.y) as f64 * t,
        )
    }
}

/// Snaps fractional cube coordinates to the nearest cell.
///
/// Each axis is rounded on its own, then the axis with the largest rounding error is
/// recomputed from the other two so the zero-sum invariant survives.
pub fn round_cube(x: f64, z: f64, y: f64) -> Cube {
    let mut rx = x.round();
    let mut rz = z.round();
    let mut ry = y.round();

    let x_diff = (rx - x).abs();
    let z_diff = (rz - z).abs();
    let y_diff = (ry - y).abs();

    if x_diff > y_diff && x_diff > z_diff {
        rx = -ry - rz;
    } else if y_diff > z_diff {
        ry = -rx - rz;
    } else {
        rz = -rx - ry;
    }

    Cube {
        x: rx as i32,
        z: rz as i32,
        y: ry as i32,
    }
}

/// The eight compass directions a tree branch can grow in.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    RightTop,
    Right,
    RightBottom,
    Bottom,
    LeftBottom,
    Left,
    LeftTop,
    Top,
}

impl Direction {
    pub const COUNT: usize = 8;

    pub fn all() -> [Direction; 8] {
        use Direction::*;
        [RightTop, Right, RightBottom, Bottom, LeftBottom, Left, LeftTop, Top]
    }

    pub fn from_index(index: usize) -> Direction {
        Direction::all()[index % Self::COUNT]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotates by `steps` (positive is clockwise), wrapping around the compass.
    pub fn rotate(self, steps: i32) -> Direction {
        let index = (self.index() as i32 + steps).rem_euclid(Self::COUNT as i32);
        Direction::from_index(index as usize)
    }

    /// Cube delta reaching `distance` cells away in this direction. The diagonal
    /// directions only advance half a step on their minor axes, so `distance` must be
    /// even for the result to land on a cell.
    pub fn delta(self, distance: i32) -> Cube {
        let d = distance;
        let h = distance / 2;
        let (x, z, y) = match self {
            Direction::RightTop => (h, -d, h),
            Direction::Right => (d, -h, -h),
            Direction::RightBottom => (h, h, -d),
            Direction::Bottom => (0, d, -d),
            Direction::LeftBottom => (-h, d, -h),
            Direction::Left => (-d, h, h),
            Direction::LeftTop => (-h, -h, d),
            Direction::Top => (0, -d, d),
        };
        Cube { x, z, y }
    }

    pub fn target(self, from: Cube, distance: i32) -> Cube {
        from.add(self.delta(distance))
    }
}

/// `(col, row)` steps tried by the random walk.
pub const WALK_STEPS: [(i32, i32); 6] = [
    (0, -1), (1, -1), (1, 0),
    (0, 1), (-1, 0), (-1, -1),
];

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Six corners of a flat-top hexagon outline of radius `r` around `center`. The first
/// corner sits on the right, the rest step by 60 degrees.
pub fn hexagon_corners(center: Point, r: f64) -> [Point; 6] {
    let mut corners = [Point::new(center.x + r, center.y); 6];
    let mut angle = PI;
    for corner in corners.iter_mut().skip(1) {
        angle -= PI / 3.;
        *corner = Point {
            x: center.x - r * angle.cos(),
            y: center.y + r * angle.sin(),
        };
    }
    corners
}
