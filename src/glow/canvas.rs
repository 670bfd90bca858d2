use crate::color::Color;
use crate::glow::hex::Point;

/// How new pixels combine with what is already on the surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Blend {
    /// Paint over.
    #[default]
    SourceOver,
    /// Add to the existing color.
    Lighter,
    /// Keep the existing pixel, scaled by the source alpha.
    DestinationIn,
}

/// The drawing primitives the animation needs from its output.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
    fn stroke(&mut self, color: Color, width: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);
    fn set_blend(&mut self, blend: Blend);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, angle: f64);
}

/// Affine transform `[a c e; b d f]`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Transform([f64; 6]);

impl Transform {
    const IDENTITY: Transform = Transform([1., 0., 0., 1., 0., 0.]);

    fn then(&self, other: &Transform) -> Transform {
        let [a, b, c, d, e, f] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Transform([
            a * a2 + c * b2,
            b * a2 + d * b2,
            a * c2 + c * d2,
            b * c2 + d * d2,
            a * e2 + c * f2 + e,
            b * e2 + d * f2 + f,
        ])
    }

    fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

/// Software canvas over a premultiplied RGBA float buffer.
pub struct PixelCanvas {
    width: u32,
    height: u32,
    data: Vec<[f32; 4]>,
    blend: Blend,
    transform: Transform,
    stack: Vec<Transform>,
    subpaths: Vec<Subpath>,
    scratch: Vec<(isize, isize)>,
}

#[derive(Default)]
struct Subpath {
    points: Vec<Point>,
    closed: bool,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![[0.; 4]; (width * height) as usize],
            blend: Blend::default(),
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            subpaths: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Drops the content and state and takes the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Premultiplied color at a pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }

    /// Copies the canvas into an RGBA8 frame, composited over black.
    pub fn present(&self, frame: &mut [u8]) {
        for (pixel, out) in self.data.iter().zip(frame.chunks_exact_mut(4)) {
            let to_byte = |v: f32| (v.clamp(0., 1.) * 255.).round() as u8;
            out.copy_from_slice(&[to_byte(pixel[0]), to_byte(pixel[1]), to_byte(pixel[2]), 0xff]);
        }
    }

    fn blend_pixel(&mut self, x: isize, y: isize, src: [f32; 4]) {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return;
        }
        let i = y as usize * self.width as usize + x as usize;
        let dst = &mut self.data[i];
        match self.blend {
            Blend::SourceOver => {
                let keep = 1. - src[3];
                for c in 0..4 {
                    dst[c] = src[c] + dst[c] * keep;
                }
            }
            Blend::Lighter => {
                for c in 0..4 {
                    dst[c] = (dst[c] + src[c]).min(1.);
                }
            }
            Blend::DestinationIn => {
                for c in dst.iter_mut() {
                    *c *= src[3];
                }
            }
        }
    }

    /// Collects the pixels of one segment drawn with a square brush of `width`.
    fn trace_segment(&mut self, from: Point, to: Point, width: f64) {
        let half = ((width - 1.) / 2.).max(0.).round() as isize;
        let (w, h) = (self.width as isize, self.height as isize);
        let line = (
            (from.x.round() as isize, from.y.round() as isize),
            (to.x.round() as isize, to.y.round() as isize),
        );
        // clip to the canvas grown by the brush so thick edges still reach the border
        let clip = ((-half, -half), (w - 1 + half, h - 1 + half));

        let scratch = &mut self.scratch;
        clipline::clipline(line, clip, |x, y| {
            for dy in -half..=half {
                for dx in -half..=half {
                    scratch.push((x + dx, y + dy));
                }
            }
        });
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, p: Point) {
        let p = self.transform.apply(p);
        self.subpaths.push(Subpath {
            points: vec![p],
            closed: false,
        });
    }

    fn line_to(&mut self, p: Point) {
        let p = self.transform.apply(p);
        match self.subpaths.last_mut() {
            Some(subpath) if !subpath.closed => subpath.points.push(p),
            _ => self.subpaths.push(Subpath {
                points: vec![p],
                closed: false,
            }),
        }
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.closed = true;
        }
    }

    fn stroke(&mut self, color: Color, width: f64) {
        self.scratch.clear();

        let subpaths = std::mem::take(&mut self.subpaths);
        for subpath in &subpaths {
            for pair in subpath.points.windows(2) {
                self.trace_segment(pair[0], pair[1], width);
            }
            if subpath.closed && subpath.points.len() > 2 {
                let ends = (subpath.points.last(), subpath.points.first());
                if let (Some(&last), Some(&first)) = ends {
                    self.trace_segment(last, first, width);
                }
            }
        }
        self.subpaths = subpaths;

        // every covered pixel is blended once, no matter how many brush stamps hit it
        let mut covered = std::mem::take(&mut self.scratch);
        covered.sort_unstable();
        covered.dedup();
        let src = color.premultiplied();
        for &(x, y) in &covered {
            self.blend_pixel(x, y, src);
        }
        self.scratch = covered;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let x0 = x.max(0.).floor() as isize;
        let y0 = y.max(0.).floor() as isize;
        let x1 = (x + w).min(self.width as f64).ceil() as isize;
        let y1 = (y + h).min(self.height as f64).ceil() as isize;
        let src = color.premultiplied();
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, src);
            }
        }
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.then(&Transform([1., 0., 0., 1., dx, dy]));
    }

    fn rotate(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        self.transform = self.transform.then(&Transform([cos, sin, -sin, cos, 0., 0.]));
    }
}
