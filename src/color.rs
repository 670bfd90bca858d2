use crate::glow::dice::Dice;

/// Describes a rgba color, every component in `0.0..=1.0`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    /// The red component
    pub r: f32,
    /// The green component
    pub g: f32,
    /// The blue component
    pub b: f32,
    /// The alpha component
    pub a: f32,
}

impl Color {
    /// Creates a new rgba color
    pub const fn new_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new rgb color with a = 1
    pub const fn new_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color from hue/saturation/lightness
    ///
    /// # Parameters
    ///
    /// h: The hue in degrees, any value is wrapped into `0..360`
    ///
    /// s: The saturation in percent
    ///
    /// l: The lightness in percent
    ///
    /// a: The alpha component
    pub fn new_hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new_rgba(l, l, l, a);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self {
            r: hue_to_rgb(p, q, h + 1.0 / 3.0),
            g: hue_to_rgb(p, q, h),
            b: hue_to_rgb(p, q, h - 1.0 / 3.0),
            a,
        }
    }

    /// The color with its rgb components scaled by alpha
    pub fn premultiplied(&self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Picks a random blue-to-magenta color. Base cells get a faint alpha so many
/// overlapping strokes layer up, path colors are opaque.
pub fn next_color(dice: &mut Dice, with_alpha: bool) -> Color {
    let hue = dice.int(190, 360) as f32;
    let saturation = dice.int(44, 89) as f32;
    let lightness = dice.int(19, 69) as f32;

    let alpha = if with_alpha {
        dice.float(0.01, 0.03) as f32
    } else {
        1.0
    };

    Color::new_hsla(hue, saturation, lightness, alpha)
}
