use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// How each new lit path is grown.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PathShape {
    /// Branching trees of straight segments
    Tree,
    /// A meandering single walk through neighbours
    Walk,
}

impl FromStr for PathShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(PathShape::Tree),
            "walk" => Ok(PathShape::Walk),
            other => Err(format!("unknown path shape `{other}`")),
        }
    }
}

/// Everything tunable about the effect. Environment variables override the defaults.
#[derive(Clone, Debug)]
pub struct GlowConfig {
    /// Initial window size in logical pixels
    pub width: f64,
    pub height: f64,
    pub hex_radius: f64,
    /// Rotation applied to every hexagon, radians
    pub hex_angle: f64,
    /// Milliseconds between two fades of the whole canvas
    pub fade_ms: u64,
    /// Share of the existing image kept by every fade
    pub fade_keep: f32,
    /// A new path is picked after this many milliseconds per entry of the previous one
    pub pick_ms_per_entry: u64,
    pub path_shape: PathShape,
    pub first_tree_length: RangeInclusive<i64>,
    pub tree_length: RangeInclusive<i64>,
    pub walk_length: RangeInclusive<i64>,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            width: 1900.,
            height: 1000.,
            hex_radius: 10.,
            hex_angle: 0.,
            fade_ms: 250,
            fade_keep: 0.95,
            pick_ms_per_entry: 50,
            path_shape: PathShape::Tree,
            first_tree_length: 10..=20,
            tree_length: 6..=20,
            walk_length: 250..=300,
        }
    }
}

impl GlowConfig {
    pub fn read_config_from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            width: read_var("HEX_GLOW_WIDTH", defaults.width),
            height: read_var("HEX_GLOW_HEIGHT", defaults.height),
            hex_radius: read_var("HEX_GLOW_RADIUS", defaults.hex_radius),
            hex_angle: read_var("HEX_GLOW_ANGLE", defaults.hex_angle),
            fade_ms: read_var("HEX_GLOW_FADE_MS", defaults.fade_ms),
            path_shape: read_var("HEX_GLOW_PATH", defaults.path_shape),
            ..defaults
        };
        config.sanitized()
    }

    /// Replaces values the grid cannot be built with.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.hex_radius >= 5.) {
            log::warn!(
                "hex radius {} is too small, using {}",
                self.hex_radius,
                defaults.hex_radius
            );
            self.hex_radius = defaults.hex_radius;
        }
        if !(self.width >= 1.) || !(self.height >= 1.) {
            log::warn!("window size {}x{} is invalid, using the default", self.width, self.height);
            self.width = defaults.width;
            self.height = defaults.height;
        }
        self
    }
}

fn read_var<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!("ignoring {name}={value:?}: {err}, using {default:?}");
                default
            }
        },
        Err(_) => default,
    }
}
