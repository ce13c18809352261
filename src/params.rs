//! Galaxy shape parameters and colours.
//!
//! [`GalaxyParameters`] is a plain value: the generator and the background
//! only ever see it as a whole. Changing one field means building a new value
//! (the `with_*` methods consume and return `Self`), and the background
//! regenerates only when the new value differs from the one it generated for.
//!
//! # Example
//!
//! ```ignore
//! use galaxy_bg::prelude::*;
//!
//! let params = GalaxyParameters::default()
//!     .with_particle_count(20_000)
//!     .with_branches(5)
//!     .with_colors(Color::from_hex("#ff6030")?, Color::from_hex("#1b3984")?);
//! params.validate()?;
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Linear RGB colour, each component in [0, 1].
///
/// Deserializes from either a `"#rrggbb"` string or an `[r, g, b]` array and
/// always serializes as an array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "[f32; 3]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Result<Self, ParamError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParamError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ParamError::InvalidHex(hex.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Check every component is finite and inside [0, 1].
    pub fn validate(&self) -> Result<(), ParamError> {
        for value in [self.r, self.g, self.b] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamError::ColorOutOfRange { value });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Pack as `0x00RRGGBB`, the layout of a 32-bit software framebuffer.
    pub fn to_rgb_u32(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Mix towards `other`; `t = 0` returns `self`, `t = 1` returns `other`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let mixed = self.to_vec3().lerp(other.to_vec3(), t);
        Color::rgb(mixed.x, mixed.y, mixed.z)
    }
}

impl From<Color> for [f32; 3] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: 1.0,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgb([f32; 3]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = ParamError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        let color = match repr {
            ColorRepr::Hex(s) => Color::from_hex(&s)?,
            ColorRepr::Rgb([r, g, b]) => Color::rgb(r, g, b),
        };
        color.validate()?;
        Ok(color)
    }
}

/// Shape of the generated galaxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyParameters {
    /// Total number of points.
    pub particle_count: u32,
    /// Rendered size of each point, in world units.
    pub point_size: f32,
    /// Maximum distance of a particle from the centre before jitter.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Angular twist applied per unit of radius.
    pub spin: f32,
    /// Scale of the positional jitter.
    pub randomness: f32,
    /// Exponent shaping the jitter; higher values pull it towards zero.
    pub randomness_power: f32,
    /// Colour at the centre.
    pub inside_color: Color,
    /// Colour at `radius`.
    pub outside_color: Color,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            particle_count: 50_000,
            point_size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Color::rgb(1.0, 0.376, 0.188),
            outside_color: Color::rgb(0.106, 0.224, 0.518),
        }
    }
}

impl GalaxyParameters {
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_branches(mut self, branches: u32) -> Self {
        self.branches = branches;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    /// Set jitter scale and distribution exponent together.
    pub fn with_randomness(mut self, randomness: f32, power: f32) -> Self {
        self.randomness = randomness;
        self.randomness_power = power;
        self
    }

    pub fn with_colors(mut self, inside: Color, outside: Color) -> Self {
        self.inside_color = inside;
        self.outside_color = outside;
        self
    }

    /// Check the parameters describe a galaxy the generator can build.
    ///
    /// `particle_count == 0` and `radius == 0` are accepted: they produce an
    /// empty field and a field collapsed onto the origin respectively.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.branches == 0 {
            return Err(ParamError::ZeroBranches);
        }
        finite("spin", self.spin)?;
        positive("point_size", self.point_size)?;
        positive("randomness_power", self.randomness_power)?;
        non_negative("radius", self.radius)?;
        non_negative("randomness", self.randomness)?;
        self.inside_color.validate()?;
        self.outside_color.validate()?;
        Ok(())
    }
}

pub(crate) fn finite(field: &'static str, value: f32) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NotFinite { field })
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ParamError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ParamError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParamError::Negative { field, value })
    }
}
