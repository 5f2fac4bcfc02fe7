//! Mapping between hex cells and 2D pixel space.

use super::{HexCoord, round_axial};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A point in pixel space. `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Hexagon orientation, fixed once per [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Flat edges at top and bottom; columns follow `q`.
    #[default]
    FlatTop,
    /// Pointed corners at top and bottom; rows follow `r`.
    PointyTop,
}

impl Orientation {
    /// Forward matrix `[f0, f1, f2, f3]`: `x = f0*q + f1*r`, `y = f2*q + f3*r`.
    const fn forward(self) -> [f64; 4] {
        match self {
            Self::FlatTop => [1.5, 0.0, SQRT_3 / 2.0, SQRT_3],
            Self::PointyTop => [SQRT_3, SQRT_3 / 2.0, 0.0, 1.5],
        }
    }

    const fn inverse(self) -> [f64; 4] {
        match self {
            Self::FlatTop => [2.0 / 3.0, 0.0, -1.0 / 3.0, SQRT_3 / 3.0],
            Self::PointyTop => [SQRT_3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0],
        }
    }

    /// Angle of the first corner, in multiples of 60 degrees.
    const fn start_angle(self) -> f64 {
        match self {
            Self::FlatTop => 0.0,
            Self::PointyTop => 0.5,
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "flat-top" | "flat_top" => Ok(Self::FlatTop),
            "pointy" | "pointy-top" | "pointy_top" => Ok(Self::PointyTop),
            other => Err(format!("unknown hex orientation: {other}")),
        }
    }
}

/// Orientation, cell size (center to corner) and pixel origin of a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub orientation: Orientation,
    pub size: f64,
    pub origin: Point,
}

impl Layout {
    pub const fn new(orientation: Orientation, size: f64) -> Self {
        Self {
            orientation,
            size,
            origin: Point::ORIGIN,
        }
    }

    pub const fn flat(size: f64) -> Self {
        Self::new(Orientation::FlatTop, size)
    }

    #[must_use]
    pub const fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Pixel center of `coord`.
    pub fn hex_to_pixel(&self, coord: HexCoord) -> Point {
        let [f0, f1, f2, f3] = self.orientation.forward();
        let (q, r) = (coord.q as f64, coord.r as f64);
        Point {
            x: (f0 * q + f1 * r) * self.size + self.origin.x,
            y: (f2 * q + f3 * r) * self.size + self.origin.y,
        }
    }

    /// Cell containing `point`.
    pub fn pixel_to_hex(&self, point: Point) -> HexCoord {
        let [b0, b1, b2, b3] = self.orientation.inverse();
        let x = (point.x - self.origin.x) / self.size;
        let y = (point.y - self.origin.y) / self.size;
        round_axial(b0 * x + b1 * y, b2 * x + b3 * y)
    }

    /// Polygon corners of `coord`, scaled by `scale` around its center.
    pub fn corners(&self, coord: HexCoord, scale: f64) -> [Point; 6] {
        let center = self.hex_to_pixel(coord);
        let radius = self.size * scale;
        let start = self.orientation.start_angle();
        std::array::from_fn(|i| {
            let angle = std::f64::consts::FRAC_PI_3 * (start + i as f64);
            Point {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
    }

    /// Distance between centers of two adjacent cells.
    pub fn spacing(&self) -> f64 {
        self.size * SQRT_3
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::flat(20.0)
    }
}

/// Flat-top pixel center of `coord` for cells of `cell_size`.
pub fn hex_to_pixel(coord: HexCoord, cell_size: f64) -> Point {
    Layout::flat(cell_size).hex_to_pixel(coord)
}
