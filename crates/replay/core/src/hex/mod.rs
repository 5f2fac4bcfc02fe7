//! Hexagonal grid coordinates.
//!
//! The arena addresses cells with axial coordinates `(q, r)`. The implicit
//! third cube axis is `s = -q - r`, which makes distance and rounding
//! straightforward. Odd-q offset coordinates are provided for callers that
//! lay cells out in rows and columns.
//!
//! All functions here are total: every `i32` pair is a valid cell, and
//! bounds checking is left to the caller. Arithmetic that can leave the
//! `i32` range is done in `i64`; stepping off the edge of the range clamps
//! to it.

mod bounds;
mod layout;

pub use bounds::HexBounds;
pub use layout::{Layout, Orientation, Point, hex_to_pixel};

use std::fmt;
use std::ops::{Add, Sub};

use strum::EnumIter;

/// Axial hex coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Implicit third cube axis. Wider than the axial axes: `-(q + r)`
    /// leaves the `i32` range at its corners.
    #[inline]
    pub const fn s(self) -> i64 {
        -(self.q as i64) - self.r as i64
    }

    pub const fn to_cube(self) -> CubeCoord {
        CubeCoord {
            q: self.q as i64,
            r: self.r as i64,
            s: self.s(),
        }
    }

    pub const fn to_offset(self) -> OffsetCoord {
        OffsetCoord::from_axial(self)
    }

    /// Minimum number of adjacent-cell steps between `self` and `other`.
    pub fn distance(self, other: Self) -> u64 {
        let dq = (i64::from(self.q) - i64::from(other.q)).unsigned_abs();
        let dr = (i64::from(self.r) - i64::from(other.r)).unsigned_abs();
        let ds = (self.s() - other.s()).unsigned_abs();
        (dq + dr + ds) / 2
    }

    /// Clamps at the edge of the `i32` range, so the outermost cells are
    /// their own neighbor in the directions that leave it.
    pub fn neighbor(self, direction: HexDirection) -> Self {
        self + direction.offset()
    }

    /// The six adjacent cells in [`HexDirection`] order.
    pub fn neighbors(self) -> [Self; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction))
    }

    /// Every cell at distance `<= radius`, including `self`.
    ///
    /// Yields `3 * radius * (radius + 1) + 1` cells, minus any that fall
    /// outside the `i32` range.
    pub fn within(self, radius: u32) -> Vec<Self> {
        let radius = i64::from(radius);
        let expected = radius
            .saturating_mul(radius + 1)
            .saturating_mul(3)
            .saturating_add(1);
        let mut cells = Vec::with_capacity(usize::try_from(expected).unwrap_or(0).min(1 << 16));
        for dq in -radius..=radius {
            let Ok(q) = i32::try_from(i64::from(self.q) + dq) else {
                continue;
            };
            let lo = (-radius).max(-dq - radius);
            let hi = radius.min(-dq + radius);
            for dr in lo..=hi {
                if let Ok(r) = i32::try_from(i64::from(self.r) + dr) {
                    cells.push(Self::new(q, r));
                }
            }
        }
        cells
    }

    /// Cells on the straight line from `self` to `other`, both ends included.
    pub fn line_to(self, other: Self) -> Vec<Self> {
        let steps = self.distance(other);
        if steps == 0 {
            return vec![self];
        }

        // Nudge off exact edges so ties round consistently.
        const EPSILON: f64 = 1e-6;
        let (aq, ar) = (self.q as f64 + EPSILON, self.r as f64 + EPSILON);
        let (bq, br) = (other.q as f64 + EPSILON, other.r as f64 + EPSILON);

        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                round_axial(aq + (bq - aq) * t, ar + (br - ar) * t)
            })
            .collect()
    }
}

impl Add for HexCoord {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.q.saturating_add(rhs.q), self.r.saturating_add(rhs.r))
    }
}

impl Sub for HexCoord {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q.saturating_sub(rhs.q), self.r.saturating_sub(rhs.r))
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

/// Minimum number of adjacent-cell steps between two cells.
pub fn distance(a: HexCoord, b: HexCoord) -> u64 {
    a.distance(b)
}

/// The six cells adjacent to `coord`, in [`HexDirection`] order.
///
/// Cells off the edge of the playable map are still reported.
pub fn neighbors(coord: HexCoord) -> [HexCoord; 6] {
    coord.neighbors()
}

/// Cube coordinate; `q + r + s == 0` always holds and `q`, `r` fit in
/// `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    q: i64,
    r: i64,
    s: i64,
}

impl CubeCoord {
    /// Returns `None` unless the three axes sum to zero and the axial part
    /// is an `i32` cell.
    pub fn new(q: i64, r: i64, s: i64) -> Option<Self> {
        let sum = q.checked_add(r)?.checked_add(s)?;
        if sum != 0 || i32::try_from(q).is_err() || i32::try_from(r).is_err() {
            return None;
        }
        Some(Self { q, r, s })
    }

    pub const fn q(self) -> i64 {
        self.q
    }

    pub const fn r(self) -> i64 {
        self.r
    }

    pub const fn s(self) -> i64 {
        self.s
    }

    pub const fn to_axial(self) -> HexCoord {
        HexCoord::new(self.q as i32, self.r as i32)
    }
}

impl From<HexCoord> for CubeCoord {
    fn from(coord: HexCoord) -> Self {
        coord.to_cube()
    }
}

/// Odd-q offset coordinate: columns follow `q`, odd columns shoved down.
///
/// Rows are `i64` because shoving reaches past `i32` at the corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetCoord {
    pub col: i32,
    pub row: i64,
}

impl OffsetCoord {
    pub const fn new(col: i32, row: i64) -> Self {
        Self { col, row }
    }

    pub const fn from_axial(coord: HexCoord) -> Self {
        Self {
            col: coord.q,
            row: coord.r as i64 + shove(coord.q),
        }
    }

    /// Returns `None` when the row lies outside every `i32` cell.
    pub fn to_axial(self) -> Option<HexCoord> {
        let r = self.row.checked_sub(shove(self.col))?;
        Some(HexCoord::new(self.col, i32::try_from(r).ok()?))
    }
}

const fn shove(col: i32) -> i64 {
    (col as i64 - (col & 1) as i64) / 2
}

/// Named neighbor directions, in the fixed angular order used by
/// [`HexCoord::neighbors`].
///
/// Names describe the flat-top layout with screen y growing downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum HexDirection {
    SouthEast,
    NorthEast,
    North,
    NorthWest,
    SouthWest,
    South,
}

impl HexDirection {
    pub const ALL: [Self; 6] = [
        Self::SouthEast,
        Self::NorthEast,
        Self::North,
        Self::NorthWest,
        Self::SouthWest,
        Self::South,
    ];

    pub const fn offset(self) -> HexCoord {
        match self {
            Self::SouthEast => HexCoord::new(1, 0),
            Self::NorthEast => HexCoord::new(1, -1),
            Self::North => HexCoord::new(0, -1),
            Self::NorthWest => HexCoord::new(-1, 0),
            Self::SouthWest => HexCoord::new(-1, 1),
            Self::South => HexCoord::new(0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::SouthEast => Self::NorthWest,
            Self::NorthEast => Self::SouthWest,
            Self::North => Self::South,
            Self::NorthWest => Self::SouthEast,
            Self::SouthWest => Self::NorthEast,
            Self::South => Self::North,
        }
    }
}

/// Rounds a fractional axial position to the nearest cell.
pub(crate) fn round_axial(q: f64, r: f64) -> HexCoord {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }

    HexCoord::new(rq as i32, rr as i32)
}
