use super::HexCoord;

/// Axis-aligned extent of a set of cells in axial space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexBounds {
    pub min_q: i32,
    pub max_q: i32,
    pub min_r: i32,
    pub max_r: i32,
}

impl HexBounds {
    /// Returns `None` for an empty set.
    pub fn from_cells<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = HexCoord>,
    {
        let mut iter = cells.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min_q: first.q,
            max_q: first.q,
            min_r: first.r,
            max_r: first.r,
        };
        for cell in iter {
            bounds.include(cell);
        }
        Some(bounds)
    }

    pub fn include(&mut self, cell: HexCoord) {
        self.min_q = self.min_q.min(cell.q);
        self.max_q = self.max_q.max(cell.q);
        self.min_r = self.min_r.min(cell.r);
        self.max_r = self.max_r.max(cell.r);
    }

    pub fn contains(&self, cell: HexCoord) -> bool {
        (self.min_q..=self.max_q).contains(&cell.q) && (self.min_r..=self.max_r).contains(&cell.r)
    }

    /// Up to `2^32` when the bounds span the whole `i32` range.
    pub fn columns(&self) -> u64 {
        span(self.min_q, self.max_q)
    }

    pub fn rows(&self) -> u64 {
        span(self.min_r, self.max_r)
    }
}

fn span(min: i32, max: i32) -> u64 {
    (i64::from(max) - i64::from(min)).unsigned_abs() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_bounds() {
        assert_eq!(HexBounds::from_cells(Vec::new()), None);
    }

    #[test]
    fn bounds_cover_all_cells() {
        let cells = [
            HexCoord::new(3, -1),
            HexCoord::new(-2, 4),
            HexCoord::new(0, 0),
        ];
        let bounds = HexBounds::from_cells(cells).unwrap();
        assert_eq!((bounds.min_q, bounds.max_q), (-2, 3));
        assert_eq!((bounds.min_r, bounds.max_r), (-1, 4));
        assert_eq!(bounds.columns(), 6);
        assert_eq!(bounds.rows(), 6);
        assert!(cells.iter().all(|c| bounds.contains(*c)));
        assert!(!bounds.contains(HexCoord::new(4, 0)));
    }

    #[test]
    fn bounds_span_the_whole_i32_range() {
        let bounds = HexBounds::from_cells([
            HexCoord::new(i32::MIN, i32::MAX),
            HexCoord::new(i32::MAX, i32::MIN),
        ])
        .unwrap();
        assert_eq!(bounds.columns(), 1 << 32);
        assert_eq!(bounds.rows(), 1 << 32);
        assert!(bounds.contains(HexCoord::ORIGIN));

        let single = HexBounds::from_cells([HexCoord::new(i32::MAX, i32::MIN)]).unwrap();
        assert_eq!((single.columns(), single.rows()), (1, 1));
    }
}
