use crate::parser::ParseError;

/// Scan direction along one raster axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Direction::Forward),
            '-' => Some(Direction::Reverse),
            _ => None,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

/// Reads the x and y directions from a GML sequence-rule order such as
/// `+x-y` or `+ +`: the first two sign characters, in order.
pub fn parse_order(order: &str) -> Result<(Direction, Direction), ParseError> {
    let mut signs = order.chars().filter_map(Direction::from_symbol);
    match (signs.next(), signs.next()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(ParseError::InvalidRaster(format!(
            "sequence order {order:?} needs two directions"
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// Geographic extent, cell counts, scan start and scan direction of one
/// elevation grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterDescriptor {
    lower: Corner,
    upper: Corner,
    xlen: usize,
    ylen: usize,
    start: (usize, usize),
    x_dir: Direction,
    y_dir: Direction,
}

impl RasterDescriptor {
    /// `low`, `high` and `start` are `(x, y)` cell indices. Both axes must
    /// span at least one cell.
    pub fn new(
        lower: Corner,
        upper: Corner,
        low: (i64, i64),
        high: (i64, i64),
        start: (i64, i64),
        (x_dir, y_dir): (Direction, Direction),
    ) -> Result<Self, ParseError> {
        let span = |lo: i64, hi: i64| {
            hi.checked_sub(lo)
                .and_then(|d| d.checked_add(1))
                .filter(|&n| n >= 1)
                .and_then(|n| usize::try_from(n).ok())
        };
        let (Some(xlen), Some(ylen)) = (span(low.0, high.0), span(low.1, high.1)) else {
            return Err(ParseError::InvalidRaster(format!(
                "grid bounds {low:?}..{high:?} are empty or out of range"
            )));
        };
        let start_col = usize::try_from(start.0);
        let start_row = usize::try_from(start.1);
        let (Ok(start_col), Ok(start_row)) = (start_col, start_row) else {
            return Err(ParseError::InvalidRaster(format!(
                "negative start point {start:?}"
            )));
        };

        Ok(Self {
            lower,
            upper,
            xlen,
            ylen,
            start: (start_col, start_row),
            x_dir,
            y_dir,
        })
    }

    pub fn xlen(&self) -> usize {
        self.xlen
    }

    pub fn ylen(&self) -> usize {
        self.ylen
    }

    /// Signed longitude step per column.
    pub fn x_unit(&self) -> f64 {
        self.x_dir.sign() * (self.upper.longitude - self.lower.longitude) / self.xlen as f64
    }

    /// Signed latitude step per row.
    pub fn y_unit(&self) -> f64 {
        self.y_dir.sign() * (self.upper.latitude - self.lower.latitude) / self.ylen as f64
    }

    /// The corner the scan starts from on each axis.
    pub fn origin(&self) -> Coordinate {
        let longitude = match self.x_dir {
            Direction::Forward => self.lower.longitude,
            Direction::Reverse => self.upper.longitude,
        };
        let latitude = match self.y_dir {
            Direction::Forward => self.lower.latitude,
            Direction::Reverse => self.upper.latitude,
        };
        Coordinate {
            longitude,
            latitude,
        }
    }

    pub fn coordinate(&self, col: usize, row: usize) -> Coordinate {
        let origin = self.origin();
        Coordinate {
            longitude: origin.longitude + self.x_unit() * col as f64,
            latitude: origin.latitude + self.y_unit() * row as f64,
        }
    }

    /// Every cell from the start point to the end of the grid in raster-scan
    /// order. The first row begins at the start column, later rows at 0.
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            raster: self,
            col: self.start.0,
            row: self.start.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cells<'a> {
    raster: &'a RasterDescriptor,
    col: usize,
    row: usize,
}

impl Cells<'_> {
    /// Cells left to visit, or `None` when the count does not fit in `usize`.
    fn remaining(&self) -> Option<usize> {
        if self.row >= self.raster.ylen {
            return Some(0);
        }
        let rows_after = self.raster.ylen - self.row - 1;
        rows_after
            .checked_mul(self.raster.xlen)?
            .checked_add(self.raster.xlen.saturating_sub(self.col))
    }
}

impl Iterator for Cells<'_> {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        while self.col >= self.raster.xlen {
            self.col = 0;
            self.row += 1;
        }
        if self.row >= self.raster.ylen {
            return None;
        }
        let cell = self.raster.coordinate(self.col, self.row);
        self.col += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn raster(order: &str, start: (i64, i64), high: (i64, i64)) -> RasterDescriptor {
        RasterDescriptor::new(
            Corner {
                latitude: 35.0,
                longitude: 139.0,
            },
            Corner {
                latitude: 35.1,
                longitude: 139.1,
            },
            (0, 0),
            high,
            start,
            parse_order(order).unwrap(),
        )
        .unwrap()
    }

    fn close(a: Coordinate, b: Coordinate) -> bool {
        (a.longitude - b.longitude).abs() < EPS && (a.latitude - b.latitude).abs() < EPS
    }

    #[test]
    fn order_symbols_take_the_first_two_signs() {
        use Direction::*;
        assert_eq!(parse_order("+x-y").unwrap(), (Forward, Reverse));
        assert_eq!(parse_order("+ +").unwrap(), (Forward, Forward));
        assert_eq!(parse_order("--").unwrap(), (Reverse, Reverse));
        assert!(parse_order("+x").is_err());
    }

    #[test]
    fn full_forward_scan_spans_lower_corner_to_one_step_short_of_upper() {
        let r = raster("+x+y", (0, 0), (9, 4));
        let cells: Vec<_> = r.cells().collect();

        assert_eq!(cells.len(), r.xlen() * r.ylen());
        assert_eq!(
            cells[0],
            Coordinate {
                longitude: 139.0,
                latitude: 35.0
            }
        );
        let last = Coordinate {
            longitude: 139.1 - r.x_unit(),
            latitude: 35.1 - r.y_unit(),
        };
        assert!(close(*cells.last().unwrap(), last));
    }

    #[test]
    fn reverse_scan_mirrors_forward_scan_shifted_by_one_step() {
        let fwd = raster("++", (0, 0), (3, 2));
        let rev = raster("--", (0, 0), (3, 2));
        let a: Vec<_> = fwd.cells().collect();
        let b: Vec<_> = rev.cells().collect();
        assert_eq!(a.len(), b.len());

        // The reverse origin is the upper corner, so each reverse cell sits one
        // step (in the forward direction) past its mirrored forward cell.
        for (f, r) in a.iter().rev().zip(&b) {
            let shifted = Coordinate {
                longitude: f.longitude + fwd.x_unit(),
                latitude: f.latitude + fwd.y_unit(),
            };
            assert!(close(shifted, *r), "{shifted:?} vs {r:?}");
        }
        assert_eq!(rev.x_unit(), -fwd.x_unit());
        assert_eq!(rev.origin().latitude, 35.1);
    }

    #[test]
    fn scan_resumes_mid_row_then_covers_full_rows() {
        let r = raster("++", (2, 1), (3, 2));
        let cells: Vec<_> = r.cells().collect();

        // Two cells left in row 1, four in row 2.
        assert_eq!(cells.len(), 6);
        assert_eq!(r.cells().size_hint(), (6, Some(6)));
        assert!(close(cells[0], r.coordinate(2, 1)));
        assert!(close(cells[2], r.coordinate(0, 2)));
    }

    #[test]
    fn start_past_row_end_moves_to_next_row() {
        let r = raster("++", (7, 0), (3, 1));
        let cells: Vec<_> = r.cells().collect();
        assert_eq!(cells.len(), 4);
        assert!(close(cells[0], r.coordinate(0, 1)));
    }

    #[test]
    fn single_cell_grid_uses_the_whole_extent_as_its_step() {
        let r = raster("++", (0, 0), (0, 0));
        assert_eq!(r.cells().count(), 1);
        assert!((r.x_unit() - 0.1).abs() < EPS);
        assert!(close(r.cells().next().unwrap(), r.origin()));
    }

    #[test]
    fn cells_are_restartable() {
        let r = raster("+x-y", (1, 0), (2, 2));
        let first: Vec<_> = r.cells().collect();
        let second: Vec<_> = r.cells().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_bounds_are_rejected() {
        let corner = Corner {
            latitude: 0.0,
            longitude: 0.0,
        };
        let dirs = (Direction::Forward, Direction::Forward);
        assert!(RasterDescriptor::new(corner, corner, (0, 0), (-1, 0), (0, 0), dirs).is_err());
        assert!(RasterDescriptor::new(corner, corner, (0, 0), (1, 1), (-1, 0), dirs).is_err());
        let wide =
            RasterDescriptor::new(corner, corner, (i64::MIN, 0), (i64::MAX, 1), (0, 0), dirs);
        assert!(matches!(wide, Err(ParseError::InvalidRaster(_))));
    }

    #[test]
    fn oversized_grid_reports_an_open_size_hint() {
        let r = raster("++", (0, 0), (9_999_999_999, 9_999_999_999));
        assert_eq!(r.cells().size_hint(), (usize::MAX, None));
        assert_eq!(r.cells().take(3).count(), 3);
    }
}
