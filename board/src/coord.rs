use core::{fmt, str::FromStr};

/// A coordinate outside of the board was given
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("coordinate ({x}, {y}) is off the board")]
pub struct OutOfRange {
    pub x: i8,
    pub y: i8,
}

/// A square's position on the board
///
/// `x` is the file and `y` the rank, both counted from 1. Black's back rank is `y == 1`.
///
/// Stored in 0x88 method:
/// ```text
/// 0b12345678
///        +-+ x - 1
///    +-+ y - 1
///   +   + Always zero
/// ```
///
/// A `Coord` is always on the board: the only ways to make one check the bounds first.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(u8);
impl Coord {
    /// Make the coordinate, if it's on the board
    ///
    /// ```
    /// use board::Coord;
    /// let c = Coord::new(3, 7).unwrap();
    /// assert_eq!((c.x(), c.y()), (3, 7));
    /// assert!(Coord::new(0, 4).is_err());
    /// assert!(Coord::new(4, 9).is_err());
    /// ```
    pub const fn new(x: i8, y: i8) -> Result<Self, OutOfRange> {
        if 1 <= x && x <= 8 && 1 <= y && y <= 8 {
            Ok(Self(((y - 1) as u8) << 4 | (x - 1) as u8))
        } else {
            Err(OutOfRange { x, y })
        }
    }

    /// The file, on `1..=8`
    pub const fn x(self) -> i8 {
        (self.0 & 0x07) as i8 + 1
    }

    /// The rank, on `1..=8`
    pub const fn y(self) -> i8 {
        (self.0 >> 4) as i8 + 1
    }

    /// Position of this square when the board is laid out row by row, on `0..64`
    pub const fn index(self) -> usize {
        ((self.0 >> 4) * 8 + (self.0 & 0x07)) as usize
    }

    /// Offset by the given amounts, if the result stays on the board
    ///
    /// ```rust
    /// use board::Coord;
    /// let d2 = Coord::new(4, 2).unwrap();
    /// assert_eq!(Coord::new(1, 1).unwrap().offset(3, 1), Some(d2));
    /// assert_eq!(d2.offset(0, 0), Some(d2));
    /// assert_eq!(d2.offset(0, -2), None);
    /// assert_eq!(d2.offset(5, 0), None);
    /// ```
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        match Self::new(self.x().saturating_add(dx), self.y().saturating_add(dy)) {
            Ok(coord) => Some(coord),
            Err(_) => None,
        }
    }

    /// Offset by the given [`CoordOffset`], if the result stays on the board
    pub const fn shifted(self, offset: CoordOffset) -> Option<Self> {
        self.offset(offset.dx, offset.dy)
    }

    /// Gets the offset which takes `self` to `target`
    pub const fn offset_to(self, target: Self) -> CoordOffset {
        CoordOffset {
            dx: target.x() - self.x(),
            dy: target.y() - self.y(),
        }
    }

    /// The squares strictly between `self` and `target`
    ///
    /// Empty unless the two share a rank, file, or diagonal.
    ///
    /// ```
    /// use board::Coord;
    /// let a = Coord::new(1, 1).unwrap();
    /// let between: Vec<_> = a.squares_between(Coord::new(4, 4).unwrap()).collect();
    /// assert_eq!(between, [Coord::new(2, 2).unwrap(), Coord::new(3, 3).unwrap()]);
    /// assert_eq!(a.squares_between(Coord::new(2, 3).unwrap()).count(), 0);
    /// ```
    pub fn squares_between(self, target: Self) -> impl Iterator<Item = Self> {
        let offset = self.offset_to(target);
        let (step, count) = if offset.is_straight() || offset.is_diagonal() {
            (offset.unit(), offset.chebyshev_distance().saturating_sub(1))
        } else {
            (offset.unit(), 0)
        };
        (1..=count as i8).filter_map(move |n| self.offset(step.dx * n, step.dy * n))
    }

    /// An iterator over all squares on the board, row by row
    ///
    /// ```
    /// assert_eq!(board::Coord::all().count(), 64);
    /// ```
    pub fn all() -> impl Iterator<Item = Self> {
        (0u8..64).map(|idx| Self((idx >> 3) << 4 | (idx & 0x07)))
    }
}
impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coord")
            .field("repr", &format_args!("{:X}", self.0))
            .field("x", &self.x())
            .field("y", &self.y())
            .finish()
    }
}
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a square written as `x,y` with both on 1-8, got `{0}`")]
pub struct CoordFromStrErr(pub String);

/// Parses `x,y`, optionally wrapped in parentheses
///
/// ```
/// use board::Coord;
/// assert_eq!("3,7".parse::<Coord>().unwrap(), Coord::new(3, 7).unwrap());
/// assert_eq!("(3, 7)".parse::<Coord>().unwrap(), Coord::new(3, 7).unwrap());
/// assert!("9,1".parse::<Coord>().is_err());
/// assert!("e4".parse::<Coord>().is_err());
/// ```
impl FromStr for Coord {
    type Err = CoordFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoordFromStrErr(s.to_owned());
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (x, y) = inner.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse::<i8>().map_err(|_| err())?;
        let y = y.trim().parse::<i8>().map_err(|_| err())?;
        Self::new(x, y).map_err(|_| err())
    }
}

/// A difference between two squares
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoordOffset {
    pub dx: i8,
    pub dy: i8,
}
impl CoordOffset {
    /// The offsets corresponding to all possible knight moves
    pub const KNIGHT_MOVES: [CoordOffset; 8] = [
        Self::new(2, 1),
        Self::new(2, -1),
        Self::new(-2, 1),
        Self::new(-2, -1),
        Self::new(1, 2),
        Self::new(1, -2),
        Self::new(-1, 2),
        Self::new(-1, -2),
    ];

    /// The offsets corresponding to all possible king moves
    pub const KING_MOVES: [CoordOffset; 8] = [
        Self::new(1, 1),
        Self::new(1, 0),
        Self::new(1, -1),
        Self::new(0, 1),
        Self::new(0, -1),
        Self::new(-1, 1),
        Self::new(-1, 0),
        Self::new(-1, -1),
    ];

    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Whether this stays on one rank or one file
    pub const fn is_straight(self) -> bool {
        !self.is_zero() && (self.dx == 0 || self.dy == 0)
    }

    /// Whether this moves the same distance along both axes
    pub const fn is_diagonal(self) -> bool {
        !self.is_zero() && self.dx.unsigned_abs() == self.dy.unsigned_abs()
    }

    /// Whether a knight could jump this far
    pub const fn is_knight_jump(self) -> bool {
        let dx = self.dx.unsigned_abs();
        let dy = self.dy.unsigned_abs();
        (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
    }

    /// The offset with each component reduced to its sign
    pub const fn unit(self) -> Self {
        Self {
            dx: self.dx.signum(),
            dy: self.dy.signum(),
        }
    }

    /// Gets the Chebyshev distance for this offset
    ///
    /// This is the number of squares moved in one direction, for whichever direction is larger.
    pub const fn chebyshev_distance(self) -> u8 {
        let dx = self.dx.unsigned_abs();
        let dy = self.dy.unsigned_abs();
        if dx > dy {
            dx
        } else {
            dy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::{quickcheck, Arbitrary, Gen};

    impl Arbitrary for Coord {
        fn arbitrary(g: &mut Gen) -> Self {
            let x = *g.choose(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
            let y = *g.choose(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
            Coord::new(x, y).unwrap()
        }
    }

    quickcheck! {
        fn test_offset_to_then_shift_returns_target(from: Coord, to: Coord) -> bool {
            from.shifted(from.offset_to(to)) == Some(to)
        }

        fn test_squares_between_are_strictly_closer(from: Coord, to: Coord) -> bool {
            let total = from.offset_to(to).chebyshev_distance();
            from.squares_between(to).all(|sq| {
                let near = from.offset_to(sq).chebyshev_distance();
                0 < near && near < total
            })
        }
    }

    #[test]
    fn test_coordinate_round_trip() {
        for coord in Coord::all() {
            assert_eq!(coord, Coord::new(coord.x(), coord.y()).unwrap());
            assert_eq!(coord, format!("{},{}", coord.x(), coord.y()).parse().unwrap());
            assert_eq!(Coord::all().nth(coord.index()), Some(coord));
        }
    }

    #[test]
    fn test_out_of_range() {
        for (x, y) in [(0, 1), (1, 0), (9, 1), (1, 9), (-3, 4), (4, i8::MAX)] {
            assert_eq!(Coord::new(x, y), Err(OutOfRange { x, y }));
        }
    }

    #[test]
    fn test_offsets_never_leave_board() {
        for coord in Coord::all() {
            for offset in CoordOffset::KING_MOVES
                .into_iter()
                .chain(CoordOffset::KNIGHT_MOVES)
            {
                if let Some(target) = coord.shifted(offset) {
                    assert_eq!(coord.offset_to(target), offset);
                }
            }
        }
    }

    #[test]
    fn test_offset_shapes() {
        assert!(CoordOffset::KNIGHT_MOVES.iter().all(|o| o.is_knight_jump()));
        assert!(CoordOffset::KING_MOVES
            .iter()
            .all(|o| o.chebyshev_distance() == 1 && (o.is_straight() || o.is_diagonal())));
        assert!(!CoordOffset::new(0, 0).is_straight());
        assert!(!CoordOffset::new(0, 0).is_diagonal());
        assert_eq!(CoordOffset::new(-3, 2).unit(), CoordOffset::new(-1, 1));
    }
}
