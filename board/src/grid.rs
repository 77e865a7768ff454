use crate::{Coord, OutOfRange};

/// Names one piece of a game: its slot in the game's list of pieces
///
/// The slot never changes while the game lasts, even when a pawn is promoted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

/// The fixed color of a square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shade {
    Light,
    Dark,
}
impl Shade {
    /// Squares whose coordinates add up to an odd number are dark
    pub const fn of(coord: Coord) -> Self {
        if (coord.x() + coord.y()) % 2 == 1 {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// One square of the board, as it stands right now
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    pub coord: Coord,
    pub occupant: Option<PieceId>,
}
impl Square {
    pub const fn x(&self) -> i8 {
        self.coord.x()
    }

    pub const fn y(&self) -> i8 {
        self.coord.y()
    }

    pub const fn shade(&self) -> Shade {
        Shade::of(self.coord)
    }

    pub const fn has_piece(&self) -> bool {
        self.occupant.is_some()
    }
}

/// The 8x8 grid, recording which piece (if any) stands on each square
///
/// At most one piece is on a square at a time. This type doesn't check any rules when the
/// occupancy is changed; that is the caller's job.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    occupants: [Option<PieceId>; 64],
}
impl Board {
    /// A board with nothing on it
    pub const EMPTY: Self = Self {
        occupants: [None; 64],
    };

    /// Look up the square at the given coordinates
    ///
    /// ```
    /// use board::{Board, Shade};
    /// let board = Board::EMPTY;
    /// assert_eq!(board.get(1, 1).unwrap().shade(), Shade::Light);
    /// assert_eq!(board.get(2, 1).unwrap().shade(), Shade::Dark);
    /// assert!(board.get(0, 1).is_err());
    /// ```
    pub fn get(&self, x: i8, y: i8) -> Result<Square, OutOfRange> {
        Ok(self.square(Coord::new(x, y)?))
    }

    pub fn square(&self, coord: Coord) -> Square {
        Square {
            coord,
            occupant: self.occupant(coord),
        }
    }

    pub fn occupant(&self, coord: Coord) -> Option<PieceId> {
        self.occupants[coord.index()]
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.occupant(coord).is_some()
    }

    /// Put the piece on the square, returning whatever was there before
    pub fn set_occupant(&mut self, coord: Coord, piece: PieceId) -> Option<PieceId> {
        self.occupants[coord.index()].replace(piece)
    }

    /// Empty the square, returning whatever was there before
    pub fn clear_occupant(&mut self, coord: Coord) -> Option<PieceId> {
        self.occupants[coord.index()].take()
    }

    /// All 64 squares, row by row from `(1, 1)`
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        Coord::all().map(|coord| self.square(coord))
    }
}
impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_all_squares {
        ($(
            $name:ident($square:pat) $body:block
        )*) => {$(
            #[test]
            fn $name() {
                for coord in Coord::all() {
                    let $square = coord;
                    $body
                }
            }
        )*};
    }

    test_all_squares!(
        test_get_agrees_with_square(coord) {
            assert_eq!(Board::EMPTY.get(coord.x(), coord.y()), Ok(Board::EMPTY.square(coord)));
        }

        test_neighbours_have_other_shade(coord) {
            for neighbour in [coord.offset(1, 0), coord.offset(0, 1)].into_iter().flatten() {
                assert_ne!(Shade::of(coord), Shade::of(neighbour));
            }
        }

        test_set_then_clear(coord) {
            let mut board = Board::EMPTY;
            assert_eq!(board.set_occupant(coord, PieceId(3)), None);
            assert_eq!(board.set_occupant(coord, PieceId(4)), Some(PieceId(3)));
            assert_eq!(board.squares().filter(Square::has_piece).count(), 1);
            assert_eq!(board.clear_occupant(coord), Some(PieceId(4)));
            assert_eq!(board, Board::EMPTY);
        }
    );

    #[test]
    fn test_get_out_of_range() {
        assert_eq!(Board::EMPTY.get(9, 3), Err(OutOfRange { x: 9, y: 3 }));
        assert_eq!(Board::EMPTY.get(3, 0), Err(OutOfRange { x: 3, y: 0 }));
    }
}
