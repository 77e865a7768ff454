use board::{Color, Coord, Occupant, PieceKind};

/// A piece, along with everything the rules track about it
///
/// Captured pieces stay in the game's list with [`Piece::is_captured`] set, so ids never
/// dangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) color: Color,
    /// Always equal to the square the board has this piece on, unless captured
    pub(crate) coord: Coord,
    pub(crate) captured: bool,
    /// The turn this piece last moved on, or 0 if it never has
    pub(crate) last_moved_turn: u32,
    /// The turn this pawn last advanced two squares on, or 0 if it never has
    pub(crate) advanced_two_turn: u32,
}

impl Piece {
    pub(crate) const fn new(kind: PieceKind, color: Color, coord: Coord) -> Self {
        Self {
            kind,
            color,
            coord,
            captured: false,
            last_moved_turn: 0,
            advanced_two_turn: 0,
        }
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    /// Where this piece is, or where it was captured
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    pub const fn is_captured(&self) -> bool {
        self.captured
    }

    pub const fn last_moved_turn(&self) -> u32 {
        self.last_moved_turn
    }

    pub const fn advanced_two_turn(&self) -> u32 {
        self.advanced_two_turn
    }

    pub const fn occupant(&self) -> Occupant {
        Occupant {
            kind: self.kind,
            color: self.color,
        }
    }
}
