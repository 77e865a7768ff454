//! The board itself: coordinates, colors, kinds of pieces, and which square holds what
//!
//! Nothing in this crate knows the rules of chess. It only stores where things are.

use core::{fmt, str::FromStr};

mod coord;
mod grid;

pub use crate::coord::{Coord, CoordFromStrErr, CoordOffset, OutOfRange};
pub use crate::grid::{Board, PieceId, Shade, Square};

/// The types of pieces there are
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}
impl PieceKind {
    /// All the kinds of pieces there are
    pub const KINDS: [PieceKind; 6] = [
        Self::Pawn,
        Self::Rook,
        Self::Knight,
        Self::Bishop,
        Self::Queen,
        Self::King,
    ];

    /// The capitalized letter used to draw this piece
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// The lowercase English name of this piece
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Whether a pawn can promote into this kind of piece
    pub const fn is_promotable(self) -> bool {
        match self {
            PieceKind::Pawn | PieceKind::King => false,
            PieceKind::Rook | PieceKind::Queen | PieceKind::Knight | PieceKind::Bishop => true,
        }
    }
}
impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown piece name `{0}`")]
pub struct PieceKindFromStrErr(pub String);

/// Parses the piece name, ignoring case
///
/// `castle` is accepted as another name for the rook.
///
/// ```
/// use board::PieceKind;
/// assert_eq!("Queen".parse::<PieceKind>().unwrap(), PieceKind::Queen);
/// assert_eq!("castle".parse::<PieceKind>().unwrap(), PieceKind::Rook);
/// assert!("wizard".parse::<PieceKind>().is_err());
/// ```
impl FromStr for PieceKind {
    type Err = PieceKindFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Ok(match name.as_str() {
            "pawn" => Self::Pawn,
            "rook" | "castle" => Self::Rook,
            "knight" => Self::Knight,
            "bishop" => Self::Bishop,
            "queen" => Self::Queen,
            "king" => Self::King,
            _ => return Err(PieceKindFromStrErr(s.to_owned())),
        })
    }
}

/// The colors a piece can have
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Which way this color's pawns move along the y axis
    ///
    /// White starts on ranks 7 and 8 and moves toward rank 1.
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The rank this color's pawns start on
    pub const fn pawn_start_rank(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 2,
        }
    }

    /// The rank on which this color's pawns promote
    pub const fn promotion_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// What someone looking at a square sees standing on it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub kind: PieceKind,
    pub color: Color,
}
impl Occupant {
    /// The letter to draw for this piece: uppercase for white, lowercase for black
    pub const fn letter(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

/// Whether a side is in check, checkmated, or neither
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CheckStatus {
    None,
    Check,
    Checkmate,
}
/// Returns the status as appended to a move in algebraic notation
impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "",
            Self::Check => "+",
            Self::Checkmate => "#",
        })
    }
}
