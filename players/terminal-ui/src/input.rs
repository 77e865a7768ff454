use std::str::FromStr;

use board::{Coord, PieceKind};

/// One line typed by the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// `x,y`: click on a square
    Click(Coord),
    /// `x,y x,y`: click on one square, then another
    Move(Coord, Coord),
    /// A piece name, to answer a promotion
    Piece(PieceKind),
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("nothing was entered")]
    Empty,
    #[error("{0:?} is neither a square like 3,4 nor a piece name")]
    Unrecognized(String),
    #[error(transparent)]
    BadSquare(#[from] board::CoordFromStrErr),
    #[error("expected at most two squares")]
    TooManyWords,
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words[..] {
            [] => Err(InputError::Empty),
            [word] if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("q") => {
                Ok(Self::Quit)
            }
            [word] => {
                if let Ok(square) = word.parse() {
                    Ok(Self::Click(square))
                } else if let Ok(kind) = word.parse() {
                    Ok(Self::Piece(kind))
                } else {
                    Err(InputError::Unrecognized(word.to_owned()))
                }
            }
            [from, to] => Ok(Self::Move(from.parse()?, to.parse()?)),
            _ => Err(InputError::TooManyWords),
        }
    }
}
