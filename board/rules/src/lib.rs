//! The rules of two-player chess, played out on a [`board::Board`]
//!
//! A [`Game`] owns everything about one game. Callers drive it with [`Game::propose_move`] and
//! [`Game::promote`], and learn what happened from the returned values and from the
//! [`GameEvent`]s it queues up.

use board::{Color, Coord, OutOfRange, PieceKind, PieceKindFromStrErr};

mod check;
mod checkmate;
mod event;
mod executor;
mod game;
mod movement;
mod piece;
mod turn;

pub use crate::event::{GameEvent, Status};
pub use crate::executor::MoveOutcome;
pub use crate::game::{Game, GameConfig, Interposition, Player};
pub use crate::movement::MoveCheck;
pub use crate::piece::Piece;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Why a move isn't allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("a piece can't move onto its own square")]
    NullMove,
    #[error("a {0} can't move that way")]
    Geometry(PieceKind),
    #[error("given move is blocked by another piece")]
    PathBlocked,
    #[error("the target square holds a piece of the same color")]
    OwnPieceAtTarget,
    #[error("a pawn may only move diagonally to capture")]
    PawnNeedsCapture,
    #[error("a pawn can't capture straight ahead")]
    PawnBlocked,
    #[error("a pawn may only advance two squares from its starting rank")]
    DoubleStepNotAllowed,
    #[error("the king would move onto an attacked square")]
    KingIntoAttack,
    #[error("attempted move puts moving side's king in check")]
    ExposesKing,
    #[error("recursion depth used up")]
    DepthExhausted,
}

/// A position can't be set up from the given pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("{0} has no king")]
    MissingKing(Color),
    #[error("{0} has more than one king")]
    ExtraKing(Color),
    #[error("two pieces were placed on {0}")]
    SquareTaken(Coord),
    #[error("{0} is in check, but it isn't their move")]
    WaitingSideInCheck(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    #[error("there is no piece on {0}")]
    NoPieceAtSquare(Coord),
    #[error("the piece on {square} belongs to {owner}, but it's {active}'s turn")]
    NotOwnedByActivePlayer {
        square: Coord,
        owner: Color,
        active: Color,
    },
    #[error("invalid move: {0}")]
    InvalidMove(#[from] IllegalMove),
    #[error("{0} has to choose a promotion before play continues")]
    PromotionPending(Color),
    #[error("there is no pawn waiting to be promoted")]
    NoPromotionPending,
    #[error("pawns can't promote into a {0}")]
    InvalidPromotion(PieceKind),
    #[error(transparent)]
    UnknownPieceKind(#[from] PieceKindFromStrErr),
    #[error("the game is over: {winner} checkmated {loser}")]
    Checkmate { winner: Color, loser: Color },
    #[error("invalid setup: {0}")]
    InvalidSetup(#[from] SetupError),
}
