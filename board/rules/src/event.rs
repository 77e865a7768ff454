use board::{Color, Coord, Occupant};

/// Something a game reports to whoever is showing it
///
/// Events are queued on the [`crate::Game`] as commands run, and taken with
/// [`crate::Game::drain_events`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// What stands on a square changed over the course of a command
    OccupancyChanged {
        square: Coord,
        occupant: Option<Occupant>,
    },
    Status(Status),
    /// It is now this color's turn
    TurnChanged(Color),
}

/// Messages about the state of play
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// A proposed move was rejected, for the given reason
    InvalidMove(String),
    /// A promotion choice was rejected, for the given reason
    PromotionRejected(String),
    /// This color's king is in check
    Check(Color),
    /// This color has been checkmated
    Checkmate(Color),
    /// This color has a pawn on the last rank and must choose what it becomes
    PromotionRequested(Color),
}

impl From<Status> for GameEvent {
    fn from(status: Status) -> Self {
        Self::Status(status)
    }
}
