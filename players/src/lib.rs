//! Traits for an arbitrary player

use board::{Coord, PieceKind};
use rules::{Game, GameEvent};

/// What a player wants to do on their turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move the piece on `from` to `to`
    Move { from: Coord, to: Coord },
    /// Pick what the pawn waiting on the last rank becomes
    Promote(PieceKind),
    /// Give up on the game
    Quit,
}

/// A player in a game
///
/// This trait is generic over how the players decides what to do, so a human at a terminal and
/// a scripted player can both implement this.
pub trait Player {
    /// Decide what to do, given the game as it stands
    ///
    /// This is called whenever it's this player's color to move, including after one of their
    /// commands was rejected.
    fn next_command(&mut self, game: &Game) -> Command;

    /// React to something that happened in the game
    ///
    /// Both players see every event, whoever caused it.
    fn observe(&mut self, event: &GameEvent);
}
