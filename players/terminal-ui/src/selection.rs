use board::Coord;
use rules::Game;

pub const NO_PIECE: &str = "There is no piece here!";
pub const NOT_YOURS: &str = "This is not your piece!";

/// What a click on a square amounted to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Click {
    /// Nothing happened, and the user should be told why
    Refused(&'static str),
    Selected(Coord),
    Deselected,
    /// A piece was selected and another square clicked, so try moving there
    Move { from: Coord, to: Coord },
}

/// The square a user has picked up a piece from, if any
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Coord>,
}

impl Selection {
    pub const fn new() -> Self {
        Self { selected: None }
    }

    pub const fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Handle a click on `square` by whoever is to move in `game`
    pub fn click(&mut self, game: &Game, square: Coord) -> Click {
        let own = game
            .occupant(square)
            .map(|occupant| occupant.color == game.active_color());
        match (self.selected, own) {
            (Some(from), _) if from == square => {
                self.selected = None;
                Click::Deselected
            }
            (_, Some(true)) => {
                self.selected = Some(square);
                Click::Selected(square)
            }
            (Some(from), _) => {
                self.selected = None;
                Click::Move { from, to: square }
            }
            (None, None) => Click::Refused(NO_PIECE),
            (None, Some(false)) => Click::Refused(NOT_YOURS),
        }
    }
}
