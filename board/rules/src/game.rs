use board::{Board, Color, Coord, Occupant, PieceId, PieceKind, Square};

use crate::{event::GameEvent, piece::Piece, Result, SetupError};

/// Which defenders the checkmate test lets step between a king and its attacker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Interposition {
    /// Any defending piece other than the king may block
    #[default]
    AllPieces,
    /// Only pawns are tried as blockers
    PawnsOnly,
}

/// Settings for how a game is judged
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub interposition: Interposition,
}

/// One side of the game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub(crate) color: Color,
    pub(crate) checked: bool,
    /// The piece found attacking this player's king by the last check test
    pub(crate) checked_by: Option<PieceId>,
    pub(crate) king: PieceId,
    /// A pawn of ours that reached the last rank and hasn't been promoted yet
    pub(crate) pending_promotion: Option<PieceId>,
    pub(crate) last_moved: Option<PieceId>,
}

impl Player {
    const fn new(color: Color, king: PieceId) -> Self {
        Self {
            color,
            checked: false,
            checked_by: None,
            king,
            pending_promotion: None,
            last_moved: None,
        }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    pub const fn checked_by(&self) -> Option<PieceId> {
        self.checked_by
    }

    pub const fn king(&self) -> PieceId {
        self.king
    }

    pub const fn pending_promotion(&self) -> Option<PieceId> {
        self.pending_promotion
    }

    pub const fn last_moved(&self) -> Option<PieceId> {
        self.last_moved
    }

    pub(crate) fn clear_check(&mut self) {
        self.checked = false;
        self.checked_by = None;
    }
}

/// The state of one game of chess
///
/// The board's occupancy and the pieces' coordinates are only changed together, so they always
/// agree once a public method returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) pieces: Vec<Piece>,
    pub(crate) white: Player,
    pub(crate) black: Player,
    pub(crate) active: Color,
    /// The number of the ply being played, starting at 1
    pub(crate) turn: u32,
    /// Set once someone is checkmated
    pub(crate) winner: Option<Color>,
    pub(crate) config: GameConfig,
    pub(crate) events: Vec<GameEvent>,
}

const WHITE_KING: PieceId = PieceId(0);
const BLACK_KING: PieceId = PieceId(1);

/// The back rank, from `x == 1` to `x == 8`
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Game {
    /// A game in the normal starting position, white to move
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// A game in the normal starting position, judged with the given settings
    pub fn with_config(config: GameConfig) -> Self {
        let mut pieces = Vec::with_capacity(32);
        for (color, back, front) in [(Color::Black, 1, 2), (Color::White, 8, 7)] {
            for (kind, x) in BACK_RANK.into_iter().zip(1..) {
                pieces.push((color, kind, coord(x, back)));
            }
            for x in 1..=8 {
                pieces.push((color, PieceKind::Pawn, coord(x, front)));
            }
        }
        match Self::from_setup(config, Color::White, 1, &pieces) {
            Ok(game) => game,
            Err(_) => unreachable!("the starting position is a valid setup"),
        }
    }

    /// Set up a game with the given pieces on the board
    ///
    /// Each color needs exactly one king, no two pieces may share a square, and the side not to
    /// move can't already be in check. `turn` is clamped to be at least 1. If the side to move
    /// starts out in check, it's flagged as checked.
    pub fn from_setup(
        config: GameConfig,
        active: Color,
        turn: u32,
        placements: &[(Color, PieceKind, Coord)],
    ) -> Result<Self> {
        let king_of = |color: Color| -> Result<Coord, SetupError> {
            let mut kings = placements
                .iter()
                .filter(|&&(c, kind, _)| c == color && kind == PieceKind::King);
            match (kings.next(), kings.next()) {
                (Some(&(_, _, at)), None) => Ok(at),
                (None, _) => Err(SetupError::MissingKing(color)),
                (Some(_), Some(_)) => Err(SetupError::ExtraKing(color)),
            }
        };
        let mut pieces = vec![
            Piece::new(PieceKind::King, Color::White, king_of(Color::White)?),
            Piece::new(PieceKind::King, Color::Black, king_of(Color::Black)?),
        ];
        pieces.extend(
            placements
                .iter()
                .filter(|&&(_, kind, _)| kind != PieceKind::King)
                .map(|&(color, kind, at)| Piece::new(kind, color, at)),
        );
        let mut board = Board::EMPTY;
        for (idx, piece) in pieces.iter().enumerate() {
            if board.set_occupant(piece.coord, PieceId(idx)).is_some() {
                return Err(SetupError::SquareTaken(piece.coord).into());
            }
        }
        let mut game = Self {
            board,
            pieces,
            white: Player::new(Color::White, WHITE_KING),
            black: Player::new(Color::Black, BLACK_KING),
            active,
            turn: turn.max(1),
            winner: None,
            config,
            events: Vec::new(),
        };
        if game.attacker_of(active.other()).is_some() {
            return Err(SetupError::WaitingSideInCheck(active.other()).into());
        }
        if game.king_exposed(active) {
            game.player_mut(active).checked = true;
        }
        Ok(game)
    }

    /// Look up the square at the given coordinates
    pub fn get_square(&self, x: i8, y: i8) -> Result<Square> {
        Ok(self.board.get(x, y)?)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece with this id, if the game has one
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    /// Ids handed out by this game always index its piece list
    pub(crate) fn piece_of(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    /// The piece standing on the given square
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.board.occupant(coord).map(|id| self.piece_of(id))
    }

    /// What someone looking at the square would see
    pub fn occupant(&self, coord: Coord) -> Option<Occupant> {
        self.piece_at(coord).map(Piece::occupant)
    }

    /// Every piece of the game, captured ones included
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(idx, piece)| (PieceId(idx), piece))
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub(crate) fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// The color whose turn it is
    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// The color that delivered checkmate, if the game is over
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The pawn waiting for its owner to pick a promotion, if any
    pub fn pending_promotion(&self) -> Option<PieceId> {
        self.white
            .pending_promotion
            .or(self.black.pending_promotion)
    }

    /// Take all the events queued since this was last called
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Ids of the pieces of this color still in play
    pub(crate) fn live_pieces(&self, color: Color) -> Vec<PieceId> {
        self.pieces()
            .filter(|(_, piece)| piece.color == color && !piece.captured)
            .map(|(id, _)| id)
            .collect()
    }

    pub(crate) fn king_coord(&self, color: Color) -> Coord {
        self.piece_of(self.player(color).king).coord
    }

    /// Move the piece to the given empty square, keeping the board in step
    pub(crate) fn relocate(&mut self, id: PieceId, to: Coord) {
        let from = self.pieces[id.0].coord;
        if self.board.occupant(from) == Some(id) {
            self.board.clear_occupant(from);
        }
        self.pieces[id.0].coord = to;
        self.board.set_occupant(to, id);
    }

    /// What stands on every square, to compare against after a command runs
    pub(crate) fn snapshot(&self) -> [Option<Occupant>; 64] {
        let mut view = [None; 64];
        for square in self.board.squares() {
            view[square.coord.index()] = square.occupant.map(|id| self.piece_of(id).occupant());
        }
        view
    }

    /// Queue an event for every square that looks different than it did in `before`
    pub(crate) fn report_changes(&mut self, before: &[Option<Occupant>; 64]) {
        for square in Coord::all() {
            let occupant = self.occupant(square);
            if before[square.index()] != occupant {
                self.events
                    .push(GameEvent::OccupancyChanged { square, occupant });
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Coordinates known to be within `1..=8`
const fn coord(x: i8, y: i8) -> Coord {
    match Coord::new(x, y) {
        Ok(coord) => coord,
        Err(_) => panic!("coordinate off the board"),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    use board::CoordOffset;
    use quickcheck::{Arbitrary, Gen};

    /// Shorthand for a square in tests
    #[track_caller]
    pub(crate) fn sq(x: i8, y: i8) -> Coord {
        Coord::new(x, y).unwrap()
    }

    /// A game with just the given pieces, `active` to move on turn `turn`
    #[track_caller]
    pub(crate) fn position(
        active: Color,
        turn: u32,
        placements: &[(Color, PieceKind, (i8, i8))],
    ) -> Game {
        position_with(GameConfig::default(), active, turn, placements)
    }

    #[track_caller]
    pub(crate) fn position_with(
        config: GameConfig,
        active: Color,
        turn: u32,
        placements: &[(Color, PieceKind, (i8, i8))],
    ) -> Game {
        let placements: Vec<_> = placements
            .iter()
            .map(|&(color, kind, (x, y))| (color, kind, sq(x, y)))
            .collect();
        Game::from_setup(config, active, turn, &placements).unwrap()
    }

    /// Check that the board and the pieces agree, and that both kings are still around
    #[track_caller]
    pub(crate) fn assert_consistent(game: &Game) {
        for square in game.board.squares() {
            if let Some(id) = square.occupant {
                let piece = game.piece_of(id);
                assert_eq!(piece.coord, square.coord, "{piece:?} is not where the board says");
                assert!(!piece.captured, "captured {piece:?} is still on the board");
            }
        }
        for (id, piece) in game.pieces() {
            if !piece.captured {
                assert_eq!(game.board.occupant(piece.coord), Some(id), "{piece:?} is off the board");
            }
        }
        for color in [Color::White, Color::Black] {
            let kings = game
                .pieces()
                .filter(|(_, p)| p.kind == PieceKind::King && p.color == color && !p.captured)
                .count();
            assert_eq!(kings, 1, "{color} should have exactly one king");
        }
    }

    /// A request to move whatever is on one square to another
    #[derive(Clone, Copy, Debug)]
    pub(crate) struct Attempt {
        pub from: Coord,
        pub to: Coord,
    }

    impl Arbitrary for Attempt {
        fn arbitrary(g: &mut Gen) -> Self {
            let pick = |g: &mut Gen| {
                let x = *g.choose(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
                let y = *g.choose(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
                sq(x, y)
            };
            let from = pick(g);
            // Bias toward short hops so more of the attempts are actually legal
            let to = if bool::arbitrary(g) {
                let offset = *g
                    .choose(&CoordOffset::KING_MOVES)
                    .unwrap_or(&CoordOffset::new(0, 1));
                let reach = *g.choose(&[1, 2]).unwrap();
                from.offset(offset.dx * reach, offset.dy * reach)
                    .unwrap_or_else(|| pick(g))
            } else {
                pick(g)
            };
            Self { from, to }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_starting_position() {
        let game = Game::new();
        assert_consistent(&game);
        assert_eq!(game.pieces().count(), 32);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.active_color(), Color::White);
        assert_eq!(game.king_coord(Color::White), sq(5, 8));
        assert_eq!(game.king_coord(Color::Black), sq(5, 1));
        assert_eq!(game.piece_of(PieceId(0)).kind(), PieceKind::King);
        assert_eq!(game.piece_of(PieceId(1)).color(), Color::Black);
        assert_eq!(game.piece(PieceId(0)).map(|p| p.kind()), Some(PieceKind::King));
        assert_eq!(game.piece(PieceId(32)), None);
        for x in 1..=8 {
            assert_eq!(
                game.occupant(sq(x, 7)),
                Some(Occupant {
                    kind: PieceKind::Pawn,
                    color: Color::White
                })
            );
            assert_eq!(game.occupant(sq(x, 2)).map(|o| o.color), Some(Color::Black));
            for y in 3..=6 {
                assert_eq!(game.occupant(sq(x, y)), None);
            }
        }
        assert_eq!(game.occupant(sq(4, 8)).map(|o| o.kind), Some(PieceKind::Queen));
        assert_eq!(game.occupant(sq(4, 1)).map(|o| o.kind), Some(PieceKind::Queen));
    }

    #[test]
    fn test_get_square() {
        let game = Game::new();
        let square = game.get_square(5, 8).unwrap();
        assert_eq!(square.occupant, Some(game.player(Color::White).king()));
        assert_eq!(
            game.get_square(5, 9),
            Err(crate::Error::OutOfRange(board::OutOfRange { x: 5, y: 9 }))
        );
    }

    #[test]
    fn test_setup_errors() {
        let one_king = [(Color::White, PieceKind::King, sq(1, 1))];
        assert_eq!(
            Game::from_setup(GameConfig::default(), Color::White, 1, &one_king),
            Err(SetupError::MissingKing(Color::Black).into())
        );
        let crowded = [
            (Color::White, PieceKind::King, sq(1, 1)),
            (Color::Black, PieceKind::King, sq(8, 8)),
            (Color::Black, PieceKind::Rook, sq(1, 1)),
        ];
        assert_eq!(
            Game::from_setup(GameConfig::default(), Color::White, 1, &crowded),
            Err(SetupError::SquareTaken(sq(1, 1)).into())
        );
        let three_kings = [
            (Color::White, PieceKind::King, sq(1, 1)),
            (Color::Black, PieceKind::King, sq(8, 8)),
            (Color::White, PieceKind::King, sq(4, 4)),
        ];
        assert_eq!(
            Game::from_setup(GameConfig::default(), Color::White, 1, &three_kings),
            Err(SetupError::ExtraKing(Color::White).into())
        );
    }

    #[test]
    fn test_setup_rejects_a_waiting_side_in_check() {
        let exposed = [
            (Color::White, PieceKind::King, sq(8, 8)),
            (Color::Black, PieceKind::King, sq(1, 1)),
            (Color::White, PieceKind::Rook, sq(1, 5)),
        ];
        assert_eq!(
            Game::from_setup(GameConfig::default(), Color::White, 1, &exposed),
            Err(SetupError::WaitingSideInCheck(Color::Black).into())
        );
        // The same position with Black to move is an ordinary check
        let game = Game::from_setup(GameConfig::default(), Color::Black, 1, &exposed).unwrap();
        assert!(game.player(Color::Black).is_checked());
        assert!(!game.player(Color::White).is_checked());
    }

    #[test]
    fn test_config_is_kept() {
        let config = GameConfig {
            interposition: Interposition::PawnsOnly,
        };
        assert_eq!(Game::with_config(config).config(), config);
        assert_eq!(Game::new().config(), GameConfig::default());
    }

    #[test]
    fn test_turn_counter_saturates() {
        let mut game = position(
            Color::White,
            u32::MAX,
            &[
                (Color::White, PieceKind::King, (8, 8)),
                (Color::Black, PieceKind::King, (1, 1)),
            ],
        );
        game.propose_move(sq(8, 8), sq(7, 8)).unwrap();
        assert_eq!(game.turn(), u32::MAX);
        assert_eq!(game.active_color(), Color::Black);
        game.propose_move(sq(1, 1), sq(2, 1)).unwrap();
        assert_eq!(game.turn(), u32::MAX);
        assert_eq!(game.active_color(), Color::White);
    }

    #[test]
    fn test_setup_puts_kings_in_reserved_slots() {
        let game = position(
            Color::Black,
            0,
            &[
                (Color::Black, PieceKind::Rook, (1, 1)),
                (Color::Black, PieceKind::King, (8, 1)),
                (Color::White, PieceKind::King, (8, 8)),
            ],
        );
        assert_consistent(&game);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.player(Color::White).king(), PieceId(0));
        assert_eq!(game.piece_of(PieceId(1)).coord(), sq(8, 1));
        assert_eq!(game.piece_of(PieceId(2)).kind(), PieceKind::Rook);
    }
}
