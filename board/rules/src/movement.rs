//! Whether a piece may move to a square, judged by how that kind of piece moves

use board::{Color, Coord, PieceId, PieceKind};

use crate::{piece::Piece, Game, IllegalMove};

/// The details of a move that the rules allow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveCheck {
    /// The square of the piece this move takes, if any
    ///
    /// For en passant, this is the square beside the pawn, not its destination.
    pub capture: Option<Coord>,
    /// The move lands a pawn on the last rank
    pub promote: bool,
    /// The move advances a pawn two squares
    pub double_step: bool,
}

impl MoveCheck {
    const QUIET: Self = Self {
        capture: None,
        promote: false,
        double_step: false,
    };

    const fn capturing(square: Coord) -> Self {
        Self {
            capture: Some(square),
            ..Self::QUIET
        }
    }
}

type Legality = Result<MoveCheck, IllegalMove>;

impl Game {
    /// Check whether the piece may move to `target`
    ///
    /// This only judges how the piece moves and what it lands on; it doesn't check whether the
    /// move leaves its own king attacked, except for kings moving onto attacked squares.
    ///
    /// `depth` bounds how far a king's look at its destination recurses: each level lets the
    /// opposing pieces be asked about that square with `depth - 1`, and nothing is legal at
    /// depth 0. Use 1 to judge a move as made, and 2 to have kings also refuse attacked squares.
    ///
    /// The game may be changed while this runs, but is always put back before it returns.
    pub fn validate_move(&mut self, id: PieceId, target: Coord, depth: u8) -> Legality {
        if depth == 0 {
            return Err(IllegalMove::DepthExhausted);
        }
        let piece = *self.piece_of(id);
        let offset = piece.coord.offset_to(target);
        if offset.is_zero() {
            return Err(IllegalMove::NullMove);
        }
        match piece.kind {
            PieceKind::Rook if offset.is_straight() => self.slide(&piece, target),
            PieceKind::Bishop if offset.is_diagonal() => self.slide(&piece, target),
            PieceKind::Queen if offset.is_straight() || offset.is_diagonal() => {
                self.slide(&piece, target)
            }
            PieceKind::Knight if offset.is_knight_jump() => self.landing(piece.color, target),
            PieceKind::King if offset.chebyshev_distance() == 1 => {
                self.king_step(&piece, target, depth)
            }
            PieceKind::Pawn => self.pawn_move(&piece, target),
            kind => Err(IllegalMove::Geometry(kind)),
        }
    }

    /// A rook, bishop, or queen move along a clear line
    fn slide(&self, piece: &Piece, target: Coord) -> Legality {
        if piece
            .coord
            .squares_between(target)
            .any(|square| self.board.is_occupied(square))
        {
            return Err(IllegalMove::PathBlocked);
        }
        self.landing(piece.color, target)
    }

    /// What landing on the square means for a piece of the given color
    fn landing(&self, color: Color, target: Coord) -> Legality {
        match self.piece_at(target) {
            None => Ok(MoveCheck::QUIET),
            Some(other) if other.color != color => Ok(MoveCheck::capturing(target)),
            Some(_) => Err(IllegalMove::OwnPieceAtTarget),
        }
    }

    fn king_step(&mut self, king: &Piece, target: Coord, depth: u8) -> Legality {
        let check = self.landing(king.color, target)?;
        // At depth 1 the replies would be judged at depth 0, where nothing is legal
        if depth < 2 {
            return Ok(check);
        }
        let displaced = self.board.clear_occupant(target);
        let attacked = self
            .live_pieces(king.color.other())
            .into_iter()
            .any(|other| self.validate_move(other, target, depth - 1).is_ok());
        if let Some(displaced) = displaced {
            self.board.set_occupant(target, displaced);
        }
        if attacked {
            Err(IllegalMove::KingIntoAttack)
        } else {
            Ok(check)
        }
    }

    fn pawn_move(&self, pawn: &Piece, target: Coord) -> Legality {
        let forward = pawn.color.pawn_direction();
        let offset = pawn.coord.offset_to(target);
        let mut check = if offset.dx == 0 && offset.dy == 2 * forward {
            if pawn.coord.y() != pawn.color.pawn_start_rank() {
                return Err(IllegalMove::DoubleStepNotAllowed);
            }
            if pawn
                .coord
                .squares_between(target)
                .chain([target])
                .any(|square| self.board.is_occupied(square))
            {
                return Err(IllegalMove::PathBlocked);
            }
            MoveCheck {
                double_step: true,
                ..MoveCheck::QUIET
            }
        } else if offset.dx == 0 && offset.dy == forward {
            if self.board.is_occupied(target) {
                return Err(IllegalMove::PawnBlocked);
            }
            MoveCheck::QUIET
        } else if offset.dx.abs() == 1 && offset.dy == forward {
            match self.landing(pawn.color, target)? {
                check @ MoveCheck {
                    capture: Some(_), ..
                } => check,
                _ => self.en_passant(pawn, offset.dx)?,
            }
        } else {
            return Err(IllegalMove::Geometry(PieceKind::Pawn));
        };
        check.promote = target.y() == 1 || target.y() == 8;
        Ok(check)
    }

    /// A diagonal step onto an empty square, taking the pawn beside us
    ///
    /// Only allowed right after that pawn advanced two squares. While the reply to that advance is
    /// still being judged, the turn hasn't passed yet.
    fn en_passant(&self, pawn: &Piece, dx: i8) -> Legality {
        let beside = pawn
            .coord
            .offset(dx, 0)
            .ok_or(IllegalMove::PawnNeedsCapture)?;
        match self.piece_at(beside) {
            Some(other)
                if other.color != pawn.color
                    && other.kind == PieceKind::Pawn
                    && other.advanced_two_turn != 0
                    && self.just_advanced(other) =>
            {
                Ok(MoveCheck::capturing(beside))
            }
            _ => Err(IllegalMove::PawnNeedsCapture),
        }
    }

    fn just_advanced(&self, pawn: &Piece) -> bool {
        if pawn.color == self.active {
            pawn.advanced_two_turn == self.turn
        } else {
            pawn.advanced_two_turn.checked_add(1) == Some(self.turn)
        }
    }
}
