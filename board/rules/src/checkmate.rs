use board::{Color, Coord, CoordOffset, PieceId, PieceKind};

use crate::{Game, Interposition};

impl Game {
    /// Whether the player of this color is checked with no way out
    ///
    /// Only meaningful once the player has been flagged as checked; returns `false` otherwise.
    /// Every escape considered is tried out on the board and taken back again, so the game is
    /// left the way it was found.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        if !self.player(color).checked {
            return false;
        }
        let Some(checker) = self.attacker_of(color) else {
            return false;
        };
        let king = self.player(color).king;
        let origin = self.piece_of(king).coord;

        let king_steps = CoordOffset::KING_MOVES
            .into_iter()
            .filter_map(|step| origin.shifted(step));
        for square in king_steps {
            if self.escapes_by(king, square, 1) {
                return false;
            }
        }

        let threat = *self.piece_of(checker);
        // A pawn that just advanced two can also be taken from behind
        let passed = (threat.kind == PieceKind::Pawn)
            .then(|| threat.coord.offset(0, -threat.color.pawn_direction()))
            .flatten();
        for defender in self.live_pieces(color) {
            let pawn = self.piece_of(defender).kind == PieceKind::Pawn;
            if self.captures_by(defender, threat.coord, threat.coord)
                || (pawn
                    && passed.is_some_and(|square| {
                        self.captures_by(defender, square, threat.coord)
                    }))
            {
                return false;
            }
        }

        if threat.kind == PieceKind::Knight {
            return true;
        }
        let between: Vec<Coord> = origin.squares_between(threat.coord).collect();
        for defender in self.live_pieces(color) {
            let kind = self.piece_of(defender).kind;
            let may_block = match self.config.interposition {
                Interposition::AllPieces => kind != PieceKind::King,
                Interposition::PawnsOnly => kind == PieceKind::Pawn,
            };
            if may_block
                && between
                    .iter()
                    .any(|&square| self.escapes_by(defender, square, 2))
            {
                return false;
            }
        }
        true
    }

    /// Whether moving the piece to the square is legal and gets its king out of check
    fn escapes_by(&mut self, id: PieceId, square: Coord, depth: u8) -> bool {
        let Ok(check) = self.validate_move(id, square, depth) else {
            return false;
        };
        let safe = self.leaves_king_safe(id, square, check.capture);
        if safe {
            tracing::trace!(piece = ?self.piece_of(id).kind, %square, "escape from check found");
        }
        safe
    }

    /// Whether moving the piece to the square takes the piece on `victim` and leaves its king safe
    fn captures_by(&mut self, id: PieceId, square: Coord, victim: Coord) -> bool {
        match self.validate_move(id, square, 2) {
            Ok(check) if check.capture == Some(victim) => {
                let safe = self.leaves_king_safe(id, square, check.capture);
                if safe {
                    tracing::trace!(piece = ?self.piece_of(id).kind, %victim, "checker can be taken");
                }
                safe
            }
            _ => false,
        }
    }
}
