use board::{Color, PieceId, PieceKind};

use crate::Game;

impl Game {
    /// Whether the king of this color is under attack right now
    ///
    /// The first attacker found is recorded as the player's
    /// [`checked_by`](crate::Player::checked_by).
    pub fn king_exposed(&mut self, color: Color) -> bool {
        match self.attacker_of(color) {
            Some(attacker) => {
                self.player_mut(color).checked_by = Some(attacker);
                true
            }
            None => false,
        }
    }

    /// Find an opposing piece that attacks the king of this color, without recording it
    ///
    /// Pawns are judged by where they strike, one square diagonally forward, since their moves
    /// onto empty squares aren't the same as their attacks. Everything else is asked whether it
    /// could move onto the king's square.
    pub(crate) fn attacker_of(&mut self, color: Color) -> Option<PieceId> {
        let target = self.king_coord(color);
        self.live_pieces(color.other()).into_iter().find(|&id| {
            let piece = *self.piece_of(id);
            match piece.kind {
                PieceKind::Pawn => {
                    let offset = piece.coord.offset_to(target);
                    offset.dy == piece.color.pawn_direction() && offset.dx.abs() == 1
                }
                _ => self.validate_move(id, target, 1).is_ok(),
            }
        })
    }
}
