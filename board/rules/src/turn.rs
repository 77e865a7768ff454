use board::{CheckStatus, PieceKind};

use crate::{event::Status, Error, Game, GameEvent, Piece, Result};

impl Game {
    /// Replace the pawn waiting on the last rank with a piece of the given kind
    ///
    /// Once the pawn is replaced, the opponent is tested for check and checkmate just as after
    /// any other move, and the turn passes unless the game is over.
    pub fn promote(&mut self, kind: PieceKind) -> Result<CheckStatus> {
        let result = self.try_promote(kind);
        if let Err(err) = &result {
            tracing::debug!(%err, "promotion rejected");
            self.events
                .push(Status::PromotionRejected(err.to_string()).into());
        }
        result
    }

    /// Like [`Game::promote`], but with the piece given by name, as in `"queen"`
    pub fn promote_named(&mut self, name: &str) -> Result<CheckStatus> {
        match name.parse::<PieceKind>() {
            Ok(kind) => self.promote(kind),
            Err(err) => {
                let err = Error::from(err);
                self.events
                    .push(Status::PromotionRejected(err.to_string()).into());
                Err(err)
            }
        }
    }

    fn try_promote(&mut self, kind: PieceKind) -> Result<CheckStatus> {
        self.ensure_playing()?;
        let id = self
            .player(self.active)
            .pending_promotion
            .ok_or(Error::NoPromotionPending)?;
        if !kind.is_promotable() {
            return Err(Error::InvalidPromotion(kind));
        }

        let before = self.snapshot();
        let pawn = *self.piece_of(id);
        let mut promoted = Piece::new(kind, pawn.color, pawn.coord);
        promoted.last_moved_turn = pawn.last_moved_turn;
        self.pieces[id.0] = promoted;
        self.player_mut(self.active).pending_promotion = None;
        self.report_changes(&before);
        tracing::debug!(square = %pawn.coord, %kind, "pawn promoted");

        Ok(self.judge_opponent())
    }

    /// See whether the move just made checks or mates the opponent, and pass the turn if play
    /// goes on
    pub(crate) fn judge_opponent(&mut self) -> CheckStatus {
        let opponent = self.active.other();
        if !self.king_exposed(opponent) {
            self.advance_turn();
            return CheckStatus::None;
        }
        self.player_mut(opponent).checked = true;
        tracing::info!(color = %opponent, turn = self.turn, "check");

        if self.is_checkmate(opponent) {
            tracing::info!(winner = %self.active, loser = %opponent, "checkmate");
            self.winner = Some(self.active);
            self.events.push(Status::Checkmate(opponent).into());
            return CheckStatus::Checkmate;
        }
        self.events.push(Status::Check(opponent).into());
        self.advance_turn();
        CheckStatus::Check
    }

    /// Hand the move to the other color
    ///
    /// Having completed a legal move, the side that just moved can't still be in check.
    pub(crate) fn advance_turn(&mut self) {
        let mover = self.active;
        self.player_mut(mover).clear_check();
        self.turn = self.turn.saturating_add(1);
        self.active = mover.other();
        tracing::debug!(turn = self.turn, color = %self.active, "turn passed");
        self.events.push(GameEvent::TurnChanged(self.active));
    }
}

#[cfg(test)]
mod tests {
    use board::Color::{Black, White};
    use board::Occupant;
    use board::PieceKind::*;

    use super::*;
    use crate::game::testing::*;
    use crate::MoveOutcome;

    /// A white pawn one step from promoting, with both kings far away
    fn about_to_promote(white_king: (i8, i8)) -> Game {
        position(
            White,
            1,
            &[
                (White, King, white_king),
                (Black, King, (8, 1)),
                (White, Pawn, (3, 2)),
            ],
        )
    }

    #[test]
    fn test_promotion_scenario() {
        let mut game = about_to_promote((8, 8));
        let pawn = game.board.occupant(sq(3, 2)).unwrap();
        assert_eq!(
            game.propose_move(sq(3, 2), sq(3, 1)),
            Ok(MoveOutcome::PromotionPending { captured: None })
        );
        assert_eq!(game.pending_promotion(), Some(pawn));
        assert!(game
            .drain_events()
            .any(|event| event == GameEvent::Status(Status::PromotionRequested(White))));

        // The queen looks down the first rank at the black king
        assert_eq!(game.promote(Queen), Ok(CheckStatus::Check));
        assert_consistent(&game);
        assert_eq!(
            game.occupant(sq(3, 1)),
            Some(Occupant {
                kind: Queen,
                color: White
            })
        );
        let queen = game.piece_of(pawn);
        assert_eq!(queen.last_moved_turn(), 1);
        assert_eq!(queen.advanced_two_turn(), 0);
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(game.active_color(), Black);
        assert_eq!(game.turn(), 2);
        assert!(game.player(Black).is_checked());

        let events: Vec<_> = game.drain_events().collect();
        assert!(events.contains(&GameEvent::OccupancyChanged {
            square: sq(3, 1),
            occupant: Some(Occupant {
                kind: Queen,
                color: White
            })
        }));
        assert!(events.contains(&GameEvent::Status(Status::Check(Black))));
        assert_eq!(events.last(), Some(&GameEvent::TurnChanged(Black)));
    }

    #[test]
    fn test_quiet_promotion() {
        let mut game = about_to_promote((8, 8));
        game.propose_move(sq(3, 2), sq(3, 1)).unwrap();
        assert_eq!(game.promote_named("knight"), Ok(CheckStatus::None));
        assert_eq!(game.occupant(sq(3, 1)).map(|o| o.kind), Some(Knight));
        assert!(!game.player(Black).is_checked());
        assert_eq!(game.active_color(), Black);
    }

    #[test]
    fn test_promotion_can_checkmate() {
        // The white king covers the squares in front of the black king
        let mut game = about_to_promote((8, 3));
        game.propose_move(sq(3, 2), sq(3, 1)).unwrap();
        assert_eq!(game.promote(Rook), Ok(CheckStatus::Checkmate));
        assert_eq!(game.winner(), Some(White));
        assert_eq!(game.turn(), 1);
        assert_eq!(
            game.promote(Queen),
            Err(Error::Checkmate {
                winner: White,
                loser: Black
            })
        );
    }

    #[test]
    fn test_invalid_promotions() {
        let mut game = about_to_promote((8, 8));
        game.propose_move(sq(3, 2), sq(3, 1)).unwrap();
        game.drain_events().for_each(drop);
        assert_eq!(game.promote(King), Err(Error::InvalidPromotion(King)));
        assert_eq!(game.promote(Pawn), Err(Error::InvalidPromotion(Pawn)));
        assert!(matches!(
            game.promote_named("wizard"),
            Err(Error::UnknownPieceKind(_))
        ));
        let rejections = game
            .drain_events()
            .filter(|event| matches!(event, GameEvent::Status(Status::PromotionRejected(_))))
            .count();
        assert_eq!(rejections, 3);
        // Still waiting on a real choice
        assert_eq!(game.occupant(sq(3, 1)).map(|o| o.kind), Some(Pawn));
        assert_eq!(game.active_color(), White);
        assert_eq!(game.promote(Bishop), Ok(CheckStatus::None));
    }

    #[test]
    fn test_nothing_to_promote() {
        let mut game = Game::new();
        assert_eq!(game.promote(Queen), Err(Error::NoPromotionPending));
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = Game::new();
        for (from, to, next) in [
            ((5, 7), (5, 5), Black),
            ((5, 2), (5, 4), White),
            ((7, 8), (6, 6), Black),
        ] {
            game.propose_move(sq(from.0, from.1), sq(to.0, to.1))
                .unwrap();
            assert_eq!(game.active_color(), next);
        }
        assert_eq!(game.turn(), 4);
        let turns: Vec<_> = game
            .drain_events()
            .filter_map(|event| match event {
                GameEvent::TurnChanged(color) => Some(color),
                _ => None,
            })
            .collect();
        assert_eq!(turns, [Black, White, Black]);
    }
}
