use board::{CheckStatus, Coord, PieceId};

use crate::{event::Status, Error, Game, IllegalMove, Result};

/// What a move did, once it was accepted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is done; `status` says where it leaves the opponent
    Applied {
        captured: Option<PieceId>,
        status: CheckStatus,
    },
    /// The move is done, but the mover has to call [`Game::promote`] before the turn passes
    PromotionPending { captured: Option<PieceId> },
}

/// Enough to take back a move that was made tentatively
#[derive(Clone, Copy, Debug)]
pub(crate) struct Undo {
    mover: PieceId,
    from: Coord,
    captured: Option<(PieceId, Coord)>,
}

impl Undo {
    pub(crate) fn captured(&self) -> Option<PieceId> {
        self.captured.map(|(id, _)| id)
    }
}

impl Game {
    /// Move the piece on `from` to `to`, if the rules allow it
    ///
    /// A rejected move leaves the board and pieces as they were, and also queues a
    /// [`Status::InvalidMove`] event.
    pub fn propose_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome> {
        tracing::debug!(%from, %to, color = %self.active, turn = self.turn, "proposed move");
        let result = self.try_move(from, to);
        if let Err(err) = &result {
            tracing::debug!(%err, "move rejected");
            self.events
                .push(Status::InvalidMove(err.to_string()).into());
        }
        result
    }

    fn try_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome> {
        self.ensure_playing()?;
        if self.player(self.active).pending_promotion.is_some() {
            return Err(Error::PromotionPending(self.active));
        }
        let id = self
            .board
            .occupant(from)
            .ok_or(Error::NoPieceAtSquare(from))?;
        let owner = self.piece_of(id).color;
        if owner != self.active {
            return Err(Error::NotOwnedByActivePlayer {
                square: from,
                owner,
                active: self.active,
            });
        }
        let mover = self.active;
        self.player_mut(mover.other()).clear_check();

        let check = self.validate_move(id, to, 1)?;
        let before = self.snapshot();
        let undo = self.apply_tentatively(id, to, check.capture);
        if self.attacker_of(mover).is_some() {
            self.take_back(undo);
            return Err(IllegalMove::ExposesKing.into());
        }

        let turn = self.turn;
        let piece = &mut self.pieces[id.0];
        piece.last_moved_turn = turn;
        if check.double_step {
            piece.advanced_two_turn = turn;
        }
        self.player_mut(mover).last_moved = Some(id);
        self.report_changes(&before);
        let captured = undo.captured();
        tracing::debug!(%from, %to, ?captured, "move committed");

        if check.promote {
            self.player_mut(mover).pending_promotion = Some(id);
            self.events.push(Status::PromotionRequested(mover).into());
            return Ok(MoveOutcome::PromotionPending { captured });
        }
        let status = self.judge_opponent();
        Ok(MoveOutcome::Applied { captured, status })
    }

    /// Fail if somebody has already been checkmated
    pub(crate) fn ensure_playing(&self) -> Result<()> {
        match self.winner {
            Some(winner) => Err(Error::Checkmate {
                winner,
                loser: winner.other(),
            }),
            None => Ok(()),
        }
    }

    /// Make the move without any checks, taking the piece on `capture` first
    pub(crate) fn apply_tentatively(
        &mut self,
        mover: PieceId,
        to: Coord,
        capture: Option<Coord>,
    ) -> Undo {
        let from = self.piece_of(mover).coord;
        let captured = capture.and_then(|square| {
            let victim = self.board.clear_occupant(square)?;
            self.pieces[victim.0].captured = true;
            Some((victim, square))
        });
        self.relocate(mover, to);
        Undo {
            mover,
            from,
            captured,
        }
    }

    /// Restore everything a tentative move changed
    pub(crate) fn take_back(&mut self, undo: Undo) {
        self.relocate(undo.mover, undo.from);
        if let Some((victim, square)) = undo.captured {
            self.pieces[victim.0].captured = false;
            self.board.set_occupant(square, victim);
        }
    }

    /// Try out the move and answer whether the mover's king would be safe afterward
    ///
    /// The game is always put back as it was.
    pub(crate) fn leaves_king_safe(
        &mut self,
        mover: PieceId,
        to: Coord,
        capture: Option<Coord>,
    ) -> bool {
        let color = self.piece_of(mover).color;
        let undo = self.apply_tentatively(mover, to, capture);
        let safe = self.attacker_of(color).is_none();
        self.take_back(undo);
        safe
    }
}
