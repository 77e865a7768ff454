use board::Color;
use players::{Command, Player};
use rules::{Game, GameConfig};

/// How a game came to an end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    /// The player of this color walked away
    Quit(Color),
}

/// A backend which queries moves from the two players until the game is done
pub struct Backend<White, Black> {
    /// The current state of the game
    game: Game,
    /// The white player
    white_player: White,
    /// The black player
    black_player: Black,
}

impl<White: Player, Black: Player> Backend<White, Black> {
    /// Create a new instance with the chess starting board
    pub fn new(config: GameConfig, white_player: White, black_player: Black) -> Self {
        Self {
            game: Game::with_config(config),
            white_player,
            black_player,
        }
    }

    /// Query whoever's turn it is for a command and carry it out
    ///
    /// Everything the command caused is passed on to both players. Returns the outcome once the
    /// game is over.
    pub fn play_half_move(&mut self) -> Option<GameOutcome> {
        let active = self.game.active_color();
        let command = match active {
            Color::White => self.white_player.next_command(&self.game),
            Color::Black => self.black_player.next_command(&self.game),
        };
        tracing::trace!(?command, color = %active, "player command");
        // Rejections are queued as events, so the results only matter for the log
        match command {
            Command::Move { from, to } => {
                let _ = self.game.propose_move(from, to);
            }
            Command::Promote(kind) => {
                let _ = self.game.promote(kind);
            }
            Command::Quit => {
                tracing::info!(color = %active, "player quit");
                return Some(GameOutcome::Quit(active));
            }
        }
        for event in self.game.drain_events() {
            self.white_player.observe(&event);
            self.black_player.observe(&event);
        }
        self.outcome()
    }

    /// Play the game until it ends
    pub fn play_game(&mut self) -> GameOutcome {
        loop {
            if let Some(outcome) = self.play_half_move() {
                return outcome;
            }
        }
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.game
            .winner()
            .map(|winner| GameOutcome::Checkmate { winner })
    }

    /// Get the state of the game right now
    pub fn game_state(&self) -> &Game {
        &self.game
    }

    pub fn white_player(&self) -> &White {
        &self.white_player
    }

    pub fn black_player(&self) -> &Black {
        &self.black_player
    }
}
