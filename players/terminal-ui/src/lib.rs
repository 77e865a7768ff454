//! A player for a human typing in the terminal

use std::io::{self, BufRead, Cursor, Write};

use board::Color;
use players::{Command, Player};
use rules::{Game, GameEvent, Status};

mod input;
mod render;
mod selection;

pub use crate::input::{Input, InputError};
pub use crate::render::render;
pub use crate::selection::{Click, Selection};

/// Somewhere lines typed by the user come from
pub trait LineSource {
    /// Append the next line to `buf`, returning how many bytes were read, and 0 at the end
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

/// Stdin is locked just for the length of each read, so several players can share it
impl LineSource for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineSource for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<R: io::Read> LineSource for io::BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// An input for a human typing in the terminal
///
/// Two of these can share one terminal for a game on a single screen: each only speaks up about
/// what concerns its own color.
pub struct TerminalUIPlayer<R, W> {
    color: Color,
    input: R,
    output: W,
    selection: Selection,
    /// Set after a command is sent, so rejections get reported by whoever sent it
    waiting_on_reply: bool,
}

impl TerminalUIPlayer<io::Stdin, io::Stdout> {
    /// Create a player reading from stdin and drawing to stdout
    pub fn new(color: Color) -> Self {
        Self::with_io(color, io::stdin(), io::stdout())
    }
}

impl<R: LineSource, W: Write> TerminalUIPlayer<R, W> {
    pub fn with_io(color: Color, input: R, output: W) -> Self {
        Self {
            color,
            input,
            output,
            selection: Selection::new(),
            waiting_on_reply: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, message: impl std::fmt::Display) {
        if let Err(err) = writeln!(self.output, "{message}") {
            tracing::warn!(%err, "failed to write to the terminal");
        }
    }

    /// Read the next line, or `None` once the input is closed
    fn read_line(&mut self) -> Option<String> {
        let _ = self.output.flush();
        let mut buffer = String::new();
        match LineSource::read_line(&mut self.input, &mut buffer) {
            Ok(0) => None,
            Ok(_) => Some(buffer),
            Err(err) => {
                tracing::error!(%err, "error reading human input");
                None
            }
        }
    }

    fn send(&mut self, command: Command) -> Command {
        self.waiting_on_reply = true;
        command
    }

    /// Ask for a piece until one is named
    fn choose_promotion(&mut self) -> Command {
        loop {
            let _ = write!(
                self.output,
                "Choose what your pawn becomes (queen, rook, bishop, knight): "
            );
            let Some(line) = self.read_line() else {
                return Command::Quit;
            };
            match line.parse::<Input>() {
                Ok(Input::Piece(kind)) => return self.send(Command::Promote(kind)),
                Ok(Input::Quit) => return Command::Quit,
                Ok(_) => self.say("Name a piece to promote to."),
                Err(err) => self.say(err),
            }
        }
    }

    /// Feed a click to the selection, returning the move it completes, if any
    fn click(&mut self, game: &Game, square: board::Coord) -> Option<Command> {
        match self.selection.click(game, square) {
            Click::Refused(message) => {
                self.say(message);
                None
            }
            Click::Selected(_) | Click::Deselected => None,
            Click::Move { from, to } => Some(Command::Move { from, to }),
        }
    }
}

impl<R: LineSource, W: Write> Player for TerminalUIPlayer<R, W> {
    fn next_command(&mut self, game: &Game) -> Command {
        if game.player(self.color).pending_promotion().is_some() {
            return self.choose_promotion();
        }
        loop {
            let board = render(game, self.selection.selected());
            let _ = write!(self.output, "{board}{} to move: ", self.color);
            let Some(line) = self.read_line() else {
                return Command::Quit;
            };
            let command = match line.parse::<Input>() {
                Ok(Input::Click(square)) => self.click(game, square),
                Ok(Input::Move(from, to)) => {
                    self.selection.clear();
                    let _ = self.click(game, from);
                    // A refused first square leaves nothing for the second one to act on
                    if self.selection.selected() == Some(from) {
                        self.click(game, to)
                    } else {
                        None
                    }
                }
                Ok(Input::Piece(_)) => {
                    self.say("There is no pawn waiting to be promoted.");
                    None
                }
                Ok(Input::Quit) => return Command::Quit,
                Err(err) => {
                    self.say(err);
                    None
                }
            };
            if let Some(command) = command {
                return self.send(command);
            }
        }
    }

    fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Status(Status::InvalidMove(reason) | Status::PromotionRejected(reason))
                if self.waiting_on_reply =>
            {
                self.waiting_on_reply = false;
                self.say(format_args!("Invalid move! {reason}"));
            }
            GameEvent::Status(Status::Check(color)) if *color == self.color => self.say("Check!"),
            GameEvent::Status(Status::Checkmate(color)) if *color == self.color => {
                self.say(format_args!("Checkmate! {} wins.", color.other()));
            }
            GameEvent::TurnChanged(_) => self.waiting_on_reply = false,
            _ => {}
        }
    }
}
