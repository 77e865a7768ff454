use std::fmt::Write;

use board::{Coord, Shade};
use rules::Game;

/// Draw the board as text, `y == 1` on top
///
/// Pieces are drawn by letter, uppercase for white. Empty dark squares get a dot and the
/// selected square is bracketed.
pub fn render(game: &Game, selected: Option<Coord>) -> String {
    let mut out = String::from("   ");
    for x in 1..=8 {
        let _ = write!(out, " {x} ");
    }
    out.push('\n');
    for square in game.board().squares() {
        if square.x() == 1 {
            let _ = write!(out, " {} ", square.y());
        }
        let glyph = match game.occupant(square.coord) {
            Some(occupant) => occupant.letter(),
            None if square.shade() == Shade::Dark => '.',
            None => ' ',
        };
        if selected == Some(square.coord) {
            let _ = write!(out, "[{glyph}]");
        } else {
            let _ = write!(out, " {glyph} ");
        }
        if square.x() == 8 {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_board() {
        let drawn = render(&Game::new(), None);
        let lines: Vec<_> = drawn.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "    1  2  3  4  5  6  7  8 ");
        assert_eq!(lines[1], " 1  r  n  b  q  k  b  n  r ");
        assert_eq!(lines[2], " 2  p  p  p  p  p  p  p  p ");
        assert_eq!(lines[3], " 3     .     .     .     . ");
        assert_eq!(lines[4], " 4  .     .     .     .    ");
        assert_eq!(lines[8], " 8  R  N  B  Q  K  B  N  R ");
    }

    #[test]
    fn test_selected_square_is_bracketed() {
        let selected = Coord::new(5, 7).unwrap();
        let drawn = render(&Game::new(), Some(selected));
        assert_eq!(drawn.lines().nth(7), Some(" 7  P  P  P  P [P] P  P  P "));
    }
}
