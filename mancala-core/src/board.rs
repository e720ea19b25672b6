//! Left/right render model derived from a game state

use serde::{Deserialize, Serialize};

use crate::state::{GameState, Side, SLOTS_PER_SIDE};

/// Final outcome of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    LeftWins,
    RightWins,
    Tie,
}

impl GameResult {
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::LeftWins => Some(Side::Left),
            GameResult::RightWins => Some(Side::Right),
            GameResult::Tie => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::LeftWins => write!(f, "LEFT player wins"),
            GameResult::RightWins => write!(f, "RIGHT player wins"),
            GameResult::Tie => write!(f, "TIE"),
        }
    }
}

/// Physical view of the board: two rows of pits and two stores
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub left_slots: [u8; SLOTS_PER_SIDE],
    pub right_slots: [u8; SLOTS_PER_SIDE],
    pub left_score: u8,
    pub right_score: u8,
}

impl Board {
    pub fn result(&self) -> GameResult {
        match self.left_score.cmp(&self.right_score) {
            std::cmp::Ordering::Greater => GameResult::LeftWins,
            std::cmp::Ordering::Less => GameResult::RightWins,
            std::cmp::Ordering::Equal => GameResult::Tie,
        }
    }
}

impl From<&GameState> for Board {
    fn from(state: &GameState) -> Self {
        Self {
            left_slots: *state.slots_of(Side::Left),
            right_slots: *state.slots_of(Side::Right),
            left_score: state.score_of(Side::Left),
            right_score: state.score_of(Side::Right),
        }
    }
}

impl GameState {
    pub fn board(&self) -> Board {
        Board::from(self)
    }
}

/// Text layout for the terminal.
///
/// The left row reads 1..6 from the left, the right row is printed reversed
/// so that facing pits line up vertically.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let l = &self.left_slots;
        let r = &self.right_slots;
        writeln!(f)?;
        writeln!(f, "| L |{:>2} |{:>2} |{:>2} |{:>2} |{:>2} |{:>2} |", 1, 2, 3, 4, 5, 6)?;
        writeln!(f, "=================================")?;
        writeln!(
            f,
            "|   |{:>2} |{:>2} |{:>2} |{:>2} |{:>2} |{:>2} |   |",
            l[0], l[1], l[2], l[3], l[4], l[5]
        )?;
        writeln!(f, "|{:>2} |-----------------------|{:>2} |", self.left_score, self.right_score)?;
        writeln!(
            f,
            "|   |{:>2} |{:>2} |{:>2} |{:>2} |{:>2} |{:>2} |   |",
            r[5], r[4], r[3], r[2], r[1], r[0]
        )?;
        writeln!(f, "=================================")?;
        writeln!(f, "    |{:>2} |{:>2} |{:>2} |{:>2} |{:>2} |{:>2} | R |", 6, 5, 4, 3, 2, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::perform_move;

    #[test]
    fn test_board_follows_physical_sides() {
        // After LEFT plays pit 3 the turn passes; the board still shows LEFT on the left
        let state = perform_move(&GameState::initial(), 3);
        assert_eq!(state.active_side(), Side::Right);

        let board = state.board();
        assert_eq!(board.left_slots, [5, 5, 0, 4, 4, 4]);
        assert_eq!(board.right_slots, [4, 4, 4, 4, 4, 5]);
        assert_eq!(board.left_score, 1);
        assert_eq!(board.right_score, 0);
    }

    #[test]
    fn test_result() {
        let mut board = GameState::initial().board();
        assert_eq!(board.result(), GameResult::Tie);
        board.left_score = 25;
        board.right_score = 23;
        assert_eq!(board.result(), GameResult::LeftWins);
        assert_eq!(board.result().winner(), Some(Side::Left));
        board.right_score = 26;
        assert_eq!(board.result(), GameResult::RightWins);
        assert_eq!(GameResult::Tie.winner(), None);
    }

    #[test]
    fn test_render_layout() {
        let state = GameState::new([1, 2, 3, 4, 5, 6], [7, 8, 9, 0, 0, 0], 2, 1, Side::Left);
        let text = state.board().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "| L | 1 | 2 | 3 | 4 | 5 | 6 |");
        assert_eq!(lines[3], "|   | 1 | 2 | 3 | 4 | 5 | 6 |   |");
        assert_eq!(lines[4], "| 2 |-----------------------| 1 |");
        assert_eq!(lines[5], "|   | 0 | 0 | 0 | 9 | 8 | 7 |   |");
        assert_eq!(lines[7], "    | 6 | 5 | 4 | 3 | 2 | 1 | R |");
    }
}
