//! Sowing, capture, extra-turn and end-of-game rules
//!
//! The mover's half of the board is a ring of 13 positions: index 0 is the
//! mover's store, `1..=6` are the mover's pits and `7..=12` are the
//! opponent's pits `1..=6`. The opponent's store is not on the ring, so it is
//! never sown into. Stones travel towards lower indices, wrapping from the
//! store to the opponent's pit 6.

use serde::{Deserialize, Serialize};

use crate::state::{GameState, Slot, SLOTS_PER_SIDE};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Positions a stone can be sown into: own store + both rows
const RING_SIZE: usize = SLOTS_PER_SIDE * 2 + 1;

/// Every slot number a player could name, in the order moves are generated
pub const POSSIBLE_MOVES: [Slot; SLOTS_PER_SIDE] = [1, 2, 3, 4, 5, 6];

// ============================================================================
// MOVE OUTCOME
// ============================================================================

/// Where the last sown stone landed, seen from the mover
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingPosition {
    Store,
    Own(Slot),
    Opponent(Slot),
}

impl RingPosition {
    fn from_index(index: usize) -> Self {
        match index {
            0 => RingPosition::Store,
            i if i <= SLOTS_PER_SIDE => RingPosition::Own(i),
            i => RingPosition::Opponent(i - SLOTS_PER_SIDE),
        }
    }
}

/// Full account of a single move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Successor state (from the perspective of whoever moves next)
    pub state: GameState,
    /// Landing position of the last stone
    pub last: RingPosition,
    /// Stones taken from the opposite pit by a capture
    pub captured: u8,
    /// Mover keeps the turn
    pub extra_turn: bool,
    /// Move ended the game and the board was swept
    pub finished: bool,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// True if `slot` names one of the mover's pits holding at least one stone
pub fn is_valid_move(state: &GameState, slot: Slot) -> bool {
    matches!(state.stones_in(slot), Some(n) if n > 0)
}

/// Playable slots in ascending order
pub fn legal_moves(state: &GameState) -> Vec<Slot> {
    POSSIBLE_MOVES
        .iter()
        .copied()
        .filter(|&slot| is_valid_move(state, slot))
        .collect()
}

/// Play `slot` and return the successor state.
///
/// `slot` must satisfy [`is_valid_move`]; use [`GameState::apply_move`] for a
/// checked variant.
pub fn perform_move(state: &GameState, slot: Slot) -> GameState {
    perform_move_detailed(state, slot).state
}

/// Play `slot` and report what happened along the way.
pub fn perform_move_detailed(state: &GameState, slot: Slot) -> MoveOutcome {
    debug_assert!(is_valid_move(state, slot), "slot {} is not playable", slot);

    let mut sowing = Sowing::from_state(state);
    let final_index = sowing.distribute(slot);

    let mut captured = 0;
    if sowing.capture_condition_met(final_index) {
        captured = sowing.capture_opposite(final_index);
        tracing::trace!(slot, captured, "capture");
    }

    let finished = sowing.game_is_complete();
    let extra_turn = !finished && final_index == 0;
    if finished {
        sowing.finalize();
    }

    let next = sowing.into_state(state);
    let next = if finished || extra_turn {
        next
    } else {
        next.swapped()
    };

    MoveOutcome {
        state: next,
        last: RingPosition::from_index(final_index),
        captured,
        extra_turn,
        finished,
    }
}

// ============================================================================
// SOWING WORKSPACE
// ============================================================================

/// Scratch copy of the rows and scores used while a single move is resolved.
/// Never escapes [`perform_move_detailed`]; the input state is left untouched.
struct Sowing {
    own: [u8; SLOTS_PER_SIDE],
    opponent: [u8; SLOTS_PER_SIDE],
    own_score: u8,
    opponent_score: u8,
}

impl Sowing {
    fn from_state(state: &GameState) -> Self {
        Self {
            own: *state.own_slots(),
            opponent: *state.opponent_slots(),
            own_score: state.own_score(),
            opponent_score: state.opponent_score(),
        }
    }

    /// Returns the ring index of the last stone
    fn distribute(&mut self, slot: Slot) -> usize {
        let stones = std::mem::take(&mut self.own[slot - 1]) as usize;

        let mut target = slot;
        for i in 1..=stones {
            // slot - i (mod RING_SIZE), kept non-negative
            target = (slot + RING_SIZE * stones - i) % RING_SIZE;
            match target {
                0 => self.own_score += 1,
                t if t <= SLOTS_PER_SIDE => self.own[t - 1] += 1,
                t => self.opponent[t - SLOTS_PER_SIDE - 1] += 1,
            }
        }
        target
    }

    /// Last stone landed in one of the mover's pits that was empty before
    fn capture_condition_met(&self, index: usize) -> bool {
        is_own_slot(index) && self.own[index - 1] == 1
    }

    fn capture_opposite(&mut self, slot: Slot) -> u8 {
        let opposite = opposite_slot(slot);
        let taken = std::mem::take(&mut self.opponent[opposite - 1]);
        self.own_score += taken;
        taken
    }

    fn game_is_complete(&self) -> bool {
        self.own.iter().all(|&s| s == 0) || self.opponent.iter().all(|&s| s == 0)
    }

    /// Each side banks whatever is left on its own row
    fn finalize(&mut self) {
        self.own_score += self.own.iter().sum::<u8>();
        self.opponent_score += self.opponent.iter().sum::<u8>();
        self.own = [0; SLOTS_PER_SIDE];
        self.opponent = [0; SLOTS_PER_SIDE];
    }

    fn into_state(self, parent: &GameState) -> GameState {
        GameState::new(
            self.own,
            self.opponent,
            self.own_score,
            self.opponent_score,
            parent.active_side(),
        )
    }
}

fn is_own_slot(index: usize) -> bool {
    (1..=SLOTS_PER_SIDE).contains(&index)
}

/// Opponent pit facing the mover's pit `slot`
fn opposite_slot(slot: Slot) -> Slot {
    SLOTS_PER_SIDE + 1 - slot
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Side, TOTAL_STONES};
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_validity_gating() {
        let state = GameState::new([0, 3, 0, 1, 0, 0], [4; 6], 10, 10, Side::Left);
        assert!(!is_valid_move(&state, 0));
        assert!(!is_valid_move(&state, 1));
        assert!(is_valid_move(&state, 2));
        assert!(!is_valid_move(&state, 3));
        assert!(is_valid_move(&state, 4));
        assert!(!is_valid_move(&state, 7));
        assert_eq!(legal_moves(&state), vec![2, 4]);
    }

    #[test]
    fn test_opening_extra_turn() {
        // Four stones from pit 4 land in pits 3, 2, 1 and the store
        let outcome = perform_move_detailed(&GameState::initial(), 4);
        assert!(outcome.extra_turn);
        assert!(!outcome.finished);
        assert_eq!(outcome.last, RingPosition::Store);
        assert_eq!(outcome.captured, 0);

        let state = outcome.state;
        assert_eq!(state.active_side(), Side::Left);
        assert_eq!(state.own_slots(), &[5, 5, 5, 0, 4, 4]);
        assert_eq!(state.opponent_slots(), &[4; 6]);
        assert_eq!(state.own_score(), 1);
        assert_eq!(state.opponent_score(), 0);
    }

    #[test]
    fn test_opening_turn_passes() {
        // Pit 3: pits 2, 1, the store, then the opponent's pit 6
        let outcome = perform_move_detailed(&GameState::initial(), 3);
        assert!(!outcome.extra_turn);
        assert_eq!(outcome.last, RingPosition::Opponent(6));

        let state = outcome.state;
        assert_eq!(state.active_side(), Side::Right);
        assert_eq!(state.own_slots(), &[4, 4, 4, 4, 4, 5]);
        assert_eq!(state.opponent_slots(), &[5, 5, 0, 4, 4, 4]);
        assert_eq!(state.own_score(), 0);
        assert_eq!(state.opponent_score(), 1);
    }

    #[test]
    fn test_input_state_untouched() {
        let state = GameState::initial();
        let _ = perform_move(&state, 1);
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn test_capture_after_lap() {
        // Twelve stones from pit 1 travel all the way round to the empty pit 2
        let state = GameState::new([12, 0, 0, 0, 0, 0], [2; 6], 10, 14, Side::Left);
        let outcome = perform_move_detailed(&state, 1);

        assert_eq!(outcome.last, RingPosition::Own(2));
        assert_eq!(outcome.captured, 3);
        assert!(!outcome.finished);

        let next = outcome.state;
        assert_eq!(next.active_side(), Side::Right);
        assert_eq!(next.own_slots(), &[3, 3, 3, 3, 0, 3]);
        assert_eq!(next.opponent_slots(), &[0, 1, 1, 1, 1, 1]);
        assert_eq!(next.own_score(), 14);
        assert_eq!(next.opponent_score(), 14);
        assert_eq!(next.total_stones(), TOTAL_STONES);
    }

    #[test]
    fn test_capture_single_stone() {
        let state = GameState::new([2, 0, 1, 4, 4, 4], [4, 4, 4, 4, 6, 4], 4, 3, Side::Left);
        let outcome = perform_move_detailed(&state, 3);

        assert_eq!(outcome.captured, 6);
        let next = outcome.state;
        assert_eq!(next.slots_of(Side::Left), &[2, 1, 0, 4, 4, 4]);
        assert_eq!(next.slots_of(Side::Right), &[4, 4, 4, 4, 0, 4]);
        assert_eq!(next.score_of(Side::Left), 10);
        assert_eq!(next.score_of(Side::Right), 3);
        assert_eq!(next.active_side(), Side::Right);
    }

    #[test]
    fn test_no_capture_on_occupied_pit() {
        let state = GameState::new([2, 1, 1, 4, 4, 4], [4, 4, 4, 4, 5, 4], 4, 3, Side::Left);
        let outcome = perform_move_detailed(&state, 3);
        assert_eq!(outcome.captured, 0);
        assert_eq!(outcome.state.slots_of(Side::Left), &[2, 2, 0, 4, 4, 4]);
        assert_eq!(outcome.state.slots_of(Side::Right), &[4, 4, 4, 4, 5, 4]);
    }

    #[test]
    fn test_terminal_finalize_sweeps_opponent() {
        let state = GameState::new([1, 0, 0, 0, 0, 0], [0, 3, 0, 5, 0, 2], 20, 17, Side::Left);
        let outcome = perform_move_detailed(&state, 1);

        assert!(outcome.finished);
        assert!(!outcome.extra_turn);
        let next = outcome.state;
        assert!(next.is_complete());
        assert_eq!(next.active_side(), Side::Left);
        assert_eq!(next.own_slots(), &[0; 6]);
        assert_eq!(next.opponent_slots(), &[0; 6]);
        assert_eq!(next.own_score(), 21);
        assert_eq!(next.opponent_score(), 27);
    }

    #[test]
    fn test_terminal_keeps_mover_perspective() {
        // Last stone lands on the opponent's row, but the game is over so the
        // turn does not pass.
        let state = GameState::new([2, 0, 0, 0, 0, 0], [1, 1, 1, 1, 1, 1], 20, 20, Side::Right);
        let next = perform_move(&state, 1);

        assert!(next.is_complete());
        assert_eq!(next.active_side(), Side::Right);
        assert_eq!(next.own_score(), 21);
        assert_eq!(next.opponent_score(), 27);
    }

    #[test]
    fn test_capture_can_end_game() {
        let state = GameState::new([0, 0, 1, 0, 0, 0], [0, 0, 0, 0, 4, 0], 23, 20, Side::Left);
        let outcome = perform_move_detailed(&state, 3);

        assert_eq!(outcome.captured, 4);
        assert!(outcome.finished);
        let next = outcome.state;
        assert_eq!(next.own_slots(), &[0; 6]);
        assert_eq!(next.opponent_slots(), &[0; 6]);
        assert_eq!(next.own_score(), 28);
        assert_eq!(next.opponent_score(), 20);
    }

    #[test]
    fn test_store_landing_skips_opponent_store() {
        // 13 stones from pit 6 go once round the ring and land back in pit 6
        let state = GameState::new([0, 0, 0, 0, 0, 13], [1; 6], 15, 14, Side::Left);
        let outcome = perform_move_detailed(&state, 6);

        assert_eq!(outcome.last, RingPosition::Own(6));
        // Pit 6 was emptied and refilled with exactly one stone: capture pit 1
        assert_eq!(outcome.captured, 2);
        let next = outcome.state;
        assert_eq!(next.slots_of(Side::Left), &[1, 1, 1, 1, 1, 1]);
        assert_eq!(next.slots_of(Side::Right), &[0, 2, 2, 2, 2, 2]);
        assert_eq!(next.score_of(Side::Left), 18);
        assert_eq!(next.score_of(Side::Right), 14);
    }

    #[test]
    fn test_random_playouts_conserve_stones() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let mut state = GameState::initial();
            let mut plies = 0;
            while !state.is_complete() {
                let moves = legal_moves(&state);
                assert!(!moves.is_empty(), "non-terminal state without moves");
                let slot = *moves.choose(&mut rng).unwrap();
                let next = perform_move(&state, slot);
                assert_eq!(next.total_stones(), TOTAL_STONES);
                state = next;
                plies += 1;
                assert!(plies < 1_000, "game did not terminate");
            }
            assert_eq!(state.own_slots(), &[0; 6]);
            assert_eq!(state.opponent_slots(), &[0; 6]);
            assert_eq!(state.own_score() as u32 + state.opponent_score() as u32, TOTAL_STONES);
        }
    }
}
