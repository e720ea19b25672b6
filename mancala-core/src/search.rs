//! Exhaustive fork-join negamax search
//!
//! Every legal continuation is expanded down to the configured depth; there
//! is no pruning, no transposition table and no heuristic beyond the score
//! differential at the horizon. An extra turn does not use up a depth level.
//!
//! Fitness values are always reported from the point of view of the side
//! that made the move being scored.

use std::time::Instant;

use crate::error::MancalaError;
use crate::rules::{legal_moves, perform_move};
use crate::state::{GameState, Slot};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search settings for a computer player
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Half-moves of lookahead after the candidate move
    pub depth: u32,
    /// Worker threads (None = rayon's global pool, one worker per core)
    pub threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            threads: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

// ============================================================================
// SEARCH ENGINE
// ============================================================================

/// Computer move selection at a fixed depth
pub struct SearchEngine {
    depth: u32,
    pool: Option<rayon::ThreadPool>,
}

impl SearchEngine {
    pub fn new(config: &SearchConfig) -> Result<Self, MancalaError> {
        let pool = match config.threads {
            None => None,
            Some(0) => {
                return Err(MancalaError::ThreadPool(
                    "thread count must be at least 1".into(),
                ))
            }
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("mancala-search-{}", i))
                    .build()
                    .map_err(|e| MancalaError::ThreadPool(e.to_string()))?,
            ),
        };
        Ok(Self {
            depth: config.depth,
            pool,
        })
    }

    /// Engine on rayon's global pool
    pub fn with_depth(depth: u32) -> Self {
        Self { depth, pool: None }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Best move for the side to move, or None if the game is over
    pub fn choose_move(&self, state: &GameState) -> Option<Slot> {
        let start = Instant::now();
        let scored = self.evaluate_moves(state);
        let best = select_best(scored.iter().copied());

        if let Some((slot, fitness)) = best {
            tracing::info!(
                side = %state.active_side(),
                slot,
                fitness,
                depth = self.depth,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "search complete"
            );
        }
        best.map(|(slot, _)| slot)
    }

    /// Fitness of every legal move, in ascending slot order
    pub fn evaluate_moves(&self, state: &GameState) -> Vec<(Slot, i32)> {
        let depth = self.depth;
        let scored = self.run(|| evaluate_moves(state, depth));
        for (slot, fitness) in &scored {
            tracing::debug!(slot, fitness, "root move");
        }
        scored
    }

    fn run<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

// ============================================================================
// NEGAMAX
// ============================================================================

/// Best move at `depth` on the current rayon pool
pub fn choose_move(state: &GameState, depth: u32) -> Option<Slot> {
    best_move(state, depth).map(|(slot, _)| slot)
}

/// Fitness of every legal move at `depth`, in ascending slot order
pub fn evaluate_moves(state: &GameState, depth: u32) -> Vec<(Slot, i32)> {
    let moves = legal_moves(state);
    let fitness = evaluate_children(state, &moves, depth);
    moves.into_iter().zip(fitness).collect()
}

/// Value of `state` for its mover: the best fitness among its legal moves
pub fn position_value(state: &GameState, depth: u32) -> Option<i32> {
    best_move(state, depth).map(|(_, fitness)| fitness)
}

/// Fitness of playing `slot` from `state`, seen by the mover in `state`.
///
/// `slot` must be a legal move.
pub fn move_fitness(state: &GameState, slot: Slot, depth: u32) -> i32 {
    let next = perform_move(state, slot);

    // Finalized states are never turned around, so this is already the mover's view
    if next.is_complete() {
        return next.fitness();
    }

    let extra_turn = next.active_side() == state.active_side();

    // Depth 0 is a leaf even when the mover keeps the turn
    let value = match depth {
        0 => next.fitness(),
        _ => {
            let child_depth = if extra_turn { depth } else { depth - 1 };
            position_value(&next, child_depth).unwrap_or_else(|| next.fitness())
        }
    };

    if extra_turn {
        value
    } else {
        -value
    }
}

fn best_move(state: &GameState, depth: u32) -> Option<(Slot, i32)> {
    select_best(evaluate_moves(state, depth))
}

/// Scores `moves` concurrently. All but the last child are spawned onto the
/// pool; the last runs on the current thread. Returns once every child is done.
fn evaluate_children(state: &GameState, moves: &[Slot], depth: u32) -> Vec<i32> {
    let (&last_move, forked_moves) = match moves.split_last() {
        Some(split) => split,
        None => return Vec::new(),
    };

    let state = *state;
    let mut fitness = vec![0; forked_moves.len()];
    let last = rayon::scope(|scope| {
        for (cell, &slot) in fitness.iter_mut().zip(forked_moves) {
            scope.spawn(move |_| *cell = move_fitness(&state, slot, depth));
        }
        move_fitness(&state, last_move, depth)
    });
    fitness.push(last);
    fitness
}

/// Strictly greatest fitness; ties go to the earliest candidate
fn select_best(scored: impl IntoIterator<Item = (Slot, i32)>) -> Option<(Slot, i32)> {
    let mut best: Option<(Slot, i32)> = None;
    for (slot, fitness) in scored {
        if best.map_or(true, |(_, top)| fitness > top) {
            best = Some((slot, fitness));
        }
    }
    best
}

// ============================================================================
// TESTS
// ============================================================================
