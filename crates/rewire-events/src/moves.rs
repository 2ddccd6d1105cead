//! Moves and Histories
//!
//! The two-valued move domain of the iterated game and the per-player
//! history a strategy decides from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single move in the iterated game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "C")]
    Cooperate,
    #[serde(rename = "D")]
    Defect,
}

impl Move {
    /// The opposite move
    pub fn flip(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }

    pub fn is_cooperate(self) -> bool {
        matches!(self, Move::Cooperate)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Cooperate => f.write_str("C"),
            Move::Defect => f.write_str("D"),
        }
    }
}

/// Moves played by one side of a match, oldest first.
///
/// Cooperation and defection counts are maintained on push so strategies
/// can query them without rescanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    moves: Vec<Move>,
    cooperations: usize,
    defections: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        match mv {
            Move::Cooperate => self.cooperations += 1,
            Move::Defect => self.defections += 1,
        }
        self.moves.push(mv);
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    /// Move played `n` turns ago (`n = 1` is the most recent)
    pub fn back(&self, n: usize) -> Option<Move> {
        if n == 0 || n > self.moves.len() {
            return None;
        }
        self.moves.get(self.moves.len() - n).copied()
    }

    /// The last `n` moves (fewer if the history is shorter)
    pub fn recent(&self, n: usize) -> &[Move] {
        let start = self.moves.len().saturating_sub(n);
        &self.moves[start..]
    }

    pub fn cooperations(&self) -> usize {
        self.cooperations
    }

    pub fn defections(&self) -> usize {
        self.defections
    }
}
