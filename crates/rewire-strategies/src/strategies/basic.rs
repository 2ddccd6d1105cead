//! Basic Strategies
//!
//! Strategies that ignore the opponent entirely or look only at the current
//! turn number and their own last move.

use rand::rngs::SmallRng;
use rand::Rng;

use rewire_events::{History, Move};

use crate::Strategy;

/// Always cooperates
#[derive(Debug, Clone, Copy, Default)]
pub struct Cooperator;

impl Strategy for Cooperator {
    fn name(&self) -> &'static str {
        "Cooperator"
    }

    fn decide(&mut self, _own: &History, _opponent: &History, _rng: &mut SmallRng) -> Move {
        Move::Cooperate
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Always defects
#[derive(Debug, Clone, Copy, Default)]
pub struct Defector;

impl Strategy for Defector {
    fn name(&self) -> &'static str {
        "Defector"
    }

    fn decide(&mut self, _own: &History, _opponent: &History, _rng: &mut SmallRng) -> Move {
        Move::Defect
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Cooperates with a fixed probability each turn
#[derive(Debug, Clone, Copy)]
pub struct Random {
    pub cooperation_probability: f64,
}

impl Default for Random {
    fn default() -> Self {
        Self {
            cooperation_probability: 0.5,
        }
    }
}

impl Strategy for Random {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn decide(&mut self, _own: &History, _opponent: &History, rng: &mut SmallRng) -> Move {
        if rng.gen::<f64>() < self.cooperation_probability {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Cooperates first, then alternates its own previous move
#[derive(Debug, Clone, Copy, Default)]
pub struct Alternator;

impl Strategy for Alternator {
    fn name(&self) -> &'static str {
        "Alternator"
    }

    fn decide(&mut self, own: &History, _opponent: &History, _rng: &mut SmallRng) -> Move {
        own.last().map_or(Move::Cooperate, Move::flip)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Cooperates except right after being exploited (own C against their D)
#[derive(Debug, Clone, Copy, Default)]
pub struct UsuallyCooperates;

impl Strategy for UsuallyCooperates {
    fn name(&self) -> &'static str {
        "UsuallyCooperates"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        match (own.last(), opponent.last()) {
            (Some(Move::Cooperate), Some(Move::Defect)) => Move::Defect,
            _ => Move::Cooperate,
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects except right after exploiting (own D against their C)
#[derive(Debug, Clone, Copy, Default)]
pub struct UsuallyDefects;

impl Strategy for UsuallyDefects {
    fn name(&self) -> &'static str {
        "UsuallyDefects"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        match (own.last(), opponent.last()) {
            (Some(Move::Defect), Some(Move::Cooperate)) => Move::Cooperate,
            _ => Move::Defect,
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects with probability `turn / 1000`, so it sours as the match goes on
#[derive(Debug, Clone, Copy, Default)]
pub struct WorseAndWorse;

impl Strategy for WorseAndWorse {
    fn name(&self) -> &'static str {
        "WorseAndWorse"
    }

    fn decide(&mut self, own: &History, _opponent: &History, rng: &mut SmallRng) -> Move {
        let turn = (own.len() + 1) as f64;
        let cooperation_probability = (1.0 - turn / 1000.0).clamp(0.0, 1.0);
        if rng.gen::<f64>() < cooperation_probability {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Plays C, D, D, then runs of one, two, three... cooperations each
/// closed by a single defection, so its moves never settle into a cycle
#[derive(Debug, Clone, Copy)]
pub struct AntiCycler {
    opening: usize,
    run_length: usize,
    run_played: usize,
}

const ANTI_CYCLER_OPENING: [Move; 3] = [Move::Cooperate, Move::Defect, Move::Defect];

impl Default for AntiCycler {
    fn default() -> Self {
        Self {
            opening: 0,
            run_length: 1,
            run_played: 0,
        }
    }
}

impl Strategy for AntiCycler {
    fn name(&self) -> &'static str {
        "AntiCycler"
    }

    fn decide(&mut self, _own: &History, _opponent: &History, _rng: &mut SmallRng) -> Move {
        if let Some(&mv) = ANTI_CYCLER_OPENING.get(self.opening) {
            self.opening += 1;
            return mv;
        }
        if self.run_played < self.run_length {
            self.run_played += 1;
            return Move::Cooperate;
        }
        self.run_length += 1;
        self.run_played = 0;
        Move::Defect
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self::default())
    }
}
