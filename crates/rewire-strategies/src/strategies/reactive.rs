//! Reactive Strategies
//!
//! Strategies that respond to the opponent's most recent moves.

use rand::rngs::SmallRng;

use rewire_events::{History, Move};

use crate::Strategy;

/// Cooperates first, then copies the opponent's last move
#[derive(Debug, Clone, Copy, Default)]
pub struct TitForTat;

impl Strategy for TitForTat {
    fn name(&self) -> &'static str {
        "TitForTat"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        opponent.last().unwrap_or(Move::Cooperate)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects first, then copies the opponent's last move
#[derive(Debug, Clone, Copy, Default)]
pub struct SuspiciousTitForTat;

impl Strategy for SuspiciousTitForTat {
    fn name(&self) -> &'static str {
        "SuspiciousTitForTat"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        opponent.last().unwrap_or(Move::Defect)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Cooperates first, then plays the opposite of the opponent's last move
#[derive(Debug, Clone, Copy, Default)]
pub struct AntiTitForTat;

impl Strategy for AntiTitForTat {
    fn name(&self) -> &'static str {
        "AntiTitForTat"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        opponent.last().map_or(Move::Cooperate, Move::flip)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects first, then plays the opposite of the opponent's last move
#[derive(Debug, Clone, Copy, Default)]
pub struct Bully;

impl Strategy for Bully {
    fn name(&self) -> &'static str {
        "Bully"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        opponent.last().map_or(Move::Defect, Move::flip)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects if the opponent defected in any of its last three moves
#[derive(Debug, Clone, Copy, Default)]
pub struct HardTitForTat;

impl Strategy for HardTitForTat {
    fn name(&self) -> &'static str {
        "HardTitForTat"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if opponent.recent(3).contains(&Move::Defect) {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects only after two consecutive opponent defections
#[derive(Debug, Clone, Copy, Default)]
pub struct TitFor2Tats;

impl Strategy for TitFor2Tats {
    fn name(&self) -> &'static str {
        "TitFor2Tats"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if opponent.recent(2) == [Move::Defect, Move::Defect] {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Answers each defection with two defections
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoTitsForTat;

impl Strategy for TwoTitsForTat {
    fn name(&self) -> &'static str {
        "TwoTitsForTat"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if opponent.recent(2).contains(&Move::Defect) {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects for the first three turns, then plays tit for tat
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggravater;

impl Strategy for Aggravater {
    fn name(&self) -> &'static str {
        "Aggravater"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if own.len() < 3 {
            return Move::Defect;
        }
        opponent.last().unwrap_or(Move::Defect)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Pavlov: repeats its move after a good payoff (R or T), switches after a
/// bad one (S or P). Cooperates first.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinStayLoseShift;

impl Strategy for WinStayLoseShift {
    fn name(&self) -> &'static str {
        "WinStayLoseShift"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        match (own.last(), opponent.last()) {
            (Some(mine), Some(theirs)) if mine == theirs => Move::Cooperate,
            (Some(_), Some(_)) => Move::Defect,
            _ => Move::Cooperate,
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Mirror image of Pavlov: switches after a good payoff, keeps its move
/// after a bad one. Defects first.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinShiftLoseStay;

impl Strategy for WinShiftLoseStay {
    fn name(&self) -> &'static str {
        "WinShiftLoseStay"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        match (own.last(), opponent.last()) {
            (Some(mine), Some(theirs)) if mine == theirs => Move::Defect,
            (Some(_), Some(_)) => Move::Cooperate,
            _ => Move::Defect,
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Tit for tat that keeps defecting once its own last five moves were all
/// defections
#[derive(Debug, Clone, Copy, Default)]
pub struct Resurrection;

impl Strategy for Resurrection {
    fn name(&self) -> &'static str {
        "Resurrection"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        let recent = own.recent(5);
        if recent.len() == 5 && recent.iter().all(|&mv| mv == Move::Defect) {
            return Move::Defect;
        }
        opponent.last().unwrap_or(Move::Cooperate)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Cooperates twice, then defects until the opponent first retaliates.
/// After that it plays tit for tat, but cooperates instead of answering a
/// defection that followed its own defection two turns back.
#[derive(Debug, Clone, Copy, Default)]
pub struct SneakyTitForTat;

impl Strategy for SneakyTitForTat {
    fn name(&self) -> &'static str {
        "SneakyTitForTat"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if own.len() < 2 {
            return Move::Cooperate;
        }
        if opponent.defections() == 0 {
            return Move::Defect;
        }
        if opponent.last() == Some(Move::Defect) && own.back(2) == Some(Move::Defect) {
            return Move::Cooperate;
        }
        opponent.last().unwrap_or(Move::Cooperate)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Tit for tat driven by a running estimate of how cooperative the
/// opponent is. Each move pulls the estimate toward 1 (C) or 0 (D) at
/// `rate`; it cooperates while the estimate is at least one half.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveTitForTat {
    pub rate: f64,
    world: f64,
}

impl Default for AdaptiveTitForTat {
    fn default() -> Self {
        Self {
            rate: 0.5,
            world: 0.5,
        }
    }
}

impl Strategy for AdaptiveTitForTat {
    fn name(&self) -> &'static str {
        "AdaptiveTitForTat"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        match opponent.last() {
            None => return Move::Cooperate,
            Some(Move::Cooperate) => self.world += self.rate * (1.0 - self.world),
            Some(Move::Defect) => self.world -= self.rate * self.world,
        }
        if self.world >= 0.5 {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self {
            rate: self.rate,
            ..Self::default()
        })
    }
}

/// Defects `tits` times whenever the opponent's last `tats` moves were all
/// defections
#[derive(Debug, Clone, Copy)]
pub struct NTitsForMTats {
    pub tits: usize,
    pub tats: usize,
    retaliations_left: usize,
}

impl Default for NTitsForMTats {
    fn default() -> Self {
        Self {
            tits: 3,
            tats: 2,
            retaliations_left: 0,
        }
    }
}

impl Strategy for NTitsForMTats {
    fn name(&self) -> &'static str {
        "NTitsForMTats"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        let recent = opponent.recent(self.tats);
        if recent.len() == self.tats && recent.iter().all(|&mv| mv == Move::Defect) {
            self.retaliations_left = self.tits;
        }
        if self.retaliations_left > 0 {
            self.retaliations_left -= 1;
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self {
            tits: self.tits,
            tats: self.tats,
            retaliations_left: 0,
        })
    }
}

/// `(next state, move)` for each state, indexed by the opponent's last
/// move (cooperate, defect)
const PREDATOR_TRANSITIONS: [[(usize, Move); 2]; 9] = {
    use Move::{Cooperate as C, Defect as D};
    [
        [(0, D), (1, D)],
        [(2, D), (3, D)],
        [(4, C), (3, D)],
        [(5, D), (4, C)],
        [(2, C), (6, D)],
        [(7, D), (3, D)],
        [(7, C), (7, D)],
        [(8, D), (7, D)],
        [(8, D), (6, D)],
    ]
};

/// Nine-state machine that cooperates first and exploits opponents who
/// keep cooperating
#[derive(Debug, Clone, Copy, Default)]
pub struct Predator {
    state: usize,
}

impl Strategy for Predator {
    fn name(&self) -> &'static str {
        "Predator"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        let column = match opponent.last() {
            None => return Move::Cooperate,
            Some(Move::Cooperate) => 0,
            Some(Move::Defect) => 1,
        };
        let (next, mv) = PREDATOR_TRANSITIONS[self.state][column];
        self.state = next;
        mv
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self::default())
    }
}
