//! Game and Match
//!
//! The prisoner's dilemma payoff matrix and the runner that plays two
//! strategies against each other for a fixed number of turns.

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use rewire_events::{History, MatchOutcome, Move};

use crate::Strategy;

/// Per-turn payoffs of the two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    /// Both cooperate
    pub reward: i64,
    /// Cooperate against a defector
    pub sucker: i64,
    /// Defect against a cooperator
    pub temptation: i64,
    /// Both defect
    pub punishment: i64,
}

impl Default for Game {
    fn default() -> Self {
        Self::prisoners_dilemma()
    }
}

impl Game {
    pub fn new(reward: i64, sucker: i64, temptation: i64, punishment: i64) -> Self {
        Self {
            reward,
            sucker,
            temptation,
            punishment,
        }
    }

    /// Standard matrix: R=3, S=0, T=5, P=1
    pub fn prisoners_dilemma() -> Self {
        Self::new(3, 0, 5, 1)
    }

    /// Payoffs for one turn, `(first player, second player)`
    pub fn score(&self, a: Move, b: Move) -> (i64, i64) {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => (self.reward, self.reward),
            (Move::Cooperate, Move::Defect) => (self.sucker, self.temptation),
            (Move::Defect, Move::Cooperate) => (self.temptation, self.sucker),
            (Move::Defect, Move::Defect) => (self.punishment, self.punishment),
        }
    }

    /// Whether the matrix satisfies T > R > P > S and 2R > T + S
    pub fn is_prisoners_dilemma(&self) -> bool {
        self.temptation > self.reward
            && self.reward > self.punishment
            && self.punishment > self.sucker
            && 2 * self.reward > self.temptation + self.sucker
    }
}

/// Plays two strategies against each other.
///
/// Each match runs on fresh instances of both strategies, so state never
/// leaks from one match into the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub turns: u32,
    pub game: Game,
}

impl Match {
    pub fn new(turns: u32, game: Game) -> Self {
        Self { turns, game }
    }

    /// Plays the match. Each turn the first strategy decides before the second.
    pub fn play(&self, a: &dyn Strategy, b: &dyn Strategy, rng: &mut SmallRng) -> MatchOutcome {
        let mut player_a = a.clone_fresh();
        let mut player_b = b.clone_fresh();
        let mut history_a = History::new();
        let mut history_b = History::new();
        let mut turns = Vec::with_capacity(self.turns as usize);
        let mut scores = (0i64, 0i64);

        for _ in 0..self.turns {
            let move_a = player_a.decide(&history_a, &history_b, rng);
            let move_b = player_b.decide(&history_b, &history_a, rng);
            history_a.push(move_a);
            history_b.push(move_b);

            let (score_a, score_b) = self.game.score(move_a, move_b);
            scores.0 += score_a;
            scores.1 += score_b;
            turns.push((move_a, move_b));
        }

        MatchOutcome { turns, scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::{Cooperator, Defector, Gradual, TitForTat};
    use rand::SeedableRng;

    #[test]
    fn test_default_game_is_prisoners_dilemma() {
        let game = Game::default();
        assert_eq!(game, Game::new(3, 0, 5, 1));
        assert!(game.is_prisoners_dilemma());
        assert!(!Game::new(1, 0, 0, 0).is_prisoners_dilemma());
    }

    #[test]
    fn test_score_is_symmetric() {
        let game = Game::default();
        assert_eq!(game.score(Move::Cooperate, Move::Defect), (0, 5));
        assert_eq!(game.score(Move::Defect, Move::Cooperate), (5, 0));
        assert_eq!(game.score(Move::Defect, Move::Defect), (1, 1));
    }

    #[test]
    fn test_cooperator_vs_defector() {
        let mut rng = SmallRng::seed_from_u64(1);
        let outcome = Match::new(10, Game::default()).play(&Cooperator, &Defector, &mut rng);

        assert_eq!(outcome.turn_count(), 10);
        assert!(outcome
            .turns
            .iter()
            .all(|&(a, b)| a == Move::Cooperate && b == Move::Defect));
        assert_eq!(outcome.scores, (0, 50));
    }

    #[test]
    fn test_tit_for_tat_vs_defector() {
        let mut rng = SmallRng::seed_from_u64(1);
        let outcome = Match::new(5, Game::default()).play(&TitForTat, &Defector, &mut rng);

        assert_eq!(outcome.turns[0], (Move::Cooperate, Move::Defect));
        assert!(outcome.turns[1..]
            .iter()
            .all(|&(a, b)| a == Move::Defect && b == Move::Defect));
        // 0 + 4 * 1 vs 5 + 4 * 1
        assert_eq!(outcome.scores, (4, 9));
    }

    #[test]
    fn test_match_uses_fresh_instances() {
        let mut rng = SmallRng::seed_from_u64(1);
        let gradual = Gradual::default();
        let game = Match::new(3, Game::default());

        let first = game.play(&gradual, &Defector, &mut rng);
        assert_eq!(first.turns[0].0, Move::Cooperate);
        assert_eq!(first.turns[1].0, Move::Defect);

        // A punishment started in the first match must not carry into the second
        let second = game.play(&gradual, &Cooperator, &mut rng);
        assert!(second.turns.iter().all(|&(a, _)| a == Move::Cooperate));
    }

    #[test]
    fn test_zero_turns() {
        let mut rng = SmallRng::seed_from_u64(1);
        let outcome = Match::new(0, Game::default()).play(&Cooperator, &Cooperator, &mut rng);
        assert!(outcome.turns.is_empty());
        assert_eq!(outcome.scores, (0, 0));
    }
}
