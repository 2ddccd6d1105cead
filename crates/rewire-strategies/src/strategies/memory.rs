//! Memory Strategies
//!
//! Strategies that consult the whole match history or keep state across
//! turns of a match.

use rand::rngs::SmallRng;
use rand::Rng;

use rewire_events::{History, Move};

use crate::{Game, Strategy};

/// Cooperates until the opponent defects once, then defects forever
#[derive(Debug, Clone, Copy, Default)]
pub struct Grudger;

impl Strategy for Grudger {
    fn name(&self) -> &'static str {
        "Grudger"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if opponent.defections() > 0 {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects until the opponent defects once, then cooperates forever
#[derive(Debug, Clone, Copy, Default)]
pub struct EasyGo;

impl Strategy for EasyGo {
    fn name(&self) -> &'static str {
        "EasyGo"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if opponent.defections() > 0 {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// More than a tenth of the opponent's moves being defections
fn defects_over_a_tenth(opponent: &History) -> bool {
    opponent.defections() * 10 > opponent.len()
}

/// Defects while the opponent has defected in more than 10% of turns
#[derive(Debug, Clone, Copy, Default)]
pub struct Forgiver;

impl Strategy for Forgiver {
    fn name(&self) -> &'static str {
        "Forgiver"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if defects_over_a_tenth(opponent) {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Tit for tat that only retaliates against opponents who defect in more
/// than 10% of turns
#[derive(Debug, Clone, Copy, Default)]
pub struct ForgivingTitForTat;

impl Strategy for ForgivingTitForTat {
    fn name(&self) -> &'static str {
        "ForgivingTitForTat"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if defects_over_a_tenth(opponent) && opponent.last() == Some(Move::Defect) {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Cooperates while the opponent has cooperated at least as often as it
/// defected
#[derive(Debug, Clone, Copy, Default)]
pub struct GoByMajority;

impl Strategy for GoByMajority {
    fn name(&self) -> &'static str {
        "GoByMajority"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if opponent.cooperations() >= opponent.defections() {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Defects while the opponent has defected at least as often as it
/// cooperated, including on the first move
#[derive(Debug, Clone, Copy, Default)]
pub struct HardGoByMajority;

impl Strategy for HardGoByMajority {
    fn name(&self) -> &'static str {
        "HardGoByMajority"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if opponent.defections() >= opponent.cooperations() {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

fn copy_average(opponent: &History, rng: &mut SmallRng) -> Move {
    let cooperation_rate = opponent.cooperations() as f64 / opponent.len() as f64;
    if rng.gen::<f64>() < cooperation_rate {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Opens at random, then cooperates with the opponent's cooperation rate
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageCopier;

impl Strategy for AverageCopier {
    fn name(&self) -> &'static str {
        "AverageCopier"
    }

    fn decide(&mut self, _own: &History, opponent: &History, rng: &mut SmallRng) -> Move {
        if opponent.is_empty() {
            return if rng.gen::<f64>() < 0.5 {
                Move::Cooperate
            } else {
                Move::Defect
            };
        }
        copy_average(opponent, rng)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Opens with cooperation, then cooperates with the opponent's cooperation rate
#[derive(Debug, Clone, Copy, Default)]
pub struct NiceAverageCopier;

impl Strategy for NiceAverageCopier {
    fn name(&self) -> &'static str {
        "NiceAverageCopier"
    }

    fn decide(&mut self, _own: &History, opponent: &History, rng: &mut SmallRng) -> Move {
        if opponent.is_empty() {
            return Move::Cooperate;
        }
        copy_average(opponent, rng)
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Opens C, D, C, C. If the opponent never defected during the opening it
/// exploits them forever, otherwise it plays tit for tat.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detective;

const DETECTIVE_OPENING: [Move; 4] = [
    Move::Cooperate,
    Move::Defect,
    Move::Cooperate,
    Move::Cooperate,
];

impl Strategy for Detective {
    fn name(&self) -> &'static str {
        "Detective"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if let Some(&mv) = DETECTIVE_OPENING.get(own.len()) {
            return mv;
        }
        if opponent.defections() == 0 {
            Move::Defect
        } else {
            opponent.last().unwrap_or(Move::Cooperate)
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Opens D, C, C. If the opponent did not retaliate on turns two and three
/// it defects forever, otherwise it plays tit for tat.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prober;

const PROBER_OPENING: [Move; 3] = [Move::Defect, Move::Cooperate, Move::Cooperate];

impl Strategy for Prober {
    fn name(&self) -> &'static str {
        "Prober"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if let Some(&mv) = PROBER_OPENING.get(own.len()) {
            return mv;
        }
        let pushover = opponent.moves().get(1..3) == Some(&[Move::Cooperate, Move::Cooperate][..]);
        if pushover {
            Move::Defect
        } else {
            opponent.last().unwrap_or(Move::Cooperate)
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Answers a defection with as many defections as the opponent has made
/// so far, then offers two cooperations to calm things down.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gradual {
    punishments_left: usize,
    calm_left: usize,
}

impl Strategy for Gradual {
    fn name(&self) -> &'static str {
        "Gradual"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if self.punishments_left > 0 {
            self.punishments_left -= 1;
            return Move::Defect;
        }
        if self.calm_left > 0 {
            self.calm_left -= 1;
            return Move::Cooperate;
        }
        if opponent.last() == Some(Move::Defect) {
            self.punishments_left = opponent.defections() - 1;
            self.calm_left = 2;
            return Move::Defect;
        }
        Move::Cooperate
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self::default())
    }
}

/// Gradual as first published: each punishment episode is one defection
/// longer than the last, however often the opponent defected in between.
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginalGradual {
    calming: bool,
    punishing: bool,
    punishment_count: usize,
    punishment_limit: usize,
}

impl Strategy for OriginalGradual {
    fn name(&self) -> &'static str {
        "OriginalGradual"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if own.is_empty() {
            return Move::Cooperate;
        }

        if self.calming {
            self.calming = false;
            return Move::Cooperate;
        }

        if self.punishing {
            if self.punishment_count < self.punishment_limit {
                self.punishment_count += 1;
                return Move::Defect;
            }
            self.calming = true;
            self.punishing = false;
            self.punishment_count = 0;
            return Move::Cooperate;
        }

        if opponent.last() == Some(Move::Defect) {
            self.punishing = true;
            self.punishment_count += 1;
            self.punishment_limit += 1;
            return Move::Defect;
        }

        Move::Cooperate
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self::default())
    }
}

/// Cooperates six times and defects five times, then plays whichever
/// move has earned it more in total this match. Payoffs are scored with
/// the standard prisoner's dilemma matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adaptive;

const ADAPTIVE_COOPERATIONS: usize = 6;
const ADAPTIVE_OPENING: usize = 11;

impl Strategy for Adaptive {
    fn name(&self) -> &'static str {
        "Adaptive"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if own.len() < ADAPTIVE_COOPERATIONS {
            return Move::Cooperate;
        }
        if own.len() < ADAPTIVE_OPENING {
            return Move::Defect;
        }

        let game = Game::prisoners_dilemma();
        let (mut cooperating, mut defecting) = (0i64, 0i64);
        for (&mine, &theirs) in own.moves().iter().zip(opponent.moves()) {
            let (earned, _) = game.score(mine, theirs);
            match mine {
                Move::Cooperate => cooperating += earned,
                Move::Defect => defecting += earned,
            }
        }
        if cooperating > defecting {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Turns grumpy once the opponent's defections outnumber its cooperations
/// by more than ten, and nice again once cooperations lead by more than ten
#[derive(Debug, Clone, Copy, Default)]
pub struct Grumpy {
    grumpy: bool,
}

const GRUMPY_THRESHOLD: i64 = 10;
const NICE_THRESHOLD: i64 = -10;

impl Strategy for Grumpy {
    fn name(&self) -> &'static str {
        "Grumpy"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        let grumpiness = opponent.defections() as i64 - opponent.cooperations() as i64;
        if self.grumpy && grumpiness < NICE_THRESHOLD {
            self.grumpy = false;
        } else if !self.grumpy && grumpiness > GRUMPY_THRESHOLD {
            self.grumpy = true;
        }
        if self.grumpy {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self::default())
    }
}

/// Cooperates until the opponent defects, then holds a grudge for
/// `20 * defections / turns` further turns
#[derive(Debug, Clone, Copy)]
pub struct Punisher {
    grudged: bool,
    grudge_memory: usize,
    grudge_length: usize,
}

impl Default for Punisher {
    fn default() -> Self {
        Self {
            grudged: false,
            grudge_memory: 0,
            grudge_length: 1,
        }
    }
}

impl Strategy for Punisher {
    fn name(&self) -> &'static str {
        "Punisher"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if self.grudge_memory == self.grudge_length {
            self.grudge_memory = 0;
            self.grudged = false;
        }
        if self.grudged {
            self.grudge_memory += 1;
            return Move::Defect;
        }
        if opponent.last() == Some(Move::Defect) {
            self.grudge_length = opponent.defections() * 20 / opponent.len();
            self.grudged = true;
            return Move::Defect;
        }
        Move::Cooperate
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self::default())
    }
}

/// Opens D, D, D, D, D, C, C. Defects forever if the opponent defected on
/// both of turns six and seven, otherwise cooperates.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradualKiller;

const GRADUAL_KILLER_OPENING: [Move; 7] = [
    Move::Defect,
    Move::Defect,
    Move::Defect,
    Move::Defect,
    Move::Defect,
    Move::Cooperate,
    Move::Cooperate,
];

impl Strategy for GradualKiller {
    fn name(&self) -> &'static str {
        "GradualKiller"
    }

    fn decide(&mut self, own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if let Some(&mv) = GRADUAL_KILLER_OPENING.get(own.len()) {
            return mv;
        }
        if opponent.moves().get(5..7) == Some(&[Move::Defect, Move::Defect][..]) {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}

/// Shortest prefix of `moves`, at least `min_size` long and at most twelve
/// or half the history, that repeats to produce the whole history
fn detect_cycle(moves: &[Move], min_size: usize) -> Option<&[Move]> {
    let max_size = (moves.len() / 2).min(12);
    (min_size..=max_size)
        .find(|&size| moves.iter().enumerate().all(|(i, mv)| *mv == moves[i % size]))
        .map(|size| &moves[..size])
}

/// Cooperates until the opponent's history is a repeating cycle of at
/// least three moves mixing C and D, then defects forever
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleHunter {
    found: bool,
}

impl Strategy for CycleHunter {
    fn name(&self) -> &'static str {
        "CycleHunter"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        if !self.found {
            self.found = detect_cycle(opponent.moves(), 3).is_some_and(|cycle| {
                cycle.contains(&Move::Cooperate) && cycle.contains(&Move::Defect)
            });
        }
        if self.found {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self::default())
    }
}

/// Tolerates three defections and defects forever from the fourth. An
/// opponent that cooperated through the first seven turns is instead
/// answered only after two defections in a row, until turn 180.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleCrosser;

impl Strategy for DoubleCrosser {
    fn name(&self) -> &'static str {
        "DoubleCrosser"
    }

    fn decide(&mut self, _own: &History, opponent: &History, _rng: &mut SmallRng) -> Move {
        let turn = opponent.len() + 1;
        let clean_start = !opponent.moves().iter().take(7).any(|&mv| mv == Move::Defect);
        if clean_start && (8..=180).contains(&turn) {
            if opponent.recent(2) == [Move::Defect, Move::Defect] {
                return Move::Defect;
            }
            return Move::Cooperate;
        }
        if opponent.defections() > 3 {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn clone_fresh(&self) -> Box<dyn Strategy> {
        Box::new(Self)
    }
}
