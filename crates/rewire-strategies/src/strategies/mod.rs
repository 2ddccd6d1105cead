//! Built-in Strategies
//!
//! Classic iterated prisoner's dilemma strategies, grouped by how much of
//! the match history they consult.

pub mod basic;
pub mod memory;
pub mod reactive;

pub use basic::{
    Alternator, AntiCycler, Cooperator, Defector, Random, UsuallyCooperates, UsuallyDefects,
    WorseAndWorse,
};
pub use memory::{
    Adaptive, AverageCopier, CycleHunter, Detective, DoubleCrosser, EasyGo, Forgiver,
    ForgivingTitForTat, GoByMajority, Gradual, GradualKiller, Grudger, Grumpy, HardGoByMajority,
    NiceAverageCopier, OriginalGradual, Prober, Punisher,
};
pub use reactive::{
    AdaptiveTitForTat, Aggravater, AntiTitForTat, Bully, HardTitForTat, NTitsForMTats, Predator,
    Resurrection, SneakyTitForTat, SuspiciousTitForTat, TitFor2Tats, TitForTat, TwoTitsForTat,
    WinShiftLoseStay, WinStayLoseShift,
};
