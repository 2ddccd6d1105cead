//! Strategy Registry
//!
//! Name-based construction of built-in strategies, used by configuration
//! files and the random-assignment pool.

use thiserror::Error;

use crate::strategies::*;
use crate::Strategy;

/// Errors from registry lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("unknown strategy '{0}'")]
    Unknown(String),
}

type Constructor = fn() -> Box<dyn Strategy>;

/// Every built-in strategy.
const REGISTRY: &[(&str, Constructor)] = &[
    ("Cooperator", || Box::new(Cooperator)),
    ("Defector", || Box::new(Defector)),
    ("TitForTat", || Box::new(TitForTat)),
    ("Grudger", || Box::new(Grudger)),
    ("Random", || Box::new(Random::default())),
    ("Adaptive", || Box::new(Adaptive)),
    ("AdaptiveTitForTat", || Box::new(AdaptiveTitForTat::default())),
    ("Forgiver", || Box::new(Forgiver)),
    ("ForgivingTitForTat", || Box::new(ForgivingTitForTat)),
    ("Bully", || Box::new(Bully)),
    ("Grumpy", || Box::new(Grumpy::default())),
    ("Punisher", || Box::new(Punisher::default())),
    ("Resurrection", || Box::new(Resurrection)),
    ("Gradual", || Box::new(Gradual::default())),
    ("GradualKiller", || Box::new(GradualKiller)),
    ("CycleHunter", || Box::new(CycleHunter::default())),
    ("AntiTitForTat", || Box::new(AntiTitForTat)),
    ("Aggravater", || Box::new(Aggravater)),
    ("HardTitForTat", || Box::new(HardTitForTat)),
    ("HardGoByMajority", || Box::new(HardGoByMajority)),
    ("UsuallyCooperates", || Box::new(UsuallyCooperates)),
    ("UsuallyDefects", || Box::new(UsuallyDefects)),
    ("SuspiciousTitForTat", || Box::new(SuspiciousTitForTat)),
    ("WorseAndWorse", || Box::new(WorseAndWorse)),
    ("DoubleCrosser", || Box::new(DoubleCrosser)),
    ("Predator", || Box::new(Predator::default())),
    ("Prober", || Box::new(Prober)),
    ("NiceAverageCopier", || Box::new(NiceAverageCopier)),
    ("AntiCycler", || Box::new(AntiCycler::default())),
    ("EasyGo", || Box::new(EasyGo)),
    ("OriginalGradual", || Box::new(OriginalGradual::default())),
    ("Detective", || Box::new(Detective)),
    ("NTitsForMTats", || Box::new(NTitsForMTats::default())),
    ("SneakyTitForTat", || Box::new(SneakyTitForTat)),
    ("AverageCopier", || Box::new(AverageCopier)),
    ("WinStayLoseShift", || Box::new(WinStayLoseShift)),
    ("WinShiftLoseStay", || Box::new(WinShiftLoseStay)),
    ("GoByMajority", || Box::new(GoByMajority)),
    ("TitFor2Tats", || Box::new(TitFor2Tats)),
    ("TwoTitsForTat", || Box::new(TwoTitsForTat)),
    ("Alternator", || Box::new(Alternator)),
];

/// Random-assignment pool used when the configuration names none.
/// CycleHunter is listed twice, so it is drawn twice as often.
const DEFAULT_POOL: &[&str] = &[
    "Cooperator",
    "Defector",
    "TitForTat",
    "Grudger",
    "Random",
    "Adaptive",
    "AdaptiveTitForTat",
    "Forgiver",
    "ForgivingTitForTat",
    "Bully",
    "Grumpy",
    "Punisher",
    "Resurrection",
    "Gradual",
    "GradualKiller",
    "CycleHunter",
    "AntiTitForTat",
    "Aggravater",
    "HardTitForTat",
    "HardGoByMajority",
    "UsuallyCooperates",
    "UsuallyDefects",
    "SuspiciousTitForTat",
    "WorseAndWorse",
    "DoubleCrosser",
    "Predator",
    "Prober",
    "NiceAverageCopier",
    "CycleHunter",
    "AntiCycler",
    "EasyGo",
    "OriginalGradual",
    "Detective",
    "NTitsForMTats",
    "SneakyTitForTat",
    "AverageCopier",
    "WinStayLoseShift",
    "WinShiftLoseStay",
];

/// Names of all built-in strategies, in pool order
pub fn names() -> Vec<&'static str> {
    REGISTRY.iter().map(|(name, _)| *name).collect()
}

pub fn contains(name: &str) -> bool {
    REGISTRY.iter().any(|(n, _)| *n == name)
}

/// Creates a fresh instance of the named strategy
pub fn create(name: &str) -> Result<Box<dyn Strategy>, StrategyError> {
    REGISTRY
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, construct)| construct())
        .ok_or_else(|| StrategyError::Unknown(name.to_string()))
}

/// Creates one instance of each named strategy, preserving order
pub fn create_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Box<dyn Strategy>>, StrategyError> {
    names.iter().map(|name| create(name.as_ref())).collect()
}

/// Names in the default random-assignment pool, duplicates included
pub fn default_pool_names() -> Vec<&'static str> {
    DEFAULT_POOL.to_vec()
}

/// One instance per entry of the default random-assignment pool
pub fn default_pool() -> Vec<Box<dyn Strategy>> {
    DEFAULT_POOL.iter().filter_map(|name| create(name).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_names_match_strategy_labels() {
        for name in names() {
            let strategy = create(name).unwrap();
            assert_eq!(strategy.name(), name);
            assert_eq!(strategy.clone_fresh().name(), name);
        }
    }

    #[test]
    fn test_registry_names_are_unique() {
        let all = names();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        assert_eq!(all.len(), 41);
    }

    #[test]
    fn test_default_pool_resolves_every_entry() {
        let pool = default_pool();
        assert_eq!(pool.len(), 38);
        let labels: Vec<_> = pool.iter().map(|s| s.name()).collect();
        assert_eq!(labels, default_pool_names());
        assert_eq!(labels.iter().filter(|n| **n == "CycleHunter").count(), 2);
        // Registered but only available by name
        for name in ["Alternator", "GoByMajority", "TitFor2Tats", "TwoTitsForTat"] {
            assert!(contains(name));
            assert!(!labels.contains(&name));
        }
    }

    #[test]
    fn test_unknown_strategy() {
        let err = create("Kingmaker").unwrap_err();
        assert_eq!(err, StrategyError::Unknown("Kingmaker".to_string()));
        assert_eq!(err.to_string(), "unknown strategy 'Kingmaker'");
        assert!(!contains("Kingmaker"));
    }

    #[test]
    fn test_create_all_preserves_order() {
        let lineup = create_all(&["Defector", "Cooperator", "Defector"]).unwrap();
        let labels: Vec<_> = lineup.iter().map(|s| s.name()).collect();
        assert_eq!(labels, vec!["Defector", "Cooperator", "Defector"]);

        assert!(create_all(&["Cooperator", "Nope"]).is_err());
    }
}
