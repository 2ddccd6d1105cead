//! Engine error type

use thiserror::Error;

use rewire_strategies::StrategyError;

use crate::components::{GraphError, LedgerError};
use crate::config::ConfigError;
use crate::output::OutputError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
    #[error("relationship graph: {0}")]
    Graph(#[from] GraphError),
    #[error("payoff ledger: {0}")]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("simulation already finished after {0} rounds")]
    Finished(u32),
    #[error("simulation faulted in round {0} and cannot continue")]
    Faulted(u32),
}

pub type SimResult<T> = Result<T, SimError>;
