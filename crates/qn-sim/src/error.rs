use qn_config::ConfigError;
use qn_core::{AgentId, QnError, StationId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid network configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("kernel error: {0}")]
    Kernel(#[from] QnError),

    #[error("departure for {agent} at {station}, but no server there holds it")]
    AgentNotInService {
        agent:   AgentId,
        station: StationId,
    },

    #[error("simulation has already been run; build a new one for another replication")]
    AlreadyRun,
}

pub type SimResult<T> = Result<T, SimError>;
