use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TheoryError {
    #[error("{what} must be positive and finite, got {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error("queue is unstable: utilization {rho} >= 1")]
    Unstable { rho: f64 },

    #[error("system capacity {k} is smaller than the server count {c}")]
    CapacityBelowServers { c: u32, k: u32 },

    #[error("{c} servers plus a waiting line of {q} does not fit a u32 system capacity")]
    CapacityOverflow { c: u32, q: u32 },

    #[error("traffic equations have no unique solution (routing has a closed loop with no exit)")]
    SingularRouting,

    #[error("analytic reference is single-class; the network has {0} classes")]
    MultiClass(usize),
}

pub type TheoryResult<T> = Result<T, TheoryError>;
