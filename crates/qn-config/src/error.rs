use thiserror::Error;

/// Configuration failures, each naming the field at fault.
///
/// All of these are raised before a simulation kernel exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("network must define at least one station")]
    NoStations,

    #[error("station {station}: server count must be positive")]
    NoServers { station: usize },

    #[error("station {station}: finite capacity must be positive (use \"inf\" for unbounded)")]
    ZeroCapacity { station: usize },

    #[error("at least one class must be defined")]
    NoClasses,

    #[error("duplicate class name {0:?}")]
    DuplicateClass(String),

    #[error("unknown class {0:?}")]
    UnknownClass(String),

    #[error("class {class:?}: arrival_probability must be in [0, 1], got {value}")]
    ArrivalProbability { class: String, value: f64 },

    #[error("class arrival probabilities sum to {0}, must sum to 1.0")]
    ProbabilitySum(f64),

    #[error("class {class:?}: routing matrix must have {expected} rows, got {got}")]
    RoutingRows { class: String, expected: usize, got: usize },

    #[error("class {class:?}: routing row {row} must have {expected} columns, got {got}")]
    RoutingColumns { class: String, row: usize, expected: usize, got: usize },

    #[error("class {class:?}: routing[{row}][{col}] must be in [0, 1], got {value}")]
    RoutingEntry { class: String, row: usize, col: usize, value: f64 },

    #[error("class {class:?}: routing row {row} sums to {sum} > 1.0")]
    RoutingRowSum { class: String, row: usize, sum: f64 },

    #[error("class {class:?}: service_rates must have {expected} values, got {got}")]
    ServiceRateCount { class: String, expected: usize, got: usize },

    #[error("class {class:?}: service_rates[{station}] must be positive, got {value}")]
    ServiceRate { class: String, station: usize, value: f64 },

    #[error("external arrival rate must be positive, got {0}")]
    ArrivalRate(f64),

    #[error("entry station {entry} out of range (0 to {max})")]
    EntryStation { entry: u32, max: usize },

    #[error("horizon must be positive and finite, got {0}")]
    Horizon(f64),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
