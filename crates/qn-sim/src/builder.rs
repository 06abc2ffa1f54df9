//! Fluent builder for constructing a [`NetworkSim`].

use qn_config::NetworkConfig;
use qn_core::{SimRng, VariateSource};

use crate::{NetworkSim, SimResult};

/// Fluent builder for [`NetworkSim<V>`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                               |
/// |------------------|---------------------------------------|
/// | `.seed(s)`       | `config.seed`                         |
/// | `.variates(v)`   | `SimRng::new(seed)`                   |
///
/// # Example
///
/// ```rust,ignore
/// let config = load_config_json(Path::new("network.json"))?;
/// let mut sim = SimBuilder::new(config).seed(7).build()?;
/// sim.run(&mut NoopObserver)?;
/// let log = sim.into_log();
/// ```
pub struct SimBuilder<V: VariateSource = SimRng> {
    config:   NetworkConfig,
    variates: V,
}

impl SimBuilder<SimRng> {
    /// Start from `config`, with a `SimRng` seeded from `config.seed`.
    pub fn new(config: NetworkConfig) -> Self {
        let variates = SimRng::new(config.seed);
        Self { config, variates }
    }

    /// Override the seed.  The config's `seed` field is updated too so the
    /// run log and any summaries report the seed actually used.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self.variates = SimRng::new(seed);
        self
    }
}

impl<V: VariateSource> SimBuilder<V> {
    /// Replace the variate source (scripted draws in tests, a different
    /// generator for a study).
    pub fn variates<W: VariateSource>(self, variates: W) -> SimBuilder<W> {
        SimBuilder { config: self.config, variates }
    }

    /// Validate the configuration and return a ready-to-run [`NetworkSim`].
    ///
    /// Configuration errors surface here, before any event is scheduled.
    pub fn build(self) -> SimResult<NetworkSim<V>> {
        self.config.validate()?;
        Ok(NetworkSim::new(self.config, self.variates))
    }
}
