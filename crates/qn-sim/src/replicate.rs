//! Independent replications of one configuration.
//!
//! Replication `i` runs with `SimRng::for_replication(config.seed, i)` and
//! its own kernel; nothing is shared between replications, so they can run
//! on Rayon's thread pool with the `parallel` feature.  Results come back in
//! replication order either way.

use log::info;

use qn_config::NetworkConfig;
use qn_core::SimRng;

use crate::{NoopObserver, RunLog, SimBuilder, SimResult};

/// Run `replications` independent copies of `config` and return their logs,
/// indexed by replication.
pub fn run_replications(config: &NetworkConfig, replications: u64) -> SimResult<Vec<RunLog>> {
    config.validate()?;
    info!("running {replications} replication(s) rooted at seed {}", config.seed);

    let one = |index: u64| -> SimResult<RunLog> {
        let variates = SimRng::for_replication(config.seed, index);
        let mut sim = SimBuilder::new(config.clone()).variates(variates).build()?;
        sim.run(&mut NoopObserver)?;
        Ok(sim.into_log())
    };

    #[cfg(not(feature = "parallel"))]
    {
        (0..replications).map(one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        (0..replications).into_par_iter().map(one).collect()
    }
}
