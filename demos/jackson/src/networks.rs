//! The four canonical example networks.
//!
//! All are single-class with external arrivals entering station 0.

use qn_config::{ConfigResult, NetworkConfig, NetworkConfigBuilder};
use qn_core::Capacity;

/// Three single-server stations in series, unbounded waiting lines.
pub fn jackson_series(horizon: f64, seed: u64) -> ConfigResult<NetworkConfig> {
    NetworkConfigBuilder::single_class(1.0, vec![1.5, 1.5, 2.0], vec![1, 1, 1], series(3), horizon, None)
        .seed(seed)
        .build()
}

/// The same series with bounded waiting lines, so arrivals can be lost.
pub fn finite_capacity(horizon: f64, seed: u64) -> ConfigResult<NetworkConfig> {
    let capacities = vec![Capacity::Finite(5), Capacity::Finite(10), Capacity::Finite(15)];
    NetworkConfigBuilder::single_class(1.0, vec![1.5, 1.5, 2.0], vec![1, 1, 1], series(3), horizon, Some(capacities))
        .seed(seed)
        .build()
}

/// Station 0 splits 20/80 between a two-station detour and station 3.
pub fn complex_routing(horizon: f64, seed: u64) -> ConfigResult<NetworkConfig> {
    let routing = vec![
        vec![0.0, 0.2, 0.0, 0.8],
        vec![0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 1.0],
        vec![0.0, 0.0, 0.0, 0.0],
    ];
    NetworkConfigBuilder::single_class(1.0, vec![1.5, 1.5, 2.0, 2.0], vec![1, 1, 1, 1], routing, horizon, None)
        .seed(seed)
        .build()
}

/// M/M/c stations in series under a heavier load.
pub fn multi_server(horizon: f64, seed: u64) -> ConfigResult<NetworkConfig> {
    NetworkConfigBuilder::single_class(3.0, vec![2.0, 2.0, 2.0], vec![2, 3, 2], series(3), horizon, None)
        .seed(seed)
        .build()
}

/// Every canonical network, labelled.
pub fn all(horizon: f64, seed: u64) -> ConfigResult<Vec<(&'static str, NetworkConfig)>> {
    Ok(vec![
        ("jackson-series", jackson_series(horizon, seed)?),
        ("finite-capacity", finite_capacity(horizon, seed)?),
        ("complex-routing", complex_routing(horizon, seed)?),
        ("multi-server", multi_server(horizon, seed)?),
    ])
}

/// Routing matrix for `n` stations in a line, exiting after the last.
fn series(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| {
            let mut row = vec![0.0; n];
            if i + 1 < n {
                row[i + 1] = 1.0;
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use qn_config::load_config_json;

    use super::*;

    #[test]
    fn canonical_networks_validate() {
        let nets = all(100.0, 42).unwrap();
        assert_eq!(nets.len(), 4);
        assert_eq!(nets[3].1.servers(), vec![2, 3, 2]);
    }

    #[test]
    fn bundled_configs_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs");
        let factory = load_config_json(&dir.join("factory_three_class.json")).unwrap();
        assert_eq!(factory.num_classes(), 3);
        let series = load_config_json(&dir.join("jackson_series.json")).unwrap();
        assert_eq!(series, jackson_series(10_000.0, 42).unwrap());
    }
}
