//! Configuration data types and their typed accessors.

use std::fmt;

use serde::{Deserialize, Serialize};

use qn_core::{Capacity, ClassId, StationId};

use crate::{ConfigError, ConfigResult};

fn default_seed() -> u64 {
    42
}

// ── StationSpec ───────────────────────────────────────────────────────────────

/// One service point: its server count and waiting-line capacity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationSpec {
    pub servers: u32,
    /// Defaults to unbounded when omitted.
    #[serde(default)]
    pub capacity: Capacity,
}

// ── ClassSpec ─────────────────────────────────────────────────────────────────

/// One agent class: its share of external arrivals, its routing matrix, and
/// its service rate at every station.
///
/// `routing[i][j]` is the probability of moving from station `i` to station
/// `j` after service.  The residual `1 - sum(routing[i])` is the probability
/// of leaving the network.  Routing back to the same station (`routing[i][i]`)
/// also ends the agent's journey: only a different station is re-entered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub name:                String,
    pub arrival_probability: f64,
    pub routing:             Vec<Vec<f64>>,
    pub service_rates:       Vec<f64>,
}

// ── ArrivalSpec ───────────────────────────────────────────────────────────────

/// The external Poisson arrival stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrivalSpec {
    pub external_rate: f64,
    #[serde(default)]
    pub entry_station: u32,
}

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Complete description of one simulation run.
///
/// Build through [`NetworkConfigBuilder`](crate::NetworkConfigBuilder) or
/// [`load_config_json`](crate::load_config_json); both validate.  When
/// constructing the struct literally, call [`validate`](Self::validate)
/// before handing it to the kernel (the kernel's builder does this too).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub stations: Vec<StationSpec>,
    pub classes:  Vec<ClassSpec>,
    pub arrivals: ArrivalSpec,
    pub horizon:  f64,
    #[serde(default = "default_seed")]
    pub seed:     u64,
}

impl NetworkConfig {
    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn station(&self, id: StationId) -> &StationSpec {
        &self.stations[id.index()]
    }

    pub fn servers(&self) -> Vec<u32> {
        self.stations.iter().map(|s| s.servers).collect()
    }

    pub fn capacities(&self) -> Vec<Capacity> {
        self.stations.iter().map(|s| s.capacity).collect()
    }

    /// `true` if no station bounds its waiting line.
    pub fn all_unbounded(&self) -> bool {
        self.stations.iter().all(|s| s.capacity.is_unbounded())
    }

    pub fn class(&self, id: ClassId) -> &ClassSpec {
        &self.classes[id.index()]
    }

    pub fn class_name(&self, id: ClassId) -> &str {
        &self.classes[id.index()].name
    }

    /// Look a class up by name.
    pub fn class_id(&self, name: &str) -> ConfigResult<ClassId> {
        self.classes
            .iter()
            .position(|c| c.name == name)
            .and_then(|i| ClassId::try_from(i).ok())
            .ok_or_else(|| ConfigError::UnknownClass(name.to_owned()))
    }

    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(|i| ClassId(i as u16))
    }

    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.stations.len()).map(|i| StationId(i as u32))
    }

    /// Arrival share of every class, indexed by `ClassId`.
    pub fn arrival_probabilities(&self) -> Vec<f64> {
        self.classes.iter().map(|c| c.arrival_probability).collect()
    }

    /// Routing row of `class` leaving `station`.
    pub fn routing_row(&self, class: ClassId, station: StationId) -> &[f64] {
        &self.classes[class.index()].routing[station.index()]
    }

    pub fn service_rate(&self, class: ClassId, station: StationId) -> f64 {
        self.classes[class.index()].service_rates[station.index()]
    }

    /// Service rate of every class at `station`, indexed by `ClassId`.
    pub fn station_service_rates(&self, station: StationId) -> Vec<f64> {
        self.classes
            .iter()
            .map(|c| c.service_rates[station.index()])
            .collect()
    }

    pub fn external_rate(&self) -> f64 {
        self.arrivals.external_rate
    }

    pub fn entry_station(&self) -> StationId {
        StationId(self.arrivals.entry_station)
    }

    /// Same configuration with a different seed.
    pub fn with_seed(&self, seed: u64) -> NetworkConfig {
        NetworkConfig { seed, ..self.clone() }
    }
}

/// Multi-line configuration summary, logged at run start.
impl fmt::Display for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "network: {} station(s), horizon {}, seed {}", self.stations.len(), self.horizon, self.seed)?;
        for (i, s) in self.stations.iter().enumerate() {
            writeln!(f, "  station {i}: {} server(s), capacity={}", s.servers, s.capacity)?;
        }
        for c in &self.classes {
            writeln!(f, "  class {}: {:.1}% of arrivals", c.name, c.arrival_probability * 100.0)?;
        }
        write!(
            f,
            "  arrivals: rate {} into station {}",
            self.arrivals.external_rate, self.arrivals.entry_station
        )
    }
}
