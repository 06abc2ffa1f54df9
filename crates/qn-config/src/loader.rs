//! JSON configuration loader.
//!
//! The file layout mirrors [`NetworkConfig`] field for field; see the crate
//! docs for an example.  Capacities are a positive integer or `"inf"`.

use std::io::Read;
use std::path::Path;

use crate::{ConfigResult, NetworkConfig};

/// Load and validate a configuration from a JSON file.
pub fn load_config_json(path: &Path) -> ConfigResult<NetworkConfig> {
    let file = std::fs::File::open(path)?;
    load_config_reader(std::io::BufReader::new(file))
}

/// Like [`load_config_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or configs embedded in a
/// binary.
pub fn load_config_reader<R: Read>(reader: R) -> ConfigResult<NetworkConfig> {
    let config: NetworkConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}
