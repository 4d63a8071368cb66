//! Configuration parser (verb module)
//!
//! Transforms YAML files into `CompilerConfig`.

use std::path::Path;
use tracing::debug;
use crate::config::CompilerConfig;
use crate::error::ConfigError;

/// Parse compiler configuration from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<CompilerConfig, ConfigError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    let config = parse_str(&contents)?;
    debug!(path = %path_str, "loaded compiler configuration");
    Ok(config)
}

/// Parse compiler configuration from a YAML string
pub fn parse_str(yaml: &str) -> Result<CompilerConfig, ConfigError> {
    // serde_yaml rejects an empty document; treat it as all defaults
    let config: CompilerConfig = if yaml.trim().is_empty() {
        CompilerConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    config.validate()?;
    Ok(config)
}
