pub mod builder;
pub mod defaults;
pub mod merge;
pub mod types;


pub use builder::ConfigBuilder;
pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Read the YAML config file if it exists.
///
/// Returns the parsed input and the directory relative paths resolve from.
pub fn load_config(config_file: &str) -> Result<(ConfigInput, PathBuf)> {
    let config_path = Path::new(config_file);
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let config_input = if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_file))?;
        parse_config(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_file))?
    } else {
        ConfigInput::default()
    };

    Ok((config_input, config_dir))
}

pub fn parse_config(contents: &str) -> Result<ConfigInput> {
    // An empty file deserializes to null
    if contents.trim().is_empty() {
        return Ok(ConfigInput::default());
    }

    Ok(serde_yaml::from_str(contents)?)
}
