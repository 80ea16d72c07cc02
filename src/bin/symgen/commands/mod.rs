//! Command implementations

pub mod completions;
pub mod examples;
pub mod generate;

use std::path::Path;

use anyhow::Result;

use symgen::util::config::{global_config_path, load_config as load_merged, project_config_path};
use symgen::Config;

/// Load the explicit config file, or merge the global and project ones.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    let cwd = std::env::current_dir()?;
    Ok(load_merged(
        global_config_path().as_deref(),
        &project_config_path(&cwd),
    ))
}
