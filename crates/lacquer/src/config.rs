//! Configuration file loading for lacquer.
//!
//! Reads `lacquer.config.json` from the current working directory unless a
//! path is given with `--config`.

use lacquer_patina::{ConfigError, LintConfig, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};

/// Resolve the configuration file to use.
///
/// An explicit path must exist; the default file is optional.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let default = std::env::current_dir().unwrap_or_default().join(CONFIG_FILE_NAME);
    default.exists().then_some(default)
}

/// Load the lint configuration, falling back to the recommended rules.
pub fn load_config(explicit: Option<&Path>) -> Result<LintConfig, ConfigError> {
    match config_path(explicit) {
        Some(path) => LintConfig::load(&path),
        None => {
            tracing::debug!("no {CONFIG_FILE_NAME} found, using recommended rules");
            Ok(LintConfig::default())
        }
    }
}

/// Load the configuration or exit with status 2.
///
/// A configuration that does not validate stops the run before any file is
/// read.
pub fn load_config_or_exit(explicit: Option<&Path>) -> LintConfig {
    match load_config(explicit) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m Invalid configuration: {e}");
            std::process::exit(2);
        }
    }
}
