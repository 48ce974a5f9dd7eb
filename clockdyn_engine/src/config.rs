//! Configuration resolution for the step driver.
//!
//! A clock is configured either from a TOML file or from a built-in
//! preset; command-line switches are applied on top, and the result is
//! validated before anything is built from it.

use std::path::Path;

use clockdyn_common::clock::{ClockConfig, Preset};
use clockdyn_common::config::{ConfigError, ConfigLoader};

/// Command-line adjustments applied after loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Force passthrough mode (hands follow the reference exactly).
    pub disable_dynamics: bool,
}

impl ConfigOverrides {
    /// Apply to a loaded configuration.
    pub fn apply(&self, config: &mut ClockConfig) {
        if self.disable_dynamics {
            config.simulation.enable_dynamics = false;
        }
    }
}

/// Load and validate a clock configuration file.
///
/// # Errors
/// `FileNotFound`, `ParseError` or `ValidationError`.
pub fn load_config(path: &Path) -> Result<ClockConfig, ConfigError> {
    let config = ClockConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a configuration from TOML text.
pub fn load_config_from_str(content: &str) -> Result<ClockConfig, ConfigError> {
    let config = ClockConfig::load_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Pick the file (if any) or the preset, apply overrides, validate.
pub fn resolve_config(
    path: Option<&Path>,
    preset: Preset,
    overrides: ConfigOverrides,
) -> Result<ClockConfig, ConfigError> {
    let mut config = match path {
        Some(p) => load_config(p)?,
        None => ClockConfig::preset(preset),
    };
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}
