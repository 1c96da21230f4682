//! Engine tuning parameters.
//!
//! Every field has a default, so a YAML document only needs to name the
//! values it overrides:
//!
//! ```yaml
//! initial_dt: 30.0
//! max_iterations: 128
//! ```

use serde::Deserialize;

use crate::error::{EngineError, Result};

/// Gravitational constant in m³ kg⁻¹ s⁻².
pub const G: f64 = 6.6732e-11;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// `G` used for every pair force, in m³ kg⁻¹ s⁻².
    pub gravitational_constant: f64,
    /// Step size (seconds) used as the first guess of the adaptive search.
    pub initial_dt: f64,
    /// Lower bound of the accepted per-step displacement band.
    pub min_travel: f64,
    /// Upper bound of the accepted per-step displacement band.
    pub max_travel: f64,
    /// Rescale attempts allowed before the adaptive step gives up.
    pub max_iterations: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            initial_dt: 60.0,
            min_travel: 100.0,
            max_travel: 1000.0,
            max_iterations: 64,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.gravitational_constant) {
            return Err(EngineError::Config(
                "gravitational_constant must be positive".into(),
            ));
        }
        if !positive(self.initial_dt) {
            return Err(EngineError::Config("initial_dt must be positive".into()));
        }
        if !positive(self.min_travel) || !positive(self.max_travel) {
            return Err(EngineError::Config("travel band must be positive".into()));
        }
        if self.min_travel > self.max_travel {
            return Err(EngineError::Config(format!(
                "min_travel {} exceeds max_travel {}",
                self.min_travel, self.max_travel
            )));
        }
        if self.max_iterations == 0 {
            return Err(EngineError::Config("max_iterations must be at least 1".into()));
        }
        Ok(())
    }
}
