//! Material pricing configuration.
//!
//! ```toml
//! [materials]
//! aluminum = 2.0
//! steel = 5.0
//! ```
//!
//! Missing keys fall back to the defaults above.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ErasureError, Result};
use crate::shape::MaterialCost;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialRates {
    pub aluminum: f64,
    pub steel: f64,
}

impl Default for MaterialRates {
    fn default() -> Self {
        MaterialRates {
            aluminum: MaterialCost::ALUMINUM_RATE,
            steel: MaterialCost::STEEL_RATE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub materials: MaterialRates,
}

impl PricingConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PricingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|err| ErasureError::io(path.display().to_string(), err.to_string()))?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded pricing config");
        Ok(config)
    }

    /// Every rate has to be usable as a [`MaterialCost`].
    pub fn validate(&self) -> Result<()> {
        self.aluminum()?;
        self.steel()?;
        Ok(())
    }

    pub fn aluminum(&self) -> Result<MaterialCost> {
        MaterialCost::new(self.materials.aluminum)
    }

    pub fn steel(&self) -> Result<MaterialCost> {
        MaterialCost::new(self.materials.steel)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| ErasureError::Config(err.to_string()))
    }
}
