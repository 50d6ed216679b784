pub mod optimizer;
pub mod scenario;
pub mod traits;

pub use optimizer::OptimizerConfig;
pub use scenario::{BidderSpec, ItemSpec, ScenarioConfig};
pub use traits::ConfigSection;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level application config: optimizer hyperparameters plus the number
/// of draws used by the efficiency report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub optimizer: OptimizerConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Repeated draws averaged by the allocative-efficiency report.
    pub efficiency_rounds: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            efficiency_rounds: 20,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.optimizer.validate()?;
        if self.report.efficiency_rounds == 0 {
            return Err(crate::error::CoursebidError::Configuration(
                "efficiency_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
