use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A named, independently validatable section of the application config.
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;

    /// Checks the section at setup time. Violations are configuration
    /// errors, reported before any computation starts.
    fn validate(&self) -> Result<()>;
}
