use crate::profile::WeightProfile;
use serde::{Deserialize, Serialize};

/// Environment variable read by [`EngineConfig::from_env`]
pub const PROFILE_ENV_VAR: &str = "VINSMAK_WEIGHT_PROFILE";

/// Process-level engine configuration
///
/// Built once by the host and passed into analyzers and recommenders.
/// Other tunables (recommendation weights and thresholds) are per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name of the active weight profile; `None` selects the default
    #[serde(default)]
    pub weight_profile: Option<String>,
}

impl EngineConfig {
    pub fn new(weight_profile: Option<String>) -> Self {
        Self { weight_profile }
    }

    /// Read the profile name from `VINSMAK_WEIGHT_PROFILE`
    pub fn from_env() -> Self {
        Self {
            weight_profile: std::env::var(PROFILE_ENV_VAR).ok(),
        }
    }

    /// The active profile. Unknown names log a warning and fall back.
    pub fn profile(&self) -> &'static WeightProfile {
        WeightProfile::select(self.weight_profile.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_inverted() {
        assert_eq!(EngineConfig::default().profile().name, "inverted");
    }

    #[test]
    fn test_explicit_profile() {
        let config = EngineConfig::new(Some("moderate".to_string()));
        assert_eq!(config.profile().name, "moderate");
    }

    #[test]
    fn test_deserialize_missing_field() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert!(config.weight_profile.is_none());
    }
}
