//! Solver configuration
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::FlowError;

/// Optional limits and diagnostics for a max-flow run
///
/// The default configuration carries no limits, so every run terminates
/// with an optimal flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock budget checked once per augmentation
    #[serde(rename = "deadline_ms", with = "millis")]
    pub deadline: Option<Duration>,

    /// Upper bound on the number of augmentations
    pub max_augmentations: Option<usize>,

    /// Record every augmenting path and bottleneck
    pub record_history: bool,
}

impl SolverConfig {
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_max_augmentations(mut self, limit: usize) -> Self {
        self.max_augmentations = Some(limit);
        self
    }

    pub fn with_history(mut self) -> Self {
        self.record_history = true;
        self
    }

    /// Parses a JSON configuration; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        serde_json::from_str(json).map_err(|e| FlowError::InvalidParameter {
            name: "config".to_string(),
            reason: e.to_string(),
        })
    }

    /// Whether any limit can cut a run short
    pub fn is_bounded(&self) -> bool {
        self.deadline.is_some() || self.max_augmentations.is_some()
    }

    /// Sets a parameter from its string form
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        match name {
            "deadline_ms" => {
                let millis = parse_optional::<u64>(name, value)?;
                self.deadline = millis.map(Duration::from_millis);
                Ok(())
            }
            "max_augmentations" => {
                self.max_augmentations = parse_optional::<usize>(name, value)?;
                Ok(())
            }
            "record_history" => {
                self.record_history = value.parse::<bool>().map_err(|_| {
                    FlowError::InvalidParameter {
                        name: name.to_string(),
                        reason: "record_history must be true or false".to_string(),
                    }
                })?;
                Ok(())
            }
            _ => Err(FlowError::InvalidParameter {
                name: name.to_string(),
                reason: "Unknown parameter".to_string(),
            }),
        }
    }

    pub fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "deadline_ms" => self.deadline.map(|d| millis::saturating(d).to_string()),
            "max_augmentations" => self.max_augmentations.map(|n| n.to_string()),
            "record_history" => Some(self.record_history.to_string()),
            _ => None,
        }
    }
}

/// Empty string or "none" clears the parameter
fn parse_optional<T: std::str::FromStr>(name: &str, value: &str) -> Result<Option<T>, FlowError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| FlowError::InvalidParameter {
            name: name.to_string(),
            reason: format!("{} must be a non-negative integer", name),
        })
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// Whole milliseconds, clamped to `u64::MAX`
    pub fn saturating(duration: Duration) -> u64 {
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&saturating(*duration)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let config = SolverConfig::default();
        assert!(!config.is_bounded());
        assert!(!config.record_history);
    }

    #[test]
    fn test_json_configuration() {
        let config =
            SolverConfig::from_json(r#"{"deadline_ms": 250, "record_history": true}"#).unwrap();
        assert_eq!(config.deadline, Some(Duration::from_millis(250)));
        assert_eq!(config.max_augmentations, None);
        assert!(config.record_history);

        let empty = SolverConfig::from_json("{}").unwrap();
        assert_eq!(empty, SolverConfig::default());

        assert!(SolverConfig::from_json(r#"{"deadline_ms": "soon"}"#).is_err());
    }

    #[test]
    fn test_parameter_setting() {
        let mut config = SolverConfig::default();

        assert!(config.set_parameter("max_augmentations", "50").is_ok());
        assert_eq!(config.get_parameter("max_augmentations"), Some("50".to_string()));

        assert!(config.set_parameter("deadline_ms", "1500").is_ok());
        assert_eq!(config.deadline, Some(Duration::from_millis(1500)));

        assert!(config.set_parameter("deadline_ms", "none").is_ok());
        assert_eq!(config.deadline, None);

        // Invalid parameters
        assert!(config.set_parameter("invalid_param", "value").is_err());
        assert!(config.set_parameter("max_augmentations", "-3").is_err());
        assert!(config.set_parameter("record_history", "yes").is_err());
    }

    #[test]
    fn test_oversized_deadline_saturates() {
        let config = SolverConfig::default().with_deadline(Duration::MAX);
        let expected = u64::MAX.to_string();

        assert_eq!(config.get_parameter("deadline_ms"), Some(expected.clone()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(&format!("\"deadline_ms\":{}", expected)), "{}", json);

        let restored = SolverConfig::from_json(&json).unwrap();
        assert_eq!(restored.deadline, Some(Duration::from_millis(u64::MAX)));

        let mut reparsed = SolverConfig::default();
        reparsed.set_parameter("deadline_ms", &expected).unwrap();
        assert_eq!(reparsed.deadline, restored.deadline);
    }
}
