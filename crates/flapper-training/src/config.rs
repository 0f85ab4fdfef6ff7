use std::ops::RangeInclusive;

use flapper_engine::{DEFAULT_GAP_HEIGHT, MAX_GAP_HEIGHT, MIN_GAP_HEIGHT};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POPULATION_SIZE: usize = 200;
pub const DEFAULT_SPEED: usize = 5;
pub const SPEED_RANGE: RangeInclusive<usize> = 1..=50;
pub const GAP_HEIGHT_RANGE: RangeInclusive<f32> = MIN_GAP_HEIGHT..=MAX_GAP_HEIGHT;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1, got {value}")]
    PopulationSize { value: usize },
    #[display(
        "gap height must be within {}..={}, got {value}",
        GAP_HEIGHT_RANGE.start(),
        GAP_HEIGHT_RANGE.end()
    )]
    GapHeight { value: f32 },
    #[display(
        "speed must be within {}..={}, got {value}",
        SPEED_RANGE.start(),
        SPEED_RANGE.end()
    )]
    Speed { value: usize },
}

/// Settings an operator may change while the simulation runs.
///
/// - `population_size` applies from the next generation on
/// - `gap_height` applies to obstacles spawned afterwards
/// - `speed` is the number of simulation steps per frame
///
/// Missing fields fall back to their defaults when deserializing:
///
/// ```
/// use flapper_training::SimulationConfig;
///
/// let config: SimulationConfig = serde_json::from_str(r#"{ "speed": 20 }"#).unwrap();
/// assert_eq!(config.speed, 20);
/// assert_eq!(config.population_size, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub population_size: usize,
    pub gap_height: f32,
    pub speed: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            gap_height: DEFAULT_GAP_HEIGHT,
            speed: DEFAULT_SPEED,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_population_size(self.population_size)?;
        validate_gap_height(self.gap_height)?;
        validate_speed(self.speed)?;
        Ok(())
    }
}

pub(crate) fn validate_population_size(value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::PopulationSize { value });
    }
    Ok(())
}

pub(crate) fn validate_gap_height(value: f32) -> Result<(), ConfigError> {
    if !GAP_HEIGHT_RANGE.contains(&value) {
        return Err(ConfigError::GapHeight { value });
    }
    Ok(())
}

pub(crate) fn validate_speed(value: usize) -> Result<(), ConfigError> {
    if !SPEED_RANGE.contains(&value) {
        return Err(ConfigError::Speed { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let config = SimulationConfig {
            population_size: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PopulationSize { value: 0 })
        );

        for gap_height in [100.0, 601.0, f32::NAN] {
            let config = SimulationConfig {
                gap_height,
                ..SimulationConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::GapHeight { .. })
            ));
        }

        for speed in [0, 51] {
            let config = SimulationConfig {
                speed,
                ..SimulationConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::Speed { value: speed }));
        }
    }

    #[test]
    fn test_error_messages_name_the_range() {
        let err = validate_speed(0).unwrap_err();
        assert_eq!(err.to_string(), "speed must be within 1..=50, got 0");
    }
}
