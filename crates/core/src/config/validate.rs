use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - scoring.min_ratio is within [0, 1]
/// - scoring.size_range bounds are ordered
/// - definitions concurrency and timeout are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Scoring validation
    if let Some(ratio) = config.scoring.min_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::ValidationError(format!(
                "scoring.min_ratio must be between 0 and 1, got {}",
                ratio
            )));
        }
    }

    if let Some(range) = &config.scoring.size_range {
        if let (Some(min), Some(max)) = (range.min_mb, range.max_mb) {
            if min > max {
                return Err(ConfigError::ValidationError(format!(
                    "scoring.size_range.min_mb ({}) exceeds max_mb ({})",
                    min, max
                )));
            }
        }
    }

    // Definitions validation
    if config.definitions.max_concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "definitions.max_concurrency cannot be 0".to_string(),
        ));
    }

    if config.definitions.task_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "definitions.task_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
