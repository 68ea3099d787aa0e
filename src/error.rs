//! Error types

/// Simulation errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// An entity or playfield was built with unusable geometry
    #[error("invalid {entity} config: {reason}")]
    InvalidEntityConfig {
        entity: &'static str,
        reason: String,
    },
}

impl SimError {
    pub(crate) fn invalid(entity: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidEntityConfig {
            entity,
            reason: reason.into(),
        }
    }
}

/// Check that a dimension is finite and non-negative
pub(crate) fn check_dimension(entity: &'static str, name: &str, value: f32) -> Result<f32, SimError> {
    if !value.is_finite() {
        return Err(SimError::invalid(entity, format!("{name} is not finite ({value})")));
    }
    if value < 0.0 {
        return Err(SimError::invalid(entity, format!("{name} is negative ({value})")));
    }
    Ok(value)
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but describe an unusable world
    #[error("Invalid settings: {0}")]
    Invalid(#[from] SimError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimension() {
        assert_eq!(check_dimension("ball", "radius", 10.0), Ok(10.0));
        assert_eq!(check_dimension("ball", "radius", 0.0), Ok(0.0));
        assert!(check_dimension("ball", "radius", -1.0).is_err());
        assert!(check_dimension("ball", "radius", f32::NAN).is_err());
        assert!(check_dimension("ball", "radius", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = check_dimension("asteroid", "radius", -3.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid asteroid config: radius is negative (-3)");
    }
}
