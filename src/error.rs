use std::fmt;

/// Rejected geometry request. Nothing is built when one of these is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A length, radius, width or count outside its valid range
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
    /// A colour gradient was requested over zero vertices
    DegenerateGradient,
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidParameter { name, value, reason }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value, reason } => {
                write!(f, "invalid {} ({}): {}", name, value, reason)
            }
            Self::DegenerateGradient => write!(f, "colour gradient needs at least one segment"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Failure loading or validating a [`crate::config::ClockConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {}", msg),
            Self::Invalid { field, reason } => write!(f, "invalid config field `{}`: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<GeometryError> for ConfigError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::InvalidParameter { name, reason, .. } => Self::Invalid {
                field: name,
                reason: reason.to_string(),
            },
            GeometryError::DegenerateGradient => Self::Invalid {
                field: "segment_count",
                reason: err.to_string(),
            },
        }
    }
}
