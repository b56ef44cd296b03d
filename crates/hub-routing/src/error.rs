//! Error types for routing

/// Routing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    /// Template string is malformed
    #[error("invalid path template '{template}': {reason}")]
    InvalidTemplate {
        /// Offending template
        template: String,
        /// What is wrong with it
        reason: String,
    },

    /// A parameter needed to format or resolve a path was not given
    #[error("missing route parameter: '{0}'")]
    MissingParam(String),

    /// Parameter value cannot be placed in a single path segment
    #[error("invalid value for route parameter '{name}': '{value}'")]
    InvalidParamValue {
        /// Parameter name
        name: String,
        /// Rejected value
        value: String,
    },
}

impl RoutingError {
    /// Create invalid template error
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;
