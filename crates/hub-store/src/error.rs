//! Error types for the console store

/// Errors at the store boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Action kind string not part of the action contract
    #[error("unknown action kind: '{0}'")]
    UnknownActionKind(String),

    /// Namespace id is empty or blank
    #[error("invalid namespace id: '{0}'")]
    InvalidNamespaceId(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_display() {
        let err = StoreError::UnknownActionKind("dialog/delete/reopen".to_string());
        assert_eq!(err.to_string(), "unknown action kind: 'dialog/delete/reopen'");
    }
}
