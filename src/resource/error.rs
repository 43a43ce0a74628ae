//! Resource engine errors

/// Boxed error carried by fetch failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by Lists and Resources
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The caller failed while listing or getting. Transient; the next
    /// scheduled reconciliation retries.
    #[error("failed to fetch {kind} in {namespace:?}: {source}")]
    Fetch {
        kind: &'static str,
        namespace: String,
        #[source]
        source: BoxError,
    },

    /// No object exists at the given path.
    #[error("{kind} {path:?} not found")]
    NotFound { kind: &'static str, path: String },

    /// The object could not be serialized into a document.
    #[error("failed to encode {kind} {path:?}: {source}")]
    Encoding {
        kind: &'static str,
        path: String,
        #[source]
        source: BoxError,
    },

    /// A raw record did not have the shape this kind expects, or a kind
    /// produced a row that does not line up with its header.
    #[error("contract violation for {kind}: {reason}")]
    ContractViolation { kind: &'static str, reason: String },

    /// The kind does not offer the requested view.
    #[error("{kind} has no {operation} view")]
    Unsupported {
        kind: &'static str,
        operation: &'static str,
    },
}

impl ResourceError {
    pub(crate) fn fetch(kind: &'static str, namespace: &str, source: anyhow::Error) -> Self {
        ResourceError::Fetch {
            kind,
            namespace: namespace.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn not_found(kind: &'static str, path: &str) -> Self {
        ResourceError::NotFound {
            kind,
            path: path.to_string(),
        }
    }

    pub(crate) fn encoding(kind: &'static str, path: &str, source: impl Into<BoxError>) -> Self {
        ResourceError::Encoding {
            kind,
            path: path.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn contract(kind: &'static str, reason: impl Into<String>) -> Self {
        ResourceError::ContractViolation {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(kind: &'static str, operation: &'static str) -> Self {
        ResourceError::Unsupported { kind, operation }
    }

    /// True for errors the next reconciliation may recover from
    pub fn is_transient(&self) -> bool {
        matches!(self, ResourceError::Fetch { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound { .. })
    }
}

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_is_transient() {
        let err = ResourceError::fetch("Role", "blee", anyhow::anyhow!("connection refused"));
        assert!(err.is_transient());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("connection refused"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_not_found_message() {
        let err = ResourceError::not_found("Secret", "blee/fred");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Secret \"blee/fred\" not found");
    }

    #[test]
    fn test_unsupported_message() {
        let err = ResourceError::unsupported("Secret", "xray");
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "Secret has no xray view");
    }
}
