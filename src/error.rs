use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can end a probate search run
#[derive(Debug, Error)]
pub enum SearchError {
    /// The browser could not be launched
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Connecting to an already running browser failed
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Tab lookup or creation failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Any call against the automation surface failed (navigate, click, read text, ...)
    #[error("Browser interaction '{action}' failed: {reason}")]
    Interaction { action: String, reason: String },

    /// An element wait ran out before the element appeared
    #[error("Timed out waiting for '{0}'")]
    Timeout(String),

    /// No table layout is registered for the jurisdiction
    #[error("No results layout registered for jurisdiction '{0}'")]
    SchemaNotFound(String),

    /// The record type exists on the site but is not supported
    #[error("Record type '{0}' is not supported; only Estate searches are implemented")]
    UnsupportedRecordType(String),

    /// The query cannot be submitted as given
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Writing the CSV export failed
    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Build an [`SearchError::Interaction`] from an action name and any displayable cause
    pub fn interaction(action: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Interaction {
            action: action.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error came from the browser rather than from the query or the registry
    pub fn is_browser_failure(&self) -> bool {
        matches!(
            self,
            Self::LaunchFailed(_)
                | Self::ConnectionFailed(_)
                | Self::TabOperationFailed(_)
                | Self::Interaction { .. }
                | Self::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_message() {
        let err = SearchError::interaction("click", "node is detached");
        assert_eq!(
            err.to_string(),
            "Browser interaction 'click' failed: node is detached"
        );
        assert!(err.is_browser_failure());
    }

    #[test]
    fn test_schema_not_found_is_not_browser_failure() {
        let err = SearchError::SchemaNotFound("York".to_string());
        assert!(err.to_string().contains("York"));
        assert!(!err.is_browser_failure());
    }

    #[test]
    fn test_timeout_is_browser_failure() {
        let err = SearchError::Timeout("//table".to_string());
        assert_eq!(err.to_string(), "Timed out waiting for '//table'");
        assert!(err.is_browser_failure());
    }
}
