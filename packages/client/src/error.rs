//! Error types for the FreshBooks client.
//!
//! Transport-level failures (`Http`, `HttpStatus`, `XmlParse`) are handed to
//! callers exactly as the transport produced them. A response that arrives
//! intact but reports a non-`ok` status becomes `Service`, labelled with the
//! verb and resource that failed.

use thiserror::Error;

use crate::types::Verb;

/// Main error type for the client library.
#[derive(Debug, Error)]
pub enum FreshBooksError {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API endpoint answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response XML could not be parsed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Request XML could not be written.
    #[error("XML serialization failed: {0}")]
    XmlWrite(#[from] std::io::Error),

    /// The API reported a non-`ok` status.
    #[error("CANNOT {} {}: {}", .verb.label(), .resource, .message)]
    Service {
        verb: Verb,
        resource: String,
        message: String,
    },

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Operation needs a record identifier that has not been assigned.
    #[error("Cannot {verb} {resource} without an identifier")]
    MissingIdentifier { verb: Verb, resource: String },

    /// A field name that cannot be written as a data element of the resource.
    #[error("Invalid field name '{name}': {reason}")]
    InvalidField { name: String, reason: &'static str },

    /// Invalid account name.
    #[error("Invalid account name: '{0}'. Expected letters, digits and hyphens (e.g., acme-ltd)")]
    InvalidAccount(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, FreshBooksError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = FreshBooksError::Service {
            verb: Verb::Create,
            resource: "CATEGORY".to_string(),
            message: "Name is required.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CANNOT CREATE CATEGORY: Name is required."
        );
    }

    #[test]
    fn test_missing_identifier_display() {
        let err = FreshBooksError::MissingIdentifier {
            verb: Verb::Delete,
            resource: "category".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot delete category without an identifier");
    }

    #[test]
    fn test_invalid_account_display() {
        let err = FreshBooksError::InvalidAccount("bad account".to_string());
        assert!(err.to_string().contains("bad account"));
        assert!(err.to_string().contains("acme-ltd"));
    }
}
