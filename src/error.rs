//! Error types for message rendering
//!
//! Content normalization itself never fails; these errors only surface at the
//! edges where raw MIME or configuration input is accepted.

use thiserror::Error;

/// Errors that can occur while preparing a message body for rendering
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to parse the MIME structure of a raw message
    #[error("Failed to parse message structure: {0}")]
    Structure(String),

    /// Failed to decode a body part
    #[error("Failed to decode content: {0}")]
    Decode(String),

    /// Render options could not be loaded
    #[error("Invalid render options: {0}")]
    Config(String),
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;
