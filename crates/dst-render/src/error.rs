//! Error types for template construction and rendering.
//!
//! Only template *shape* can fail: unbalanced sections and a fragment/slot
//! count mismatch are detected before any text is produced. Evaluating
//! accessors and drivers never fails; missing data renders as the undefined
//! placeholder instead.

use thiserror::Error;

/// Errors that can occur when building or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A section end was found while no section was open.
    #[error("end section at position {0} has no start")]
    UnmatchedEnd(usize),

    /// A section start was never closed.
    ///
    /// The index is the innermost start still open after the scan.
    #[error("start section at position {0} has no matching end")]
    UnmatchedStart(usize),

    /// Fragments and slots do not alternate (`fragments` must be `slots + 1`).
    #[error(
        "template has {fragments} fragments and {slots} slots; expected {expected} fragments",
        expected = .slots + 1
    )]
    ArityMismatch { fragments: usize, slots: usize },

    /// Render options could not be parsed.
    #[error("invalid render options: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for TemplateError {
    fn from(err: serde_yaml::Error) -> Self {
        TemplateError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Config(err.to_string())
    }
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
