use std::fmt;

/// Represents errors that can occur while estimating request width or loading feature gates.
///
/// Estimation errors never reach the caller, they are logged and mapped to a fallback width.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowControlError {
    /// Request carries no resolved request info
    MissingRequestInfo(String),
    /// Query parameters could not be converted into list options
    InvalidListOptions(String),
    /// Feature gate string is malformed or names an unknown feature
    InvalidFeatureGate(String),
}

impl fmt::Display for FlowControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowControlError::MissingRequestInfo(uri) => {
                write!(f, "No request info found for: {}", uri)
            }
            FlowControlError::InvalidListOptions(msg) => write!(f, "Invalid list options: {}", msg),
            FlowControlError::InvalidFeatureGate(msg) => write!(f, "Invalid feature gate: {}", msg),
        }
    }
}

impl std::error::Error for FlowControlError {}
