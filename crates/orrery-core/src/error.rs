//! Error types for the Orrery update loop.
//!
//! Organized by subsystem: flattening (wire encoding), collaborator
//! visitors, and the step pipeline that wraps both.

use std::error::Error;
use std::fmt;

/// Errors from the particle flattener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlattenError {
    /// A particle identifier contained no digits, so no identifier
    /// channel can be encoded. Fatal to the whole flatten call.
    MalformedId {
        /// The offending identifier, verbatim.
        id: String,
    },
}

impl fmt::Display for FlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedId { id } => {
                write!(f, "particle id '{id}' has no digits to encode")
            }
        }
    }
}

impl Error for FlattenError {}

/// Errors from an external collaborator (stepper, time extractor,
/// scene serializer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisitorError {
    /// The collaborator failed while walking the tree.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A node the collaborator requires is absent from the tree.
    MissingNode {
        /// Id of the missing node.
        id: String,
    },
}

impl fmt::Display for VisitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::MissingNode { id } => write!(f, "node '{id}' not found in tree"),
        }
    }
}

impl Error for VisitorError {}

/// Errors from one pass of the update pipeline.
///
/// A step error terminates the current iteration and surfaces to the
/// owning session; the loop itself keeps running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A collaborator failed during the named pipeline stage.
    VisitorFailed {
        /// Pipeline stage: `"stepper"`, `"time"`, or `"serializer"`.
        stage: &'static str,
        /// The underlying collaborator error.
        reason: VisitorError,
    },
    /// The particle flattener rejected the tree.
    Flatten(FlattenError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VisitorFailed { stage, reason } => {
                write!(f, "{stage} visitor failed: {reason}")
            }
            Self::Flatten(e) => write!(f, "flatten failed: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::VisitorFailed { reason, .. } => Some(reason),
            Self::Flatten(e) => Some(e),
        }
    }
}

impl From<FlattenError> for StepError {
    fn from(e: FlattenError) -> Self {
        Self::Flatten(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_display_names_stage() {
        let err = StepError::VisitorFailed {
            stage: "serializer",
            reason: VisitorError::ExecutionFailed {
                reason: "broken pipe".to_string(),
            },
        };
        let msg = format!("{err}");
        assert!(msg.contains("serializer"));
        assert!(msg.contains("broken pipe"));
    }

    #[test]
    fn flatten_error_converts_into_step_error() {
        let err: StepError = FlattenError::MalformedId {
            id: "ghost".to_string(),
        }
        .into();
        assert!(matches!(err, StepError::Flatten(_)));
        assert!(err.source().is_some());
    }
}
