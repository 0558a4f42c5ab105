//! Errors raised by wizard transitions

use thiserror::Error;

/// Errors that can occur when moving a wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// A jump targeted an ordinal outside the step sequence.
    #[error("Step {requested} is out of range (wizard has {step_count} steps)")]
    StepOutOfRange {
        /// Ordinal that was requested
        requested: usize,
        /// Number of steps in the sequence
        step_count: usize,
    },
}
