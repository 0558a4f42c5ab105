//! Wizard state controller
//!
//! Tracks the position within a fixed, linear sequence of steps together
//! with the data collected along the way. A session is created by the flow
//! that needs it and dropped when that flow completes or is abandoned.
//!
//! # Boundary policy
//!
//! `advance` on the last step and `retreat` on the first step are no-ops
//! (clamp). `jump_to` is the only fallible transition and rejects ordinals
//! outside the sequence.

mod error;
mod session;

pub use error::WizardError;
pub use session::WizardSession;

use std::fmt::Debug;

/// A step in a linear wizard.
///
/// Implementors publish the full ordered sequence. `SEQUENCE` must contain
/// every variant exactly once. An empty sequence is rejected at compile time
/// as soon as a session is created for it:
///
/// ```compile_fail
/// use infrasee::wizard::{WizardSession, WizardStep};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum NoSteps {}
///
/// impl WizardStep for NoSteps {
///     const SEQUENCE: &'static [Self] = &[];
///
///     fn title(&self) -> &'static str {
///         match *self {}
///     }
/// }
///
/// let _session = WizardSession::<NoSteps>::new();
/// ```
pub trait WizardStep: Copy + Eq + Debug + 'static {
    /// Ordered steps, first to last
    const SEQUENCE: &'static [Self];

    /// Display title for this step
    fn title(&self) -> &'static str;

    /// Zero-based ordinal of this step within `SEQUENCE`
    fn ordinal(&self) -> Option<usize> {
        Self::SEQUENCE.iter().position(|step| step == self)
    }
}
