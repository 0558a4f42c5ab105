//! The wizard session: current position plus accumulated step data

use std::collections::BTreeMap;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{WizardError, WizardStep};

/// One in-progress multi-step flow.
///
/// Fields collected at any step survive forward and backward navigation and
/// are only cleared by [`WizardSession::reset`].
#[derive(Debug, Clone)]
pub struct WizardSession<S: WizardStep> {
    /// Current position within `S::SEQUENCE`
    current_index: usize,
    /// Step-scoped values keyed by field name
    data: BTreeMap<String, String>,
    /// When the session was initialized or last reset
    started_at: DateTime<Utc>,
    _steps: PhantomData<S>,
}

impl<S: WizardStep> Default for WizardSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WizardStep> WizardSession<S> {
    const NON_EMPTY: () = assert!(
        !S::SEQUENCE.is_empty(),
        "wizard step sequence must not be empty"
    );

    /// Create a session positioned at the first step
    pub fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            current_index: 0,
            data: BTreeMap::new(),
            started_at: Utc::now(),
            _steps: PhantomData,
        }
    }

    /// Create a session positioned at `start` with no collected data
    pub fn initialize(start: S) -> Self {
        let mut session = Self::new();
        session.current_index = match start.ordinal() {
            Some(index) => index,
            None => {
                warn!(step = ?start, "step missing from its own sequence, starting at first step");
                0
            }
        };
        debug!(step = ?start, "wizard session initialized");
        session
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Move to the next step. No-op on the last step.
    pub fn advance(&mut self) -> S {
        if self.is_last_step() {
            debug!(step = ?self.current_step(), "advance clamped at last step");
        } else {
            self.current_index += 1;
            debug!(step = ?self.current_step(), "advanced");
        }
        self.current_step()
    }

    /// Move to the previous step. No-op on the first step.
    pub fn retreat(&mut self) -> S {
        if self.is_first_step() {
            debug!(step = ?self.current_step(), "retreat clamped at first step");
        } else {
            self.current_index -= 1;
            debug!(step = ?self.current_step(), "retreated");
        }
        self.current_step()
    }

    /// Start over: back to the first step with all collected data cleared
    pub fn reset(&mut self) -> S {
        self.current_index = 0;
        self.data.clear();
        self.started_at = Utc::now();
        debug!("wizard session reset");
        self.current_step()
    }

    /// Jump directly to the step at `index`.
    ///
    /// Out-of-range ordinals are rejected and leave the session untouched.
    pub fn jump_to(&mut self, index: usize) -> Result<S, WizardError> {
        if index >= self.step_count() {
            warn!(requested = index, step_count = self.step_count(), "rejected wizard jump");
            return Err(WizardError::StepOutOfRange {
                requested: index,
                step_count: self.step_count(),
            });
        }
        self.current_index = index;
        debug!(step = ?self.current_step(), "jumped");
        Ok(self.current_step())
    }

    // ------------------------------------------------------------------------
    // Collected data
    // ------------------------------------------------------------------------

    /// Store or overwrite a field value
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    /// Get a previously stored field, `None` if it was never set
    pub fn field(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// All collected fields
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    // ------------------------------------------------------------------------
    // Observations
    // ------------------------------------------------------------------------

    /// Get current step
    pub fn current_step(&self) -> S {
        S::SEQUENCE[self.current_index]
    }

    /// Zero-based ordinal of the current step
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of steps in the sequence
    pub fn step_count(&self) -> usize {
        S::SEQUENCE.len()
    }

    pub fn is_first_step(&self) -> bool {
        self.current_index == 0
    }

    /// Check if we're on the last step
    pub fn is_last_step(&self) -> bool {
        self.current_index + 1 >= self.step_count()
    }

    /// Position as `(step number, total)` with a 1-based step number
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.step_count())
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
