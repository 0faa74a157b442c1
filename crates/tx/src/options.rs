//! Per-action options
//!
//! Every action carries an immutable options bag fixed at construction.
//! Options never change after registration begins.

/// Options for one write action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOptions {
    /// Fail the whole transaction when this action's validation or a before
    /// hook aborts, instead of silently excluding the action
    pub raise_on_failure: bool,
    /// Skip document validators during registration
    pub skip_validation: bool,
    /// Maintain created_at/updated_at on timestamp-enabled schemas
    pub touch_timestamps: bool,
}

impl Default for ActionOptions {
    fn default() -> Self {
        Self {
            raise_on_failure: false,
            skip_validation: false,
            touch_timestamps: true,
        }
    }
}

impl ActionOptions {
    /// Default options: silent aborts, validation on, timestamps on
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that fail the whole transaction on validation/hook aborts
    pub fn raising() -> Self {
        Self {
            raise_on_failure: true,
            ..Self::default()
        }
    }

    /// Set `raise_on_failure`
    pub fn raise_on_failure(mut self, raise: bool) -> Self {
        self.raise_on_failure = raise;
        self
    }

    /// Set `skip_validation`
    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    /// Set `touch_timestamps`
    pub fn touch_timestamps(mut self, touch: bool) -> Self {
        self.touch_timestamps = touch;
        self
    }
}
