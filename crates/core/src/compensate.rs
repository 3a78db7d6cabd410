//! Tentative-apply command for optimistic mutations.
//!
//! An optimistic mutation applies its visible effect first (e.g. a row is
//! soft-deleted) and only then performs the slower follow-up work (e.g.
//! purging stored evidence files). [`Tentative`] records the applied effect
//! and forces the caller to settle it exactly once: either `confirm` the
//! mutation or `compensate` and receive the captured value back so the
//! forward effect can be undone. Both settlers consume the command, so an
//! unsettled or doubly-settled mutation is a compile error, not a runtime
//! bug.

/// How a tentative mutation was settled. Used for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Confirmed,
    Compensated,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Confirmed => "confirmed",
            Outcome::Compensated => "compensated",
        }
    }
}

/// An applied-but-unsettled mutation carrying the data needed to undo it.
#[derive(Debug)]
#[must_use = "a tentative mutation must be confirmed or compensated"]
pub struct Tentative<T> {
    /// Short operation name for log lines, e.g. `"incident.delete"`.
    operation: &'static str,
    applied: T,
}

impl<T> Tentative<T> {
    /// Record an applied forward effect awaiting settlement.
    pub fn applied(operation: &'static str, value: T) -> Self {
        Self {
            operation,
            applied: value,
        }
    }

    /// The operation name this command was created with.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Peek at the captured value without settling.
    pub fn value(&self) -> &T {
        &self.applied
    }

    /// Settle successfully. The forward effect stands.
    pub fn confirm(self) -> Outcome {
        Outcome::Confirmed
    }

    /// Settle by rolling back. Returns the captured value so the caller can
    /// run the compensating action (e.g. restore the soft-deleted row).
    pub fn compensate(self) -> (Outcome, T) {
        (Outcome::Compensated, self.applied)
    }
}
