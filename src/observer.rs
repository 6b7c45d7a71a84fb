//! Observer hooks for monitoring rod simulation progress.

use crate::constraint::ConstraintKind;

/// Trait for observing a rod's advance.
///
/// Implement this trait to monitor solver progress (debug overlays, tests,
/// profiling). All methods have default no-op implementations.
pub trait RodObserver {
    /// Called after each of the fixed sub-steps has committed.
    fn on_sub_step(&mut self, _index: usize) {}

    /// Called whenever a constraint actually moves the tip.
    fn on_constraint(&mut self, _kind: ConstraintKind) {}

    /// Called when the active length is too short to simulate and the tip is
    /// pinned to the handle instead.
    fn on_degenerate(&mut self) {}

    /// Called when an advance is fully complete.
    fn on_advance_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpRodObserver;

impl RodObserver for NoOpRodObserver {}
