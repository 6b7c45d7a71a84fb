//! Verlet state of the rod's free end.

use crate::vec::Vec;

/// Simulated tip of a rod: current and previous position.
///
/// The difference between the two is the implicit velocity; no explicit
/// velocity is stored. `Copy` so a sub-step can take one by value and return
/// the next without aliasing the pair mid-step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TipState<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
}

impl<V: Vec> TipState<V> {
    /// Tip at `pos` with zero implicit velocity.
    pub fn at_rest(pos: V) -> Self {
        TipState { pos, prev_pos: pos }
    }

    /// Per-step displacement, `pos - prev_pos`.
    pub fn velocity_raw(&self) -> V {
        self.pos - self.prev_pos
    }

    /// Advance to `next`, keeping the current position as the previous one.
    pub fn commit(self, next: V) -> Self {
        TipState { pos: next, prev_pos: self.pos }
    }

    /// Snap both positions to `pos`, discarding any motion.
    pub fn pin(&mut self, pos: V) {
        self.pos = pos;
        self.prev_pos = pos;
    }
}
