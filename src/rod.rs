//! Elastic rod driven by a kinematic handle.

use crate::config::ElasticProperties;
use crate::curve::{pommel_point, BladeCurve};
use crate::float::Float;
use crate::observer::{NoOpRodObserver, RodObserver};
use crate::solver::{enforce_limits, step_once, SubStepParams, DEGENERATE_ACTIVE_LENGTH, SUB_STEPS};
use crate::tip::TipState;
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;

/// The three marker points of a rod.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Landmarks<F: Float> {
    /// Start of the rod, `t = 0`.
    pub pommel: Vec3<F>,
    /// Pivot, `t = grip_ratio`.
    pub grip: Vec3<F>,
    /// Free end, `t = 1`.
    pub tip: Vec3<F>,
}

/// A flexible rod whose free end follows a driven handle with spring lag.
///
/// Only the tip is simulated. The handle pose is supplied by the caller on
/// every [`advance`](Rod::advance) and is never integrated.
///
/// ```
/// use flexrod::{ElasticProperties, Rod, Vec3};
///
/// let mut rod: Rod<f32> = Rod::new(
///     100.0,
///     ElasticProperties::default(),
///     Vec3::new(0.0, 0.0, 0.0),
///     Vec3::new(0.0, 1.0, 0.0),
/// );
/// rod.advance(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 1.0 / 60.0);
/// let samples = rod.sample_curve(32);
/// assert_eq!(samples.len(), 32);
/// ```
#[derive(Clone, Debug)]
pub struct Rod<F: Float> {
    length: F,
    properties: ElasticProperties<F>,
    handle_pos: Vec3<F>,
    handle_dir: Vec3<F>,
    tip: TipState<Vec3<F>>,
}

impl<F: Float> Rod<F> {
    /// Create a rod held at `handle_pos` pointing along `handle_dir`, with the
    /// tip seated at the rigid rest pose.
    pub fn new(
        length: F,
        properties: ElasticProperties<F>,
        handle_pos: Vec3<F>,
        handle_dir: Vec3<F>,
    ) -> Self {
        let mut rod = Rod {
            length,
            properties,
            handle_pos,
            handle_dir: handle_dir.normalize(),
            tip: TipState::at_rest(handle_pos),
        };
        rod.reset();
        rod
    }

    /// Replace length and material. The tip is not moved; call
    /// [`reset`](Rod::reset) for a consistent rest pose.
    pub fn reconfigure(&mut self, length: F, properties: ElasticProperties<F>) {
        tracing::debug!(length = ?length, properties = ?properties, "rod reconfigured");
        self.length = length;
        self.properties = properties;
    }

    /// Seat the tip at the rigid rest pose with zero implicit velocity.
    pub fn reset(&mut self) {
        let rest = self.ideal_tip_position();
        tracing::debug!(tip = ?rest, "rod reset to rest pose");
        self.tip = TipState::at_rest(rest);
    }

    /// Advance the simulation by `dt` seconds with the given handle pose.
    ///
    /// `handle_dir` need not be normalized. A non-positive `dt` skips the
    /// spring and integration: the handle pose is recorded and the tip is
    /// only pulled back inside the bend cone and stretch cap (or pinned, for
    /// a degenerate rod).
    pub fn advance(&mut self, handle_pos: Vec3<F>, handle_dir: Vec3<F>, dt: F) {
        self.advance_with(handle_pos, handle_dir, dt, &mut NoOpRodObserver);
    }

    /// [`advance`](Rod::advance) reporting sub-steps and constraint hits to `observer`.
    pub fn advance_with<O: RodObserver>(
        &mut self,
        handle_pos: Vec3<F>,
        handle_dir: Vec3<F>,
        dt: F,
        observer: &mut O,
    ) {
        self.handle_pos = handle_pos;
        self.handle_dir = handle_dir.normalize();

        let active_length = self.active_length();
        if active_length < F::from_f64(DEGENERATE_ACTIVE_LENGTH) {
            tracing::trace!(active_length = ?active_length, "degenerate rod, tip pinned to handle");
            self.tip.pin(handle_pos);
            observer.on_degenerate();
            observer.on_advance_complete();
            return;
        }

        let params = SubStepParams::new(self.handle_pos, self.handle_dir, active_length, self.properties);

        if !(dt > F::zero()) {
            self.tip = enforce_limits(self.tip, &params, observer);
            observer.on_advance_complete();
            return;
        }

        let sub_dt = dt / F::from_f64(SUB_STEPS as f64);

        for i in 0..SUB_STEPS {
            self.tip = step_once(self.tip, &params, sub_dt, observer);
            observer.on_sub_step(i);
        }

        observer.on_advance_complete();
    }

    /// Point on the rod at normalized arc-length `t`.
    ///
    /// `t` in `[0, grip_ratio)` lies on the rigid pommel behind the handle;
    /// `[grip_ratio, 1]` follows the bent blade. Read-only.
    pub fn query_normalized_position(&self, t: F) -> Vec3<F> {
        let grip = self.properties.grip_ratio;
        if t < grip {
            return pommel_point(self.handle_pos, self.handle_dir, self.length, grip, t);
        }
        let active_length = self.active_length();
        if active_length <= F::from_f64(DEGENERATE_ACTIVE_LENGTH) {
            return self.handle_pos;
        }
        let segment_t = (t - grip) / (F::one() - grip);
        self.curve().evaluate(segment_t)
    }

    /// Bezier of the active region for the current state.
    pub fn curve(&self) -> BladeCurve<F> {
        BladeCurve::new(
            self.handle_pos,
            self.handle_dir,
            self.tip.pos,
            self.active_length(),
            self.properties.taper,
        )
    }

    /// `samples` evenly spaced points from `t = 0` to `t = 1`.
    pub fn sample_curve(&self, samples: usize) -> AllocVec<Vec3<F>> {
        match samples {
            0 => AllocVec::new(),
            1 => alloc::vec![self.query_normalized_position(F::one())],
            n => {
                let last = F::from_f64((n - 1) as f64);
                (0..n)
                    .map(|i| self.query_normalized_position(F::from_f64(i as f64) / last))
                    .collect()
            }
        }
    }

    /// Pommel, grip and tip marker positions.
    pub fn landmarks(&self) -> Landmarks<F> {
        Landmarks {
            pommel: self.query_normalized_position(F::zero()),
            grip: self.query_normalized_position(self.properties.grip_ratio),
            tip: self.query_normalized_position(F::one()),
        }
    }

    /// Length beyond the grip, recomputed from the current configuration.
    pub fn active_length(&self) -> F {
        self.properties.active_length(self.length)
    }

    /// Where the tip would sit if the rod were rigid.
    pub fn ideal_tip_position(&self) -> Vec3<F> {
        self.handle_pos + self.handle_dir.scale(self.active_length())
    }

    /// Per-sub-step displacement of the tip.
    pub fn velocity_raw(&self) -> Vec3<F> {
        self.tip.velocity_raw()
    }

    /// Angle in radians between the handle direction and the tip direction.
    pub fn bend_angle(&self) -> F {
        self.handle_dir.angle_between(self.tip.pos - self.handle_pos)
    }

    /// Tip distance divided by active length. Zero for a degenerate rod.
    pub fn stretch_ratio(&self) -> F {
        let active_length = self.active_length();
        if active_length.is_near_zero(F::from_f64(1e-10)) {
            return F::zero();
        }
        self.tip.pos.distance(self.handle_pos) / active_length
    }

    pub fn length(&self) -> F { self.length }
    pub fn properties(&self) -> &ElasticProperties<F> { &self.properties }
    pub fn handle_position(&self) -> Vec3<F> { self.handle_pos }
    pub fn handle_direction(&self) -> Vec3<F> { self.handle_dir }
    pub fn tip_position(&self) -> Vec3<F> { self.tip.pos }
    pub fn previous_tip_position(&self) -> Vec3<F> { self.tip.prev_pos }
    pub fn tip_state(&self) -> TipState<Vec3<F>> { self.tip }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rod(length: f64, props: ElasticProperties<f64>) -> Rod<f64> {
        Rod::new(length, props, Vec3::zero(), Vec3::unit_y())
    }

    #[test]
    fn new_seats_tip_at_rest() {
        let r = rod(100.0, ElasticProperties::new());
        assert_eq!(r.tip_position(), Vec3::new(0.0, 100.0, 0.0));
        assert_eq!(r.velocity_raw(), Vec3::zero());
    }

    #[test]
    fn direction_is_normalized() {
        let r = Rod::new(10.0f64, ElasticProperties::new(), Vec3::zero(), Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(r.handle_direction(), Vec3::unit_z());
    }

    #[test]
    fn reconfigure_does_not_move_tip() {
        let mut r = rod(100.0, ElasticProperties::new());
        let before = r.tip_state();
        r.reconfigure(50.0, ElasticProperties::new().with_grip_ratio(0.5));
        assert_eq!(r.tip_state(), before);
        assert!((r.active_length() - 25.0).abs() < 1e-12);
        r.reset();
        assert!((r.tip_position().y - 25.0).abs() < 1e-12);
    }

    #[test]
    fn negative_dt_only_records_handle() {
        let mut r = rod(10.0, ElasticProperties::new());
        let before = r.tip_state();
        r.advance(Vec3::new(1.0, 0.0, 0.0), Vec3::unit_y(), -1.0);
        assert_eq!(r.tip_state(), before);
        assert_eq!(r.handle_position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn zero_dt_teleport_is_capped() {
        let mut r = rod(100.0, ElasticProperties::new());
        r.advance(Vec3::new(1000.0, 0.0, 0.0), Vec3::unit_y(), 0.0);
        assert!(r.stretch_ratio() <= 1.5 + 1e-9);
        assert!(r.velocity_raw().length() < 1e-9);
    }

    #[test]
    fn sample_curve_hits_grip_exactly() {
        let r = rod(10.0, ElasticProperties::new().with_grip_ratio(0.5));
        let samples = r.sample_curve(1001);
        assert_eq!(samples[500], r.query_normalized_position(0.5));
        assert_eq!(samples[500], r.landmarks().grip);
        assert_eq!(samples[1000], r.landmarks().tip);
    }

    #[test]
    fn diagnostics_at_rest() {
        let r = rod(10.0, ElasticProperties::new().with_grip_ratio(0.5));
        assert!(r.bend_angle().abs() < 1e-12);
        assert!((r.stretch_ratio() - 1.0).abs() < 1e-12);
    }
}
