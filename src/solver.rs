//! Single sub-step of the rod tip: bending spring, Verlet step, then constraints.

use crate::config::ElasticProperties;
use crate::constraint::{BendConeConstraint, Constraint, LengthConstraint, StretchConstraint};
use crate::float::Float;
use crate::observer::RodObserver;
use crate::tip::TipState;
use crate::vec::{Vec, Vec3};

/// Fixed number of sub-steps per advance.
pub const SUB_STEPS: usize = 8;

/// Active lengths below this are not simulated; the tip is pinned to the handle.
pub const DEGENERATE_ACTIVE_LENGTH: f64 = 0.1;

/// Floor applied to the tip mass before dividing by it.
pub const MIN_MASS: f64 = 0.1;

/// Everything a sub-step reads, fixed for the duration of one advance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SubStepParams<F: Float> {
    pub handle_pos: Vec3<F>,
    /// Unit handle direction.
    pub handle_dir: Vec3<F>,
    pub active_length: F,
    pub properties: ElasticProperties<F>,
}

impl<F: Float> SubStepParams<F> {
    pub fn new(
        handle_pos: Vec3<F>,
        handle_dir: Vec3<F>,
        active_length: F,
        properties: ElasticProperties<F>,
    ) -> Self {
        SubStepParams { handle_pos, handle_dir, active_length, properties }
    }

    /// Where the tip would sit if the rod were perfectly rigid.
    pub fn ideal_tip(&self) -> Vec3<F> {
        self.handle_pos + self.handle_dir.scale(self.active_length)
    }

    /// Constraints in solve order: soft length, bend cone, max stretch.
    pub fn constraints(&self) -> [Constraint<F>; 3] {
        let [bend, stretch] = self.hard_limits();
        let length = LengthConstraint::new(self.active_length, self.properties.stretch_factor);
        [Constraint::Length(length), bend, stretch]
    }

    /// The two hard limits, bend cone then max stretch.
    pub fn hard_limits(&self) -> [Constraint<F>; 2] {
        let p = &self.properties;
        [
            Constraint::BendCone(BendConeConstraint::new(p.max_bend_angle)),
            Constraint::Stretch(StretchConstraint::new(self.active_length * p.max_stretch_ratio)),
        ]
    }

    /// Per-step velocity retention, `max(0, 1 - damping * dt)`.
    pub fn drag(&self, dt: F) -> F {
        (F::one() - self.properties.damping * dt).max(F::zero())
    }

    /// Spring acceleration pulling `pos` toward the ideal tip.
    pub fn spring_acceleration(&self, pos: Vec3<F>) -> Vec3<F> {
        let displacement = self.ideal_tip() - pos;
        let force = displacement.scale(self.properties.effective_stiffness());
        force.scale(F::one() / self.properties.effective_mass())
    }
}

/// Advance `tip` by one sub-step of `dt`.
///
/// Order is fixed: spring force, Verlet position update, soft length
/// correction, bend cone clamp, stretch clamp. Later stages may disturb
/// earlier ones; that residual is left for the next sub-step.
pub fn step_once<F: Float, O: RodObserver>(
    tip: TipState<Vec3<F>>,
    params: &SubStepParams<F>,
    dt: F,
    observer: &mut O,
) -> TipState<Vec3<F>> {
    let damped_velocity = tip.velocity_raw().scale(params.drag(dt));
    let acceleration = params.spring_acceleration(tip.pos);
    let mut next = tip.pos + damped_velocity + acceleration.scale(dt * dt);

    for constraint in params.constraints().iter() {
        let correction = constraint.solve(params.handle_pos, params.handle_dir, next, dt);
        if correction.active {
            observer.on_constraint(constraint.kind());
        }
        next = correction.position;
    }

    tip.commit(next)
}

/// Apply only the hard limits to `tip`, without integrating.
///
/// Used when no time passes but the handle may have moved. `prev_pos` is
/// shifted along with `pos`, so the implicit velocity is unchanged.
pub fn enforce_limits<F: Float, O: RodObserver>(
    tip: TipState<Vec3<F>>,
    params: &SubStepParams<F>,
    observer: &mut O,
) -> TipState<Vec3<F>> {
    let mut pos = tip.pos;
    for constraint in params.hard_limits().iter() {
        let correction = constraint.solve(params.handle_pos, params.handle_dir, pos, F::zero());
        if correction.active {
            observer.on_constraint(constraint.kind());
        }
        pos = correction.position;
    }
    let shift = pos - tip.pos;
    TipState { pos, prev_pos: tip.prev_pos + shift }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ConstraintKind;
    use crate::observer::NoOpRodObserver;

    fn params(props: ElasticProperties<f64>) -> SubStepParams<f64> {
        SubStepParams::new(Vec3::zero(), Vec3::unit_y(), 10.0, props)
    }

    #[derive(Default)]
    struct Hits {
        bend: usize,
        stretch: usize,
    }

    impl RodObserver for Hits {
        fn on_constraint(&mut self, kind: ConstraintKind) {
            match kind {
                ConstraintKind::Bend => self.bend += 1,
                ConstraintKind::Stretch => self.stretch += 1,
                ConstraintKind::Length => {}
            }
        }
    }

    #[test]
    fn tip_at_ideal_stays_put() {
        let p = params(ElasticProperties::new());
        let tip = TipState::at_rest(p.ideal_tip());
        let next = step_once(tip, &p, 1.0 / 480.0, &mut NoOpRodObserver);
        assert!(next.pos.distance(p.ideal_tip()) < 1e-12);
        assert_eq!(next.prev_pos, tip.pos);
    }

    #[test]
    fn drag_never_negative() {
        let p = params(ElasticProperties::new().with_damping(1000.0));
        assert_eq!(p.drag(1.0), 0.0);
        let p = params(ElasticProperties::new().with_damping(0.0));
        assert_eq!(p.drag(1.0), 1.0);
    }

    #[test]
    fn heavy_damping_zeroes_velocity() {
        let p = params(ElasticProperties::new().with_damping(1.0e6).with_stiffness(1e-9));
        let tip = TipState { pos: p.ideal_tip(), prev_pos: p.ideal_tip() - Vec3::new(1.0, 0.0, 0.0) };
        let next = step_once(tip, &p, 0.01, &mut NoOpRodObserver);
        assert!(next.pos.distance(p.ideal_tip()) < 1e-6);
    }

    #[test]
    fn stretch_cap_reported() {
        let p = params(ElasticProperties::new().with_stretch_factor(1e-6));
        let far = Vec3::new(0.0, 100.0, 0.0);
        let mut hits = Hits::default();
        let next = step_once(TipState::at_rest(far), &p, 1.0 / 480.0, &mut hits);
        assert_eq!(hits.stretch, 1);
        assert!(next.pos.length() <= 15.0 + 1e-9);
    }

    #[test]
    fn bend_cone_reported() {
        let p = params(ElasticProperties::new().with_max_bend_angle(30.0));
        let sideways = Vec3::new(10.0, 0.0, 0.0);
        let mut hits = Hits::default();
        let next = step_once(TipState::at_rest(sideways), &p, 1.0 / 480.0, &mut hits);
        assert_eq!(hits.bend, 1);
        let angle = Vec3::unit_y().angle_between(next.pos);
        assert!(angle <= 30.0f64.to_radians() + 1e-9);
    }

    #[test]
    fn limits_without_time_keep_velocity() {
        let p = params(ElasticProperties::new().with_max_bend_angle(30.0));
        let tip = TipState { pos: Vec3::new(0.0, -100.0, 0.0), prev_pos: Vec3::new(0.0, -101.0, 0.0) };
        let mut hits = Hits::default();
        let next = enforce_limits(tip, &p, &mut hits);
        assert_eq!(hits.bend, 1);
        assert_eq!(hits.stretch, 1);
        assert!(next.pos.length() <= 15.0 + 1e-9);
        assert!(Vec3::unit_y().angle_between(next.pos) <= 30.0f64.to_radians() + 1e-9);
        assert!(next.velocity_raw().distance(tip.velocity_raw()) < 1e-9);
    }

    #[test]
    fn limits_leave_rest_pose_alone() {
        let p = params(ElasticProperties::new());
        let tip = TipState::at_rest(p.ideal_tip());
        let mut hits = Hits::default();
        assert_eq!(enforce_limits(tip, &p, &mut hits), tip);
        assert_eq!(hits.bend + hits.stretch, 0);
    }
}
