//! Position-based constraints acting on the rod tip: soft length, bend cone, max stretch.
//!
//! Every constraint looks at the tip relative to the handle (the anchor) and
//! returns a corrected position. They are applied in a fixed order by the
//! solver and each may reintroduce a small error in an earlier one; the next
//! sub-step relaxes it again.

use crate::float::Float;
use crate::vec::{Vec, Vec3};

/// Bend limits at or above this many degrees disable the bend cone.
pub const UNCONSTRAINED_BEND_DEGREES: f64 = 179.9;

/// Below this tip distance the soft length correction is skipped.
pub const MIN_CORRECTION_LENGTH: f64 = 1e-4;

/// Below this angle (radians) the bend clamp has nothing to rotate.
pub const MIN_BEND_ANGLE: f64 = 0.001;

/// Which constraint engaged, reported to observers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Length,
    Bend,
    Stretch,
}

/// Result of solving one constraint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Correction<F: Float> {
    /// Tip position after the constraint.
    pub position: Vec3<F>,
    /// Whether the constraint moved the tip.
    pub active: bool,
}

impl<F: Float> Correction<F> {
    fn untouched(position: Vec3<F>) -> Self {
        Correction { position, active: false }
    }

    fn moved(position: Vec3<F>) -> Self {
        Correction { position, active: true }
    }
}

/// A constraint that can be applied to the rod tip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Constraint<F: Float> {
    Length(LengthConstraint<F>),
    BendCone(BendConeConstraint<F>),
    Stretch(StretchConstraint<F>),
}

impl<F: Float> Constraint<F> {
    /// Apply the constraint to `pos`, given the handle pose and sub-step `dt`.
    pub fn solve(&self, anchor: Vec3<F>, axis: Vec3<F>, pos: Vec3<F>, dt: F) -> Correction<F> {
        match self {
            Constraint::Length(c) => c.solve(anchor, pos, dt),
            Constraint::BendCone(c) => c.solve(anchor, axis, pos),
            Constraint::Stretch(c) => c.solve(anchor, pos),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Length(_) => ConstraintKind::Length,
            Constraint::BendCone(_) => ConstraintKind::Bend,
            Constraint::Stretch(_) => ConstraintKind::Stretch,
        }
    }
}

/// Soft axial-length relaxation toward the rest length.
///
/// Strength per step is `stretch_factor * 0.05 * dt`, clamped to [0, 1] so a
/// single step never overshoots past full correction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LengthConstraint<F: Float> {
    pub rest_length: F,
    pub stretch_factor: F,
}

impl<F: Float> LengthConstraint<F> {
    pub fn new(rest_length: F, stretch_factor: F) -> Self {
        LengthConstraint { rest_length, stretch_factor }
    }

    /// Relaxation factor for a step of `dt`.
    pub fn alpha(&self, dt: F) -> F {
        (self.stretch_factor * F::from_f64(0.05) * dt).clamp(F::zero(), F::one())
    }

    pub fn solve(&self, anchor: Vec3<F>, pos: Vec3<F>, dt: F) -> Correction<F> {
        let to_anchor = pos - anchor;
        let current = to_anchor.length();
        if current <= F::from_f64(MIN_CORRECTION_LENGTH) {
            return Correction::untouched(pos);
        }
        let corrected = current.lerp(self.rest_length, self.alpha(dt));
        Correction {
            position: anchor + to_anchor.normalize().scale(corrected),
            active: corrected != current,
        }
    }
}

/// Hard limit on the angle between the handle axis and the tip direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BendConeConstraint<F: Float> {
    /// Cone half-angle in degrees.
    pub max_angle: F,
}

impl<F: Float> BendConeConstraint<F> {
    pub fn new(max_angle_degrees: F) -> Self {
        BendConeConstraint { max_angle: max_angle_degrees }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.max_angle >= F::from_f64(UNCONSTRAINED_BEND_DEGREES)
    }

    /// Rotate the tip back onto the cone boundary, keeping its distance.
    pub fn solve(&self, anchor: Vec3<F>, axis: Vec3<F>, pos: Vec3<F>) -> Correction<F> {
        if self.is_unconstrained() {
            return Correction::untouched(pos);
        }
        let offset = pos - anchor;
        let tip_dist = offset.length();
        let tip_dir = offset.normalize();
        let max_rad = self.max_angle.to_radians();
        let cos_angle = tip_dir.dot(axis);
        if cos_angle >= max_rad.cos() {
            return Correction::untouched(pos);
        }
        let one = F::one();
        let current_angle = cos_angle.clamp(-one, one).acos();
        if current_angle <= F::from_f64(MIN_BEND_ANGLE) {
            return Correction::untouched(pos);
        }
        let clamped = slerp_unit(axis, tip_dir, max_rad / current_angle, current_angle);
        tracing::trace!(angle = ?current_angle, limit = ?max_rad, "bend cone engaged");
        Correction::moved(anchor + clamped.scale(tip_dist))
    }
}

/// Hard cap on the tip's distance from the handle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StretchConstraint<F: Float> {
    pub max_length: F,
}

impl<F: Float> StretchConstraint<F> {
    pub fn new(max_length: F) -> Self {
        StretchConstraint { max_length }
    }

    pub fn solve(&self, anchor: Vec3<F>, pos: Vec3<F>) -> Correction<F> {
        let offset = pos - anchor;
        let dist = offset.length();
        if dist > self.max_length {
            tracing::trace!(dist = ?dist, limit = ?self.max_length, "stretch cap engaged");
            Correction::moved(anchor + offset.normalize().scale(self.max_length))
        } else {
            Correction::untouched(pos)
        }
    }
}

/// Great-circle interpolation from unit vector `from` toward unit vector `to`.
///
/// `theta` is the angle between them and `t` the fraction of it to travel.
/// Uses the two-weight form `from * sin((1-t)θ)/sinθ + to * sin(tθ)/sinθ`.
/// When `from` and `to` are nearly opposite the great circle is undefined;
/// the rotation then happens in the plane of `from` and a perpendicular axis.
pub fn slerp_unit<F: Float>(from: Vec3<F>, to: Vec3<F>, t: F, theta: F) -> Vec3<F> {
    let sin_theta = theta.sin();
    if sin_theta.is_near_zero(F::from_f64(1e-6)) {
        let perp = perpendicular(from);
        let angle = t * theta;
        return from.scale(angle.cos()) + perp.scale(angle.sin());
    }
    let w1 = ((F::one() - t) * theta).sin() / sin_theta;
    let w2 = (t * theta).sin() / sin_theta;
    (from.scale(w1) + to.scale(w2)).normalize()
}

/// Some unit vector perpendicular to `v`.
fn perpendicular<F: Float>(v: Vec3<F>) -> Vec3<F> {
    let reference = if v.x.abs() < F::from_f64(0.9) { Vec3::unit_x() } else { Vec3::unit_y() };
    (reference - v.scale(reference.dot(v))).normalize()
}
