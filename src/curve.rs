//! Shape reconstruction: taper-aware cubic Bezier from handle to tip.

use crate::float::Float;
use crate::vec::{Vec, Vec3};

/// Cubic Bezier describing the active (beyond-the-grip) part of the rod.
///
/// `p0` is the handle and `p3` the tip. `p1` leaves the handle along the
/// handle direction so the blade is tangent to the grip; `p2` approaches the
/// tip from a blend of the chord and the handle direction. Taper pushes more
/// of the curvature toward the base.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BladeCurve<F: Float> {
    pub p0: Vec3<F>,
    pub p1: Vec3<F>,
    pub p2: Vec3<F>,
    pub p3: Vec3<F>,
}

impl<F: Float> BladeCurve<F> {
    pub fn new(
        handle_pos: Vec3<F>,
        handle_dir: Vec3<F>,
        tip_pos: Vec3<F>,
        active_length: F,
        taper: F,
    ) -> Self {
        let handle_weight = F::from_f64(0.33) + taper * F::from_f64(0.4);
        let tip_weight = F::from_f64(0.33) - taper * F::from_f64(0.1);

        let p0 = handle_pos;
        let p3 = tip_pos;
        let p1 = p0 + handle_dir.scale(active_length * handle_weight);
        let approach = ((p3 - p0).normalize().scale(-F::one()) + handle_dir.scale(F::half())).normalize();
        let p2 = p3 + approach.scale(active_length * tip_weight);

        BladeCurve { p0, p1, p2, p3 }
    }

    /// Point at `s` in [0, 1], with `s = 0` at the handle and `s = 1` at the tip.
    pub fn evaluate(&self, s: F) -> Vec3<F> {
        let u = F::one() - s;
        let three = F::from_f64(3.0);
        self.p0.scale(u * u * u)
            + self.p1.scale(three * u * u * s)
            + self.p2.scale(three * u * s * s)
            + self.p3.scale(s * s * s)
    }
}

/// Point on the rigid pommel behind the pivot, for `t < grip_ratio`.
pub fn pommel_point<F: Float>(
    handle_pos: Vec3<F>,
    handle_dir: Vec3<F>,
    length: F,
    grip_ratio: F,
    t: F,
) -> Vec3<F> {
    if grip_ratio == F::zero() {
        return handle_pos;
    }
    handle_pos - handle_dir.scale((grip_ratio - t) * length)
}
