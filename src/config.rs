//! Material configuration for an elastic rod.

use crate::error::PropertyError;
use crate::float::Float;

/// Elastic material parameters of a rod.
///
/// Every field always holds a usable value; defaults are applied once here
/// rather than inside the update loop. The simulator reads these as-is and
/// never rejects them, see [`ElasticProperties::validate`] for an opt-in check.
///
/// # Builder Pattern
/// ```
/// use flexrod::config::ElasticProperties;
///
/// let props: ElasticProperties<f32> = ElasticProperties::new()
///     .with_stiffness(12.0)
///     .with_damping(4.0)
///     .with_grip_ratio(0.2)
///     .with_max_bend_angle(60.0);
/// assert!(props.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElasticProperties<F: Float> {
    /// Bending spring constant pulling the tip toward the rigid pose. Default: 8.
    pub stiffness: F,
    /// Per-step velocity attenuation rate. Default: 2.5.
    pub damping: F,
    /// Effective tip mass, floored at [`MIN_MASS`](crate::solver::MIN_MASS). Default: 2.
    pub mass: F,
    /// Strength of the soft axial-length correction. Default: 20.
    pub stretch_factor: F,
    /// Fraction of the total length behind the pivot (rigid pommel). Default: 0.
    pub grip_ratio: F,
    /// Hard cap on tip distance divided by active length. Default: 1.5.
    pub max_stretch_ratio: F,
    /// Hard cap on the handle/tip angle, in degrees. 180 disables it. Default: 180.
    pub max_bend_angle: F,
    /// Bias of stiffness and curvature toward the base, in [0, 1]. Default: 0.
    pub taper: F,
}

impl<F: Float> ElasticProperties<F> {
    /// Create properties with the default material.
    pub fn new() -> Self {
        ElasticProperties {
            stiffness: F::from_f64(8.0),
            damping: F::from_f64(2.5),
            mass: F::two(),
            stretch_factor: F::from_f64(20.0),
            grip_ratio: F::zero(),
            max_stretch_ratio: F::from_f64(1.5),
            max_bend_angle: F::from_f64(180.0),
            taper: F::zero(),
        }
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_stretch_factor(mut self, stretch_factor: F) -> Self {
        self.stretch_factor = stretch_factor;
        self
    }

    pub fn with_grip_ratio(mut self, grip_ratio: F) -> Self {
        self.grip_ratio = grip_ratio;
        self
    }

    pub fn with_max_stretch_ratio(mut self, max_stretch_ratio: F) -> Self {
        self.max_stretch_ratio = max_stretch_ratio;
        self
    }

    /// Set the bend limit in degrees.
    pub fn with_max_bend_angle(mut self, degrees: F) -> Self {
        self.max_bend_angle = degrees;
        self
    }

    pub fn with_taper(mut self, taper: F) -> Self {
        self.taper = taper;
        self
    }

    /// Portion of `length` beyond the grip point.
    pub fn active_length(&self, length: F) -> F {
        length * (F::one() - self.grip_ratio)
    }

    /// Bending stiffness after the taper boost (`1 + taper / 2`).
    pub fn effective_stiffness(&self) -> F {
        self.stiffness * (F::one() + self.taper * F::half())
    }

    /// Mass floored so the spring acceleration never divides by zero.
    pub fn effective_mass(&self) -> F {
        self.mass.max(F::from_f64(crate::solver::MIN_MASS))
    }

    /// Check every field against its documented domain.
    ///
    /// The simulator does not call this; it exists for configuration layers
    /// that want to reject bad input before it reaches a [`Rod`](crate::Rod).
    pub fn validate(&self) -> Result<(), PropertyError> {
        let zero = F::zero();
        let one = F::one();
        if !(self.stiffness.is_finite() && self.stiffness > zero) {
            return Err(PropertyError::InvalidStiffness(self.stiffness.to_f64()));
        }
        if !(self.damping.is_finite() && self.damping >= zero) {
            return Err(PropertyError::InvalidDamping(self.damping.to_f64()));
        }
        if !(self.mass.is_finite() && self.mass > zero) {
            return Err(PropertyError::InvalidMass(self.mass.to_f64()));
        }
        if !(self.stretch_factor.is_finite() && self.stretch_factor > zero) {
            return Err(PropertyError::InvalidStretchFactor(self.stretch_factor.to_f64()));
        }
        if !(self.grip_ratio >= zero && self.grip_ratio < one) {
            return Err(PropertyError::InvalidGripRatio(self.grip_ratio.to_f64()));
        }
        if !(self.max_stretch_ratio.is_finite() && self.max_stretch_ratio >= one) {
            return Err(PropertyError::InvalidMaxStretchRatio(self.max_stretch_ratio.to_f64()));
        }
        if !(self.max_bend_angle > zero && self.max_bend_angle <= F::from_f64(180.0)) {
            return Err(PropertyError::InvalidMaxBendAngle(self.max_bend_angle.to_f64()));
        }
        if !(self.taper >= zero && self.taper <= one) {
            return Err(PropertyError::InvalidTaper(self.taper.to_f64()));
        }
        Ok(())
    }
}

impl<F: Float> Default for ElasticProperties<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a rod length: positive and finite.
pub fn validate_length<F: Float>(length: F) -> Result<(), PropertyError> {
    if length.is_finite() && length > F::zero() {
        Ok(())
    } else {
        Err(PropertyError::InvalidLength(length.to_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_material() {
        let p: ElasticProperties<f64> = ElasticProperties::default();
        assert_eq!(p.stiffness, 8.0);
        assert_eq!(p.damping, 2.5);
        assert_eq!(p.mass, 2.0);
        assert_eq!(p.stretch_factor, 20.0);
        assert_eq!(p.grip_ratio, 0.0);
        assert_eq!(p.max_stretch_ratio, 1.5);
        assert_eq!(p.max_bend_angle, 180.0);
        assert_eq!(p.taper, 0.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn taper_raises_effective_stiffness() {
        let p = ElasticProperties::<f64>::new().with_stiffness(10.0).with_taper(1.0);
        assert!((p.effective_stiffness() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn mass_is_floored() {
        let p = ElasticProperties::<f64>::new().with_mass(0.0);
        assert!((p.effective_mass() - 0.1).abs() < 1e-7);
        let p = ElasticProperties::<f64>::new().with_mass(-3.0);
        assert!((p.effective_mass() - 0.1).abs() < 1e-7);
    }

    #[test]
    fn active_length_excludes_grip() {
        let p = ElasticProperties::<f64>::new().with_grip_ratio(0.25);
        assert!((p.active_length(100.0) - 75.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_out_of_domain() {
        let base = ElasticProperties::<f64>::new();
        assert_eq!(
            base.with_stiffness(0.0).validate(),
            Err(PropertyError::InvalidStiffness(0.0))
        );
        assert_eq!(
            base.with_damping(-1.0).validate(),
            Err(PropertyError::InvalidDamping(-1.0))
        );
        assert_eq!(base.with_grip_ratio(1.0).validate(), Err(PropertyError::InvalidGripRatio(1.0)));
        assert_eq!(
            base.with_max_stretch_ratio(0.5).validate(),
            Err(PropertyError::InvalidMaxStretchRatio(0.5))
        );
        assert_eq!(
            base.with_max_bend_angle(0.0).validate(),
            Err(PropertyError::InvalidMaxBendAngle(0.0))
        );
        assert_eq!(base.with_taper(1.5).validate(), Err(PropertyError::InvalidTaper(1.5)));
        assert!(matches!(
            base.with_mass(f64::NAN).validate(),
            Err(PropertyError::InvalidMass(_))
        ));
    }

    #[test]
    fn length_check() {
        assert!(validate_length(1.0f32).is_ok());
        assert_eq!(validate_length(0.0f64), Err(PropertyError::InvalidLength(0.0)));
    }
}
