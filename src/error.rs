//! Error types for rod configuration.
//!
//! The simulator itself never fails: out-of-range values degrade numerically
//! instead. These errors are only produced by the opt-in
//! [`ElasticProperties::validate`](crate::config::ElasticProperties::validate)
//! and [`validate_length`](crate::config::validate_length) checks.

use core::fmt;

/// A rod parameter outside its documented domain. Carries the rejected value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// Stiffness must be positive and finite.
    InvalidStiffness(f64),
    /// Damping must be non-negative and finite.
    InvalidDamping(f64),
    /// Mass must be positive and finite.
    InvalidMass(f64),
    /// Stretch factor must be positive and finite.
    InvalidStretchFactor(f64),
    /// Grip ratio must be in [0, 1).
    InvalidGripRatio(f64),
    /// Max stretch ratio must be at least 1.
    InvalidMaxStretchRatio(f64),
    /// Max bend angle must be in (0, 180] degrees.
    InvalidMaxBendAngle(f64),
    /// Taper must be in [0, 1].
    InvalidTaper(f64),
    /// Rod length must be positive and finite.
    InvalidLength(f64),
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::InvalidStiffness(v) => {
                write!(f, "stiffness must be positive and finite (got {})", v)
            }
            PropertyError::InvalidDamping(v) => {
                write!(f, "damping must be non-negative and finite (got {})", v)
            }
            PropertyError::InvalidMass(v) => write!(f, "mass must be positive and finite (got {})", v),
            PropertyError::InvalidStretchFactor(v) => {
                write!(f, "stretch factor must be positive and finite (got {})", v)
            }
            PropertyError::InvalidGripRatio(v) => write!(f, "grip ratio must be in [0, 1) (got {})", v),
            PropertyError::InvalidMaxStretchRatio(v) => {
                write!(f, "max stretch ratio must be >= 1 (got {})", v)
            }
            PropertyError::InvalidMaxBendAngle(v) => {
                write!(f, "max bend angle must be in (0, 180] degrees (got {})", v)
            }
            PropertyError::InvalidTaper(v) => write!(f, "taper must be in [0, 1] (got {})", v),
            PropertyError::InvalidLength(v) => write!(f, "length must be positive and finite (got {})", v),
        }
    }
}

impl core::error::Error for PropertyError {}
