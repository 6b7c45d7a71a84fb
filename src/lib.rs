//! Elastic rod simulation for whips, blades and fishing rods.
//!
//! `flexrod` simulates a single flexible rod whose free end follows a driven
//! handle with spring-like lag. One elastic tip point is advanced with Verlet
//! integration and pulled toward the rigid pose by a bending spring; a soft
//! axial-length correction and two hard limits (bend cone, max stretch) keep
//! it believable. The rod's shape is reconstructed as a taper-aware cubic
//! Bezier that can be sampled at any resolution.
//!
//! # Features
//!
//! - **Verlet tip**: implicit velocity, explicit damping, 8 fixed sub-steps per advance
//! - **Constraints**: soft length relaxation, slerp-based bend cone, radial stretch cap
//! - **Shape queries**: pommel extension behind the grip, Bezier blade beyond it
//! - **Observable**: monitor sub-steps and constraint hits via the `RodObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod tip;
pub mod constraint;
pub mod solver;
pub mod curve;
pub mod rod;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use tip::TipState;
pub use constraint::{
    BendConeConstraint, Constraint, ConstraintKind, Correction, LengthConstraint, StretchConstraint,
};
pub use solver::{enforce_limits, step_once, SubStepParams, SUB_STEPS};
pub use curve::BladeCurve;
pub use rod::{Landmarks, Rod};
pub use config::ElasticProperties;
pub use observer::{NoOpRodObserver, RodObserver};
pub use error::PropertyError;
