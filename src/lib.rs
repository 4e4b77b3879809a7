//! Material point and pipe test drivers for constitutive laws
//!
//! This crate drives a material behavior (a constitutive law mapping a strain history and an
//! internal state to stresses) through an imposed loading history. Two drivers are available:
//!
//! * [crate::driver::PointDriver] verifies a behavior at a single material point under imposed
//!   stress or strain components
//! * [crate::driver::PipeDriver] solves the equilibrium of a pipe cross-section discretized by
//!   one-dimensional radial elements under imposed pressures and axial conditions

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod analytical;
pub mod base;
pub mod driver;
pub mod material;
pub mod prelude;
pub mod solver;
