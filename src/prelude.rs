//! Makes available common structures needed to run a simulation
//!
//! You may write `use mptest::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Config, Evolution, Hypothesis, Kinematic, PredictionPolicy, SimError, StiffnessType, Verbosity};
pub use crate::base::{DEFAULT_TEST_DIR, INTERFACE_GENERIC, INTERFACE_LEGACY, SMALL_STRAIN_TRIDIMENSIONAL_WRAPPER};
pub use crate::driver::{AxialLoading, ElementType, PipeDriver, PipeLoading, PipeMesh, PipeOutput, RadialLoading};
pub use crate::driver::{History, PipeHistory, PointDriver, PointLoading};
pub use crate::material::{Behavior, BehaviorInfo, BehaviorRegistry, IntegrationStatus};
pub use crate::material::{LinearElasticity, SaintVenantKirchhoff, VonMisesPlasticity};
pub use crate::solver::{LocalStepState, StepReport};
