//! Implements the local solver: state, workspace, Newton iterations and sub-stepping

mod acceleration;
mod control_convergence;
mod current_state;
mod local_integrator;
mod substepping;
mod workspace;
pub use crate::solver::acceleration::*;
pub use crate::solver::control_convergence::*;
pub use crate::solver::current_state::*;
pub use crate::solver::local_integrator::*;
pub use crate::solver::substepping::*;
pub use crate::solver::workspace::*;
