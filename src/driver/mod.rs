//! Implements the drivers: single material point and pipe under pressure

mod output;
mod pipe_driver;
mod pipe_loading;
mod pipe_mesh;
mod point_driver;
mod point_loading;
mod structure_state;
pub use crate::driver::output::*;
pub use crate::driver::pipe_driver::*;
pub use crate::driver::pipe_loading::*;
pub use crate::driver::pipe_mesh::*;
pub use crate::driver::point_driver::*;
pub use crate::driver::point_loading::*;
pub use crate::driver::structure_state::*;
