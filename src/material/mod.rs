//! Implements the behavior contract, the built-in laws, the wrappers and the registry

mod behavior;
mod behavior_info;
mod linear_elastic;
mod registry;
mod saint_venant_kirchhoff;
mod tensor_mapping;
mod von_mises;
mod wrapper;
pub use crate::material::behavior::*;
pub use crate::material::behavior_info::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::registry::*;
pub use crate::material::saint_venant_kirchhoff::*;
pub(crate) use crate::material::tensor_mapping::*;
pub use crate::material::von_mises::*;
pub use crate::material::wrapper::*;
