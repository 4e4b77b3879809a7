//! Implements the base structures: options, errors, evolutions and modelling hypotheses

mod config;
mod constants;
mod enums;
mod error;
mod evolution;
mod hypothesis;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::error::*;
pub use crate::base::evolution::*;
pub use crate::base::hypothesis::*;
