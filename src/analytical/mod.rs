//! This module contains analytical solutions used as references in tests and verifications

mod elast_pressurized_cylinder;

pub use elast_pressurized_cylinder::*;
