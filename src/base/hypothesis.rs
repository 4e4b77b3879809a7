use crate::StrError;
use russell_tensor::SQRT_2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the modelling hypothesis under which a behavior is evaluated
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum Hypothesis {
    /// Full three-dimensional space
    Tridimensional,

    /// Plane strain (EZZ = 0)
    PlaneStrain,

    /// Generalised plane strain (uniform EZZ)
    GeneralisedPlaneStrain,

    /// Plane stress (SZZ = 0)
    PlaneStress,

    /// Axisymmetrical (components RR, ZZ, TT, RZ)
    Axisymmetrical,

    /// One-dimensional axisymmetrical generalised plane strain (components RR, ZZ, TT)
    AxisymmetricalGeneralisedPlaneStrain,
}

/// Holds all hypotheses (ordered as in the error messages and reports)
pub const ALL_HYPOTHESES: [Hypothesis; 6] = [
    Hypothesis::Tridimensional,
    Hypothesis::PlaneStrain,
    Hypothesis::GeneralisedPlaneStrain,
    Hypothesis::PlaneStress,
    Hypothesis::Axisymmetrical,
    Hypothesis::AxisymmetricalGeneralisedPlaneStrain,
];

impl Hypothesis {
    /// Returns the hypothesis corresponding to a name
    pub fn from_name(name: &str) -> Result<Self, StrError> {
        match name {
            "Tridimensional" => Ok(Hypothesis::Tridimensional),
            "PlaneStrain" => Ok(Hypothesis::PlaneStrain),
            "GeneralisedPlaneStrain" => Ok(Hypothesis::GeneralisedPlaneStrain),
            "PlaneStress" => Ok(Hypothesis::PlaneStress),
            "Axisymmetrical" => Ok(Hypothesis::Axisymmetrical),
            "AxisymmetricalGeneralisedPlaneStrain" => Ok(Hypothesis::AxisymmetricalGeneralisedPlaneStrain),
            _ => Err("unknown modelling hypothesis"),
        }
    }

    /// Returns the name of the hypothesis
    pub fn name(&self) -> &'static str {
        match self {
            Hypothesis::Tridimensional => "Tridimensional",
            Hypothesis::PlaneStrain => "PlaneStrain",
            Hypothesis::GeneralisedPlaneStrain => "GeneralisedPlaneStrain",
            Hypothesis::PlaneStress => "PlaneStress",
            Hypothesis::Axisymmetrical => "Axisymmetrical",
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain => "AxisymmetricalGeneralisedPlaneStrain",
        }
    }

    /// Returns the space dimension
    pub fn space_dimension(&self) -> usize {
        match self {
            Hypothesis::Tridimensional => 3,
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain => 1,
            _ => 2,
        }
    }

    /// Returns the number of components of a symmetric tensor
    pub fn stensor_size(&self) -> usize {
        match self {
            Hypothesis::Tridimensional => 6,
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain => 3,
            _ => 4,
        }
    }

    /// Returns the number of components of a non-symmetric tensor
    pub fn tensor_size(&self) -> usize {
        match self {
            Hypothesis::Tridimensional => 9,
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain => 3,
            _ => 5,
        }
    }

    /// Returns the suffixes of the components of a symmetric tensor
    pub fn stensor_suffixes(&self) -> &'static [&'static str] {
        match self {
            Hypothesis::Tridimensional => &["XX", "YY", "ZZ", "XY", "XZ", "YZ"],
            Hypothesis::Axisymmetrical => &["RR", "ZZ", "TT", "RZ"],
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain => &["RR", "ZZ", "TT"],
            _ => &["XX", "YY", "ZZ", "XY"],
        }
    }

    /// Returns the suffixes of the components of a non-symmetric tensor
    pub fn tensor_suffixes(&self) -> &'static [&'static str] {
        match self {
            Hypothesis::Tridimensional => &["XX", "YY", "ZZ", "XY", "YX", "XZ", "ZX", "YZ", "ZY"],
            Hypothesis::Axisymmetrical => &["RR", "ZZ", "TT", "RZ", "ZR"],
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain => &["RR", "ZZ", "TT"],
            _ => &["XX", "YY", "ZZ", "XY", "YX"],
        }
    }

    /// Returns the suffixes of the components of a vector
    pub fn vector_suffixes(&self) -> &'static [&'static str] {
        match self {
            Hypothesis::Tridimensional => &["X", "Y", "Z"],
            Hypothesis::Axisymmetrical => &["R", "Z"],
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain => &["R"],
            _ => &["X", "Y"],
        }
    }

    /// Returns the index of the out-of-plane (ZZ) component constrained by the hypothesis, if any
    ///
    /// Plane strain fixes this gradient component; the other hypotheses leave it free.
    pub fn constrained_out_of_plane_component(&self) -> Option<usize> {
        match self {
            Hypothesis::PlaneStrain => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns the factor converting the tensor value of a symmetric tensor component to its Mandel value
///
/// The shear components (index ≥ 3) carry the √2 factor.
#[inline]
pub fn mandel_factor(component: usize) -> f64 {
    if component >= 3 {
        SQRT_2
    } else {
        1.0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
