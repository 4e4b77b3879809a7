use serde::{Deserialize, Serialize};

/// Defines the kinematic assumption of a behavior
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum Kinematic {
    /// Small strain: the gradient is the linearized strain and the force is the stress
    SmallStrain,

    /// Finite strain: the gradient is the deformation gradient and the force is the Cauchy stress
    FiniteStrain,

    /// Generic driving variables with one force per gradient component
    Generic,
}

/// Defines the type of a variable
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum VariableType {
    /// Scalar value
    Scalar,

    /// Vector with one component per space dimension
    Vector,

    /// Symmetric second order tensor (Mandel representation)
    Stensor,

    /// Non-symmetric second order tensor
    Tensor,
}

/// Defines the kind of stiffness operator requested from a behavior
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum StiffnessType {
    /// Only the forces and internal variables are requested
    NoStiffness,

    /// Elastic operator
    Elastic,

    /// Secant operator
    Secant,

    /// Consistent tangent operator
    ConsistentTangent,
}

/// Defines how the unknowns are predicted at the beginning of a step
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum PredictionPolicy {
    /// Start from the values at the beginning of the step
    None,

    /// Extrapolate using the increment of the previous step
    LinearPrediction,

    /// Solve once with the elastic operator
    ElasticPrediction,

    /// Solve once with the secant operator
    SecantPrediction,
}

impl PredictionPolicy {
    /// Returns the stiffness operator needed by the prediction, if any
    pub fn stiffness(&self) -> Option<StiffnessType> {
        match self {
            PredictionPolicy::ElasticPrediction => Some(StiffnessType::Elastic),
            PredictionPolicy::SecantPrediction => Some(StiffnessType::Secant),
            _ => None,
        }
    }
}

/// Defines the verbosity level
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Verbosity {
    /// Prints nothing
    Quiet,

    /// Prints time steps
    Level1,

    /// Prints time steps and iterations
    Level2,

    /// Prints everything, including the per-iteration norms sent to the logger
    Debug,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{PredictionPolicy, StiffnessType, Verbosity};

    #[test]
    fn prediction_stiffness_works() {
        assert_eq!(PredictionPolicy::None.stiffness(), None);
        assert_eq!(PredictionPolicy::LinearPrediction.stiffness(), None);
        assert_eq!(
            PredictionPolicy::ElasticPrediction.stiffness(),
            Some(StiffnessType::Elastic)
        );
        assert_eq!(PredictionPolicy::SecantPrediction.stiffness(), Some(StiffnessType::Secant));
    }

    #[test]
    fn verbosity_is_ordered() {
        assert!(Verbosity::Quiet < Verbosity::Level1);
        assert!(Verbosity::Level2 >= Verbosity::Level1);
        assert!(Verbosity::Debug > Verbosity::Level2);
    }

    #[test]
    fn serialize_works() {
        let json = serde_json::to_string(&PredictionPolicy::ElasticPrediction).unwrap();
        assert_eq!(json, "\"ElasticPrediction\"");
        let policy: PredictionPolicy = serde_json::from_str("\"SecantPrediction\"").unwrap();
        assert_eq!(policy, PredictionPolicy::SecantPrediction);
    }
}
