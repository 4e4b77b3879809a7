use crate::base::{mandel_factor, Hypothesis, Kinematic, VariableType};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Describes a variable of a behavior
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VariableDescription {
    /// Name (e.g. ElasticStrain)
    pub name: String,

    /// Type of the variable
    pub vtype: VariableType,
}

/// Holds the lower and upper bounds of a variable
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Bounds {
    /// Lower bound, if any
    pub lower: Option<f64>,

    /// Upper bound, if any
    pub upper: Option<f64>,
}

impl Bounds {
    /// Returns true if the value lies within the bounds
    pub fn contains(&self, value: f64) -> bool {
        let above = match self.lower {
            Some(lower) => value >= lower,
            None => true,
        };
        let below = match self.upper {
            Some(upper) => value <= upper,
            None => true,
        };
        above && below
    }
}

/// Holds the result of a bounds check
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoundsCheck {
    /// The value satisfies all bounds
    Within,

    /// The value violates the numerical (validity range) bounds only
    OutOfNumericalBounds,

    /// The value violates the physical bounds
    OutOfPhysicalBounds,
}

/// Holds the immutable description of a behavior
///
/// The description specifies the layout of every buffer passed to
/// [crate::material::Behavior::integrate] and is used to validate the loading before solving.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BehaviorInfo {
    /// Name of the law
    pub name: String,

    /// Modelling hypothesis
    pub hypothesis: Hypothesis,

    /// Kinematic assumption
    pub kinematic: Kinematic,

    /// Driving variables (gradients)
    pub gradients: Vec<VariableDescription>,

    /// Thermodynamic forces conjugated to the gradients
    pub forces: Vec<VariableDescription>,

    /// Names of the material properties
    pub material_properties: Vec<String>,

    /// Internal state variables
    pub internal_state_variables: Vec<VariableDescription>,

    /// Names of the external state variables (scalars)
    pub external_state_variables: Vec<String>,

    /// Parameters (name and value)
    pub parameters: Vec<(String, f64)>,

    /// Indicates that the law computes the consistent tangent operator
    pub consistent_tangent: bool,

    /// Hypotheses supported by the law
    pub supported_hypotheses: Vec<Hypothesis>,

    /// Numerical bounds (validity range) by variable name
    numerical_bounds: HashMap<String, Bounds>,

    /// Physical bounds by variable name
    physical_bounds: HashMap<String, Bounds>,
}

impl BehaviorInfo {
    /// Allocates a new description
    ///
    /// The gradients and forces are set according to the kinematic assumption:
    ///
    /// * SmallStrain: Strain (symmetric tensor) and Stress (symmetric tensor)
    /// * FiniteStrain: DeformationGradient (tensor) and CauchyStress (symmetric tensor)
    /// * Generic: none; use [BehaviorInfo::add_gradient] to declare them
    pub fn new(name: &str, hypothesis: Hypothesis, kinematic: Kinematic) -> Self {
        let (gradients, forces) = match kinematic {
            Kinematic::SmallStrain => (
                vec![VariableDescription::new("Strain", VariableType::Stensor)],
                vec![VariableDescription::new("Stress", VariableType::Stensor)],
            ),
            Kinematic::FiniteStrain => (
                vec![VariableDescription::new("DeformationGradient", VariableType::Tensor)],
                vec![VariableDescription::new("CauchyStress", VariableType::Stensor)],
            ),
            Kinematic::Generic => (Vec::new(), Vec::new()),
        };
        BehaviorInfo {
            name: name.to_string(),
            hypothesis,
            kinematic,
            gradients,
            forces,
            material_properties: Vec::new(),
            internal_state_variables: Vec::new(),
            external_state_variables: Vec::new(),
            parameters: Vec::new(),
            consistent_tangent: true,
            supported_hypotheses: vec![hypothesis],
            numerical_bounds: HashMap::new(),
            physical_bounds: HashMap::new(),
        }
    }

    // declarations ----------------------------------------------------------------------------------------------------

    /// Declares a gradient and its conjugated force (generic behaviors only)
    pub fn add_gradient(&mut self, gradient: &str, force: &str, vtype: VariableType) -> Result<&mut Self, StrError> {
        if self.kinematic != Kinematic::Generic {
            return Err("gradients can only be declared by generic behaviors");
        }
        self.check_new_name(gradient)?;
        self.check_new_name(force)?;
        self.gradients.push(VariableDescription::new(gradient, vtype));
        self.forces.push(VariableDescription::new(force, vtype));
        Ok(self)
    }

    /// Declares a material property
    pub fn add_material_property(&mut self, name: &str) -> Result<&mut Self, StrError> {
        self.check_new_name(name)?;
        self.material_properties.push(name.to_string());
        Ok(self)
    }

    /// Declares an internal state variable
    pub fn add_internal_state_variable(&mut self, name: &str, vtype: VariableType) -> Result<&mut Self, StrError> {
        self.check_new_name(name)?;
        self.internal_state_variables.push(VariableDescription::new(name, vtype));
        Ok(self)
    }

    /// Declares an external state variable
    pub fn add_external_state_variable(&mut self, name: &str) -> Result<&mut Self, StrError> {
        self.check_new_name(name)?;
        self.external_state_variables.push(name.to_string());
        Ok(self)
    }

    /// Declares a parameter
    pub fn add_parameter(&mut self, name: &str, value: f64) -> Result<&mut Self, StrError> {
        self.check_new_name(name)?;
        self.parameters.push((name.to_string(), value));
        Ok(self)
    }

    /// Sets the numerical bounds (validity range) of a variable
    pub fn set_bounds(&mut self, name: &str, lower: Option<f64>, upper: Option<f64>) -> Result<&mut Self, StrError> {
        self.check_bounded_variable(name, lower, upper)?;
        self.numerical_bounds.insert(name.to_string(), Bounds { lower, upper });
        Ok(self)
    }

    /// Sets the physical bounds of a variable
    pub fn set_physical_bounds(
        &mut self,
        name: &str,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<&mut Self, StrError> {
        self.check_bounded_variable(name, lower, upper)?;
        self.physical_bounds.insert(name.to_string(), Bounds { lower, upper });
        Ok(self)
    }

    /// Sets the list of supported hypotheses
    pub fn set_supported_hypotheses(&mut self, hypotheses: &[Hypothesis]) -> &mut Self {
        self.supported_hypotheses = hypotheses.to_vec();
        self
    }

    /// Sets the consistent tangent flag
    pub fn set_consistent_tangent(&mut self, flag: bool) -> &mut Self {
        self.consistent_tangent = flag;
        self
    }

    /// Validates the description
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if !self.supported_hypotheses.contains(&self.hypothesis) {
            return Some(format!(
                "behavior '{}' does not support the {} hypothesis",
                self.name, self.hypothesis
            ));
        }
        if self.gradients.is_empty() {
            return Some(format!("behavior '{}' does not declare any gradient", self.name));
        }
        if self.gradients.len() != self.forces.len() {
            return Some(format!(
                "behavior '{}' must declare one force per gradient",
                self.name
            ));
        }
        if self.kinematic != Kinematic::FiniteStrain && self.n_gradient_components() != self.n_force_components() {
            return Some(format!(
                "behavior '{}' must declare gradients and forces with the same number of components",
                self.name
            ));
        }
        None // all good
    }

    // sizes -----------------------------------------------------------------------------------------------------------

    /// Returns the number of components of a variable of the given type
    pub fn variable_size(&self, vtype: VariableType) -> usize {
        match vtype {
            VariableType::Scalar => 1,
            VariableType::Vector => self.hypothesis.space_dimension(),
            VariableType::Stensor => self.hypothesis.stensor_size(),
            VariableType::Tensor => self.hypothesis.tensor_size(),
        }
    }

    /// Returns the number of gradient components
    pub fn n_gradient_components(&self) -> usize {
        self.gradients.iter().map(|v| self.variable_size(v.vtype)).sum()
    }

    /// Returns the number of force components
    pub fn n_force_components(&self) -> usize {
        self.forces.iter().map(|v| self.variable_size(v.vtype)).sum()
    }

    /// Returns the number of internal state values (all components of all variables)
    pub fn n_internal_values(&self) -> usize {
        self.internal_state_variables
            .iter()
            .map(|v| self.variable_size(v.vtype))
            .sum()
    }

    /// Returns the Mandel factor of each internal state value
    ///
    /// The factor is √2 for the shear components of symmetric tensors and one otherwise.
    pub fn internal_value_factors(&self) -> Vec<f64> {
        let mut factors = Vec::with_capacity(self.n_internal_values());
        for v in &self.internal_state_variables {
            let size = self.variable_size(v.vtype);
            if v.vtype == VariableType::Stensor {
                factors.extend((0..size).map(mandel_factor));
            } else {
                factors.extend((0..size).map(|_| 1.0));
            }
        }
        factors
    }

    /// Returns the number of material properties
    pub fn n_material_properties(&self) -> usize {
        self.material_properties.len()
    }

    /// Returns the number of external state variables
    pub fn n_external_state_variables(&self) -> usize {
        self.external_state_variables.len()
    }

    // names -----------------------------------------------------------------------------------------------------------

    /// Returns the names of the gradient components
    ///
    /// Strains are named E (e.g. EXX) and deformation gradients F (e.g. FXY).
    pub fn gradient_components(&self) -> Vec<String> {
        match self.kinematic {
            Kinematic::SmallStrain => self.suffixed("E", VariableType::Stensor),
            Kinematic::FiniteStrain => self.suffixed("F", VariableType::Tensor),
            Kinematic::Generic => self.expand(&self.gradients),
        }
    }

    /// Returns the names of the force components
    ///
    /// Stresses are named S (e.g. SXX).
    pub fn force_components(&self) -> Vec<String> {
        match self.kinematic {
            Kinematic::Generic => self.expand(&self.forces),
            _ => self.suffixed("S", VariableType::Stensor),
        }
    }

    /// Returns the names of all components of the internal state variables (e.g. ElasticStrainXX)
    pub fn internal_state_variable_components(&self) -> Vec<String> {
        self.expand(&self.internal_state_variables)
    }

    /// Returns the names of the internal state variables
    pub fn internal_state_variable_names(&self) -> Vec<String> {
        self.internal_state_variables.iter().map(|v| v.name.clone()).collect()
    }

    /// Returns the type of an internal state variable
    pub fn internal_state_variable_type(&self, name: &str) -> Result<VariableType, StrError> {
        match self.internal_state_variables.iter().find(|v| v.name == name) {
            Some(v) => Ok(v.vtype),
            None => Err("internal state variable is not declared by the behavior"),
        }
    }

    /// Returns the position (offset of the first component) of an internal state variable
    pub fn internal_state_variable_position(&self, name: &str) -> Result<usize, StrError> {
        let mut offset = 0;
        for v in &self.internal_state_variables {
            if v.name == name {
                return Ok(offset);
            }
            offset += self.variable_size(v.vtype);
        }
        Err("internal state variable is not declared by the behavior")
    }

    /// Returns the size of an internal state variable
    pub fn internal_state_variable_size(&self, name: &str) -> Result<usize, StrError> {
        let vtype = self.internal_state_variable_type(name)?;
        Ok(self.variable_size(vtype))
    }

    /// Returns the position of a gradient component given its name (e.g. EXX)
    pub fn gradient_component_position(&self, component: &str) -> Result<usize, StrError> {
        self.gradient_components()
            .iter()
            .position(|c| c == component)
            .ok_or("gradient component is not declared by the behavior")
    }

    /// Returns the position of a force component given its name (e.g. SXX)
    pub fn force_component_position(&self, component: &str) -> Result<usize, StrError> {
        self.force_components()
            .iter()
            .position(|c| c == component)
            .ok_or("force component is not declared by the behavior")
    }

    /// Returns the position of a material property
    pub fn material_property_position(&self, name: &str) -> Result<usize, StrError> {
        self.material_properties
            .iter()
            .position(|c| c == name)
            .ok_or("material property is not declared by the behavior")
    }

    /// Returns the position of an external state variable
    pub fn external_state_variable_position(&self, name: &str) -> Result<usize, StrError> {
        self.external_state_variables
            .iter()
            .position(|c| c == name)
            .ok_or("external state variable is not declared by the behavior")
    }

    /// Returns the value of a parameter
    pub fn parameter(&self, name: &str) -> Result<f64, StrError> {
        match self.parameters.iter().find(|p| p.0 == name) {
            Some(p) => Ok(p.1),
            None => Err("parameter is not declared by the behavior"),
        }
    }

    /// Returns the names of the parameters
    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.0.clone()).collect()
    }

    /// Returns the default values of the gradients (identity for the deformation gradient)
    pub fn default_gradient_values(&self) -> Vec<f64> {
        let mut values = vec![0.0; self.n_gradient_components()];
        if self.kinematic == Kinematic::FiniteStrain {
            for i in 0..3 {
                values[i] = 1.0;
            }
        }
        values
    }

    // bounds ----------------------------------------------------------------------------------------------------------

    /// Returns true if the variable has numerical bounds
    pub fn has_bounds(&self, name: &str) -> bool {
        self.numerical_bounds.contains_key(name)
    }

    /// Returns true if the variable has a numerical lower bound
    pub fn has_lower_bound(&self, name: &str) -> bool {
        self.numerical_bounds.get(name).map_or(false, |b| b.lower.is_some())
    }

    /// Returns true if the variable has a numerical upper bound
    pub fn has_upper_bound(&self, name: &str) -> bool {
        self.numerical_bounds.get(name).map_or(false, |b| b.upper.is_some())
    }

    /// Returns the numerical lower bound of a variable
    pub fn lower_bound(&self, name: &str) -> Result<f64, StrError> {
        self.numerical_bounds
            .get(name)
            .and_then(|b| b.lower)
            .ok_or("the variable has no lower bound")
    }

    /// Returns the numerical upper bound of a variable
    pub fn upper_bound(&self, name: &str) -> Result<f64, StrError> {
        self.numerical_bounds
            .get(name)
            .and_then(|b| b.upper)
            .ok_or("the variable has no upper bound")
    }

    /// Returns true if the variable has physical bounds
    pub fn has_physical_bounds(&self, name: &str) -> bool {
        self.physical_bounds.contains_key(name)
    }

    /// Returns true if the variable has a physical lower bound
    pub fn has_lower_physical_bound(&self, name: &str) -> bool {
        self.physical_bounds.get(name).map_or(false, |b| b.lower.is_some())
    }

    /// Returns true if the variable has a physical upper bound
    pub fn has_upper_physical_bound(&self, name: &str) -> bool {
        self.physical_bounds.get(name).map_or(false, |b| b.upper.is_some())
    }

    /// Returns the physical lower bound of a variable
    pub fn lower_physical_bound(&self, name: &str) -> Result<f64, StrError> {
        self.physical_bounds
            .get(name)
            .and_then(|b| b.lower)
            .ok_or("the variable has no physical lower bound")
    }

    /// Returns the physical upper bound of a variable
    pub fn upper_physical_bound(&self, name: &str) -> Result<f64, StrError> {
        self.physical_bounds
            .get(name)
            .and_then(|b| b.upper)
            .ok_or("the variable has no physical upper bound")
    }

    /// Checks a value of a variable against its physical and numerical bounds
    pub fn check_bounds(&self, name: &str, value: f64) -> BoundsCheck {
        if let Some(bounds) = self.physical_bounds.get(name) {
            if !bounds.contains(value) {
                return BoundsCheck::OutOfPhysicalBounds;
            }
        }
        if let Some(bounds) = self.numerical_bounds.get(name) {
            if !bounds.contains(value) {
                return BoundsCheck::OutOfNumericalBounds;
            }
        }
        BoundsCheck::Within
    }

    // auxiliary -------------------------------------------------------------------------------------------------------

    fn suffixed(&self, prefix: &str, vtype: VariableType) -> Vec<String> {
        let suffixes = match vtype {
            VariableType::Tensor => self.hypothesis.tensor_suffixes(),
            _ => self.hypothesis.stensor_suffixes(),
        };
        suffixes.iter().map(|s| format!("{}{}", prefix, s)).collect()
    }

    fn expand(&self, variables: &[VariableDescription]) -> Vec<String> {
        let mut names = Vec::new();
        for v in variables {
            let suffixes = match v.vtype {
                VariableType::Scalar => {
                    names.push(v.name.clone());
                    continue;
                }
                VariableType::Vector => self.hypothesis.vector_suffixes(),
                VariableType::Stensor => self.hypothesis.stensor_suffixes(),
                VariableType::Tensor => self.hypothesis.tensor_suffixes(),
            };
            names.extend(suffixes.iter().map(|s| format!("{}{}", v.name, s)));
        }
        names
    }

    fn is_declared(&self, name: &str) -> bool {
        self.gradients.iter().any(|v| v.name == name)
            || self.forces.iter().any(|v| v.name == name)
            || self.material_properties.iter().any(|n| n == name)
            || self.internal_state_variables.iter().any(|v| v.name == name)
            || self.external_state_variables.iter().any(|n| n == name)
            || self.parameters.iter().any(|p| p.0 == name)
    }

    fn check_new_name(&self, name: &str) -> Result<(), StrError> {
        if name.is_empty() {
            return Err("variable names must not be empty");
        }
        if self.is_declared(name) {
            return Err("variable name is already declared");
        }
        Ok(())
    }

    fn check_bounded_variable(&self, name: &str, lower: Option<f64>, upper: Option<f64>) -> Result<(), StrError> {
        if !self.is_declared(name) {
            return Err("cannot set the bounds of an undeclared variable");
        }
        if let (Some(l), Some(u)) = (lower, upper) {
            if l > u {
                return Err("the lower bound must be ≤ the upper bound");
            }
        }
        Ok(())
    }
}

impl VariableDescription {
    /// Allocates a new instance
    pub fn new(name: &str, vtype: VariableType) -> Self {
        VariableDescription {
            name: name.to_string(),
            vtype,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{BehaviorInfo, Bounds, BoundsCheck};
    use crate::base::{Hypothesis, Kinematic, VariableType};
    use russell_tensor::SQRT_2;

    fn sample_info() -> BehaviorInfo {
        let mut info = BehaviorInfo::new("Plasticity", Hypothesis::Tridimensional, Kinematic::SmallStrain);
        info.add_material_property("YoungModulus")
            .unwrap()
            .add_material_property("PoissonRatio")
            .unwrap()
            .add_internal_state_variable("ElasticStrain", VariableType::Stensor)
            .unwrap()
            .add_internal_state_variable("EquivalentPlasticStrain", VariableType::Scalar)
            .unwrap()
            .add_external_state_variable("Temperature")
            .unwrap()
            .add_parameter("epsilon", 1e-14)
            .unwrap()
            .set_physical_bounds("YoungModulus", Some(0.0), None)
            .unwrap()
            .set_physical_bounds("PoissonRatio", Some(-1.0), Some(0.5))
            .unwrap()
            .set_bounds("Temperature", Some(200.0), Some(1200.0))
            .unwrap();
        info
    }

    #[test]
    fn bounds_contains_works() {
        let b = Bounds {
            lower: Some(0.0),
            upper: None,
        };
        assert!(b.contains(0.0));
        assert!(b.contains(1e10));
        assert!(!b.contains(-1e-10));
    }

    #[test]
    fn declarations_capture_errors() {
        let mut info = sample_info();
        assert_eq!(
            info.add_material_property("YoungModulus").err(),
            Some("variable name is already declared")
        );
        assert_eq!(info.add_parameter("", 0.0).err(), Some("variable names must not be empty"));
        assert_eq!(
            info.set_bounds("Pressure", None, None).err(),
            Some("cannot set the bounds of an undeclared variable")
        );
        assert_eq!(
            info.set_bounds("YoungModulus", Some(1.0), Some(0.0)).err(),
            Some("the lower bound must be ≤ the upper bound")
        );
        assert_eq!(
            info.add_gradient("Opening", "Traction", VariableType::Vector).err(),
            Some("gradients can only be declared by generic behaviors")
        );
    }

    #[test]
    fn sizes_and_names_work() {
        let info = sample_info();
        assert_eq!(info.validate(), None);
        assert_eq!(info.n_gradient_components(), 6);
        assert_eq!(info.n_force_components(), 6);
        assert_eq!(info.n_internal_values(), 7);
        assert_eq!(info.n_material_properties(), 2);
        assert_eq!(info.n_external_state_variables(), 1);
        assert_eq!(info.gradient_components(), &["EXX", "EYY", "EZZ", "EXY", "EXZ", "EYZ"]);
        assert_eq!(info.force_components(), &["SXX", "SYY", "SZZ", "SXY", "SXZ", "SYZ"]);
        assert_eq!(
            info.internal_state_variable_components(),
            &[
                "ElasticStrainXX",
                "ElasticStrainYY",
                "ElasticStrainZZ",
                "ElasticStrainXY",
                "ElasticStrainXZ",
                "ElasticStrainYZ",
                "EquivalentPlasticStrain"
            ]
        );
        assert_eq!(
            info.internal_value_factors(),
            &[1.0, 1.0, 1.0, SQRT_2, SQRT_2, SQRT_2, 1.0]
        );
        assert_eq!(info.internal_state_variable_position("EquivalentPlasticStrain"), Ok(6));
        assert_eq!(info.internal_state_variable_size("ElasticStrain"), Ok(6));
        assert_eq!(
            info.internal_state_variable_type("EquivalentPlasticStrain"),
            Ok(VariableType::Scalar)
        );
        assert_eq!(
            info.internal_state_variable_position("Damage").err(),
            Some("internal state variable is not declared by the behavior")
        );
        assert_eq!(info.gradient_component_position("EZZ"), Ok(2));
        assert_eq!(info.force_component_position("SYZ"), Ok(5));
        assert_eq!(
            info.force_component_position("SRR").err(),
            Some("force component is not declared by the behavior")
        );
        assert_eq!(info.material_property_position("PoissonRatio"), Ok(1));
        assert_eq!(info.external_state_variable_position("Temperature"), Ok(0));
        assert_eq!(info.parameter("epsilon"), Ok(1e-14));
        assert_eq!(info.parameter_names(), &["epsilon"]);
        assert_eq!(info.default_gradient_values(), &[0.0; 6]);
    }

    #[test]
    fn reduced_hypotheses_work() {
        let mut info = BehaviorInfo::new(
            "Elasticity",
            Hypothesis::AxisymmetricalGeneralisedPlaneStrain,
            Kinematic::SmallStrain,
        );
        info.add_internal_state_variable("ElasticStrain", VariableType::Stensor)
            .unwrap();
        assert_eq!(info.gradient_components(), &["ERR", "EZZ", "ETT"]);
        assert_eq!(info.force_components(), &["SRR", "SZZ", "STT"]);
        assert_eq!(
            info.internal_state_variable_components(),
            &["ElasticStrainRR", "ElasticStrainZZ", "ElasticStrainTT"]
        );
    }

    #[test]
    fn finite_strain_works() {
        let info = BehaviorInfo::new("Hyperelasticity", Hypothesis::Tridimensional, Kinematic::FiniteStrain);
        assert_eq!(info.validate(), None);
        assert_eq!(info.n_gradient_components(), 9);
        assert_eq!(info.n_force_components(), 6);
        assert_eq!(
            info.gradient_components(),
            &["FXX", "FYY", "FZZ", "FXY", "FYX", "FXZ", "FZX", "FYZ", "FZY"]
        );
        assert_eq!(
            info.default_gradient_values(),
            &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn generic_works() {
        let mut info = BehaviorInfo::new("Interface", Hypothesis::PlaneStrain, Kinematic::Generic);
        assert_eq!(
            info.validate(),
            Some("behavior 'Interface' does not declare any gradient".to_string())
        );
        info.add_gradient("Opening", "Traction", VariableType::Vector).unwrap();
        assert_eq!(info.validate(), None);
        assert_eq!(info.gradient_components(), &["OpeningX", "OpeningY"]);
        assert_eq!(info.force_components(), &["TractionX", "TractionY"]);
    }

    #[test]
    fn validate_captures_unsupported_hypothesis() {
        let mut info = sample_info();
        info.set_supported_hypotheses(&[Hypothesis::PlaneStrain]);
        assert_eq!(
            info.validate(),
            Some("behavior 'Plasticity' does not support the Tridimensional hypothesis".to_string())
        );
    }

    #[test]
    fn bounds_work() {
        let info = sample_info();
        assert!(info.has_physical_bounds("YoungModulus"));
        assert!(info.has_lower_physical_bound("YoungModulus"));
        assert!(!info.has_upper_physical_bound("YoungModulus"));
        assert!(!info.has_bounds("YoungModulus"));
        assert!(info.has_bounds("Temperature"));
        assert!(info.has_lower_bound("Temperature"));
        assert!(info.has_upper_bound("Temperature"));
        assert_eq!(info.lower_physical_bound("PoissonRatio"), Ok(-1.0));
        assert_eq!(info.upper_physical_bound("PoissonRatio"), Ok(0.5));
        assert_eq!(
            info.upper_physical_bound("YoungModulus").err(),
            Some("the variable has no physical upper bound")
        );
        assert_eq!(info.lower_bound("Temperature"), Ok(200.0));
        assert_eq!(info.upper_bound("Temperature"), Ok(1200.0));
        assert_eq!(
            info.lower_bound("PoissonRatio").err(),
            Some("the variable has no lower bound")
        );
        assert_eq!(info.check_bounds("YoungModulus", 1.0), BoundsCheck::Within);
        assert_eq!(
            info.check_bounds("YoungModulus", -1.0),
            BoundsCheck::OutOfPhysicalBounds
        );
        assert_eq!(
            info.check_bounds("Temperature", 100.0),
            BoundsCheck::OutOfNumericalBounds
        );
        assert_eq!(info.check_bounds("Temperature", 293.15), BoundsCheck::Within);
        assert_eq!(info.check_bounds("Unknown", 0.0), BoundsCheck::Within);
    }
}
