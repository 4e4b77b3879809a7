use crate::base::{Evolution, SimError};

/// Holds the loading of a material point
///
/// The gradient and force components are identified by their names as given by the behavior
/// (e.g. EXX, SXY, FZX). Shear components of symmetric tensors are given in the tensor
/// convention (e.g. SXY = σxy); the conversion to the internal representation is performed by
/// the driver.
///
/// Components that are not prescribed are driven by a zero force.
#[derive(Clone, Debug, Default)]
pub struct PointLoading {
    /// Prescribed gradient components
    pub gradients: Vec<(String, Evolution)>,

    /// Prescribed force components
    pub forces: Vec<(String, Evolution)>,

    /// Material properties
    pub material_properties: Vec<(String, Evolution)>,

    /// External state variables
    pub external_state_variables: Vec<(String, Evolution)>,

    /// Initial values of gradient components (default values otherwise)
    pub initial_gradients: Vec<(String, f64)>,

    /// Initial values of force components (zero otherwise)
    pub initial_forces: Vec<(String, f64)>,

    /// Initial values of internal state variable components (zero otherwise), e.g. ElasticStrainXX
    pub initial_internal_values: Vec<(String, f64)>,
}

impl PointLoading {
    /// Allocates a new instance
    pub fn new() -> Self {
        PointLoading::default()
    }

    /// Prescribes a gradient component (e.g. EXX)
    pub fn impose_gradient<E: Into<Evolution>>(&mut self, component: &str, evolution: E) -> &mut Self {
        insert(&mut self.gradients, component, evolution.into());
        self
    }

    /// Prescribes a force component (e.g. SXX)
    pub fn impose_force<E: Into<Evolution>>(&mut self, component: &str, evolution: E) -> &mut Self {
        insert(&mut self.forces, component, evolution.into());
        self
    }

    /// Sets a material property
    pub fn set_material_property<E: Into<Evolution>>(&mut self, name: &str, evolution: E) -> &mut Self {
        insert(&mut self.material_properties, name, evolution.into());
        self
    }

    /// Sets an external state variable
    pub fn set_external_state_variable<E: Into<Evolution>>(&mut self, name: &str, evolution: E) -> &mut Self {
        insert(&mut self.external_state_variables, name, evolution.into());
        self
    }

    /// Sets the initial value of a gradient component
    pub fn set_initial_gradient(&mut self, component: &str, value: f64) -> &mut Self {
        insert(&mut self.initial_gradients, component, value);
        self
    }

    /// Sets the initial value of a force component
    pub fn set_initial_force(&mut self, component: &str, value: f64) -> &mut Self {
        insert(&mut self.initial_forces, component, value);
        self
    }

    /// Sets the initial value of an internal state variable component
    ///
    /// Shear components of symmetric tensors are given in the tensor convention.
    pub fn set_initial_internal_value(&mut self, component: &str, value: f64) -> &mut Self {
        insert(&mut self.initial_internal_values, component, value);
        self
    }
}

/// Inserts or replaces a named value
pub(crate) fn insert<T>(list: &mut Vec<(String, T)>, name: &str, value: T) {
    match list.iter_mut().find(|(n, _)| n == name) {
        Some(entry) => entry.1 = value,
        None => list.push((name.to_string(), value)),
    }
}

/// Binds the declared variables of a behavior to the given evolutions (in declaration order)
///
/// Returns a configuration error if a declared variable is missing or if an unknown variable is given.
pub(crate) fn bind_evolutions(
    declared: &[String],
    given: &[(String, Evolution)],
    kind: &str,
) -> Result<Vec<Evolution>, SimError> {
    for (name, _) in given {
        if !declared.contains(name) {
            return Err(SimError::config(format!(
                "'{}' is not a {} of the behavior",
                name, kind
            )));
        }
    }
    declared
        .iter()
        .map(|name| match given.iter().find(|(n, _)| n == name) {
            Some((_, evolution)) => Ok(evolution.clone()),
            None => Err(SimError::config(format!("the {} '{}' is not defined", kind, name))),
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
