use super::{BehaviorInfo, BoundsCheck};
use crate::base::StiffnessType;
use russell_lab::{Matrix, Vector};
use serde::{Deserialize, Serialize};

/// Holds the outcome of the integration of a behavior over a time increment
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum IntegrationStatus {
    /// The forces, internal variables and tangent have been computed
    Success,

    /// The behavior could not integrate over the given time increment
    Failure,

    /// The results are usable but some value lies outside the validity range of the behavior
    UnreliableResult,
}

impl IntegrationStatus {
    /// Combines two outcomes, keeping the most severe one
    pub fn and(self, other: IntegrationStatus) -> IntegrationStatus {
        match (self, other) {
            (IntegrationStatus::Failure, _) | (_, IntegrationStatus::Failure) => IntegrationStatus::Failure,
            (IntegrationStatus::UnreliableResult, _) | (_, IntegrationStatus::UnreliableResult) => {
                IntegrationStatus::UnreliableResult
            }
            _ => IntegrationStatus::Success,
        }
    }

    /// Returns true if the results can be used
    pub fn is_usable(&self) -> bool {
        *self != IntegrationStatus::Failure
    }
}

/// Holds the input buffers of an integration
///
/// The sizes of all buffers are given by the [BehaviorInfo] of the behavior.
pub struct BehaviorInput<'a> {
    /// Gradients at the beginning of the time step
    pub gradients_begin: &'a Vector,

    /// Gradients at the end of the time step
    pub gradients_end: &'a Vector,

    /// Forces at the beginning of the time step
    pub forces_begin: &'a Vector,

    /// Internal state values at the beginning of the time step
    pub internal_values_begin: &'a Vector,

    /// Material properties (at the end of the time step)
    pub material_properties: &'a Vector,

    /// External state variables at the beginning of the time step
    pub external_state_begin: &'a Vector,

    /// Increment of the external state variables over the time step
    pub external_state_increment: &'a Vector,

    /// Time increment
    pub dt: f64,

    /// Requested stiffness operator
    pub stiffness: StiffnessType,
}

/// Holds the output buffers of an integration
pub struct BehaviorOutput<'a> {
    /// Forces at the end of the time step
    pub forces: &'a mut Vector,

    /// Internal state values at the end of the time step
    pub internal_values: &'a mut Vector,

    /// Stiffness operator (n_force_components × n_gradient_components)
    pub tangent: &'a mut Matrix,
}

/// Holds tridimensional buffers for behaviors adapting a tridimensional behavior
///
/// The buffers are owned by the caller (one instance per integration point) and reused across calls.
#[derive(Clone, Debug)]
pub struct BehaviorScratch {
    /// Tridimensional gradients at the beginning of the time step
    pub gradients_begin: Vector,

    /// Tridimensional gradients at the end of the time step
    pub gradients_end: Vector,

    /// Tridimensional forces at the beginning of the time step
    pub forces_begin: Vector,

    /// Tridimensional forces at the end of the time step
    pub forces: Vector,

    /// Tridimensional stiffness operator
    pub tangent: Matrix,
}

impl BehaviorScratch {
    /// Allocates a new instance
    pub fn new() -> Self {
        BehaviorScratch {
            gradients_begin: Vector::new(6),
            gradients_end: Vector::new(6),
            forces_begin: Vector::new(6),
            forces: Vector::new(6),
            tangent: Matrix::new(6, 6),
        }
    }
}

impl Default for BehaviorScratch {
    fn default() -> Self {
        BehaviorScratch::new()
    }
}

/// Defines the calling contract of material behaviors
///
/// Implementations are read-only after construction and may be shared by many integration points
/// and threads.
pub trait Behavior: Send + Sync {
    /// Returns the description of the behavior
    fn info(&self) -> &BehaviorInfo;

    /// Integrates the behavior over a time increment
    ///
    /// On success, writes the forces and internal values at the end of the time step and, unless
    /// `input.stiffness` is `NoStiffness`, the requested stiffness operator.
    ///
    /// # Panics
    ///
    /// A buffer whose size differs from the description is a programming error and may panic.
    fn integrate(&self, input: &BehaviorInput, output: &mut BehaviorOutput) -> IntegrationStatus;

    /// Integrates the behavior using buffers owned by the caller
    ///
    /// The default implementation does not need the buffers and calls [Behavior::integrate].
    fn integrate_with_scratch(
        &self,
        input: &BehaviorInput,
        output: &mut BehaviorOutput,
        _scratch: &mut BehaviorScratch,
    ) -> IntegrationStatus {
        self.integrate(input, output)
    }
}

/// Checks the material properties, external state variables and initial internal values against the bounds
///
/// Returns Failure if a value lies outside its physical bounds, UnreliableResult if it lies
/// outside its numerical bounds, and Success otherwise.
pub fn check_input_bounds(info: &BehaviorInfo, input: &BehaviorInput) -> IntegrationStatus {
    let mut status = IntegrationStatus::Success;
    for (i, name) in info.material_properties.iter().enumerate() {
        status = status.and(bounds_status(info.check_bounds(name, input.material_properties[i])));
    }
    for (i, name) in info.external_state_variables.iter().enumerate() {
        let value = input.external_state_begin[i] + input.external_state_increment[i];
        status = status.and(bounds_status(info.check_bounds(name, value)));
    }
    let mut offset = 0;
    for variable in &info.internal_state_variables {
        let size = info.variable_size(variable.vtype);
        for k in 0..size {
            let value = input.internal_values_begin[offset + k];
            status = status.and(bounds_status(info.check_bounds(&variable.name, value)));
        }
        offset += size;
    }
    status
}

/// Converts a bounds check into an integration status
pub(crate) fn bounds_status(check: BoundsCheck) -> IntegrationStatus {
    match check {
        BoundsCheck::Within => IntegrationStatus::Success,
        BoundsCheck::OutOfNumericalBounds => IntegrationStatus::UnreliableResult,
        BoundsCheck::OutOfPhysicalBounds => IntegrationStatus::Failure,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
