use crate::base::StiffnessType;
use crate::material::{Behavior, BehaviorInfo, BehaviorInput, BehaviorOutput, BehaviorScratch, IntegrationStatus};
use russell_lab::{Matrix, Vector};

/// Defines the operations required by the sub-stepping algorithm on a (trial) state
pub trait SubStepState {
    /// Copies all values from another state
    fn copy_from(&mut self, other: &Self);

    /// Accepts the end-of-step values (they become the beginning-of-step values)
    fn update(&mut self, dt: f64);

    /// Discards the end-of-step values (they are reset to the beginning-of-step values)
    fn revert(&mut self);
}

/// Holds the state of a material point
///
/// The values with suffix 0 correspond to the beginning of the time step and the values with
/// suffix 1 correspond to the end of the time step.
#[derive(Clone, Debug)]
pub struct CurrentState {
    /// Gradients at the beginning of the time step
    pub e0: Vector,

    /// Gradients at the end of the time step
    pub e1: Vector,

    /// Forces at the beginning of the time step
    pub s0: Vector,

    /// Forces at the end of the time step
    pub s1: Vector,

    /// Internal state values at the beginning of the time step
    pub iv0: Vector,

    /// Internal state values at the end of the time step
    pub iv1: Vector,

    /// External state variables at the beginning of the time step
    pub esv0: Vector,

    /// Increment of the external state variables over the time step
    pub desv: Vector,

    /// Material properties at the end of the time step
    pub mprops: Vector,

    /// Increment of the gradients over the last accepted step (used by the linear prediction)
    pub e_prev: Vector,

    /// Time increment of the last accepted step (zero if none)
    pub dt_prev: f64,

    /// Last stiffness operator computed by the behavior
    pub tangent: Matrix,

    /// Indicates that the stored operator is the consistent tangent operator
    pub consistent_tangent: bool,

    /// Radial position of the point (pipe only)
    pub position: f64,

    /// Buffers reused by the behavior at each call
    pub scratch: BehaviorScratch,
}

impl CurrentState {
    /// Allocates a new instance with sizes given by the behavior description
    ///
    /// The gradients are initialized with their default values (identity for the deformation gradient).
    pub fn new(info: &BehaviorInfo) -> Self {
        let ng = info.n_gradient_components();
        let nf = info.n_force_components();
        let ni = info.n_internal_values();
        let e = Vector::from(&info.default_gradient_values());
        CurrentState {
            e0: e.clone(),
            e1: e,
            s0: Vector::new(nf),
            s1: Vector::new(nf),
            iv0: Vector::new(ni),
            iv1: Vector::new(ni),
            esv0: Vector::new(info.n_external_state_variables()),
            desv: Vector::new(info.n_external_state_variables()),
            mprops: Vector::new(info.n_material_properties()),
            e_prev: Vector::new(ng),
            dt_prev: 0.0,
            tangent: Matrix::new(nf, ng),
            consistent_tangent: false,
            position: 0.0,
            scratch: BehaviorScratch::new(),
        }
    }

    /// Calls the behavior with the current values
    ///
    /// Writes the forces, internal values and (unless NoStiffness is requested) the stiffness operator
    /// at the end of the time step.
    pub fn integrate(&mut self, behavior: &dyn Behavior, dt: f64, stiffness: StiffnessType) -> IntegrationStatus {
        let input = BehaviorInput {
            gradients_begin: &self.e0,
            gradients_end: &self.e1,
            forces_begin: &self.s0,
            internal_values_begin: &self.iv0,
            material_properties: &self.mprops,
            external_state_begin: &self.esv0,
            external_state_increment: &self.desv,
            dt,
            stiffness,
        };
        let mut output = BehaviorOutput {
            forces: &mut self.s1,
            internal_values: &mut self.iv1,
            tangent: &mut self.tangent,
        };
        let status = behavior.integrate_with_scratch(&input, &mut output, &mut self.scratch);
        if stiffness != StiffnessType::NoStiffness {
            self.consistent_tangent = stiffness == StiffnessType::ConsistentTangent && behavior.info().consistent_tangent;
        }
        status
    }

    /// Copies the end-of-step values from another state
    pub fn copy_end_values_from(&mut self, other: &CurrentState) {
        self.e1.as_mut_data().copy_from_slice(other.e1.as_data());
        self.s1.as_mut_data().copy_from_slice(other.s1.as_data());
        self.iv1.as_mut_data().copy_from_slice(other.iv1.as_data());
        self.tangent.as_mut_data().copy_from_slice(other.tangent.as_data());
        self.consistent_tangent = other.consistent_tangent;
    }

    /// Returns the gradient increment over the time step
    pub fn gradient_increment(&self, component: usize) -> f64 {
        self.e1[component] - self.e0[component]
    }
}

impl SubStepState for CurrentState {
    fn copy_from(&mut self, other: &Self) {
        self.e0.as_mut_data().copy_from_slice(other.e0.as_data());
        self.s0.as_mut_data().copy_from_slice(other.s0.as_data());
        self.iv0.as_mut_data().copy_from_slice(other.iv0.as_data());
        self.esv0.as_mut_data().copy_from_slice(other.esv0.as_data());
        self.desv.as_mut_data().copy_from_slice(other.desv.as_data());
        self.mprops.as_mut_data().copy_from_slice(other.mprops.as_data());
        self.e_prev.as_mut_data().copy_from_slice(other.e_prev.as_data());
        self.dt_prev = other.dt_prev;
        self.position = other.position;
        self.copy_end_values_from(other);
    }

    fn update(&mut self, dt: f64) {
        for i in 0..self.e0.dim() {
            self.e_prev[i] = self.e1[i] - self.e0[i];
        }
        self.dt_prev = dt;
        self.e0.as_mut_data().copy_from_slice(self.e1.as_data());
        self.s0.as_mut_data().copy_from_slice(self.s1.as_data());
        self.iv0.as_mut_data().copy_from_slice(self.iv1.as_data());
        for i in 0..self.esv0.dim() {
            self.esv0[i] += self.desv[i];
            self.desv[i] = 0.0;
        }
    }

    fn revert(&mut self) {
        self.e1.as_mut_data().copy_from_slice(self.e0.as_data());
        self.s1.as_mut_data().copy_from_slice(self.s0.as_data());
        self.iv1.as_mut_data().copy_from_slice(self.iv0.as_data());
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
