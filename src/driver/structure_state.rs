use crate::solver::{CurrentState, SubStepState};
use russell_lab::Vector;

/// Holds the state of a structure: the unknowns and the states of all integration points
///
/// For the pipe, the unknowns are the radial displacements of the nodes followed by the axial strain.
#[derive(Clone, Debug)]
pub struct StructureCurrentState {
    /// States of the integration points
    pub points: Vec<CurrentState>,

    /// Unknowns at the beginning of the time step
    pub u0: Vector,

    /// Unknowns at the end of the time step
    pub u1: Vector,

    /// Increment of the unknowns over the last accepted step (used by the linear prediction)
    pub u_prev: Vector,

    /// Time increment of the last accepted step (zero if none)
    pub dt_prev: f64,
}

impl StructureCurrentState {
    /// Allocates a new instance
    pub fn new(points: Vec<CurrentState>, n_unknowns: usize) -> Self {
        StructureCurrentState {
            points,
            u0: Vector::new(n_unknowns),
            u1: Vector::new(n_unknowns),
            u_prev: Vector::new(n_unknowns),
            dt_prev: 0.0,
        }
    }

    /// Copies the end-of-step values from another state
    pub fn copy_end_values_from(&mut self, other: &StructureCurrentState) {
        self.u1.as_mut_data().copy_from_slice(other.u1.as_data());
        for (point, other_point) in self.points.iter_mut().zip(&other.points) {
            point.copy_end_values_from(other_point);
        }
    }
}

impl SubStepState for StructureCurrentState {
    fn copy_from(&mut self, other: &Self) {
        self.u0.as_mut_data().copy_from_slice(other.u0.as_data());
        self.u1.as_mut_data().copy_from_slice(other.u1.as_data());
        self.u_prev.as_mut_data().copy_from_slice(other.u_prev.as_data());
        self.dt_prev = other.dt_prev;
        for (point, other_point) in self.points.iter_mut().zip(&other.points) {
            point.copy_from(other_point);
        }
    }

    fn update(&mut self, dt: f64) {
        for i in 0..self.u0.dim() {
            self.u_prev[i] = self.u1[i] - self.u0[i];
        }
        self.dt_prev = dt;
        self.u0.as_mut_data().copy_from_slice(self.u1.as_data());
        for point in &mut self.points {
            point.update(dt);
        }
    }

    fn revert(&mut self) {
        self.u1.as_mut_data().copy_from_slice(self.u0.as_data());
        for point in &mut self.points {
            point.revert();
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
