use super::{IronsTuck, SubStepState};
use crate::StrError;
use russell_lab::{solve_lin_sys, Matrix, Vector};

/// Holds the variables of the linear system solved at each iteration
pub struct LinearSystem {
    /// Number of equations
    pub neq: usize,

    /// Residual vector
    pub rr: Vector,

    /// Jacobian matrix
    pub kk: Matrix,

    /// Correction of the unknowns (solution of K Δu = -R)
    pub du: Vector,

    /// Copy of the Jacobian matrix (overwritten by the solver)
    work: Matrix,

    /// Acceleration algorithm
    pub acceleration: IronsTuck,
}

impl LinearSystem {
    /// Allocates a new instance
    pub fn new(neq: usize, acceleration_trigger: usize) -> Self {
        LinearSystem {
            neq,
            rr: Vector::new(neq),
            kk: Matrix::new(neq, neq),
            du: Vector::new(neq),
            work: Matrix::new(neq, neq),
            acceleration: IronsTuck::new(neq, acceleration_trigger),
        }
    }

    /// Clears the residual vector and the Jacobian matrix
    pub fn clear(&mut self) {
        self.rr.fill(0.0);
        self.kk.fill(0.0);
    }

    /// Replaces the equation `eq` by the identity (the corresponding unknown is prescribed)
    pub fn prescribe(&mut self, eq: usize) {
        for k in 0..self.neq {
            self.kk.set(eq, k, 0.0);
            self.kk.set(k, eq, 0.0);
        }
        self.kk.set(eq, eq, 1.0);
        self.rr[eq] = 0.0;
    }

    /// Solves K Δu = -R
    ///
    /// The Jacobian matrix is preserved.
    pub fn solve(&mut self) -> Result<(), StrError> {
        self.work.as_mut_data().copy_from_slice(self.kk.as_data());
        for i in 0..self.neq {
            self.du[i] = -self.rr[i];
        }
        solve_lin_sys(&mut self.du, &mut self.work).map_err(|_| "the Jacobian matrix is singular")
    }
}

/// Holds the auxiliary data of a driver: the linear system and a trial copy of the state
///
/// The trial copy is used by the sub-stepping algorithm; thus, the state given by the
/// caller is never left partially updated.
pub struct WorkSpace<S> {
    /// Linear system
    pub system: LinearSystem,

    /// Trial state
    pub trial: S,
}

impl<S: SubStepState + Clone> WorkSpace<S> {
    /// Allocates a new instance
    pub fn new(neq: usize, state: &S, acceleration_trigger: usize) -> Self {
        WorkSpace {
            system: LinearSystem::new(neq, acceleration_trigger),
            trial: state.clone(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
