use super::{ControlConvergence, CurrentState, IterationOutcome, LinearSystem};
use crate::base::{Config, PredictionPolicy};
use crate::material::{Behavior, IntegrationStatus};
use crate::StrError;

/// Defines the equation driving a gradient component of a material point
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComponentEquation {
    /// The gradient component is prescribed
    ImposedGradient(f64),

    /// The force component with the given index is prescribed
    ImposedForce { component: usize, value: f64 },

    /// The gradient component equals the component with the given index (finite strain symmetry)
    Symmetry(usize),
}

/// Solves the equilibrium of a material point over a time step
///
/// The unknowns are the gradients at the end of the time step. Each gradient component is
/// driven by one [ComponentEquation]; the residual reads:
///
/// ```text
/// ImposedGradient:  r = e - target
/// ImposedForce:     r = s(e) - target
/// Symmetry:         r = e_ij - e_ji
/// ```
pub struct LocalIntegrator<'a> {
    behavior: &'a dyn Behavior,
    config: &'a Config,
}

impl<'a> LocalIntegrator<'a> {
    /// Allocates a new instance
    pub fn new(behavior: &'a dyn Behavior, config: &'a Config) -> Self {
        LocalIntegrator { behavior, config }
    }

    /// Performs the Newton iterations over a time step
    ///
    /// The beginning-of-step values of `state` are the last accepted ones; on success, the
    /// end-of-step values hold the converged solution. On failure, the end-of-step values are
    /// meaningless and the caller must revert the state.
    pub fn iterate(
        &self,
        state: &mut CurrentState,
        system: &mut LinearSystem,
        control: &mut ControlConvergence,
        equations: &[ComponentEquation],
        dt: f64,
    ) -> Result<IterationOutcome, StrError> {
        if equations.len() != system.neq {
            return Err("the number of equations must equal the number of unknowns");
        }

        // initial guess
        state.e1.as_mut_data().copy_from_slice(state.e0.as_data());
        for (i, eq) in equations.iter().enumerate() {
            if let ComponentEquation::ImposedGradient(value) = eq {
                state.e1[i] = *value;
            }
        }
        self.predict(state, system, equations, dt)?;
        system.acceleration.start(&state.e1);

        // tolerance on the residual
        let mut scale: f64 = 0.0;
        for eq in equations {
            if let ComponentEquation::ImposedForce { value, .. } = eq {
                scale = f64::max(scale, f64::abs(*value));
            }
        }

        // iterations
        let mut iterations = 0;
        loop {
            let status = state.integrate(self.behavior, dt, self.config.stiffness);
            if status == IntegrationStatus::Failure {
                return Err("the behavior integration failed");
            }
            self.assemble(state, system, equations);
            system.solve()?;
            let forces_scale = state.s1.as_data().iter().fold(scale, |acc, s| f64::max(acc, f64::abs(*s)));
            let tol_rr = f64::max(
                self.config.force_epsilon,
                self.config.relative_force_epsilon * forces_scale,
            );
            control.analyze(iterations, &system.rr, &system.du, tol_rr, self.config.gradient_epsilon)?;
            control.print_iteration();
            if control.converged() {
                return Ok(IterationOutcome {
                    iterations,
                    unreliable: status == IntegrationStatus::UnreliableResult,
                });
            }
            if iterations == self.config.n_max_iterations {
                return Err("the maximum number of iterations has been reached");
            }
            for i in 0..system.neq {
                state.e1[i] += system.du[i];
            }
            iterations += 1;
            if self.config.use_acceleration {
                system.acceleration.accelerate(&mut state.e1, iterations);
            }
        }
    }

    /// Computes the residual vector and the Jacobian matrix at the current gradients
    fn assemble(&self, state: &CurrentState, system: &mut LinearSystem, equations: &[ComponentEquation]) {
        system.clear();
        let ng = state.e1.dim();
        for (i, eq) in equations.iter().enumerate() {
            match *eq {
                ComponentEquation::ImposedGradient(value) => {
                    system.rr[i] = state.e1[i] - value;
                    system.kk.set(i, i, 1.0);
                }
                ComponentEquation::ImposedForce { component, value } => {
                    system.rr[i] = state.s1[component] - value;
                    for j in 0..ng {
                        system.kk.set(i, j, state.tangent.get(component, j));
                    }
                }
                ComponentEquation::Symmetry(j) => {
                    system.rr[i] = state.e1[i] - state.e1[j];
                    system.kk.set(i, i, 1.0);
                    system.kk.set(i, j, -1.0);
                }
            }
        }
    }

    /// Predicts the gradients at the end of the time step
    fn predict(
        &self,
        state: &mut CurrentState,
        system: &mut LinearSystem,
        equations: &[ComponentEquation],
        dt: f64,
    ) -> Result<(), StrError> {
        if self.config.prediction_policy == PredictionPolicy::LinearPrediction && state.dt_prev > 0.0 {
            let ratio = dt / state.dt_prev;
            for (i, eq) in equations.iter().enumerate() {
                if !matches!(eq, ComponentEquation::ImposedGradient(..)) {
                    state.e1[i] = state.e0[i] + state.e_prev[i] * ratio;
                }
            }
        }
        let stiffness = match self.config.prediction_policy.stiffness() {
            Some(stiffness) => stiffness,
            None => return Ok(()),
        };
        if state.integrate(self.behavior, dt, stiffness) == IntegrationStatus::Failure {
            return Err("the behavior integration failed during the prediction");
        }
        self.assemble(state, system, equations);
        system.solve()?;
        for i in 0..system.neq {
            state.e1[i] += system.du[i];
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ComponentEquation, LocalIntegrator};
    use crate::base::{Config, Hypothesis, PredictionPolicy};
    use crate::material::{Behavior, LinearElasticity, VonMisesPlasticity};
    use crate::solver::{ControlConvergence, CurrentState, LinearSystem, SubStepState};
    use russell_lab::approx_eq;

    fn uniaxial_stress(value: f64) -> Vec<ComponentEquation> {
        let mut equations = vec![ComponentEquation::ImposedForce {
            component: 0,
            value,
        }];
        for k in 1..6 {
            equations.push(ComponentEquation::ImposedForce { component: k, value: 0.0 });
        }
        equations
    }

    fn elastic_state(law: &dyn Behavior) -> CurrentState {
        let mut state = CurrentState::new(law.info());
        state.mprops[0] = 150e9;
        state.mprops[1] = 0.3;
        state.esv0[0] = 293.15;
        state
    }

    #[test]
    fn linear_elasticity_converges_in_one_iteration() {
        let law = LinearElasticity::new(Hypothesis::Tridimensional).unwrap();
        let config = Config::new();
        let mut control = ControlConvergence::new(&config);
        let mut system = LinearSystem::new(6, config.acceleration_trigger);
        let mut state = elastic_state(&law);
        let integrator = LocalIntegrator::new(&law, &config);
        let outcome = integrator
            .iterate(&mut state, &mut system, &mut control, &uniaxial_stress(150e6), 1.0)
            .unwrap();
        assert_eq!(outcome.iterations, 1);
        assert!(!outcome.unreliable);
        approx_eq(state.e1[0], 1e-3, 1e-15);
        approx_eq(state.e1[1], -0.3e-3, 1e-15);
        approx_eq(state.s1[0], 150e6, 1e-6);
    }

    #[test]
    fn imposed_gradients_are_honored() {
        let law = LinearElasticity::new(Hypothesis::Tridimensional).unwrap();
        let config = Config::new();
        let mut control = ControlConvergence::new(&config);
        let mut system = LinearSystem::new(6, config.acceleration_trigger);
        let mut state = elastic_state(&law);
        let integrator = LocalIntegrator::new(&law, &config);
        let mut equations = uniaxial_stress(0.0);
        equations[0] = ComponentEquation::ImposedGradient(1e-3);
        integrator
            .iterate(&mut state, &mut system, &mut control, &equations, 1.0)
            .unwrap();
        approx_eq(state.e1[0], 1e-3, 1e-17);
        approx_eq(state.s1[0], 150e6, 1e-6);
        approx_eq(state.s1[1], 0.0, 1e-6);
    }

    #[test]
    fn prediction_policies_work() {
        let law = VonMisesPlasticity::new(Hypothesis::Tridimensional).unwrap();
        let equations = uniaxial_stress(320e6);
        let mut results = Vec::new();
        for policy in [
            PredictionPolicy::None,
            PredictionPolicy::LinearPrediction,
            PredictionPolicy::ElasticPrediction,
            PredictionPolicy::SecantPrediction,
        ] {
            let mut config = Config::new();
            config.prediction_policy = policy;
            let mut control = ControlConvergence::new(&config);
            let mut system = LinearSystem::new(6, config.acceleration_trigger);
            let mut state = CurrentState::new(law.info());
            state.mprops[0] = 200e9;
            state.mprops[1] = 0.3;
            state.mprops[2] = 300e6;
            state.mprops[3] = 10e9;
            state.esv0[0] = 293.15;
            let integrator = LocalIntegrator::new(&law, &config);
            integrator
                .iterate(&mut state, &mut system, &mut control, &equations, 1.0)
                .unwrap();
            state.update(1.0);
            // second step with the same increment
            let equations = uniaxial_stress(340e6);
            integrator
                .iterate(&mut state, &mut system, &mut control, &equations, 1.0)
                .unwrap();
            results.push(state.e1[0]);
        }
        // ε = σy/E + (σ - σy)/E + (σ - σy)/H
        let expected = 340e6 / 200e9 + 40e6 / 10e9;
        for value in results {
            approx_eq(value, expected, 1e-12);
        }
    }

    #[test]
    fn iterate_captures_failures() {
        let law = LinearElasticity::new(Hypothesis::Tridimensional).unwrap();
        let config = Config::new();
        let mut control = ControlConvergence::new(&config);
        let mut system = LinearSystem::new(6, config.acceleration_trigger);
        let mut state = elastic_state(&law);
        state.mprops[0] = -1.0;
        let integrator = LocalIntegrator::new(&law, &config);
        assert_eq!(
            integrator
                .iterate(&mut state, &mut system, &mut control, &uniaxial_stress(1.0), 1.0)
                .err(),
            Some("the behavior integration failed")
        );

        let mut config = Config::new();
        config.n_max_iterations = 1;
        config.gradient_epsilon = 1e-16;
        config.force_epsilon = 1e-16;
        let law = VonMisesPlasticity::new(Hypothesis::Tridimensional).unwrap();
        let mut state = CurrentState::new(law.info());
        state.mprops[0] = 200e9;
        state.mprops[1] = 0.3;
        state.mprops[2] = 300e6;
        state.mprops[3] = 10e9;
        state.esv0[0] = 293.15;
        let integrator = LocalIntegrator::new(&law, &config);
        assert_eq!(
            integrator
                .iterate(&mut state, &mut system, &mut control, &uniaxial_stress(400e6), 1.0)
                .err(),
            Some("the maximum number of iterations has been reached")
        );
    }

    #[test]
    fn iterate_captures_inconsistent_equations() {
        let law = LinearElasticity::new(Hypothesis::Tridimensional).unwrap();
        let config = Config::new();
        let mut control = ControlConvergence::new(&config);
        let mut system = LinearSystem::new(6, config.acceleration_trigger);
        let mut state = elastic_state(&law);
        let integrator = LocalIntegrator::new(&law, &config);
        let mut equations = uniaxial_stress(1.0);
        equations.pop();
        assert_eq!(
            integrator
                .iterate(&mut state, &mut system, &mut control, &equations, 1.0)
                .err(),
            Some("the number of equations must equal the number of unknowns")
        );
    }
}
