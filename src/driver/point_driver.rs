use super::{bind_evolutions, History, PointLoading, PointSnapshot, Record};
use crate::base::{mandel_factor, Config, Evolution, Kinematic, SimError};
use crate::material::{Behavior, BehaviorInfo};
use crate::solver::{
    integrate_with_substeps, ComponentEquation, ControlConvergence, CurrentState, LocalIntegrator, StepReport,
    SubStepState, WorkSpace,
};
use crate::StrError;
use std::sync::Arc;

/// Defines how a gradient component is driven
#[derive(Clone, Debug)]
enum ComponentDriver {
    /// Imposed gradient (the factor converts the given value to the internal representation)
    Gradient { evolution: Evolution, factor: f64 },

    /// Imposed force
    Force {
        component: usize,
        evolution: Evolution,
        factor: f64,
    },

    /// Equal to another gradient component
    Symmetry(usize),
}

/// Drives a single material point along a prescribed loading
///
/// # Example
///
/// ```
/// use mptest::prelude::*;
/// use std::sync::Arc;
///
/// fn main() -> Result<(), SimError> {
///     let law = LinearElasticity::new(Hypothesis::Tridimensional)?;
///     let mut loading = PointLoading::new();
///     loading
///         .impose_force("SXX", Evolution::linear(&[0.0, 1.0], &[0.0, 150e6])?)
///         .set_material_property("YoungModulus", 150e9)
///         .set_material_property("PoissonRatio", 0.3)
///         .set_external_state_variable("Temperature", 293.15);
///     let mut driver = PointDriver::new(Arc::new(law), loading, Config::new(), &[0.0, 1.0])?;
///     let history = driver.run()?;
///     let exx = history.column("EXX")?;
///     assert!(f64::abs(exx[1] - 1e-3) < 1e-15);
///     Ok(())
/// }
/// ```
pub struct PointDriver {
    /// Behavior of the material point
    behavior: Arc<dyn Behavior>,

    /// Loading
    pub loading: PointLoading,

    /// Options
    pub config: Config,

    /// Times of the accepted instants
    times: Vec<f64>,

    /// Driver of each gradient component
    drivers: Vec<ComponentDriver>,

    /// Evolutions of the material properties (declaration order)
    material_properties: Vec<Evolution>,

    /// Evolutions of the external state variables (declaration order)
    external_state: Vec<Evolution>,

    /// Indicates that complete_initialisation succeeded
    initialised: bool,
}

impl PointDriver {
    /// Allocates a new instance
    ///
    /// The times must be strictly increasing (at least two).
    pub fn new(
        behavior: Arc<dyn Behavior>,
        loading: PointLoading,
        config: Config,
        times: &[f64],
    ) -> Result<Self, StrError> {
        check_times(times)?;
        Ok(PointDriver {
            behavior,
            loading,
            config,
            times: times.to_vec(),
            drivers: Vec::new(),
            material_properties: Vec::new(),
            external_state: Vec::new(),
            initialised: false,
        })
    }

    /// Returns the behavior
    pub fn behavior(&self) -> &Arc<dyn Behavior> {
        &self.behavior
    }

    /// Returns the times of the accepted instants
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Validates the options and the loading against the behavior and binds all evolutions
    ///
    /// Components without an imposed quantity are driven by a zero force. The plane strain
    /// hypothesis adds the constraint EZZ = 0 (FZZ = 1 in finite strain). In finite strain,
    /// the second member of a free off-diagonal pair follows the symmetry equation.
    pub fn complete_initialisation(&mut self) -> Result<(), SimError> {
        self.initialised = false;
        if let Some(msg) = self.config.validate() {
            return Err(SimError::Configuration(msg));
        }
        let info = self.behavior.info();
        if let Some(msg) = info.validate() {
            return Err(SimError::Configuration(msg));
        }
        let drivers = self.resolve_drivers(info)?;
        let material_properties = bind_evolutions(
            &info.material_properties,
            &self.loading.material_properties,
            "material property",
        )?;
        let external_state = bind_evolutions(
            &info.external_state_variables,
            &self.loading.external_state_variables,
            "external state variable",
        )?;
        check_names(&self.loading.initial_gradients, &info.gradient_components(), "gradient component")?;
        check_names(&self.loading.initial_forces, &info.force_components(), "force component")?;
        check_names(
            &self.loading.initial_internal_values,
            &info.internal_state_variable_components(),
            "component of an internal state variable",
        )?;
        self.drivers = drivers;
        self.material_properties = material_properties;
        self.external_state = external_state;
        self.initialised = true;
        log::debug!(
            "point driver initialised for behavior '{}' ({})",
            info.name,
            info.hypothesis
        );
        Ok(())
    }

    /// Allocates the state at the first instant with the initial values
    pub fn initialize_current_state(&self) -> Result<CurrentState, SimError> {
        self.check_initialised()?;
        let info = self.behavior.info();
        let mut state = CurrentState::new(info);
        let (stensor_gradients, stensor_forces) = conventions(info);
        let gradient_names = info.gradient_components();
        for (name, value) in &self.loading.initial_gradients {
            if let Some(i) = gradient_names.iter().position(|n| n == name) {
                let factor = if stensor_gradients { mandel_factor(i) } else { 1.0 };
                state.e0[i] = value * factor;
            }
        }
        let force_names = info.force_components();
        for (name, value) in &self.loading.initial_forces {
            if let Some(i) = force_names.iter().position(|n| n == name) {
                let factor = if stensor_forces { mandel_factor(i) } else { 1.0 };
                state.s0[i] = value * factor;
            }
        }
        let internal_names = info.internal_state_variable_components();
        let internal_factors = info.internal_value_factors();
        for (name, value) in &self.loading.initial_internal_values {
            if let Some(i) = internal_names.iter().position(|n| n == name) {
                state.iv0[i] = value * internal_factors[i];
            }
        }
        let t0 = self.times[0];
        for (i, evolution) in self.material_properties.iter().enumerate() {
            state.mprops[i] = evolution.value(t0);
        }
        for (i, evolution) in self.external_state.iter().enumerate() {
            state.esv0[i] = evolution.value(t0);
        }
        state.revert();
        Ok(state)
    }

    /// Allocates the workspace
    pub fn initialize_workspace(&self, state: &CurrentState) -> WorkSpace<CurrentState> {
        WorkSpace::new(state.e0.dim(), state, self.config.acceleration_trigger)
    }

    /// Integrates the step [t0, t1] writing the end-of-step values of the state
    ///
    /// The state is left untouched on failure.
    pub fn integrate_step(
        &self,
        state: &mut CurrentState,
        workspace: &mut WorkSpace<CurrentState>,
        t0: f64,
        t1: f64,
    ) -> Result<StepReport, SimError> {
        let mut control = ControlConvergence::new(&self.config);
        self.integrate_step_with_control(state, workspace, &mut control, t0, t1)
    }

    /// Integrates the step [t0, t1] and accepts the end-of-step values
    pub fn execute(
        &self,
        state: &mut CurrentState,
        workspace: &mut WorkSpace<CurrentState>,
        t0: f64,
        t1: f64,
    ) -> Result<StepReport, SimError> {
        let report = self.integrate_step(state, workspace, t0, t1)?;
        state.update(t1 - t0);
        Ok(report)
    }

    /// Runs the simulation over all times
    ///
    /// Calls [PointDriver::complete_initialisation] if needed. The history holds one record per
    /// accepted instant, including the first one.
    pub fn run(&mut self) -> Result<History, SimError> {
        if !self.initialised {
            self.complete_initialisation()?;
        }
        let info = self.behavior.info();
        let mut state = self.initialize_current_state()?;
        let mut workspace = self.initialize_workspace(&state);
        let mut history = History::new(info, self.config.output_precision);
        history.records.push(Record {
            time: self.times[0],
            point: PointSnapshot::new(info, &state),
            report: None,
        });
        let mut control = ControlConvergence::new(&self.config);
        control.print_header();
        for (step, interval) in self.times.windows(2).enumerate() {
            let (t0, t1) = (interval[0], interval[1]);
            control.print_timestep(step, t0, t1 - t0);
            let report = self.integrate_step_with_control(&mut state, &mut workspace, &mut control, t0, t1)?;
            state.update(t1 - t0);
            history.records.push(Record {
                time: t1,
                point: PointSnapshot::new(info, &state),
                report: Some(report),
            });
        }
        control.print_footer();
        Ok(history)
    }

    /// Returns the equations driving the gradient components at time t
    fn equations(&self, t: f64) -> Vec<ComponentEquation> {
        self.drivers
            .iter()
            .map(|driver| match driver {
                ComponentDriver::Gradient { evolution, factor } => {
                    ComponentEquation::ImposedGradient(evolution.value(t) * factor)
                }
                ComponentDriver::Force {
                    component,
                    evolution,
                    factor,
                } => ComponentEquation::ImposedForce {
                    component: *component,
                    value: evolution.value(t) * factor,
                },
                ComponentDriver::Symmetry(j) => ComponentEquation::Symmetry(*j),
            })
            .collect()
    }

    fn integrate_step_with_control(
        &self,
        state: &mut CurrentState,
        workspace: &mut WorkSpace<CurrentState>,
        control: &mut ControlConvergence,
        t0: f64,
        t1: f64,
    ) -> Result<StepReport, SimError> {
        self.check_initialised()?;
        let integrator = LocalIntegrator::new(self.behavior.as_ref(), &self.config);
        let WorkSpace { system, trial } = workspace;
        trial.copy_from(state);
        let report = integrate_with_substeps(&self.config, control, trial, t0, t1, |trial, control, ta, tb| {
            for (i, evolution) in self.material_properties.iter().enumerate() {
                trial.mprops[i] = evolution.value(tb);
            }
            for (i, evolution) in self.external_state.iter().enumerate() {
                trial.desv[i] = evolution.value(tb) - trial.esv0[i];
            }
            let equations = self.equations(tb);
            integrator.iterate(trial, system, control, &equations, tb - ta)
        })?;
        state.copy_end_values_from(trial);
        for (i, evolution) in self.material_properties.iter().enumerate() {
            state.mprops[i] = evolution.value(t1);
        }
        for (i, evolution) in self.external_state.iter().enumerate() {
            state.desv[i] = evolution.value(t1) - state.esv0[i];
        }
        Ok(report)
    }

    fn check_initialised(&self) -> Result<(), SimError> {
        if self.initialised {
            Ok(())
        } else {
            Err(SimError::config("complete_initialisation must be called first"))
        }
    }

    /// Assigns one driver to each gradient component
    fn resolve_drivers(&self, info: &BehaviorInfo) -> Result<Vec<ComponentDriver>, SimError> {
        let (stensor_gradients, stensor_forces) = conventions(info);
        let gradient_names = info.gradient_components();
        let force_names = info.force_components();
        let defaults = info.default_gradient_values();
        let mut slots: Vec<Option<ComponentDriver>> = vec![None; gradient_names.len()];

        // imposed gradients
        for (name, evolution) in &self.loading.gradients {
            let i = gradient_names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| SimError::config(format!("'{}' is not a gradient component of the behavior", name)))?;
            if slots[i].is_some() {
                return Err(SimError::config(format!(
                    "the gradient component '{}' is imposed more than once",
                    name
                )));
            }
            let factor = if stensor_gradients { mandel_factor(i) } else { 1.0 };
            slots[i] = Some(ComponentDriver::Gradient {
                evolution: evolution.clone(),
                factor,
            });
        }

        // hypothesis constraint
        let constrained = match info.kinematic {
            Kinematic::Generic => None,
            _ => info.hypothesis.constrained_out_of_plane_component(),
        };
        if let Some(k) = constrained {
            if slots[k].is_some() {
                return Err(SimError::config(format!(
                    "the gradient component '{}' is constrained by the {} hypothesis",
                    gradient_names[k], info.hypothesis
                )));
            }
            slots[k] = Some(ComponentDriver::Gradient {
                evolution: Evolution::constant(defaults[k]),
                factor: 1.0,
            });
        }

        // imposed forces
        let mut forced = vec![false; force_names.len()];
        for (name, evolution) in &self.loading.forces {
            let j = force_names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| SimError::config(format!("'{}' is not a force component of the behavior", name)))?;
            if forced[j] {
                return Err(SimError::config(format!(
                    "the force component '{}' is imposed more than once",
                    name
                )));
            }
            forced[j] = true;
            let candidates = driven_gradients(info.kinematic, j);
            if constrained.is_some() && candidates.iter().any(|i| Some(*i) == constrained) {
                return Err(SimError::config(format!(
                    "the force component '{}' conflicts with the constraint of the {} hypothesis",
                    name, info.hypothesis
                )));
            }
            let i = candidates
                .iter()
                .copied()
                .find(|i| slots[*i].is_none())
                .ok_or_else(|| {
                    SimError::config(format!(
                        "the force component '{}' conflicts with the imposed gradients",
                        name
                    ))
                })?;
            let factor = if stensor_forces { mandel_factor(j) } else { 1.0 };
            slots[i] = Some(ComponentDriver::Force {
                component: j,
                evolution: evolution.clone(),
                factor,
            });
        }

        // free components: zero force and symmetry of the free pairs
        for j in 0..force_names.len() {
            let candidates = driven_gradients(info.kinematic, j);
            if !forced[j] {
                if let Some(i) = candidates.iter().copied().find(|i| slots[*i].is_none()) {
                    slots[i] = Some(ComponentDriver::Force {
                        component: j,
                        evolution: Evolution::constant(0.0),
                        factor: 1.0,
                    });
                }
            }
            if candidates.len() == 2 && slots[candidates[1]].is_none() {
                slots[candidates[1]] = Some(ComponentDriver::Symmetry(candidates[0]));
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| {
                    SimError::config(format!(
                        "the gradient component '{}' is not driven by any equation",
                        gradient_names[i]
                    ))
                })
            })
            .collect()
    }
}

/// Returns the indices of the gradient components driven by a force component
///
/// In finite strain, the off-diagonal Cauchy stress components correspond to pairs of
/// deformation gradient components (XY YX, XZ ZX, YZ ZY).
fn driven_gradients(kinematic: Kinematic, force: usize) -> Vec<usize> {
    match kinematic {
        Kinematic::FiniteStrain if force >= 3 => {
            let first = 3 + 2 * (force - 3);
            vec![first, first + 1]
        }
        _ => vec![force],
    }
}

/// Returns whether the gradients and forces follow the symmetric tensor convention
fn conventions(info: &BehaviorInfo) -> (bool, bool) {
    (
        info.kinematic == Kinematic::SmallStrain,
        info.kinematic != Kinematic::Generic,
    )
}

/// Checks that the times are strictly increasing (at least two)
pub(crate) fn check_times(times: &[f64]) -> Result<(), StrError> {
    if times.len() < 2 {
        return Err("at least two times are required");
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err("times must be strictly increasing");
    }
    Ok(())
}

/// Checks that all names of initial values are declared
fn check_names(given: &[(String, f64)], declared: &[String], kind: &str) -> Result<(), SimError> {
    for (name, _) in given {
        if !declared.contains(name) {
            return Err(SimError::config(format!("'{}' is not a {} of the behavior", name, kind)));
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
