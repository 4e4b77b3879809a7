use super::{bind_evolutions, check_times, IntegrationPoint, PipeMesh, PointSnapshot};
use super::{AxialLoading, PipeHistory, PipeLoading, PipeOutput, PipeRecord, PointComponentNames, RadialLoading};
use super::StructureCurrentState;
use crate::base::{Config, Evolution, Hypothesis, Kinematic, PredictionPolicy, SimError, StiffnessType};
use crate::material::{Behavior, IntegrationStatus};
use crate::solver::{
    integrate_with_substeps, ControlConvergence, CurrentState, IterationOutcome, LinearSystem, StepReport,
    SubStepState, WorkSpace,
};
use crate::StrError;
use russell_lab::Matrix;
use std::f64::consts::PI;
use std::sync::Arc;

/// Drives a pipe (thick-walled cylinder) under pressures and axial loading
///
/// The cross-section is discretized by one-dimensional elements along the radius. The unknowns
/// are the radial displacements of the nodes followed by the (uniform) axial strain. Each
/// integration point holds a material point evaluated with the AxisymmetricalGeneralisedPlaneStrain
/// hypothesis (components RR ZZ TT).
///
/// The equilibrium reads `R = F_int - F_ext = 0` with:
///
/// ```text
/// F_int[a] = ∫ (σrr dNa/dr + σθθ Na / r) 2π r dr
/// F_int[z] = ∫ σzz 2π r dr
/// ```
///
/// where `a` runs over the nodes and `z` denotes the axial strain equation.
pub struct PipeDriver {
    /// Behavior of the material points
    behavior: Arc<dyn Behavior>,

    /// Mesh
    pub mesh: PipeMesh,

    /// Loading
    pub loading: PipeLoading,

    /// Options
    pub config: Config,

    /// Times of the accepted instants
    times: Vec<f64>,

    /// Integration points
    points: Vec<IntegrationPoint>,

    /// Additional outputs
    outputs: Vec<PipeOutput>,

    /// Names of the components of the points
    names: PointComponentNames,

    /// Evolutions of the material properties (declaration order)
    material_properties: Vec<Evolution>,

    /// Evolutions of the external state variables (declaration order)
    external_state: Vec<Evolution>,

    /// Evolution of the temperature of the gas of a tight pipe
    gas_temperature: Option<Evolution>,

    /// Indicates that complete_initialisation succeeded
    initialised: bool,
}

impl PipeDriver {
    /// Allocates a new instance
    ///
    /// The times must be strictly increasing (at least two).
    pub fn new(
        behavior: Arc<dyn Behavior>,
        mesh: PipeMesh,
        loading: PipeLoading,
        config: Config,
        times: &[f64],
    ) -> Result<Self, StrError> {
        check_times(times)?;
        let names = PointComponentNames::new(behavior.info());
        Ok(PipeDriver {
            behavior,
            mesh,
            loading,
            config,
            times: times.to_vec(),
            points: Vec::new(),
            outputs: Vec::new(),
            names,
            material_properties: Vec::new(),
            external_state: Vec::new(),
            gas_temperature: None,
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

    /// Returns the number of unknowns (nodal displacements and axial strain)
    pub fn n_unknowns(&self) -> usize {
        self.mesh.n_nodes() + 1
    }

    /// Registers an additional output
    ///
    /// The component must be a gradient, force or internal state variable component of the behavior.
    pub fn add_output(&mut self, output: PipeOutput) -> Result<&mut Self, StrError> {
        if !self.names.contains(output.component()) {
            return Err("the component is not declared by the behavior");
        }
        self.outputs.push(output);
        Ok(self)
    }

    /// Validates the options, the behavior and the loading and binds all evolutions
    pub fn complete_initialisation(&mut self) -> Result<(), SimError> {
        self.initialised = false;
        if let Some(msg) = self.config.validate() {
            return Err(SimError::Configuration(msg));
        }
        let info = self.behavior.info();
        if let Some(msg) = info.validate() {
            return Err(SimError::Configuration(msg));
        }
        if info.hypothesis != Hypothesis::AxisymmetricalGeneralisedPlaneStrain {
            return Err(SimError::config(format!(
                "the pipe requires the AxisymmetricalGeneralisedPlaneStrain hypothesis (behavior '{}' uses {})",
                info.name, info.hypothesis
            )));
        }
        if info.kinematic != Kinematic::SmallStrain {
            return Err(SimError::config(format!(
                "the pipe requires a small strain behavior (behavior '{}')",
                info.name
            )));
        }
        if !info.consistent_tangent && !self.config.use_acceleration {
            return Err(SimError::config(format!(
                "behavior '{}' does not provide the consistent tangent; the acceleration algorithm is required",
                info.name
            )));
        }
        let gas_temperature = match &self.loading.radial {
            RadialLoading::TightPipe {
                filling_pressure,
                filling_temperature,
                ..
            } => {
                if *filling_pressure < 0.0 {
                    return Err(SimError::config("the filling pressure of the tight pipe must be ≥ 0"));
                }
                if *filling_temperature <= 0.0 {
                    return Err(SimError::config("the filling temperature of the tight pipe must be > 0"));
                }
                let temperature = self
                    .loading
                    .external_state_variables
                    .iter()
                    .find(|(name, _)| name == "Temperature")
                    .map(|(_, evolution)| evolution.clone())
                    .ok_or_else(|| SimError::config("the tight pipe requires the Temperature evolution"))?;
                Some(temperature)
            }
            _ => None,
        };
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
        self.points = self.mesh.integration_points()?;
        self.material_properties = material_properties;
        self.external_state = external_state;
        self.gas_temperature = gas_temperature;
        self.initialised = true;
        log::debug!(
            "pipe driver initialised for behavior '{}' with {} integration points",
            info.name,
            self.points.len()
        );
        Ok(())
    }

    /// Allocates the state at the first instant
    pub fn initialize_current_state(&self) -> Result<StructureCurrentState, SimError> {
        self.check_initialised()?;
        let info = self.behavior.info();
        let t0 = self.times[0];
        let points = self
            .points
            .iter()
            .map(|ip| {
                let mut point = CurrentState::new(info);
                point.position = ip.radius;
                for (i, evolution) in self.material_properties.iter().enumerate() {
                    point.mprops[i] = evolution.value(t0);
                }
                for (i, evolution) in self.external_state.iter().enumerate() {
                    point.esv0[i] = evolution.value(t0);
                }
                point
            })
            .collect();
        Ok(StructureCurrentState::new(points, self.n_unknowns()))
    }

    /// Allocates the workspace
    pub fn initialize_workspace(&self, state: &StructureCurrentState) -> WorkSpace<StructureCurrentState> {
        WorkSpace::new(state.u0.dim(), state, self.config.acceleration_trigger)
    }

    /// Integrates the step [t0, t1] writing the end-of-step values of the state
    ///
    /// The state is left untouched on failure.
    pub fn integrate_step(
        &self,
        state: &mut StructureCurrentState,
        workspace: &mut WorkSpace<StructureCurrentState>,
        t0: f64,
        t1: f64,
    ) -> Result<StepReport, SimError> {
        let mut control = ControlConvergence::new(&self.config);
        self.integrate_step_with_control(state, workspace, &mut control, t0, t1)
    }

    /// Integrates the step [t0, t1] and accepts the end-of-step values
    pub fn execute(
        &self,
        state: &mut StructureCurrentState,
        workspace: &mut WorkSpace<StructureCurrentState>,
        t0: f64,
        t1: f64,
    ) -> Result<StepReport, SimError> {
        let report = self.integrate_step(state, workspace, t0, t1)?;
        state.update(t1 - t0);
        Ok(report)
    }

    /// Runs the simulation over all times
    ///
    /// Calls [PipeDriver::complete_initialisation] if needed. The history holds one record per
    /// accepted instant, including the first one.
    pub fn run(&mut self) -> Result<PipeHistory, SimError> {
        if !self.initialised {
            self.complete_initialisation()?;
        }
        let mut state = self.initialize_current_state()?;
        let mut workspace = self.initialize_workspace(&state);
        let mut history = PipeHistory {
            names: self.names.clone(),
            output_labels: self.outputs.iter().map(|o| o.label()).collect(),
            precision: self.config.output_precision,
            records: Vec::new(),
        };
        history.records.push(self.record(&state, self.times[0], None)?);
        let mut control = ControlConvergence::new(&self.config);
        control.print_header();
        for (step, interval) in self.times.windows(2).enumerate() {
            let (t0, t1) = (interval[0], interval[1]);
            control.print_timestep(step, t0, t1 - t0);
            let report = self.integrate_step_with_control(&mut state, &mut workspace, &mut control, t0, t1)?;
            state.update(t1 - t0);
            history.records.push(self.record(&state, t1, Some(report))?);
        }
        control.print_footer();
        Ok(history)
    }

    /// Computes the axial force (integral of the accepted axial stress over the cross-section)
    pub fn axial_force(&self, state: &StructureCurrentState) -> f64 {
        self.points
            .iter()
            .zip(&state.points)
            .map(|(ip, point)| ip.weight * ip.radius * point.s0[1])
            .sum()
    }

    /// Creates the record of the accepted values of a state
    pub fn record(
        &self,
        state: &StructureCurrentState,
        time: f64,
        report: Option<StepReport>,
    ) -> Result<PipeRecord, SimError> {
        let info = self.behavior.info();
        let n = self.mesh.n_nodes();
        let points: Vec<_> = state.points.iter().map(|p| PointSnapshot::new(info, p)).collect();
        let outputs = self
            .outputs
            .iter()
            .map(|o| o.evaluate(&self.names, &points))
            .collect::<Result<Vec<_>, _>>()?;
        let (inner_pressure, outer_pressure) = self.pressures(time);
        Ok(PipeRecord {
            time,
            inner_pressure,
            outer_pressure,
            inner_displacement: state.u0[0],
            outer_displacement: state.u0[n - 1],
            axial_strain: state.u0[n],
            axial_force: self.axial_force(state),
            points,
            outputs,
            report,
        })
    }

    fn integrate_step_with_control(
        &self,
        state: &mut StructureCurrentState,
        workspace: &mut WorkSpace<StructureCurrentState>,
        control: &mut ControlConvergence,
        t0: f64,
        t1: f64,
    ) -> Result<StepReport, SimError> {
        self.check_initialised()?;
        let WorkSpace { system, trial } = workspace;
        trial.copy_from(state);
        let report = integrate_with_substeps(&self.config, control, trial, t0, t1, |trial, control, ta, tb| {
            self.iterate(trial, system, control, ta, tb)
        })?;
        state.copy_end_values_from(trial);
        self.set_point_values(&mut state.points, t1);
        Ok(report)
    }

    /// Performs the structural Newton iterations from ta to tb
    fn iterate(
        &self,
        state: &mut StructureCurrentState,
        system: &mut LinearSystem,
        control: &mut ControlConvergence,
        ta: f64,
        tb: f64,
    ) -> Result<IterationOutcome, StrError> {
        let dt = tb - ta;
        self.set_point_values(&mut state.points, tb);

        // initial guess
        let prescribed = self.prescribed_values(tb);
        state.u1.as_mut_data().copy_from_slice(state.u0.as_data());
        for (eq, value) in &prescribed {
            state.u1[*eq] = *value;
        }
        self.predict(state, system, &prescribed, dt, tb)?;
        system.acceleration.start(&state.u1);

        // tolerances
        let re = self.mesh.outer_radius;
        let tol_rr = self.config.force_epsilon * 2.0 * PI * re;
        let tol_du = self.config.gradient_epsilon * re;

        // iterations
        let stiffness = self.stiffness();
        let mut iterations = 0;
        loop {
            let status = self.integrate_points(state, dt, stiffness)?;
            self.assemble(state, system, &prescribed, tb);
            system.solve()?;
            control.analyze(iterations, &system.rr, &system.du, tol_rr, tol_du)?;
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
                state.u1[i] += system.du[i];
            }
            iterations += 1;
            if self.config.use_acceleration {
                system.acceleration.accelerate(&mut state.u1, iterations);
            }
        }
    }

    /// Predicts the unknowns at the end of the time step
    fn predict(
        &self,
        state: &mut StructureCurrentState,
        system: &mut LinearSystem,
        prescribed: &[(usize, f64)],
        dt: f64,
        t: f64,
    ) -> Result<(), StrError> {
        if self.config.prediction_policy == PredictionPolicy::LinearPrediction && state.dt_prev > 0.0 {
            let ratio = dt / state.dt_prev;
            for i in 0..state.u1.dim() {
                if !prescribed.iter().any(|(eq, _)| *eq == i) {
                    state.u1[i] = state.u0[i] + state.u_prev[i] * ratio;
                }
            }
        }
        let stiffness = match self.config.prediction_policy.stiffness() {
            Some(stiffness) => stiffness,
            None => return Ok(()),
        };
        self.integrate_points(state, dt, stiffness)
            .map_err(|_| "the behavior integration failed during the prediction")?;
        self.assemble(state, system, prescribed, t);
        system.solve()?;
        for i in 0..system.neq {
            state.u1[i] += system.du[i];
        }
        Ok(())
    }

    /// Computes the strains from the unknowns and integrates the behavior at all points
    fn integrate_points(
        &self,
        state: &mut StructureCurrentState,
        dt: f64,
        stiffness: StiffnessType,
    ) -> Result<IntegrationStatus, StrError> {
        let n = self.mesh.n_nodes();
        let ezz = state.u1[n];
        let mut status = IntegrationStatus::Success;
        for (ip, point) in self.points.iter().zip(state.points.iter_mut()) {
            let mut err = 0.0;
            let mut ett = 0.0;
            for (l, node) in ip.nodes.iter().enumerate() {
                err += ip.dnn_dr[l] * state.u1[*node];
                ett += ip.nn[l] * state.u1[*node];
            }
            point.e1[0] = err;
            point.e1[1] = ezz;
            point.e1[2] = ett / ip.radius;
            let point_status = point.integrate(self.behavior.as_ref(), dt, stiffness);
            if point_status == IntegrationStatus::Failure {
                return Err("the behavior integration failed");
            }
            status = status.and(point_status);
        }
        Ok(status)
    }

    /// Assembles the residual vector and the Jacobian matrix
    fn assemble(&self, state: &StructureCurrentState, system: &mut LinearSystem, prescribed: &[(usize, f64)], t: f64) {
        system.clear();
        let n = self.mesh.n_nodes();
        for (ip, point) in self.points.iter().zip(&state.points) {
            let (r, w) = (ip.radius, ip.weight);
            let k = |i: usize, j: usize| point.tangent.get(i, j);
            for (l, a) in ip.nodes.iter().enumerate() {
                system.rr[*a] += w * (r * point.s1[0] * ip.dnn_dr[l] + point.s1[2] * ip.nn[l]);
                for (m, b) in ip.nodes.iter().enumerate() {
                    let de0 = ip.dnn_dr[m];
                    let de2 = ip.nn[m] / r;
                    let value = w
                        * (r * ip.dnn_dr[l] * (k(0, 0) * de0 + k(0, 2) * de2)
                            + ip.nn[l] * (k(2, 0) * de0 + k(2, 2) * de2));
                    add_to(&mut system.kk, *a, *b, value);
                }
                add_to(&mut system.kk, *a, n, w * (r * ip.dnn_dr[l] * k(0, 1) + ip.nn[l] * k(2, 1)));
                let de0 = ip.dnn_dr[l];
                let de2 = ip.nn[l] / r;
                add_to(&mut system.kk, n, *a, w * r * (k(1, 0) * de0 + k(1, 2) * de2));
            }
            system.rr[n] += w * r * point.s1[1];
            add_to(&mut system.kk, n, n, w * r * k(1, 1));
        }

        // external forces
        let last = n - 1;
        let (ri, re) = (self.mesh.inner_radius, self.mesh.outer_radius);
        let (pi, pe) = self.pressures(t);
        system.rr[0] -= 2.0 * PI * ri * pi;
        system.rr[last] += 2.0 * PI * re * pe;
        match &self.loading.axial {
            AxialLoading::EndCapEffect => {
                system.rr[n] -= PI * ri * ri * pi;
                system.rr[n] += PI * re * re * pe;
            }
            AxialLoading::ImposedAxialForce(force) => system.rr[n] -= force.value(t),
            _ => (),
        }

        for (eq, _) in prescribed {
            system.prescribe(*eq);
        }
    }

    /// Returns the prescribed unknowns and their values at time t
    fn prescribed_values(&self, t: f64) -> Vec<(usize, f64)> {
        let n = self.mesh.n_nodes();
        let mut prescribed = Vec::new();
        match &self.loading.axial {
            AxialLoading::None => prescribed.push((n, 0.0)),
            AxialLoading::ImposedAxialStrain(strain) => prescribed.push((n, strain.value(t))),
            _ => (),
        }
        if let RadialLoading::ImposedOuterDisplacement { displacement, .. } = &self.loading.radial {
            prescribed.push((n - 1, displacement.value(t)));
        }
        prescribed
    }

    /// Returns the inner and outer pressures at time t
    ///
    /// The outer pressure is zero when the outer displacement is imposed.
    pub fn pressures(&self, t: f64) -> (f64, f64) {
        match &self.loading.radial {
            RadialLoading::ImposedPressures { inner, outer } => (inner.value(t), outer.value(t)),
            RadialLoading::ImposedOuterDisplacement { inner_pressure, .. } => (inner_pressure.value(t), 0.0),
            RadialLoading::TightPipe {
                filling_pressure,
                filling_temperature,
                outer,
            } => {
                let temperature = match &self.gas_temperature {
                    Some(evolution) => evolution.value(t),
                    None => *filling_temperature,
                };
                (filling_pressure * temperature / filling_temperature, outer.value(t))
            }
        }
    }

    /// Sets the material properties and the external state increments of the points at time t
    fn set_point_values(&self, points: &mut [CurrentState], t: f64) {
        let mprops: Vec<_> = self.material_properties.iter().map(|e| e.value(t)).collect();
        let esv: Vec<_> = self.external_state.iter().map(|e| e.value(t)).collect();
        for point in points {
            point.mprops.as_mut_data().copy_from_slice(&mprops);
            for i in 0..esv.len() {
                point.desv[i] = esv[i] - point.esv0[i];
            }
        }
    }

    /// Returns the stiffness operator requested from the behavior during the iterations
    fn stiffness(&self) -> StiffnessType {
        if self.behavior.info().consistent_tangent {
            self.config.stiffness
        } else {
            StiffnessType::Elastic
        }
    }

    fn check_initialised(&self) -> Result<(), SimError> {
        if self.initialised {
            Ok(())
        } else {
            Err(SimError::config("complete_initialisation must be called first"))
        }
    }
}

/// Adds a value to a component of a matrix
#[inline]
fn add_to(kk: &mut Matrix, i: usize, j: usize, value: f64) {
    kk.set(i, j, kk.get(i, j) + value);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
