use super::{ControlConvergence, SubStepState};
use crate::base::{Config, SimError};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Defines the states of the integration of a time step
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum LocalStepState {
    /// The step has not been integrated yet
    NotStarted,

    /// The step has been integrated in a single attempt
    Converged,

    /// The step has been integrated in sub-steps after at least one failed attempt
    SubStepping,

    /// The step could not be integrated
    Failed,
}

/// Holds the results of the iterations of a successful attempt
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationOutcome {
    /// Number of corrections applied to the unknowns
    pub iterations: usize,

    /// Indicates that the behavior reported an unreliable result during the iterations
    pub unreliable: bool,
}

/// Holds a summary of the integration of a time step
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct StepReport {
    /// Total number of corrections applied to the unknowns (all sub-steps)
    pub iterations: usize,

    /// Number of accepted sub-steps (one if the step was not subdivided)
    pub sub_steps: usize,

    /// Number of failed attempts
    pub failures: usize,

    /// Final state of the step
    pub state: LocalStepState,

    /// Indicates that the behavior reported an unreliable result in an accepted sub-step
    pub unreliable: bool,
}

impl StepReport {
    /// Allocates a new instance
    pub fn new() -> Self {
        StepReport {
            iterations: 0,
            sub_steps: 0,
            failures: 0,
            state: LocalStepState::NotStarted,
            unreliable: false,
        }
    }
}

impl Default for StepReport {
    fn default() -> Self {
        StepReport::new()
    }
}

/// Integrates the interval [t0, t1] by sub-stepping on a trial state
///
/// The `attempt` function performs the iterations from `ta` to `tb` on the trial state, writing
/// its end-of-step values. On failure, the trial state is reverted to the last accepted sub-step
/// and the time increment is halved. Accepted sub-steps (except the last one) are committed into
/// the trial state; thus, on success, the trial state holds the end-of-step values at `t1`.
///
/// The failure budget is `config.n_max_substeps` attempts; a time increment smaller than
/// `config.dt_min` is also a failure.
pub fn integrate_with_substeps<S, F>(
    config: &Config,
    control: &mut ControlConvergence,
    trial: &mut S,
    t0: f64,
    t1: f64,
    mut attempt: F,
) -> Result<StepReport, SimError>
where
    S: SubStepState,
    F: FnMut(&mut S, &mut ControlConvergence, f64, f64) -> Result<IterationOutcome, StrError>,
{
    let mut report = StepReport::new();
    let tiny = 1e-10 * f64::max(f64::abs(t1 - t0), f64::MIN_POSITIVE);
    let mut t = t0;
    let mut dt = t1 - t0;
    loop {
        let last = t + dt >= t1 - tiny;
        let tb = if last { t1 } else { t + dt };
        control.reset();
        match attempt(trial, control, t, tb) {
            Ok(outcome) => {
                control.add_converged();
                report.iterations += outcome.iterations;
                report.sub_steps += 1;
                if outcome.unreliable {
                    report.unreliable = true;
                    log::warn!("unreliable result from t = {:?} to t = {:?}", t, tb);
                }
                if last {
                    break;
                }
                trial.update(tb - t);
                t = tb;
            }
            Err(reason) => {
                control.add_failed();
                report.failures += 1;
                trial.revert();
                if report.failures >= config.n_max_substeps {
                    report.state = LocalStepState::Failed;
                    return Err(SimError::IntegrationFailure {
                        t0,
                        t1,
                        reason: format!("{} (maximum number of sub-steps reached)", reason),
                        report,
                    });
                }
                dt /= 2.0;
                if dt < config.dt_min {
                    report.state = LocalStepState::Failed;
                    return Err(SimError::IntegrationFailure {
                        t0,
                        t1,
                        reason: format!("{} (time increment smaller than dt_min)", reason),
                        report,
                    });
                }
                log::info!("{}; halving the time increment to Δt = {:?}", reason, dt);
                control.print_timestep(report.failures, t, dt);
            }
        }
    }
    report.state = if report.failures == 0 {
        LocalStepState::Converged
    } else {
        LocalStepState::SubStepping
    };
    Ok(report)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
