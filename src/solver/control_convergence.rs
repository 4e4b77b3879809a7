use crate::base::Config;
use crate::StrError;
use russell_lab::{vec_norm, Norm, Vector};

/// Controls the convergence of the Newton iterations
///
/// The iterations converge when both conditions hold:
///
/// 1. the norm of the correction `‖Δu‖∞` is below the correction tolerance
/// 2. the norm of the residual `‖R‖∞` is below the residual tolerance
pub struct ControlConvergence<'a> {
    config: &'a Config,
    iteration: usize,
    norm_du: f64,
    norm_rr: f64,
    norm_rr_prev: f64,
    converged_on_du: bool,
    converged_on_rr: bool,
    diverging_on_rr: bool,
    n_converged_total: usize,
    n_failed_total: usize,
}

impl<'a> ControlConvergence<'a> {
    /// Allocates a new instance
    pub fn new(config: &'a Config) -> Self {
        ControlConvergence {
            config,
            iteration: 0,
            norm_du: 0.0,
            norm_rr: 0.0,
            norm_rr_prev: 0.0,
            converged_on_du: false,
            converged_on_rr: false,
            diverging_on_rr: false,
            n_converged_total: 0,
            n_failed_total: 0,
        }
    }

    /// Resets the flags before the iterations of a (sub)step
    pub fn reset(&mut self) {
        self.iteration = 0;
        self.converged_on_du = false;
        self.converged_on_rr = false;
        self.diverging_on_rr = false;
    }

    /// Increments the number of converged (sub)steps
    pub fn add_converged(&mut self) {
        self.n_converged_total += 1;
    }

    /// Increments the number of failed attempts
    pub fn add_failed(&mut self) {
        self.n_failed_total += 1;
    }

    /// Returns the number of converged (sub)steps
    pub fn n_converged_total(&self) -> usize {
        self.n_converged_total
    }

    /// Returns the number of failed attempts
    pub fn n_failed_total(&self) -> usize {
        self.n_failed_total
    }

    /// Returns true if both the correction and the residual satisfy the tolerances
    pub fn converged(&self) -> bool {
        self.converged_on_du && self.converged_on_rr
    }

    /// Returns the norm of the last residual
    pub fn norm_rr(&self) -> f64 {
        self.norm_rr
    }

    /// Analyzes the residual and the correction at an iteration
    ///
    /// Returns an error if NaN or Inf values are found.
    pub(crate) fn analyze(
        &mut self,
        iteration: usize,
        rr: &Vector,
        du: &Vector,
        tol_rr: f64,
        tol_du: f64,
    ) -> Result<(), StrError> {
        self.iteration = iteration;
        self.norm_rr = vec_norm(rr, Norm::Max);
        self.norm_du = vec_norm(du, Norm::Max);
        let found_nan_or_inf = rr.as_data().iter().chain(du.as_data().iter()).any(|x| !x.is_finite());
        if found_nan_or_inf || !self.norm_rr.is_finite() || !self.norm_du.is_finite() {
            self.converged_on_rr = false;
            self.converged_on_du = false;
            return Err("found NaN or Inf in the iterations");
        }
        self.converged_on_rr = self.norm_rr < tol_rr;
        self.converged_on_du = self.norm_du < tol_du;
        self.diverging_on_rr = iteration > 0 && self.norm_rr > self.norm_rr_prev;
        self.norm_rr_prev = self.norm_rr;
        log::debug!(
            "iteration {}: ‖R‖∞ = {:e}, ‖Δu‖∞ = {:e}",
            iteration,
            self.norm_rr,
            self.norm_du
        );
        Ok(())
    }

    /// Prints the header before time stepping
    pub fn print_header(&self) {
        if self.config.verbose_timesteps() {
            println!("\nMPTEST === TIME STEPPING AND CONVERGENCE STATISTICS ===========================");
            println!("\nLegend:");
            println!("✅ : converged");
            println!("🔹 : converging");
            println!("🎈 : diverging");
            println!("\"iter\" means iteration\n");
            println!("{}", "─".repeat(79));
            println!(
                "{:8} {:>11} {:>11} {:>5} {:>9}    {:>9}",
                "timestep", "t", "Δt", "iter", "‖Δu‖∞", "‖R‖∞"
            );
            println!("{}", "─".repeat(79));
        }
    }

    /// Prints the information of a time step (or sub-step)
    pub(crate) fn print_timestep(&self, timestep: usize, t: f64, dt: f64) {
        if self.config.verbose_timesteps() {
            println!("{:>8} {:>11.6e} {:>11.6e}", timestep + 1, t, dt);
        }
    }

    /// Prints the information of an iteration
    pub(crate) fn print_iteration(&self) {
        if self.config.verbose_iterations() {
            let icon_du = if self.converged_on_du { "✅" } else { "🔹" };
            let icon_rr = if self.converged_on_rr {
                "✅"
            } else if self.diverging_on_rr {
                "🎈"
            } else {
                "🔹"
            };
            println!(
                "{:>8} {:>11} {:>11} {:>5} {:>9.2e} {} {:>9.2e} {}",
                "·", "·", "·", self.iteration, self.norm_du, icon_du, self.norm_rr, icon_rr
            );
        }
    }

    /// Prints the horizontal line and the statistics at the end of the analysis
    pub(crate) fn print_footer(&self) {
        if self.config.verbose_timesteps() {
            println!("{}", "─".repeat(79));
            println!(
                "converged (sub)steps = {}, failed attempts = {}",
                self.n_converged_total, self.n_failed_total
            );
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
