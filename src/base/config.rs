use super::{PredictionPolicy, StiffnessType, Verbosity};
use super::{CONFIG_MAX_OUTPUT_PRECISION, CONFIG_MIN_ACCELERATION_TRIGGER, CONFIG_MIN_DT_MIN, CONFIG_MIN_TOL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the options controlling the solution of a step
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Policy to predict the unknowns at the beginning of a step
    pub prediction_policy: PredictionPolicy,

    /// Stiffness operator requested from the behavior during iterations
    pub stiffness: StiffnessType,

    /// Maximum number of iterations
    pub n_max_iterations: usize,

    /// Maximum number of failed attempts (and thus of time step halvings) per step
    pub n_max_substeps: usize,

    /// Minimum allowed time increment min(Δt)
    pub dt_min: f64,

    /// Absolute tolerance on the corrections of the gradients
    ///
    /// The structural driver scales this value by the outer radius.
    pub gradient_epsilon: f64,

    /// Absolute tolerance on the residual forces
    pub force_epsilon: f64,

    /// Tolerance on the residual forces relative to the magnitude of the forces (zero disables it)
    pub relative_force_epsilon: f64,

    /// Enables the acceleration algorithm
    pub use_acceleration: bool,

    /// Iteration at which the acceleration algorithm starts
    pub acceleration_trigger: usize,

    /// Number of significant digits in the output
    pub output_precision: usize,

    /// Verbosity level
    pub verbosity: Verbosity,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Config {
            prediction_policy: PredictionPolicy::None,
            stiffness: StiffnessType::ConsistentTangent,
            n_max_iterations: 100,
            n_max_substeps: 10,
            dt_min: 1e-10,
            gradient_epsilon: 1e-12,
            force_epsilon: 1e-3,
            relative_force_epsilon: 0.0,
            use_acceleration: false,
            acceleration_trigger: 2,
            output_precision: 15,
            verbosity: Verbosity::Quiet,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.stiffness == StiffnessType::NoStiffness {
            return Some("stiffness = NoStiffness is incorrect; the iterations require a stiffness operator".to_string());
        }
        if self.n_max_iterations < 1 {
            return Some(format!(
                "n_max_iterations = {:?} is incorrect; it must be ≥ 1",
                self.n_max_iterations
            ));
        }
        if self.n_max_substeps < 1 {
            return Some(format!(
                "n_max_substeps = {:?} is incorrect; it must be ≥ 1",
                self.n_max_substeps
            ));
        }
        if self.dt_min < CONFIG_MIN_DT_MIN {
            return Some(format!(
                "dt_min = {:?} is incorrect; it must be ≥ {:e}",
                self.dt_min, CONFIG_MIN_DT_MIN
            ));
        }
        if self.gradient_epsilon < CONFIG_MIN_TOL {
            return Some(format!(
                "gradient_epsilon = {:?} is incorrect; it must be ≥ {:e}",
                self.gradient_epsilon, CONFIG_MIN_TOL
            ));
        }
        if self.force_epsilon < CONFIG_MIN_TOL {
            return Some(format!(
                "force_epsilon = {:?} is incorrect; it must be ≥ {:e}",
                self.force_epsilon, CONFIG_MIN_TOL
            ));
        }
        if self.relative_force_epsilon < 0.0 {
            return Some(format!(
                "relative_force_epsilon = {:?} is incorrect; it must be ≥ 0.0",
                self.relative_force_epsilon
            ));
        }
        if self.acceleration_trigger < CONFIG_MIN_ACCELERATION_TRIGGER {
            return Some(format!(
                "acceleration_trigger = {:?} is incorrect; it must be ≥ {}",
                self.acceleration_trigger, CONFIG_MIN_ACCELERATION_TRIGGER
            ));
        }
        if self.output_precision < 1 || self.output_precision > CONFIG_MAX_OUTPUT_PRECISION {
            return Some(format!(
                "output_precision = {:?} is incorrect; it must be 1 ≤ precision ≤ {}",
                self.output_precision, CONFIG_MAX_OUTPUT_PRECISION
            ));
        }
        None // all good
    }

    /// Returns true if the time steps must be printed
    pub fn verbose_timesteps(&self) -> bool {
        self.verbosity >= Verbosity::Level1
    }

    /// Returns true if the iterations must be printed
    pub fn verbose_iterations(&self) -> bool {
        self.verbosity >= Verbosity::Level2
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solver options")?;
        writeln!(f, "==============")?;
        writeln!(f, "prediction_policy = {:?}", self.prediction_policy)?;
        writeln!(f, "stiffness = {:?}", self.stiffness)?;
        writeln!(f, "n_max_iterations = {:?}", self.n_max_iterations)?;
        writeln!(f, "n_max_substeps = {:?}", self.n_max_substeps)?;
        writeln!(f, "dt_min = {:?}", self.dt_min)?;
        writeln!(f, "gradient_epsilon = {:?}", self.gradient_epsilon)?;
        writeln!(f, "force_epsilon = {:?}", self.force_epsilon)?;
        writeln!(f, "relative_force_epsilon = {:?}", self.relative_force_epsilon)?;
        writeln!(f, "use_acceleration = {:?}", self.use_acceleration)?;
        writeln!(f, "acceleration_trigger = {:?}", self.acceleration_trigger)?;
        writeln!(f, "output_precision = {:?}", self.output_precision)?;
        writeln!(f, "verbosity = {:?}", self.verbosity)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::base::{PredictionPolicy, StiffnessType, Verbosity};

    #[test]
    fn new_works() {
        let config = Config::new();
        assert_eq!(config.prediction_policy, PredictionPolicy::None);
        assert_eq!(config.stiffness, StiffnessType::ConsistentTangent);
        assert_eq!(config.n_max_substeps, 10);
        assert_eq!(config.gradient_epsilon, 1e-12);
        assert_eq!(config.force_epsilon, 1e-3);
        assert_eq!(config.validate(), None);
        assert!(!config.verbose_timesteps());
        assert_eq!(Config::default(), config);
    }

    #[test]
    fn validate_captures_errors() {
        let mut config = Config::new();
        config.stiffness = StiffnessType::NoStiffness;
        assert_eq!(
            config.validate(),
            Some("stiffness = NoStiffness is incorrect; the iterations require a stiffness operator".to_string())
        );
        config.stiffness = StiffnessType::Elastic;

        config.n_max_iterations = 0;
        assert_eq!(
            config.validate(),
            Some("n_max_iterations = 0 is incorrect; it must be ≥ 1".to_string())
        );
        config.n_max_iterations = 10;

        config.n_max_substeps = 0;
        assert_eq!(
            config.validate(),
            Some("n_max_substeps = 0 is incorrect; it must be ≥ 1".to_string())
        );
        config.n_max_substeps = 1;

        config.dt_min = 0.0;
        assert_eq!(
            config.validate(),
            Some("dt_min = 0.0 is incorrect; it must be ≥ 1e-14".to_string())
        );
        config.dt_min = 1e-8;

        config.gradient_epsilon = -1.0;
        assert_eq!(
            config.validate(),
            Some("gradient_epsilon = -1.0 is incorrect; it must be ≥ 1e-16".to_string())
        );
        config.gradient_epsilon = 1e-10;

        config.force_epsilon = 0.0;
        assert_eq!(
            config.validate(),
            Some("force_epsilon = 0.0 is incorrect; it must be ≥ 1e-16".to_string())
        );
        config.force_epsilon = 1e-6;

        config.relative_force_epsilon = -1e-3;
        assert_eq!(
            config.validate(),
            Some("relative_force_epsilon = -0.001 is incorrect; it must be ≥ 0.0".to_string())
        );
        config.relative_force_epsilon = 1e-8;

        config.acceleration_trigger = 1;
        assert_eq!(
            config.validate(),
            Some("acceleration_trigger = 1 is incorrect; it must be ≥ 2".to_string())
        );
        config.acceleration_trigger = 3;

        config.output_precision = 18;
        assert_eq!(
            config.validate(),
            Some("output_precision = 18 is incorrect; it must be 1 ≤ precision ≤ 17".to_string())
        );
        config.output_precision = 8;

        assert_eq!(config.validate(), None);
    }

    #[test]
    fn verbosity_works() {
        let mut config = Config::new();
        config.verbosity = Verbosity::Level1;
        assert!(config.verbose_timesteps());
        assert!(!config.verbose_iterations());
        config.verbosity = Verbosity::Level2;
        assert!(config.verbose_iterations());
    }

    #[test]
    fn serialize_and_display_work() {
        let mut config = Config::new();
        config.prediction_policy = PredictionPolicy::LinearPrediction;
        config.n_max_substeps = 4;
        let json = serde_json::to_string(&config).unwrap();
        let read: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(read, config);
        let text = format!("{}", config);
        assert!(text.contains("prediction_policy = LinearPrediction"));
        assert!(text.contains("n_max_substeps = 4"));
    }
}
