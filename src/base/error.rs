use crate::solver::StepReport;
use crate::StrError;
use thiserror::Error;

/// Errors reported by the drivers
#[derive(Error, Clone, Debug, PartialEq)]
pub enum SimError {
    /// Missing or inconsistent loading specification, invalid options or malformed behavior metadata
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The step interval could not be integrated within the sub-stepping budget
    ///
    /// The report holds the attempts made before giving up (its state is `Failed`).
    #[error("integration failure from t = {t0:?} to t = {t1:?}: {reason}")]
    IntegrationFailure {
        t0: f64,
        t1: f64,
        reason: String,
        report: StepReport,
    },
}

impl SimError {
    /// Allocates a configuration error from a message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SimError::Configuration(msg.into())
    }

    /// Returns true if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimError::Configuration(..))
    }

    /// Returns true if this is an integration failure
    pub fn is_integration_failure(&self) -> bool {
        matches!(self, SimError::IntegrationFailure { .. })
    }

    /// Returns the report of the failed step, if any
    pub fn report(&self) -> Option<&StepReport> {
        match self {
            SimError::IntegrationFailure { report, .. } => Some(report),
            _ => None,
        }
    }
}

impl From<StrError> for SimError {
    fn from(err: StrError) -> Self {
        SimError::Configuration(err.to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
