use crate::StrError;
use std::fmt;
use std::sync::Arc;

/// Defines a function of time shared by evolutions
pub type FnTime = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Holds a value depending on time
///
/// Evolutions are immutable and may be queried in any order.
#[derive(Clone)]
pub enum Evolution {
    /// Constant value
    Constant(f64),

    /// Piecewise-linear interpolation over (time, value) pairs
    ///
    /// The times are strictly increasing. The value is clamped outside the range of times.
    Linear { times: Vec<f64>, values: Vec<f64> },

    /// Externally supplied function of time
    Function(FnTime),
}

impl Evolution {
    /// Allocates a constant evolution
    pub fn constant(value: f64) -> Self {
        Evolution::Constant(value)
    }

    /// Allocates a piecewise-linear evolution
    ///
    /// # Input
    ///
    /// * `times` -- strictly increasing times (at least one)
    /// * `values` -- the values at each time
    pub fn linear(times: &[f64], values: &[f64]) -> Result<Self, StrError> {
        if times.is_empty() {
            return Err("the linear evolution requires at least one (time, value) pair");
        }
        if times.len() != values.len() {
            return Err("the numbers of times and values of the linear evolution must be equal");
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err("the times of the linear evolution must be strictly increasing");
        }
        if times.iter().chain(values.iter()).any(|x| !x.is_finite()) {
            return Err("the times and values of the linear evolution must be finite");
        }
        Ok(Evolution::Linear {
            times: times.to_vec(),
            values: values.to_vec(),
        })
    }

    /// Allocates an evolution from (time, value) pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, StrError> {
        let times: Vec<_> = pairs.iter().map(|p| p.0).collect();
        let values: Vec<_> = pairs.iter().map(|p| p.1).collect();
        Evolution::linear(&times, &values)
    }

    /// Allocates an evolution given by a function of time
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Evolution::Function(Arc::new(f))
    }

    /// Returns the value at a given time
    pub fn value(&self, t: f64) -> f64 {
        match self {
            Evolution::Constant(v) => *v,
            Evolution::Linear { times, values } => {
                let n = times.len();
                if t <= times[0] {
                    return values[0];
                }
                if t >= times[n - 1] {
                    return values[n - 1];
                }
                // first index with times[k] > t; here 1 ≤ k ≤ n-1
                let k = times.partition_point(|&tk| tk <= t);
                let (t0, t1) = (times[k - 1], times[k]);
                let (v0, v1) = (values[k - 1], values[k]);
                v0 + (v1 - v0) * (t - t0) / (t1 - t0)
            }
            Evolution::Function(f) => f(t),
        }
    }

    /// Returns true if the value does not depend on time
    pub fn is_constant(&self) -> bool {
        match self {
            Evolution::Constant(..) => true,
            Evolution::Linear { values, .. } => values.windows(2).all(|w| w[0] == w[1]),
            Evolution::Function(..) => false,
        }
    }
}

impl From<f64> for Evolution {
    fn from(value: f64) -> Self {
        Evolution::Constant(value)
    }
}

impl fmt::Debug for Evolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evolution::Constant(v) => write!(f, "Constant({:?})", v),
            Evolution::Linear { times, values } => write!(f, "Linear {{ times: {:?}, values: {:?} }}", times, values),
            Evolution::Function(..) => write!(f, "Function"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
