use crate::base::{mandel_factor, Kinematic};
use crate::material::BehaviorInfo;
use crate::solver::{CurrentState, StepReport};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the values of a material point at an accepted instant
///
/// Shear components of symmetric tensors (gradients, forces and internal state variables) are
/// given in the tensor convention.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PointSnapshot {
    /// Radial position (pipe only)
    pub position: f64,

    /// Gradient components
    pub gradients: Vec<f64>,

    /// Force components
    pub forces: Vec<f64>,

    /// Internal state values
    pub internal_values: Vec<f64>,

    /// External state variables
    pub external_state: Vec<f64>,
}

impl PointSnapshot {
    /// Extracts the accepted (beginning-of-step) values of a state
    pub fn new(info: &BehaviorInfo, state: &CurrentState) -> Self {
        let stensor_gradients = info.kinematic == Kinematic::SmallStrain;
        let stensor_forces = info.kinematic != Kinematic::Generic;
        PointSnapshot {
            position: state.position,
            gradients: state
                .e0
                .as_data()
                .iter()
                .enumerate()
                .map(|(i, v)| if stensor_gradients { *v / mandel_factor(i) } else { *v })
                .collect(),
            forces: state
                .s0
                .as_data()
                .iter()
                .enumerate()
                .map(|(i, v)| if stensor_forces { *v / mandel_factor(i) } else { *v })
                .collect(),
            internal_values: state
                .iv0
                .as_data()
                .iter()
                .zip(info.internal_value_factors())
                .map(|(v, factor)| *v / factor)
                .collect(),
            external_state: state.esv0.as_data().to_vec(),
        }
    }
}

/// Holds the results of a material point at an accepted instant
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Record {
    /// Time
    pub time: f64,

    /// Values of the point
    pub point: PointSnapshot,

    /// Summary of the step ending at this instant (None for the initial instant)
    pub report: Option<StepReport>,
}

/// Holds the time-ordered records of a material point simulation
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct History {
    /// Names of the gradient components
    pub gradient_names: Vec<String>,

    /// Names of the force components
    pub force_names: Vec<String>,

    /// Names of the internal state variable components
    pub internal_value_names: Vec<String>,

    /// Names of the external state variables
    pub external_state_names: Vec<String>,

    /// Number of significant digits of the serialized values
    pub precision: usize,

    /// Records (one per accepted instant)
    pub records: Vec<Record>,
}

impl History {
    /// Allocates a new instance
    pub fn new(info: &BehaviorInfo, precision: usize) -> Self {
        History {
            gradient_names: info.gradient_components(),
            force_names: info.force_components(),
            internal_value_names: info.internal_state_variable_components(),
            external_state_names: info.external_state_variables.clone(),
            precision,
            records: Vec::new(),
        }
    }

    /// Returns the times of all records
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time).collect()
    }

    /// Returns the values of a component (gradient, force, internal or external state) for all records
    pub fn column(&self, name: &str) -> Result<Vec<f64>, StrError> {
        let (group, index) = locate(
            name,
            &[
                &self.gradient_names,
                &self.force_names,
                &self.internal_value_names,
                &self.external_state_names,
            ],
        )?;
        Ok(self
            .records
            .iter()
            .map(|r| match group {
                0 => r.point.gradients[index],
                1 => r.point.forces[index],
                2 => r.point.internal_values[index],
                _ => r.point.external_state[index],
            })
            .collect())
    }

    /// Serializes the history to JSON with values rounded to `precision` significant digits
    pub fn to_json(&self) -> Result<String, StrError> {
        let mut rounded = self.clone();
        for record in &mut rounded.records {
            round_snapshot(&mut record.point, self.precision);
        }
        serde_json::to_string_pretty(&rounded).map_err(|_| "cannot serialize the history to JSON")
    }
}

/// Defines a reduction of a variable over all integration points of a structure
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum PipeOutput {
    /// Maximum value of the named component
    MaximumValue(String),

    /// Minimum value of the named component
    MinimumValue(String),
}

impl PipeOutput {
    /// Returns the name of the component
    pub fn component(&self) -> &str {
        match self {
            PipeOutput::MaximumValue(name) => name,
            PipeOutput::MinimumValue(name) => name,
        }
    }

    /// Returns a label for the output (e.g. max(EquivalentPlasticStrain))
    pub fn label(&self) -> String {
        match self {
            PipeOutput::MaximumValue(name) => format!("max({})", name),
            PipeOutput::MinimumValue(name) => format!("min({})", name),
        }
    }

    /// Computes the reduction over the snapshots of all points
    pub fn evaluate(&self, names: &PointComponentNames, points: &[PointSnapshot]) -> Result<f64, StrError> {
        let (group, index) = locate(
            self.component(),
            &[&names.gradients, &names.forces, &names.internal_values],
        )?;
        let values = points.iter().map(|p| match group {
            0 => p.gradients[index],
            1 => p.forces[index],
            _ => p.internal_values[index],
        });
        Ok(match self {
            PipeOutput::MaximumValue(_) => values.fold(f64::NEG_INFINITY, f64::max),
            PipeOutput::MinimumValue(_) => values.fold(f64::INFINITY, f64::min),
        })
    }
}

/// Holds the names of the components of the points
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PointComponentNames {
    /// Names of the gradient components
    pub gradients: Vec<String>,

    /// Names of the force components
    pub forces: Vec<String>,

    /// Names of the internal state variable components
    pub internal_values: Vec<String>,
}

impl PointComponentNames {
    /// Allocates a new instance
    pub fn new(info: &BehaviorInfo) -> Self {
        PointComponentNames {
            gradients: info.gradient_components(),
            forces: info.force_components(),
            internal_values: info.internal_state_variable_components(),
        }
    }

    /// Returns true if the name corresponds to a component
    pub fn contains(&self, name: &str) -> bool {
        locate(name, &[&self.gradients, &self.forces, &self.internal_values]).is_ok()
    }
}

/// Holds the results of a pipe at an accepted instant
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PipeRecord {
    /// Time
    pub time: f64,

    /// Inner pressure
    pub inner_pressure: f64,

    /// Outer pressure
    pub outer_pressure: f64,

    /// Radial displacement of the inner surface
    pub inner_displacement: f64,

    /// Radial displacement of the outer surface
    pub outer_displacement: f64,

    /// Axial strain
    pub axial_strain: f64,

    /// Axial force (integral of the axial stress over the cross-section)
    pub axial_force: f64,

    /// Values of all integration points (ordered by radius)
    pub points: Vec<PointSnapshot>,

    /// Values of the additional outputs (same order as the registered outputs)
    pub outputs: Vec<f64>,

    /// Summary of the step ending at this instant (None for the initial instant)
    pub report: Option<StepReport>,
}

/// Holds the time-ordered records of a pipe simulation
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PipeHistory {
    /// Names of the components of the points
    pub names: PointComponentNames,

    /// Labels of the additional outputs
    pub output_labels: Vec<String>,

    /// Number of significant digits of the serialized values
    pub precision: usize,

    /// Records (one per accepted instant)
    pub records: Vec<PipeRecord>,
}

impl PipeHistory {
    /// Returns the times of all records
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time).collect()
    }

    /// Returns the values of an additional output for all records
    pub fn output(&self, label: &str) -> Result<Vec<f64>, StrError> {
        let index = self
            .output_labels
            .iter()
            .position(|l| l == label)
            .ok_or("the output is not registered")?;
        Ok(self.records.iter().map(|r| r.outputs[index]).collect())
    }

    /// Serializes the history to JSON with values rounded to `precision` significant digits
    pub fn to_json(&self) -> Result<String, StrError> {
        let precision = self.precision;
        let mut rounded = self.clone();
        for record in &mut rounded.records {
            record.inner_pressure = round_significant(record.inner_pressure, precision);
            record.outer_pressure = round_significant(record.outer_pressure, precision);
            record.inner_displacement = round_significant(record.inner_displacement, precision);
            record.outer_displacement = round_significant(record.outer_displacement, precision);
            record.axial_strain = round_significant(record.axial_strain, precision);
            record.axial_force = round_significant(record.axial_force, precision);
            for value in &mut record.outputs {
                *value = round_significant(*value, precision);
            }
            for point in &mut record.points {
                round_snapshot(point, precision);
            }
        }
        serde_json::to_string_pretty(&rounded).map_err(|_| "cannot serialize the history to JSON")
    }
}

/// Finds a name in groups of names, returning the group and the index within the group
fn locate(name: &str, groups: &[&Vec<String>]) -> Result<(usize, usize), StrError> {
    for (g, names) in groups.iter().enumerate() {
        if let Some(index) = names.iter().position(|n| n == name) {
            return Ok((g, index));
        }
    }
    Err("the component is not declared by the behavior")
}

/// Rounds a value to a number of significant digits
pub(crate) fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let text = format!("{:.*e}", digits.saturating_sub(1), value);
    text.parse().unwrap_or(value)
}

fn round_snapshot(point: &mut PointSnapshot, precision: usize) {
    for value in point
        .gradients
        .iter_mut()
        .chain(point.forces.iter_mut())
        .chain(point.internal_values.iter_mut())
        .chain(point.external_state.iter_mut())
    {
        *value = round_significant(*value, precision);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{round_significant, History, PipeOutput, PointComponentNames, PointSnapshot, Record};
    use crate::base::Hypothesis;
    use crate::material::{Behavior, VonMisesPlasticity};
    use crate::solver::CurrentState;
    use russell_tensor::SQRT_2;

    #[test]
    fn round_significant_works() {
        assert_eq!(round_significant(0.0, 3), 0.0);
        assert_eq!(round_significant(1.23456, 3), 1.23);
        assert_eq!(round_significant(-98765.0, 2), -99000.0);
        assert_eq!(round_significant(1.5e-3, 15), 1.5e-3);
    }

    #[test]
    fn snapshot_and_history_work() {
        let law = VonMisesPlasticity::new(Hypothesis::PlaneStrain).unwrap();
        let info = law.info();
        let mut state = CurrentState::new(info);
        state.e0[3] = 2e-3 * SQRT_2;
        state.s0[0] = 100.0;
        state.s0[3] = 50.0 * SQRT_2;
        state.iv0[3] = 1e-3 * SQRT_2;
        state.iv0[4] = 0.25;
        let snapshot = PointSnapshot::new(info, &state);
        assert_eq!(snapshot.gradients[3], 2e-3);
        assert_eq!(snapshot.forces[3], 50.0);
        assert_eq!(snapshot.internal_values[3], 1e-3);
        assert_eq!(snapshot.internal_values[4], 0.25);

        let mut history = History::new(info, 15);
        history.records.push(Record {
            time: 0.0,
            point: snapshot.clone(),
            report: None,
        });
        history.records.push(Record {
            time: 1.0,
            point: snapshot,
            report: None,
        });
        assert_eq!(history.times(), &[0.0, 1.0]);
        assert_eq!(history.column("SXX").unwrap(), &[100.0, 100.0]);
        assert_eq!(history.column("EquivalentPlasticStrain").unwrap(), &[0.25, 0.25]);
        assert_eq!(history.column("Temperature").unwrap(), &[0.0, 0.0]);
        assert_eq!(
            history.column("SRR").err(),
            Some("the component is not declared by the behavior")
        );
        let json = history.to_json().unwrap();
        assert!(json.contains("\"EquivalentPlasticStrain\""));
        assert!(json.contains("\"time\": 1.0"));

        history.records[1].point.forces[0] = 123.456;
        assert!(history.to_json().unwrap().contains("123.456"));
        history.precision = 2;
        let json = history.to_json().unwrap();
        assert!(json.contains("\"precision\": 2"));
        assert!(json.contains("120.0"));
        assert!(!json.contains("123.456"));
    }

    #[test]
    fn pipe_output_works() {
        let law = VonMisesPlasticity::new(Hypothesis::AxisymmetricalGeneralisedPlaneStrain).unwrap();
        let info = law.info();
        let names = PointComponentNames::new(info);
        assert!(names.contains("ETT"));
        assert!(names.contains("EquivalentPlasticStrain"));
        assert!(!names.contains("EXX"));
        let mut state = CurrentState::new(info);
        let mut points = Vec::new();
        for p in [0.1, 0.3, 0.2] {
            state.iv0[3] = p;
            points.push(PointSnapshot::new(info, &state));
        }
        let max = PipeOutput::MaximumValue("EquivalentPlasticStrain".to_string());
        let min = PipeOutput::MinimumValue("EquivalentPlasticStrain".to_string());
        assert_eq!(max.label(), "max(EquivalentPlasticStrain)");
        assert_eq!(max.evaluate(&names, &points), Ok(0.3));
        assert_eq!(min.evaluate(&names, &points), Ok(0.1));
        assert_eq!(
            PipeOutput::MaximumValue("Damage".to_string()).evaluate(&names, &points).err(),
            Some("the component is not declared by the behavior")
        );
    }
}
