use super::{Behavior, BehaviorInfo, BehaviorInput, BehaviorOutput, BehaviorScratch, IntegrationStatus};
use super::SMALL_STRAIN_HYPOTHESES;
use crate::base::{Hypothesis, Kinematic, StiffnessType, VariableType};
use crate::StrError;
use std::sync::Arc;

/// Adapts a tridimensional small strain behavior to a reduced modelling hypothesis
///
/// The reduced strain components are the leading components of the tridimensional strain
/// (the other components are zero). The stress and the tangent operator are projected back onto
/// the reduced components. The internal state variables keep the tridimensional layout; thus,
/// symmetric tensors are exposed as scalars named with the tridimensional suffixes
/// (e.g. ElasticStrainXZ).
pub struct TridimensionalWrapper {
    inner: Arc<dyn Behavior>,
    info: BehaviorInfo,
}

impl TridimensionalWrapper {
    /// Allocates a new instance
    pub fn new(inner: Arc<dyn Behavior>, hypothesis: Hypothesis) -> Result<Self, StrError> {
        let inner_info = inner.info();
        if inner_info.hypothesis != Hypothesis::Tridimensional {
            return Err("the wrapped behavior must use the Tridimensional hypothesis");
        }
        if inner_info.kinematic != Kinematic::SmallStrain {
            return Err("the wrapped behavior must be a small strain behavior");
        }
        match hypothesis {
            Hypothesis::PlaneStress => return Err("the wrapper does not support the PlaneStress hypothesis"),
            Hypothesis::Tridimensional => return Err("the wrapper requires a reduced hypothesis"),
            _ => (),
        }

        // description
        let mut info = BehaviorInfo::new(&inner_info.name, hypothesis, Kinematic::SmallStrain);
        info.set_supported_hypotheses(&SMALL_STRAIN_HYPOTHESES[1..]);
        info.set_consistent_tangent(inner_info.consistent_tangent);
        for name in &inner_info.material_properties {
            info.add_material_property(name)?;
            copy_bounds(&mut info, inner_info, name, name)?;
        }
        for variable in &inner_info.internal_state_variables {
            if variable.vtype == VariableType::Scalar {
                info.add_internal_state_variable(&variable.name, VariableType::Scalar)?;
                copy_bounds(&mut info, inner_info, &variable.name, &variable.name)?;
                continue;
            }
            let suffixes = match variable.vtype {
                VariableType::Vector => Hypothesis::Tridimensional.vector_suffixes(),
                VariableType::Stensor => Hypothesis::Tridimensional.stensor_suffixes(),
                _ => Hypothesis::Tridimensional.tensor_suffixes(),
            };
            for suffix in suffixes {
                let component = format!("{}{}", variable.name, suffix);
                info.add_internal_state_variable(&component, VariableType::Scalar)?;
                copy_bounds(&mut info, inner_info, &variable.name, &component)?;
            }
        }
        for name in &inner_info.external_state_variables {
            info.add_external_state_variable(name)?;
            copy_bounds(&mut info, inner_info, name, name)?;
        }
        for (name, value) in &inner_info.parameters {
            info.add_parameter(name, *value)?;
        }
        Ok(TridimensionalWrapper { inner, info })
    }

    /// Returns the wrapped behavior
    pub fn inner(&self) -> &Arc<dyn Behavior> {
        &self.inner
    }
}

impl Behavior for TridimensionalWrapper {
    fn info(&self) -> &BehaviorInfo {
        &self.info
    }

    fn integrate(&self, input: &BehaviorInput, output: &mut BehaviorOutput) -> IntegrationStatus {
        let mut scratch = BehaviorScratch::new();
        self.integrate_with_scratch(input, output, &mut scratch)
    }

    fn integrate_with_scratch(
        &self,
        input: &BehaviorInput,
        output: &mut BehaviorOutput,
        scratch: &mut BehaviorScratch,
    ) -> IntegrationStatus {
        let n = self.info.hypothesis.stensor_size();
        for k in 0..6 {
            let (e0, e1, s0) = if k < n {
                (input.gradients_begin[k], input.gradients_end[k], input.forces_begin[k])
            } else {
                (0.0, 0.0, 0.0)
            };
            scratch.gradients_begin[k] = e0;
            scratch.gradients_end[k] = e1;
            scratch.forces_begin[k] = s0;
        }
        let status = {
            let input_3d = BehaviorInput {
                gradients_begin: &scratch.gradients_begin,
                gradients_end: &scratch.gradients_end,
                forces_begin: &scratch.forces_begin,
                internal_values_begin: input.internal_values_begin,
                material_properties: input.material_properties,
                external_state_begin: input.external_state_begin,
                external_state_increment: input.external_state_increment,
                dt: input.dt,
                stiffness: input.stiffness,
            };
            let mut output_3d = BehaviorOutput {
                forces: &mut scratch.forces,
                internal_values: output.internal_values,
                tangent: &mut scratch.tangent,
            };
            self.inner.integrate(&input_3d, &mut output_3d)
        };
        if status == IntegrationStatus::Failure {
            return status;
        }
        for i in 0..n {
            output.forces[i] = scratch.forces[i];
        }
        if input.stiffness != StiffnessType::NoStiffness {
            for i in 0..n {
                for j in 0..n {
                    output.tangent.set(i, j, scratch.tangent.get(i, j));
                }
            }
        }
        status
    }
}

/// Presents a behavior through an interface that never provides the consistent tangent operator
///
/// Requests for the consistent tangent are answered with the elastic operator.
pub struct ElasticTangentOnly {
    inner: Arc<dyn Behavior>,
    info: BehaviorInfo,
}

impl ElasticTangentOnly {
    /// Allocates a new instance
    pub fn new(inner: Arc<dyn Behavior>) -> Self {
        let mut info = inner.info().clone();
        info.set_consistent_tangent(false);
        ElasticTangentOnly { inner, info }
    }
}

impl Behavior for ElasticTangentOnly {
    fn info(&self) -> &BehaviorInfo {
        &self.info
    }

    fn integrate(&self, input: &BehaviorInput, output: &mut BehaviorOutput) -> IntegrationStatus {
        self.inner.integrate(&downgrade(input), output)
    }

    fn integrate_with_scratch(
        &self,
        input: &BehaviorInput,
        output: &mut BehaviorOutput,
        scratch: &mut BehaviorScratch,
    ) -> IntegrationStatus {
        self.inner.integrate_with_scratch(&downgrade(input), output, scratch)
    }
}

/// Replaces requests for the consistent tangent by requests for the elastic operator
fn downgrade<'a>(input: &BehaviorInput<'a>) -> BehaviorInput<'a> {
    let stiffness = match input.stiffness {
        StiffnessType::ConsistentTangent => StiffnessType::Elastic,
        other => other,
    };
    BehaviorInput {
        gradients_begin: input.gradients_begin,
        gradients_end: input.gradients_end,
        forces_begin: input.forces_begin,
        internal_values_begin: input.internal_values_begin,
        material_properties: input.material_properties,
        external_state_begin: input.external_state_begin,
        external_state_increment: input.external_state_increment,
        dt: input.dt,
        stiffness,
    }
}

/// Copies the bounds of a variable of the inner description into the outer description
fn copy_bounds(info: &mut BehaviorInfo, inner: &BehaviorInfo, from: &str, to: &str) -> Result<(), StrError> {
    if inner.has_bounds(from) {
        info.set_bounds(to, inner.lower_bound(from).ok(), inner.upper_bound(from).ok())?;
    }
    if inner.has_physical_bounds(from) {
        info.set_physical_bounds(
            to,
            inner.lower_physical_bound(from).ok(),
            inner.upper_physical_bound(from).ok(),
        )?;
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
