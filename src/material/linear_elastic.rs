use super::{check_input_bounds, stensor_to_tensor2, tensor2_to_stensor, tensor4_to_tangent};
use super::{Behavior, BehaviorInfo, BehaviorInput, BehaviorOutput, IntegrationStatus};
use crate::base::{Hypothesis, Kinematic, StiffnessType};
use crate::StrError;
use russell_tensor::{t4_ddot_t2, LinElasticity, Mandel, Tensor2};

/// Hypotheses handled by the small strain laws of this crate
pub(crate) const SMALL_STRAIN_HYPOTHESES: [Hypothesis; 5] = [
    Hypothesis::Tridimensional,
    Hypothesis::PlaneStrain,
    Hypothesis::GeneralisedPlaneStrain,
    Hypothesis::Axisymmetrical,
    Hypothesis::AxisymmetricalGeneralisedPlaneStrain,
];

/// Implements the isotropic linear elastic law
///
/// Material properties: YoungModulus, PoissonRatio. External state variable: Temperature.
pub struct LinearElasticity {
    info: BehaviorInfo,
}

impl LinearElasticity {
    /// Allocates a new instance
    pub fn new(hypothesis: Hypothesis) -> Result<Self, StrError> {
        let mut info = BehaviorInfo::new("LinearElasticity", hypothesis, Kinematic::SmallStrain);
        info.set_supported_hypotheses(&SMALL_STRAIN_HYPOTHESES);
        info.add_material_property("YoungModulus")?
            .add_material_property("PoissonRatio")?
            .add_external_state_variable("Temperature")?
            .set_physical_bounds("YoungModulus", Some(0.0), None)?
            .set_physical_bounds("PoissonRatio", Some(-1.0), Some(0.5))?
            .set_physical_bounds("Temperature", Some(0.0), None)?;
        if info.validate().is_some() {
            return Err("LinearElasticity does not support the requested hypothesis");
        }
        Ok(LinearElasticity { info })
    }
}

impl Behavior for LinearElasticity {
    fn info(&self) -> &BehaviorInfo {
        &self.info
    }

    fn integrate(&self, input: &BehaviorInput, output: &mut BehaviorOutput) -> IntegrationStatus {
        let status = check_input_bounds(&self.info, input);
        if status == IntegrationStatus::Failure {
            return status;
        }
        let young = input.material_properties[0];
        let poisson = input.material_properties[1];
        if young <= 0.0 || poisson >= 0.5 {
            return IntegrationStatus::Failure;
        }
        let model = LinElasticity::new(young, poisson, false, false);
        let dd = model.get_modulus();

        // σ = D : ε
        let mut epsilon = Tensor2::new(Mandel::Symmetric);
        let mut sigma = Tensor2::new(Mandel::Symmetric);
        stensor_to_tensor2(&mut epsilon, input.gradients_end.as_data());
        t4_ddot_t2(&mut sigma, 1.0, dd, &epsilon);
        tensor2_to_stensor(output.forces.as_mut_data(), &sigma);

        if input.stiffness != StiffnessType::NoStiffness {
            tensor4_to_tangent(output.tangent, dd);
        }
        status
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LinearElasticity;
    use crate::base::{Hypothesis, StiffnessType};
    use crate::material::{Behavior, BehaviorInput, BehaviorOutput, IntegrationStatus};
    use russell_lab::{approx_eq, Matrix, Vector};

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            LinearElasticity::new(Hypothesis::PlaneStress).err(),
            Some("LinearElasticity does not support the requested hypothesis")
        );
    }

    #[test]
    fn integrate_works_3d() {
        let law = LinearElasticity::new(Hypothesis::Tridimensional).unwrap();
        let info = law.info();
        assert_eq!(info.n_gradient_components(), 6);
        assert_eq!(info.n_internal_values(), 0);
        assert!(info.consistent_tangent);

        let (young, poisson) = (150e9, 0.3);
        let e0 = Vector::new(6);
        let e1 = Vector::from(&[1e-3, -0.3e-3, -0.3e-3, 0.0, 0.0, 0.0]);
        let s0 = Vector::new(6);
        let iv0 = Vector::new(0);
        let mp = Vector::from(&[young, poisson]);
        let esv = Vector::from(&[293.15]);
        let desv = Vector::new(1);
        let mut s1 = Vector::new(6);
        let mut iv1 = Vector::new(0);
        let mut kt = Matrix::new(6, 6);
        let input = BehaviorInput {
            gradients_begin: &e0,
            gradients_end: &e1,
            forces_begin: &s0,
            internal_values_begin: &iv0,
            material_properties: &mp,
            external_state_begin: &esv,
            external_state_increment: &desv,
            dt: 1.0,
            stiffness: StiffnessType::ConsistentTangent,
        };
        let mut output = BehaviorOutput {
            forces: &mut s1,
            internal_values: &mut iv1,
            tangent: &mut kt,
        };
        let status = law.integrate(&input, &mut output);
        assert_eq!(status, IntegrationStatus::Success);
        approx_eq(s1[0], 150e6, 1e-6);
        approx_eq(s1[1], 0.0, 1e-6);
        approx_eq(s1[2], 0.0, 1e-6);

        let lambda = young * poisson / ((1.0 + poisson) * (1.0 - 2.0 * poisson));
        let mu = young / (2.0 * (1.0 + poisson));
        approx_eq(kt.get(0, 0), lambda + 2.0 * mu, 1e-2);
        approx_eq(kt.get(0, 1), lambda, 1e-2);
        approx_eq(kt.get(3, 3), 2.0 * mu, 1e-2);
        approx_eq(kt.get(5, 5), 2.0 * mu, 1e-2);
        approx_eq(kt.get(3, 4), 0.0, 1e-2);
    }

    #[test]
    fn integrate_captures_physical_bounds() {
        let law = LinearElasticity::new(Hypothesis::AxisymmetricalGeneralisedPlaneStrain).unwrap();
        let e = Vector::new(3);
        let iv = Vector::new(0);
        let mp = Vector::from(&[-1.0, 0.3]);
        let esv = Vector::from(&[293.15]);
        let desv = Vector::new(1);
        let mut s1 = Vector::new(3);
        let mut iv1 = Vector::new(0);
        let mut kt = Matrix::new(3, 3);
        let input = BehaviorInput {
            gradients_begin: &e,
            gradients_end: &e,
            forces_begin: &e,
            internal_values_begin: &iv,
            material_properties: &mp,
            external_state_begin: &esv,
            external_state_increment: &desv,
            dt: 1.0,
            stiffness: StiffnessType::Elastic,
        };
        let mut output = BehaviorOutput {
            forces: &mut s1,
            internal_values: &mut iv1,
            tangent: &mut kt,
        };
        assert_eq!(law.integrate(&input, &mut output), IntegrationStatus::Failure);
    }
}
