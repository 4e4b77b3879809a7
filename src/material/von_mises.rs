use super::{check_input_bounds, stensor_to_tensor2, tensor2_to_stensor, tensor4_to_tangent, SMALL_STRAIN_HYPOTHESES};
use super::{Behavior, BehaviorInfo, BehaviorInput, BehaviorOutput, IntegrationStatus};
use crate::base::{Hypothesis, Kinematic, StiffnessType, VariableType};
use crate::StrError;
use russell_tensor::{t4_ddot_t2, LinElasticity, Mandel, Tensor2, Tensor4, SQRT_2_BY_3};

/// Implements the von Mises plasticity law with linear isotropic hardening
///
/// The yield function is:
///
/// ```text
/// f = σd - (σy + H p)
/// ```
///
/// where `σd` is the von Mises equivalent stress and `p` the equivalent plastic strain.
/// The update uses the radial return algorithm and yields the consistent tangent operator.
///
/// Material properties: YoungModulus, PoissonRatio, YieldStrength, HardeningSlope.
/// Internal state variables: ElasticStrain (symmetric tensor), EquivalentPlasticStrain.
pub struct VonMisesPlasticity {
    info: BehaviorInfo,

    /// Relative tolerance on the yield function to detect plastic loading
    ftol: f64,
}

impl VonMisesPlasticity {
    /// Allocates a new instance
    pub fn new(hypothesis: Hypothesis) -> Result<Self, StrError> {
        let ftol = 1e-10;
        let mut info = BehaviorInfo::new("IsotropicLinearHardeningPlasticity", hypothesis, Kinematic::SmallStrain);
        info.set_supported_hypotheses(&SMALL_STRAIN_HYPOTHESES);
        info.add_material_property("YoungModulus")?
            .add_material_property("PoissonRatio")?
            .add_material_property("YieldStrength")?
            .add_material_property("HardeningSlope")?
            .add_internal_state_variable("ElasticStrain", VariableType::Stensor)?
            .add_internal_state_variable("EquivalentPlasticStrain", VariableType::Scalar)?
            .add_external_state_variable("Temperature")?
            .add_parameter("YieldFunctionTolerance", ftol)?
            .set_physical_bounds("YoungModulus", Some(0.0), None)?
            .set_physical_bounds("PoissonRatio", Some(-1.0), Some(0.5))?
            .set_physical_bounds("YieldStrength", Some(0.0), None)?
            .set_physical_bounds("EquivalentPlasticStrain", Some(0.0), None)?
            .set_physical_bounds("Temperature", Some(0.0), None)?
            .set_bounds("HardeningSlope", Some(0.0), None)?;
        if info.validate().is_some() {
            return Err("IsotropicLinearHardeningPlasticity does not support the requested hypothesis");
        }
        Ok(VonMisesPlasticity { info, ftol })
    }
}

impl Behavior for VonMisesPlasticity {
    fn info(&self) -> &BehaviorInfo {
        &self.info
    }

    fn integrate(&self, input: &BehaviorInput, output: &mut BehaviorOutput) -> IntegrationStatus {
        let status = check_input_bounds(&self.info, input);
        if status == IntegrationStatus::Failure {
            return status;
        }

        // material properties
        let young = input.material_properties[0];
        let poisson = input.material_properties[1];
        let sig_y = input.material_properties[2];
        let hh = input.material_properties[3];
        if young <= 0.0 || poisson >= 0.5 {
            return IntegrationStatus::Failure;
        }
        let model = LinElasticity::new(young, poisson, false, false);
        let (kk, gg) = model.get_bulk_shear();
        if 3.0 * gg + hh <= 0.0 {
            return IntegrationStatus::Failure;
        }

        // trial elastic strain: εe_trial = εe₀ + Δε
        let n = self.info.hypothesis.stensor_size();
        let mut eel = vec![0.0; n];
        for k in 0..n {
            eel[k] = input.internal_values_begin[k] + input.gradients_end[k] - input.gradients_begin[k];
        }
        let p0 = input.internal_values_begin[n];

        // trial stress: σ_trial = D : εe_trial
        let dd = model.get_modulus();
        let mut eel_tensor = Tensor2::new(Mandel::Symmetric);
        let mut sigma = Tensor2::new(Mandel::Symmetric);
        let mut s = Tensor2::new(Mandel::Symmetric);
        stensor_to_tensor2(&mut eel_tensor, &eel);
        t4_ddot_t2(&mut sigma, 1.0, dd, &eel_tensor);
        sigma.deviator(&mut s);
        let sigma_d_trial = sigma.invariant_sigma_d();

        // yield function at the trial state
        let f_trial = sigma_d_trial - (sig_y + hh * p0);
        let plastic = f_trial > self.ftol * f64::max(sig_y, 1.0);

        // return mapping
        let mut dp = 0.0;
        if plastic {
            dp = f_trial / (3.0 * gg + hh);
            let coef = 1.5 * dp / sigma_d_trial; // Δp n = (3/2) Δp s / σd_trial
            for i in 0..6 {
                sigma.vector_mut()[i] -= 2.0 * gg * coef * s.vector()[i];
                eel_tensor.vector_mut()[i] -= coef * s.vector()[i];
            }
        }

        // results
        tensor2_to_stensor(output.forces.as_mut_data(), &sigma);
        tensor2_to_stensor(&mut output.internal_values.as_mut_data()[0..n], &eel_tensor);
        output.internal_values[n] = p0 + dp;

        // stiffness
        match input.stiffness {
            StiffnessType::NoStiffness => (),
            StiffnessType::Elastic | StiffnessType::Secant => tensor4_to_tangent(output.tangent, dd),
            StiffnessType::ConsistentTangent => {
                if plastic {
                    let mut dd_ep = Tensor4::new(Mandel::Symmetric);
                    let norm_s = sigma_d_trial * SQRT_2_BY_3;
                    let a = 2.0 * gg * (1.0 - 3.0 * gg * dp / sigma_d_trial);
                    let b = 6.0 * gg * gg * (dp / sigma_d_trial - 1.0 / (3.0 * gg + hh)) / (norm_s * norm_s);
                    let svec = s.vector();
                    let mat = dd_ep.matrix_mut();
                    for i in 0..6 {
                        for j in 0..6 {
                            let delta = if i == j { 1.0 } else { 0.0 };
                            let ii = if i < 3 && j < 3 { 1.0 } else { 0.0 };
                            let psd = delta - ii / 3.0;
                            mat.set(i, j, a * psd + b * svec[i] * svec[j] + kk * ii);
                        }
                    }
                    tensor4_to_tangent(output.tangent, &dd_ep);
                } else {
                    tensor4_to_tangent(output.tangent, dd);
                }
            }
        }
        status
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
