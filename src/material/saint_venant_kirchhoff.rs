use super::{check_input_bounds, Behavior, BehaviorInfo, BehaviorInput, BehaviorOutput, IntegrationStatus};
use crate::base::{Hypothesis, Kinematic, StiffnessType};
use crate::StrError;
use russell_tensor::SQRT_2;

/// Maps the deformation gradient components (XX YY ZZ XY YX XZ ZX YZ ZY) to (row, column) pairs
const F_INDEX: [(usize, usize); 9] = [(0, 0), (1, 1), (2, 2), (0, 1), (1, 0), (0, 2), (2, 0), (1, 2), (2, 1)];

/// Maps the symmetric tensor components (XX YY ZZ XY XZ YZ) to (row, column) pairs
const S_INDEX: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (0, 1), (0, 2), (1, 2)];

/// Implements the Saint Venant–Kirchhoff hyperelastic law
///
/// ```text
/// E = (Fᵀ F - I) / 2
/// S = λ tr(E) I + 2 μ E
/// σ = F S Fᵀ / J
/// ```
///
/// The tangent operator (derivative of the Cauchy stress with respect to the deformation
/// gradient) is computed by central differences.
///
/// Material properties: YoungModulus, PoissonRatio.
pub struct SaintVenantKirchhoff {
    info: BehaviorInfo,

    /// Perturbation of the deformation gradient components
    perturbation: f64,
}

impl SaintVenantKirchhoff {
    /// Allocates a new instance
    pub fn new(hypothesis: Hypothesis) -> Result<Self, StrError> {
        let perturbation = 1e-7;
        let mut info = BehaviorInfo::new("SaintVenantKirchhoffElasticity", hypothesis, Kinematic::FiniteStrain);
        info.set_supported_hypotheses(&[Hypothesis::Tridimensional]);
        info.add_material_property("YoungModulus")?
            .add_material_property("PoissonRatio")?
            .add_external_state_variable("Temperature")?
            .add_parameter("PerturbationValue", perturbation)?
            .set_physical_bounds("YoungModulus", Some(0.0), None)?
            .set_physical_bounds("PoissonRatio", Some(-1.0), Some(0.5))?;
        if info.validate().is_some() {
            return Err("SaintVenantKirchhoffElasticity is only available in the Tridimensional hypothesis");
        }
        Ok(SaintVenantKirchhoff { info, perturbation })
    }

    /// Computes the Cauchy stress (Mandel components) given the deformation gradient components
    ///
    /// Returns None if the determinant of F is not positive.
    fn cauchy_stress(&self, sigma: &mut [f64], f_comps: &[f64], lambda: f64, mu: f64) -> Option<()> {
        let mut ff = [[0.0; 3]; 3];
        for (k, (i, j)) in F_INDEX.iter().enumerate() {
            ff[*i][*j] = f_comps[k];
        }
        let jj = ff[0][0] * (ff[1][1] * ff[2][2] - ff[1][2] * ff[2][1])
            - ff[0][1] * (ff[1][0] * ff[2][2] - ff[1][2] * ff[2][0])
            + ff[0][2] * (ff[1][0] * ff[2][1] - ff[1][1] * ff[2][0]);
        if jj <= 0.0 {
            return None;
        }

        // Green-Lagrange strain
        let mut ee = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                let mut c = 0.0;
                for k in 0..3 {
                    c += ff[k][i] * ff[k][j];
                }
                ee[i][j] = 0.5 * (c - if i == j { 1.0 } else { 0.0 });
            }
        }

        // second Piola-Kirchhoff stress
        let tr = ee[0][0] + ee[1][1] + ee[2][2];
        let mut ss = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                ss[i][j] = 2.0 * mu * ee[i][j] + if i == j { lambda * tr } else { 0.0 };
            }
        }

        // push-forward: σ = F S Fᵀ / J
        for (k, (i, j)) in S_INDEX.iter().enumerate() {
            let mut value = 0.0;
            for a in 0..3 {
                for b in 0..3 {
                    value += ff[*i][a] * ss[a][b] * ff[*j][b];
                }
            }
            let factor = if k < 3 { 1.0 } else { SQRT_2 };
            sigma[k] = factor * value / jj;
        }
        Some(())
    }
}

impl Behavior for SaintVenantKirchhoff {
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
        let lambda = young * poisson / ((1.0 + poisson) * (1.0 - 2.0 * poisson));
        let mu = young / (2.0 * (1.0 + poisson));

        let f1 = input.gradients_end.as_data();
        if self.cauchy_stress(output.forces.as_mut_data(), f1, lambda, mu).is_none() {
            return IntegrationStatus::Failure;
        }
        if input.stiffness == StiffnessType::NoStiffness {
            return status;
        }

        // central differences
        let h = self.perturbation;
        let mut f_pert = f1.to_vec();
        let mut s_plus = [0.0; 6];
        let mut s_minus = [0.0; 6];
        for j in 0..9 {
            f_pert[j] = f1[j] + h;
            let ok_plus = self.cauchy_stress(&mut s_plus, &f_pert, lambda, mu);
            f_pert[j] = f1[j] - h;
            let ok_minus = self.cauchy_stress(&mut s_minus, &f_pert, lambda, mu);
            f_pert[j] = f1[j];
            if ok_plus.is_none() || ok_minus.is_none() {
                return IntegrationStatus::Failure;
            }
            for i in 0..6 {
                output.tangent.set(i, j, (s_plus[i] - s_minus[i]) / (2.0 * h));
            }
        }
        status
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
