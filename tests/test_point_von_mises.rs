use mptest::prelude::*;
use russell_lab::approx_eq;
use std::sync::Arc;

const YOUNG: f64 = 200e9; // Young's modulus
const POISSON: f64 = 0.3; // Poisson's coefficient
const SIG_Y: f64 = 300e6; // yield strength
const HH: f64 = 10e9; // hardening slope

const TIMES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

fn loading(smax: f64) -> PointLoading {
    let mut loading = PointLoading::new();
    loading
        .impose_force("SXX", Evolution::from_pairs(&[(0.0, 0.0), (1.0, smax)]).unwrap())
        .set_material_property("YoungModulus", YOUNG)
        .set_material_property("PoissonRatio", POISSON)
        .set_material_property("YieldStrength", SIG_Y)
        .set_material_property("HardeningSlope", HH)
        .set_external_state_variable("Temperature", 293.15);
    loading
}

fn run(behavior: Arc<dyn Behavior>, config: Config) -> History {
    let mut driver = PointDriver::new(behavior, loading(400e6), config, &TIMES).unwrap();
    driver.run().unwrap()
}

#[test]
fn test_point_von_mises_uniaxial_hardening() {
    let law = VonMisesPlasticity::new(Hypothesis::Tridimensional).unwrap();
    let history = run(Arc::new(law), Config::new());
    let sxx = history.column("SXX").unwrap();
    let exx = history.column("EXX").unwrap();
    let eyy = history.column("EYY").unwrap();
    let pp = history.column("EquivalentPlasticStrain").unwrap();
    let ee_xx = history.column("ElasticStrainXX").unwrap();
    for (k, t) in TIMES.iter().enumerate() {
        let sig = 400e6 * t;
        let p = f64::max(0.0, (sig - SIG_Y) / HH);
        approx_eq(sxx[k], sig, 1e-3);
        approx_eq(pp[k], p, 1e-11);
        approx_eq(exx[k], sig / YOUNG + p, 1e-11);
        approx_eq(eyy[k], -POISSON * sig / YOUNG - p / 2.0, 1e-11);
        approx_eq(ee_xx[k], sig / YOUNG, 1e-11);
    }

    // elastic steps need one correction; plastic steps need more
    let reports: Vec<_> = history.records[1..].iter().map(|r| r.report.unwrap()).collect();
    assert_eq!(reports[0].iterations, 1);
    assert_eq!(reports[1].iterations, 1);
    assert!(reports[3].iterations > 1);
    assert!(reports.iter().all(|r| r.state == LocalStepState::Converged && r.failures == 0));
}

#[test]
fn test_point_von_mises_prediction_policies_agree() {
    let reference = run(
        Arc::new(VonMisesPlasticity::new(Hypothesis::Tridimensional).unwrap()),
        Config::new(),
    );
    for policy in [
        PredictionPolicy::LinearPrediction,
        PredictionPolicy::ElasticPrediction,
        PredictionPolicy::SecantPrediction,
    ] {
        let mut config = Config::new();
        config.prediction_policy = policy;
        let law = VonMisesPlasticity::new(Hypothesis::Tridimensional).unwrap();
        let history = run(Arc::new(law), config);
        for name in ["EXX", "EYY", "EZZ", "EquivalentPlasticStrain"] {
            let a = reference.column(name).unwrap();
            let b = history.column(name).unwrap();
            for k in 0..TIMES.len() {
                approx_eq(a[k], b[k], 1e-11);
            }
        }
    }
}

#[test]
fn test_point_von_mises_wrapped_plane_strain() {
    // the tridimensional law wrapped to plane strain matches the native plane strain law
    let registry = BehaviorRegistry::new();
    let wrapped = registry
        .load_wrapped(
            SMALL_STRAIN_TRIDIMENSIONAL_WRAPPER,
            INTERFACE_GENERIC,
            "builtin",
            "IsotropicLinearHardeningPlasticity",
            Hypothesis::PlaneStrain,
        )
        .unwrap();
    assert_eq!(wrapped.info().hypothesis, Hypothesis::PlaneStrain);
    assert_eq!(wrapped.info().n_gradient_components(), 4);
    let native = registry
        .load(
            INTERFACE_GENERIC,
            "builtin",
            "IsotropicLinearHardeningPlasticity",
            Hypothesis::PlaneStrain,
        )
        .unwrap();

    let a = run(wrapped, Config::new());
    let b = run(native, Config::new());
    for name in ["EXX", "EYY", "SXX", "SZZ", "EquivalentPlasticStrain"] {
        let va = a.column(name).unwrap();
        let vb = b.column(name).unwrap();
        let tol = if name.starts_with('S') { 1e-2 } else { 1e-11 };
        for k in 0..TIMES.len() {
            approx_eq(va[k], vb[k], tol);
        }
    }
    approx_eq(a.column("EZZ").unwrap()[4], 0.0, 1e-20);
    assert!(a.column("EquivalentPlasticStrain").unwrap()[4] > 0.0);
}

#[test]
fn test_point_von_mises_shear_uses_the_tensor_convention() {
    let gg = YOUNG / (2.0 * (1.0 + POISSON)); // shear modulus
    let tau = 200e6;
    let mut loading = PointLoading::new();
    loading
        .impose_force("SXY", Evolution::from_pairs(&[(0.0, 0.0), (1.0, tau)]).unwrap())
        .set_material_property("YoungModulus", YOUNG)
        .set_material_property("PoissonRatio", POISSON)
        .set_material_property("YieldStrength", SIG_Y)
        .set_material_property("HardeningSlope", HH)
        .set_external_state_variable("Temperature", 293.15);
    let law = VonMisesPlasticity::new(Hypothesis::Tridimensional).unwrap();
    let mut driver = PointDriver::new(Arc::new(law), loading, Config::new(), &TIMES).unwrap();
    let history = driver.run().unwrap();
    let sxy = history.column("SXY").unwrap();
    let exy = history.column("EXY").unwrap();
    let ee_xy = history.column("ElasticStrainXY").unwrap();
    let pp = history.column("EquivalentPlasticStrain").unwrap();
    for (k, t) in TIMES.iter().enumerate() {
        let s = tau * t;
        // pure shear: σeq = √3 τ and the plastic shear strain is (√3/2) p
        let p = f64::max(0.0, (f64::sqrt(3.0) * s - SIG_Y) / HH);
        approx_eq(sxy[k], s, 1e-3);
        approx_eq(pp[k], p, 1e-11);
        approx_eq(ee_xy[k], s / (2.0 * gg), 1e-11);
        approx_eq(exy[k], ee_xy[k] + f64::sqrt(3.0) * p / 2.0, 1e-11);
    }

    // the elastic steps: total and elastic shear strains coincide
    assert_eq!(pp[2], 0.0);
    approx_eq(ee_xy[2], exy[2], 1e-15);
    approx_eq(exy[2], 0.5 * tau / (2.0 * gg), 1e-15);
}
