use mptest::prelude::*;
use russell_lab::approx_eq;
use std::thread;

fn loading(smax: f64) -> PointLoading {
    let mut loading = PointLoading::new();
    loading
        .impose_force("SXX", Evolution::linear(&[0.0, 1.0], &[0.0, smax]).unwrap())
        .set_material_property("YoungModulus", 200e9)
        .set_material_property("PoissonRatio", 0.3)
        .set_material_property("YieldStrength", 300e6)
        .set_material_property("HardeningSlope", 10e9)
        .set_external_state_variable("Temperature", 293.15);
    loading
}

#[test]
fn test_point_parallel_drivers_share_the_behavior() {
    let registry = BehaviorRegistry::new();
    let law = registry
        .load(
            INTERFACE_GENERIC,
            "builtin",
            "IsotropicLinearHardeningPlasticity",
            Hypothesis::Tridimensional,
        )
        .unwrap();
    let times = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
    let loads = [250e6, 350e6, 450e6, 550e6];

    // sequential reference
    let reference: Vec<_> = loads
        .iter()
        .map(|smax| {
            let mut driver = PointDriver::new(law.clone(), loading(*smax), Config::new(), &times).unwrap();
            driver.run().unwrap()
        })
        .collect();

    // one driver per thread, all sharing the same behavior
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = loads
            .iter()
            .map(|smax| {
                let law = law.clone();
                scope.spawn(move || {
                    let mut driver = PointDriver::new(law, loading(*smax), Config::new(), &times).unwrap();
                    driver.run().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (a, b) in reference.iter().zip(&results) {
        assert_eq!(a, b);
    }
    let pp = results[3].column("EquivalentPlasticStrain").unwrap();
    approx_eq(pp[5], (550e6 - 300e6) / 10e9, 1e-11);
    let pp = results[0].column("EquivalentPlasticStrain").unwrap();
    assert_eq!(pp[5], 0.0);
}
