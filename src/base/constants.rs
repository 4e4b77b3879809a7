/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/mptest/test";

/// Defines the minimum allowed time increment
pub const CONFIG_MIN_DT_MIN: f64 = 1e-14;

/// Defines the minimum allowed tolerance on gradients or forces
pub const CONFIG_MIN_TOL: f64 = 1e-16;

/// Defines the minimum iteration index to trigger the acceleration algorithm
pub const CONFIG_MIN_ACCELERATION_TRIGGER: usize = 2;

/// Defines the maximum number of significant digits in the output
pub const CONFIG_MAX_OUTPUT_PRECISION: usize = 17;

/// Name of the interface of laws providing the consistent tangent operator
pub const INTERFACE_GENERIC: &str = "generic";

/// Name of the interface of laws providing only the elastic operator
pub const INTERFACE_LEGACY: &str = "legacy";

/// Name of the library of laws shipped with this crate
pub const BUILTIN_LIBRARY: &str = "builtin";

/// Name of the wrapper adapting tridimensional small strain laws to reduced hypotheses
pub const SMALL_STRAIN_TRIDIMENSIONAL_WRAPPER: &str = "SmallStrainTridimensionalBehaviourWrapper";
