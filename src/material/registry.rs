use super::{Behavior, ElasticTangentOnly, TridimensionalWrapper, SMALL_STRAIN_HYPOTHESES};
use super::{LinearElasticity, SaintVenantKirchhoff, VonMisesPlasticity};
use crate::base::{Hypothesis, BUILTIN_LIBRARY, INTERFACE_GENERIC, INTERFACE_LEGACY, SMALL_STRAIN_TRIDIMENSIONAL_WRAPPER};
use crate::StrError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Defines the function allocating a behavior for a given hypothesis
pub type BehaviorFactory = Arc<dyn Fn(Hypothesis) -> Result<Arc<dyn Behavior>, StrError> + Send + Sync>;

/// Identifies a loaded behavior (interface, library, function, hypothesis)
type CacheKey = (String, String, String, Hypothesis);

/// Identifies a wrapped behavior (wrapper, interface, library, function, hypothesis)
type WrappedKey = (String, CacheKey);

/// Holds a factory and the hypotheses it supports
struct Entry {
    factory: BehaviorFactory,
    hypotheses: Vec<Hypothesis>,
}

/// Resolves behaviors by interface, library and function name
///
/// Loaded behaviors are cached; loading the same key twice returns the same shared instance.
/// Wrapped behaviors are cached separately from the behaviors they wrap.
///
/// # Examples
///
/// ```
/// use mptest::base::Hypothesis;
/// use mptest::material::BehaviorRegistry;
///
/// let registry = BehaviorRegistry::new();
/// let law = registry
///     .load("generic", "builtin", "LinearElasticity", Hypothesis::Tridimensional)
///     .unwrap();
/// assert_eq!(law.info().material_properties, &["YoungModulus", "PoissonRatio"]);
/// ```
pub struct BehaviorRegistry {
    libraries: HashMap<(String, String), Entry>,
    cache: Mutex<HashMap<CacheKey, Arc<dyn Behavior>>>,
    wrapped: Mutex<HashMap<WrappedKey, Arc<dyn Behavior>>>,
}

impl BehaviorRegistry {
    /// Allocates a new registry with the built-in library
    pub fn new() -> Self {
        let mut registry = BehaviorRegistry {
            libraries: HashMap::new(),
            cache: Mutex::new(HashMap::new()),
            wrapped: Mutex::new(HashMap::new()),
        };
        registry.insert(
            BUILTIN_LIBRARY,
            "LinearElasticity",
            &SMALL_STRAIN_HYPOTHESES,
            Arc::new(linear_elasticity),
        );
        registry.insert(
            BUILTIN_LIBRARY,
            "IsotropicLinearHardeningPlasticity",
            &SMALL_STRAIN_HYPOTHESES,
            Arc::new(von_mises_plasticity),
        );
        registry.insert(
            BUILTIN_LIBRARY,
            "SaintVenantKirchhoffElasticity",
            &[Hypothesis::Tridimensional],
            Arc::new(saint_venant_kirchhoff),
        );
        registry
    }

    /// Registers an additional behavior
    pub fn register(
        &mut self,
        library: &str,
        function: &str,
        hypotheses: &[Hypothesis],
        factory: BehaviorFactory,
    ) -> Result<(), StrError> {
        if library.is_empty() || function.is_empty() {
            return Err("the library and function names must not be empty");
        }
        if hypotheses.is_empty() {
            return Err("at least one supported hypothesis is required");
        }
        if self.libraries.contains_key(&(library.to_string(), function.to_string())) {
            return Err("the behavior is already registered");
        }
        self.insert(library, function, hypotheses, factory);
        Ok(())
    }

    /// Returns the hypotheses supported by a behavior
    pub fn supported_hypotheses(&self, library: &str, function: &str) -> Result<Vec<Hypothesis>, StrError> {
        Ok(self.entry(library, function)?.hypotheses.clone())
    }

    /// Loads a behavior
    ///
    /// The `legacy` interface presents the behavior without consistent tangent operator.
    pub fn load(
        &self,
        interface: &str,
        library: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Arc<dyn Behavior>, StrError> {
        if interface != INTERFACE_GENERIC && interface != INTERFACE_LEGACY {
            return Err("unknown behavior interface");
        }
        let entry = self.entry(library, function)?;
        if !entry.hypotheses.contains(&hypothesis) {
            return Err("the behavior does not support the requested hypothesis");
        }
        let key = (
            interface.to_string(),
            library.to_string(),
            function.to_string(),
            hypothesis,
        );
        let mut cache = self.cache.lock().map_err(|_| "the behavior cache is unavailable")?;
        if let Some(behavior) = cache.get(&key) {
            return Ok(behavior.clone());
        }
        let native = (entry.factory)(hypothesis)?;
        if let Some(msg) = native.info().validate() {
            log::error!("{}", msg);
            return Err("the behavior description is inconsistent");
        }
        let behavior: Arc<dyn Behavior> = if interface == INTERFACE_LEGACY {
            Arc::new(ElasticTangentOnly::new(native))
        } else {
            native
        };
        log::debug!("loaded {}::{} ({}) for {}", library, function, interface, hypothesis);
        cache.insert(key, behavior.clone());
        Ok(behavior)
    }

    /// Loads a tridimensional behavior and adapts it to a reduced hypothesis
    pub fn load_wrapped(
        &self,
        wrapper: &str,
        interface: &str,
        library: &str,
        function: &str,
        hypothesis: Hypothesis,
    ) -> Result<Arc<dyn Behavior>, StrError> {
        if wrapper != SMALL_STRAIN_TRIDIMENSIONAL_WRAPPER {
            return Err("unknown behavior wrapper");
        }
        let key = (
            wrapper.to_string(),
            (
                interface.to_string(),
                library.to_string(),
                function.to_string(),
                hypothesis,
            ),
        );
        let mut wrapped = self.wrapped.lock().map_err(|_| "the behavior cache is unavailable")?;
        if let Some(behavior) = wrapped.get(&key) {
            return Ok(behavior.clone());
        }
        let inner = self.load(interface, library, function, Hypothesis::Tridimensional)?;
        let behavior: Arc<dyn Behavior> = Arc::new(TridimensionalWrapper::new(inner, hypothesis)?);
        log::debug!("wrapped {}::{} ({}) for {}", library, function, interface, hypothesis);
        wrapped.insert(key, behavior.clone());
        Ok(behavior)
    }

    fn insert(&mut self, library: &str, function: &str, hypotheses: &[Hypothesis], factory: BehaviorFactory) {
        self.libraries.insert(
            (library.to_string(), function.to_string()),
            Entry {
                factory,
                hypotheses: hypotheses.to_vec(),
            },
        );
    }

    fn entry(&self, library: &str, function: &str) -> Result<&Entry, StrError> {
        self.libraries
            .get(&(library.to_string(), function.to_string()))
            .ok_or("the behavior is not available in the library")
    }
}

fn linear_elasticity(hypothesis: Hypothesis) -> Result<Arc<dyn Behavior>, StrError> {
    Ok(Arc::new(LinearElasticity::new(hypothesis)?))
}

fn von_mises_plasticity(hypothesis: Hypothesis) -> Result<Arc<dyn Behavior>, StrError> {
    Ok(Arc::new(VonMisesPlasticity::new(hypothesis)?))
}

fn saint_venant_kirchhoff(hypothesis: Hypothesis) -> Result<Arc<dyn Behavior>, StrError> {
    Ok(Arc::new(SaintVenantKirchhoff::new(hypothesis)?))
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        BehaviorRegistry::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
