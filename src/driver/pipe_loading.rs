use super::insert;
use crate::base::Evolution;

/// Defines the axial loading of a pipe
#[derive(Clone, Debug)]
pub enum AxialLoading {
    /// Plane strain (the axial strain is zero)
    None,

    /// Closed ends: the axial force balances the pressures acting on the end caps
    EndCapEffect,

    /// Imposed axial force
    ImposedAxialForce(Evolution),

    /// Imposed axial strain
    ImposedAxialStrain(Evolution),
}

/// Defines the radial loading of a pipe
#[derive(Clone, Debug)]
pub enum RadialLoading {
    /// Inner and outer pressures
    ImposedPressures { inner: Evolution, outer: Evolution },

    /// Inner pressure and radial displacement of the outer surface
    ImposedOuterDisplacement {
        inner_pressure: Evolution,
        displacement: Evolution,
    },

    /// Closed pipe filled with an ideal gas, plus an outer pressure
    ///
    /// The gas volume is the initial one (small strain). The inner pressure follows the
    /// temperature: `Pi = P0 T / T0`, with the filling pressure `P0` and temperature `T0`.
    TightPipe {
        filling_pressure: f64,
        filling_temperature: f64,
        outer: Evolution,
    },
}

/// Holds the loading of a pipe
///
/// Pressures are positive in compression (acting against the surface).
#[derive(Clone, Debug)]
pub struct PipeLoading {
    /// Axial loading
    pub axial: AxialLoading,

    /// Radial loading
    pub radial: RadialLoading,

    /// Material properties (uniform over the pipe)
    pub material_properties: Vec<(String, Evolution)>,

    /// External state variables (uniform over the pipe)
    pub external_state_variables: Vec<(String, Evolution)>,
}

impl PipeLoading {
    /// Allocates a new instance with zero pressures and plane strain conditions
    pub fn new() -> Self {
        PipeLoading {
            axial: AxialLoading::None,
            radial: RadialLoading::ImposedPressures {
                inner: Evolution::constant(0.0),
                outer: Evolution::constant(0.0),
            },
            material_properties: Vec::new(),
            external_state_variables: Vec::new(),
        }
    }

    /// Sets the inner pressure
    ///
    /// Keeps the outer condition (pressure or displacement). A tight pipe becomes a pipe
    /// with imposed pressures.
    pub fn set_inner_pressure<E: Into<Evolution>>(&mut self, evolution: E) -> &mut Self {
        if let RadialLoading::TightPipe { outer, .. } = &self.radial {
            self.radial = RadialLoading::ImposedPressures {
                inner: evolution.into(),
                outer: outer.clone(),
            };
            return self;
        }
        match &mut self.radial {
            RadialLoading::ImposedPressures { inner, .. } => *inner = evolution.into(),
            RadialLoading::ImposedOuterDisplacement { inner_pressure, .. } => *inner_pressure = evolution.into(),
            RadialLoading::TightPipe { .. } => (),
        }
        self
    }

    /// Sets the outer pressure (replaces an imposed outer displacement)
    pub fn set_outer_pressure<E: Into<Evolution>>(&mut self, evolution: E) -> &mut Self {
        if let RadialLoading::TightPipe { outer, .. } = &mut self.radial {
            *outer = evolution.into();
            return self;
        }
        let inner = self.inner_pressure();
        self.radial = RadialLoading::ImposedPressures {
            inner,
            outer: evolution.into(),
        };
        self
    }

    /// Closes the pipe, filled with a gas at the given pressure and temperature
    ///
    /// Keeps the outer pressure, if any. The temperature is given by the `Temperature` external
    /// state variable.
    pub fn set_tight_pipe(&mut self, filling_pressure: f64, filling_temperature: f64) -> &mut Self {
        let outer = match &self.radial {
            RadialLoading::ImposedPressures { outer, .. } => outer.clone(),
            RadialLoading::TightPipe { outer, .. } => outer.clone(),
            RadialLoading::ImposedOuterDisplacement { .. } => Evolution::constant(0.0),
        };
        self.radial = RadialLoading::TightPipe {
            filling_pressure,
            filling_temperature,
            outer,
        };
        self
    }

    /// Sets the radial displacement of the outer surface (replaces the outer pressure)
    pub fn set_outer_displacement<E: Into<Evolution>>(&mut self, evolution: E) -> &mut Self {
        let inner_pressure = self.inner_pressure();
        self.radial = RadialLoading::ImposedOuterDisplacement {
            inner_pressure,
            displacement: evolution.into(),
        };
        self
    }

    /// Sets the axial loading
    pub fn set_axial_loading(&mut self, axial: AxialLoading) -> &mut Self {
        self.axial = axial;
        self
    }

    /// Sets a material property
    pub fn set_material_property<E: Into<Evolution>>(&mut self, name: &str, evolution: E) -> &mut Self {
        insert(&mut self.material_properties, name, evolution.into());
        self
    }

    /// Sets an external state variable
    pub fn set_external_state_variable<E: Into<Evolution>>(&mut self, name: &str, evolution: E) -> &mut Self {
        insert(&mut self.external_state_variables, name, evolution.into());
        self
    }

    fn inner_pressure(&self) -> Evolution {
        match &self.radial {
            RadialLoading::ImposedPressures { inner, .. } => inner.clone(),
            RadialLoading::ImposedOuterDisplacement { inner_pressure, .. } => inner_pressure.clone(),
            RadialLoading::TightPipe { .. } => Evolution::constant(0.0),
        }
    }
}

impl Default for PipeLoading {
    fn default() -> Self {
        PipeLoading::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{AxialLoading, PipeLoading, RadialLoading};
    use crate::base::Evolution;

    #[test]
    fn builders_work() {
        let mut loading = PipeLoading::new();
        assert!(matches!(loading.axial, AxialLoading::None));
        loading
            .set_inner_pressure(1.5e6)
            .set_outer_pressure(Evolution::linear(&[0.0, 1.0], &[1.5e6, 10e6]).unwrap())
            .set_axial_loading(AxialLoading::EndCapEffect)
            .set_material_property("YoungModulus", 150e9)
            .set_material_property("YoungModulus", 200e9);
        match &loading.radial {
            RadialLoading::ImposedPressures { inner, outer } => {
                assert_eq!(inner.value(0.3), 1.5e6);
                assert_eq!(outer.value(1.0), 10e6);
            }
            _ => panic!("pressures should be imposed"),
        }
        assert!(matches!(loading.axial, AxialLoading::EndCapEffect));
        assert_eq!(loading.material_properties.len(), 1);
        assert_eq!(loading.material_properties[0].1.value(0.0), 200e9);

        loading.set_outer_displacement(1e-6).set_inner_pressure(2e6);
        match &loading.radial {
            RadialLoading::ImposedOuterDisplacement {
                inner_pressure,
                displacement,
            } => {
                assert_eq!(inner_pressure.value(0.0), 2e6);
                assert_eq!(displacement.value(0.0), 1e-6);
            }
            _ => panic!("the outer displacement should be imposed"),
        }
    }

    #[test]
    fn tight_pipe_builders_work() {
        let mut loading = PipeLoading::new();
        loading.set_outer_pressure(1e6).set_tight_pipe(2e6, 300.0);
        match &loading.radial {
            RadialLoading::TightPipe {
                filling_pressure,
                filling_temperature,
                outer,
            } => {
                assert_eq!(*filling_pressure, 2e6);
                assert_eq!(*filling_temperature, 300.0);
                assert_eq!(outer.value(0.0), 1e6);
            }
            _ => panic!("the pipe should be tight"),
        }

        loading.set_outer_pressure(3e6);
        match &loading.radial {
            RadialLoading::TightPipe { outer, .. } => assert_eq!(outer.value(0.0), 3e6),
            _ => panic!("the pipe should be tight"),
        }

        loading.set_inner_pressure(5e6);
        match &loading.radial {
            RadialLoading::ImposedPressures { inner, outer } => {
                assert_eq!(inner.value(0.0), 5e6);
                assert_eq!(outer.value(0.0), 3e6);
            }
            _ => panic!("pressures should be imposed"),
        }
    }
}
