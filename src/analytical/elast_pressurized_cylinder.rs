use crate::StrError;

/// Solution of the elastic thick-walled cylinder under inner and outer pressures (Lamé)
///
/// ```text
/// σr = A / r² + B
/// σθ = -A / r² + B
/// σz = E εz + ν (σr + σθ)
/// ur = r (σθ - ν (σr + σz)) / E
///
/// A = r1² r2² (p2 - p1) / (r2² - r1²)
/// B = (r1² p1 - r2² p2) / (r2² - r1²)
/// ```
///
/// The axial strain εz is uniform: zero for plane strain and `(1 - 2ν) B / E` for closed ends
/// (the axial force balances the pressures acting on the end caps).
///
/// # Reference
///
/// 1. Sadd MH (2005) Elasticity: Theory, Applications and Numerics, Elsevier, 474p
pub struct ElastPressurizedCylinder {
    r1: f64,
    r2: f64,
    young: f64,
    poisson: f64,
    aa: f64,
    bb: f64,
    ezz: f64,
}

impl ElastPressurizedCylinder {
    /// Allocates a new instance with zero axial strain (plane strain)
    ///
    /// * `r1` -- inner radius
    /// * `r2` -- outer radius
    /// * `p1` -- inner pressure (magnitude)
    /// * `p2` -- outer pressure (magnitude)
    /// * `young` -- Young's modulus
    /// * `poisson` -- Poisson's coefficient
    pub fn plane_strain(r1: f64, r2: f64, p1: f64, p2: f64, young: f64, poisson: f64) -> Result<Self, StrError> {
        if r1 <= 1e-10 {
            return Err("r1 must be > 1e-10");
        }
        if r2 <= r1 {
            return Err("r2 must be > r1");
        }
        if p1 < 0.0 {
            return Err("the magnitude of the pressure p1 must be positive");
        }
        if p2 < 0.0 {
            return Err("the magnitude of the pressure p2 must be positive");
        }
        if young <= 0.0 {
            return Err("the Young modulus must be > 0");
        }
        let rr1 = r1 * r1;
        let rr2 = r2 * r2;
        let drr = rr2 - rr1;
        let aa = rr1 * rr2 * (p2 - p1) / drr;
        let bb = (rr1 * p1 - rr2 * p2) / drr;
        Ok(ElastPressurizedCylinder {
            r1,
            r2,
            young,
            poisson,
            aa,
            bb,
            ezz: 0.0,
        })
    }

    /// Allocates a new instance with closed ends (end cap effect)
    pub fn closed_ends(r1: f64, r2: f64, p1: f64, p2: f64, young: f64, poisson: f64) -> Result<Self, StrError> {
        let mut sol = ElastPressurizedCylinder::plane_strain(r1, r2, p1, p2, young, poisson)?;
        sol.ezz = (1.0 - 2.0 * poisson) * sol.bb / young;
        Ok(sol)
    }

    /// Returns the (uniform) axial strain
    pub fn ezz(&self) -> f64 {
        self.ezz
    }

    /// Calculates the radial stress
    pub fn sr(&self, r: f64) -> f64 {
        assert!(r >= self.r1 && r <= self.r2);
        self.aa / (r * r) + self.bb
    }

    /// Calculates the hoop stress
    pub fn sh(&self, r: f64) -> f64 {
        assert!(r >= self.r1 && r <= self.r2);
        -self.aa / (r * r) + self.bb
    }

    /// Calculates the axial stress
    pub fn sz(&self, r: f64) -> f64 {
        self.young * self.ezz + self.poisson * (self.sr(r) + self.sh(r))
    }

    /// Calculates the radial displacement
    pub fn ur(&self, r: f64) -> f64 {
        r * (self.sh(r) - self.poisson * (self.sr(r) + self.sz(r))) / self.young
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
