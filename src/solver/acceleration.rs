use russell_lab::Vector;

/// Implements the Irons-Tuck acceleration algorithm
///
/// The algorithm keeps the last three iterates `u0`, `u1` and `u2` and, every other iteration
/// starting at the trigger, replaces the current iterate by:
///
/// ```text
/// Δu2 = u2 - u1
/// Δu1 = u1 - u0
/// Δ²u = Δu2 - Δu1
/// u ← u - (Δu2 · Δ²u) / (Δ²u · Δ²u) Δu2
/// ```
pub struct IronsTuck {
    trigger: usize,
    u0: Vector,
    u1: Vector,
    u2: Vector,
}

impl IronsTuck {
    /// Allocates a new instance
    ///
    /// **Note:** the trigger must be ≥ 2 (see `Config::validate`).
    pub fn new(neq: usize, trigger: usize) -> Self {
        IronsTuck {
            trigger,
            u0: Vector::new(neq),
            u1: Vector::new(neq),
            u2: Vector::new(neq),
        }
    }

    /// Records the iterate before the first correction
    pub fn start(&mut self, u: &Vector) {
        self.u0.fill(0.0);
        self.u1.fill(0.0);
        self.u2.as_mut_data().copy_from_slice(u.as_data());
    }

    /// Records the corrected iterate and accelerates it if required
    ///
    /// `iteration` is the number of corrections applied so far (starting at 1). Returns true if
    /// the iterate has been modified.
    pub fn accelerate(&mut self, u: &mut Vector, iteration: usize) -> bool {
        let n = u.dim();
        self.u0.as_mut_data().copy_from_slice(self.u1.as_data());
        self.u1.as_mut_data().copy_from_slice(self.u2.as_data());
        self.u2.as_mut_data().copy_from_slice(u.as_data());
        if iteration < self.trigger || (iteration - self.trigger) % 2 != 0 {
            return false;
        }
        let mut num = 0.0;
        let mut den = 0.0;
        for i in 0..n {
            let du2 = self.u2[i] - self.u1[i];
            let du1 = self.u1[i] - self.u0[i];
            let ddu = du2 - du1;
            num += du2 * ddu;
            den += ddu * ddu;
        }
        if den <= (n as f64) * 100.0 * f64::MIN_POSITIVE {
            return false;
        }
        let alpha = num / den;
        for i in 0..n {
            u[i] -= alpha * (self.u2[i] - self.u1[i]);
        }
        true
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::IronsTuck;
    use russell_lab::{approx_eq, Vector};

    #[test]
    fn accelerate_skips_early_and_odd_iterations() {
        let mut acc = IronsTuck::new(1, 2);
        let mut u = Vector::from(&[1.0]);
        acc.start(&u);
        u[0] = 0.5;
        assert!(!acc.accelerate(&mut u, 1));
        u[0] = 0.25;
        assert!(acc.accelerate(&mut u, 2));
        u[0] = 0.1;
        assert!(!acc.accelerate(&mut u, 3));
    }

    #[test]
    fn accelerate_solves_linear_fixed_point_iterations() {
        // the fixed point iteration u ← 0.5 u + 1 converges slowly to u = 2; the iterates form a
        // geometric sequence, which the acceleration extrapolates exactly
        let g = |x: f64| 0.5 * x + 1.0;
        let mut acc = IronsTuck::new(1, 2);
        let mut u = Vector::from(&[0.0]);
        acc.start(&u);
        u[0] = g(u[0]);
        acc.accelerate(&mut u, 1);
        u[0] = g(u[0]);
        assert!(acc.accelerate(&mut u, 2));
        approx_eq(u[0], 2.0, 1e-14);
    }

    #[test]
    fn accelerate_ignores_vanishing_second_differences() {
        let mut acc = IronsTuck::new(2, 2);
        let mut u = Vector::from(&[1.0, 1.0]);
        acc.start(&u);
        assert!(!acc.accelerate(&mut u, 1));
        u[0] = 2.0;
        u[1] = 2.0;
        acc.accelerate(&mut u, 1);
        u[0] = 3.0;
        u[1] = 3.0;
        // constant increments: Δ²u = 0
        assert!(!acc.accelerate(&mut u, 2));
        assert_eq!(u.as_data(), &[3.0, 3.0]);
    }
}
