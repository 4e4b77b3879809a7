use russell_lab::Matrix;
use russell_tensor::{Tensor2, Tensor4};

/// Maps the symmetric tensor components XX YY ZZ XY XZ YZ to the Mandel components of Tensor2
///
/// Tensor2 stores xx yy zz xy yz zx; both representations carry the √2 factor on shear terms.
pub(crate) const MANDEL_INDEX: [usize; 6] = [0, 1, 2, 3, 5, 4];

/// Copies the first `values.len()` symmetric tensor components into a 3D Tensor2 (others are zeroed)
pub(crate) fn stensor_to_tensor2(t: &mut Tensor2, values: &[f64]) {
    let vec = t.vector_mut();
    vec.fill(0.0);
    for (k, value) in values.iter().enumerate() {
        vec[MANDEL_INDEX[k]] = *value;
    }
}

/// Copies the components of a 3D Tensor2 into the first `values.len()` symmetric tensor components
pub(crate) fn tensor2_to_stensor(values: &mut [f64], t: &Tensor2) {
    let vec = t.vector();
    for (k, value) in values.iter_mut().enumerate() {
        *value = vec[MANDEL_INDEX[k]];
    }
}

/// Copies the leading block of a 3D modulus into a tangent matrix with the symmetric tensor ordering
pub(crate) fn tensor4_to_tangent(tangent: &mut Matrix, dd: &Tensor4) {
    let (nrow, ncol) = tangent.dims();
    let mat = dd.matrix();
    for i in 0..nrow {
        for j in 0..ncol {
            tangent.set(i, j, mat.get(MANDEL_INDEX[i], MANDEL_INDEX[j]));
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{stensor_to_tensor2, tensor2_to_stensor, tensor4_to_tangent};
    use russell_lab::Matrix;
    use russell_tensor::{LinElasticity, Mandel, Tensor2};

    #[test]
    fn stensor_mapping_works() {
        let mut t = Tensor2::new(Mandel::Symmetric);
        stensor_to_tensor2(&mut t, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(t.vector().as_data(), &[1.0, 2.0, 3.0, 4.0, 6.0, 5.0]);
        let mut out = [0.0; 6];
        tensor2_to_stensor(&mut out, &t);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        // reduced
        stensor_to_tensor2(&mut t, &[7.0, 8.0, 9.0]);
        assert_eq!(t.vector().as_data(), &[7.0, 8.0, 9.0, 0.0, 0.0, 0.0]);
        let mut out = [0.0; 4];
        tensor2_to_stensor(&mut out, &t);
        assert_eq!(out, [7.0, 8.0, 9.0, 0.0]);
    }

    #[test]
    fn tangent_mapping_works() {
        let ela = LinElasticity::new(1000.0, 0.25, false, false);
        let dd = ela.get_modulus();
        let mut tangent = Matrix::new(4, 4);
        tensor4_to_tangent(&mut tangent, dd);
        let mat = dd.matrix();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(tangent.get(i, j), mat.get(i, j));
            }
        }
    }
}
