use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::shapes::{GeoKind, Scratchpad};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Defines the type of the one-dimensional elements of a pipe
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum ElementType {
    /// Two nodes and two integration points
    Linear,

    /// Three nodes and three integration points
    Quadratic,

    /// Four nodes and four integration points
    Cubic,
}

impl ElementType {
    /// Returns the shape of the element
    pub fn geo_kind(&self) -> GeoKind {
        match self {
            ElementType::Linear => GeoKind::Lin2,
            ElementType::Quadratic => GeoKind::Lin3,
            ElementType::Cubic => GeoKind::Lin4,
        }
    }

    /// Returns the number of nodes of an element
    pub fn n_nodes(&self) -> usize {
        self.geo_kind().nnode()
    }

    /// Returns the number of integration points of an element
    pub fn n_integration_points(&self) -> usize {
        Gauss::new(self.geo_kind()).npoint()
    }
}

/// Holds the data of an integration point of the pipe
#[derive(Clone, Debug, PartialEq)]
pub struct IntegrationPoint {
    /// Element containing the point
    pub element: usize,

    /// Nodes of the element (local numbering of the shape)
    pub nodes: Vec<usize>,

    /// Radial position
    pub radius: f64,

    /// Integration weight including the 2π factor and the Jacobian (2π w J)
    pub weight: f64,

    /// Shape functions at the point
    pub nn: Vec<f64>,

    /// Derivatives of the shape functions with respect to r
    pub dnn_dr: Vec<f64>,
}

/// Holds the one-dimensional mesh of the cross-section of a pipe
///
/// The nodes are equally spaced from the inner radius to the outer radius.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PipeMesh {
    /// Inner radius
    pub inner_radius: f64,

    /// Outer radius
    pub outer_radius: f64,

    /// Number of elements
    pub n_elements: usize,

    /// Type of the elements
    pub element_type: ElementType,
}

impl PipeMesh {
    /// Allocates a new instance
    pub fn new(
        inner_radius: f64,
        outer_radius: f64,
        n_elements: usize,
        element_type: ElementType,
    ) -> Result<Self, StrError> {
        if inner_radius <= 0.0 {
            return Err("the inner radius must be > 0");
        }
        if outer_radius <= inner_radius {
            return Err("the outer radius must be > the inner radius");
        }
        if n_elements < 1 {
            return Err("the number of elements must be ≥ 1");
        }
        Ok(PipeMesh {
            inner_radius,
            outer_radius,
            n_elements,
            element_type,
        })
    }

    /// Returns the number of nodes
    pub fn n_nodes(&self) -> usize {
        self.n_elements * (self.element_type.n_nodes() - 1) + 1
    }

    /// Returns the radial position of a node
    pub fn node_radius(&self, node: usize) -> f64 {
        let (ri, re) = (self.inner_radius, self.outer_radius);
        ri + (re - ri) * (node as f64) / ((self.n_nodes() - 1) as f64)
    }

    /// Returns the nodes of an element
    ///
    /// The nodes follow the local numbering of the Lin shapes: the two end nodes first
    /// (inner, outer), then the interior nodes ordered by radius.
    pub fn element_nodes(&self, element: usize) -> Vec<usize> {
        let nnode = self.element_type.n_nodes();
        let first = element * (nnode - 1);
        let mut nodes = vec![first, first + nnode - 1];
        nodes.extend((1..nnode - 1).map(|k| first + k));
        nodes
    }

    /// Returns the area of the cross-section
    pub fn cross_section_area(&self) -> f64 {
        PI * (self.outer_radius * self.outer_radius - self.inner_radius * self.inner_radius)
    }

    /// Computes the integration points of all elements (ordered by radius)
    ///
    /// The nodes are placed at (r, 0) in a 2D space; thus the Jacobian dr/dξ is the first
    /// component of the Jacobian matrix of the shape.
    pub fn integration_points(&self) -> Result<Vec<IntegrationPoint>, StrError> {
        let kind = self.element_type.geo_kind();
        let gauss = Gauss::new(kind);
        let mut pad = Scratchpad::new(2, kind)?;
        let mut points = Vec::with_capacity(self.n_elements * gauss.npoint());
        for element in 0..self.n_elements {
            let nodes = self.element_nodes(element);
            for (m, node) in nodes.iter().enumerate() {
                pad.set_xx(m, 0, self.node_radius(*node));
                pad.set_xx(m, 1, 0.0);
            }
            for p in 0..gauss.npoint() {
                let ksi = gauss.coords(p);
                pad.calc_jacobian(ksi)?;
                pad.calc_interp(ksi);
                let dr_dksi = pad.jacobian.get(0, 0);
                let radius: f64 = (0..nodes.len()).map(|m| pad.interp[m] * pad.xxt.get(0, m)).sum();
                points.push(IntegrationPoint {
                    element,
                    nodes: nodes.clone(),
                    radius,
                    weight: 2.0 * PI * gauss.weight(p) * dr_dksi,
                    nn: pad.interp.as_data().to_vec(),
                    dnn_dr: (0..nodes.len()).map(|m| pad.deriv.get(m, 0) / dr_dksi).collect(),
                });
            }
        }
        Ok(points)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ElementType, PipeMesh};
    use gemlab::shapes::GeoKind;
    use russell_lab::approx_eq;
    use std::f64::consts::PI;

    const ALL_TYPES: [ElementType; 3] = [ElementType::Linear, ElementType::Quadratic, ElementType::Cubic];

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            PipeMesh::new(0.0, 1.0, 1, ElementType::Linear).err(),
            Some("the inner radius must be > 0")
        );
        assert_eq!(
            PipeMesh::new(1.0, 1.0, 1, ElementType::Linear).err(),
            Some("the outer radius must be > the inner radius")
        );
        assert_eq!(
            PipeMesh::new(1.0, 2.0, 0, ElementType::Quadratic).err(),
            Some("the number of elements must be ≥ 1")
        );
    }

    #[test]
    fn element_type_works() {
        assert_eq!(ElementType::Linear.geo_kind(), GeoKind::Lin2);
        assert_eq!(ElementType::Quadratic.geo_kind(), GeoKind::Lin3);
        assert_eq!(ElementType::Cubic.geo_kind(), GeoKind::Lin4);
        assert_eq!(ElementType::Cubic.n_nodes(), 4);
        assert_eq!(ElementType::Linear.n_integration_points(), 2);
        assert_eq!(ElementType::Quadratic.n_integration_points(), 3);
        assert_eq!(ElementType::Cubic.n_integration_points(), 4);
    }

    #[test]
    fn nodes_and_elements_work() {
        let mesh = PipeMesh::new(4.2e-3, 4.7e-3, 10, ElementType::Linear).unwrap();
        assert_eq!(mesh.n_nodes(), 11);
        assert_eq!(mesh.element_nodes(9), &[9, 10]);
        assert_eq!(mesh.node_radius(0), 4.2e-3);
        approx_eq(mesh.node_radius(10), 4.7e-3, 1e-18);

        let mesh = PipeMesh::new(1.0, 2.0, 2, ElementType::Quadratic).unwrap();
        assert_eq!(mesh.n_nodes(), 5);
        assert_eq!(mesh.element_nodes(1), &[2, 4, 3]);
        assert_eq!(mesh.node_radius(2), 1.5);

        let mesh = PipeMesh::new(1.0, 2.0, 2, ElementType::Cubic).unwrap();
        assert_eq!(mesh.n_nodes(), 7);
        assert_eq!(mesh.element_nodes(0), &[0, 3, 1, 2]);
        assert_eq!(mesh.element_nodes(1), &[3, 6, 4, 5]);
        assert_eq!(mesh.node_radius(3), 1.5);
    }

    #[test]
    fn integration_points_integrate_the_cross_section() {
        for element_type in ALL_TYPES {
            let mesh = PipeMesh::new(1.0, 2.0, 3, element_type).unwrap();
            let points = mesh.integration_points().unwrap();
            assert_eq!(points.len(), 3 * element_type.n_integration_points());
            // ∫ 2π r dr = π (re² - ri²)
            let area: f64 = points.iter().map(|p| p.weight * p.radius).sum();
            approx_eq(area, mesh.cross_section_area(), 1e-14);
            approx_eq(area, 3.0 * PI, 1e-14);
            // ordered by radius
            assert!(points.windows(2).all(|w| w[1].radius > w[0].radius));
            for p in &points {
                // partition of unity
                approx_eq(p.nn.iter().sum(), 1.0, 1e-14);
                approx_eq(p.dnn_dr.iter().sum(), 0.0, 1e-12);
                // interpolation and derivative of r
                let r: f64 = p.nodes.iter().zip(&p.nn).map(|(n, v)| mesh.node_radius(*n) * v).sum();
                approx_eq(r, p.radius, 1e-14);
                let slope: f64 = p
                    .nodes
                    .iter()
                    .zip(&p.dnn_dr)
                    .map(|(n, d)| mesh.node_radius(*n) * d)
                    .sum();
                approx_eq(slope, 1.0, 1e-12);
            }
        }
    }

    #[test]
    fn integration_points_differentiate_quadratic_fields() {
        // u = r² is represented exactly by quadratic and cubic elements
        for element_type in [ElementType::Quadratic, ElementType::Cubic] {
            let mesh = PipeMesh::new(1.0, 2.0, 2, element_type).unwrap();
            for p in &mesh.integration_points().unwrap() {
                let du_dr: f64 = p
                    .nodes
                    .iter()
                    .zip(&p.dnn_dr)
                    .map(|(n, d)| f64::powi(mesh.node_radius(*n), 2) * d)
                    .sum();
                approx_eq(du_dr, 2.0 * p.radius, 1e-12);
            }
        }
    }
}
