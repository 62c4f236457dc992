//! Pivot centering for MeshNode (origin to vertex centroid)

use glam::Vec3;

use crate::node::MeshNode;

impl MeshNode {
    /// Move the node's origin to the centroid of its world-space vertices
    ///
    /// World positions (local + origin) are preserved: the origin becomes
    /// their arithmetic mean and every vertex is re-expressed relative to
    /// it. Applying this twice changes nothing beyond float round-off,
    /// since the mean of already-centered vertices is the origin itself.
    /// A node with no vertices is left untouched.
    pub fn center_pivot(&mut self) {
        if self.vertices.is_empty() {
            return;
        }

        let mut centroid = Vec3::ZERO;
        for v in &self.vertices {
            centroid += *v;
        }
        centroid /= self.vertices.len() as f32;

        for v in &mut self.vertices {
            *v -= centroid;
        }
        self.origin += centroid;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec3;

    use crate::node::MeshNode;

    fn triangle_node() -> MeshNode {
        let mut node = MeshNode::new("tri", Vec3::new(10.0, 0.0, 0.0));
        node.vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ];
        node.faces = vec![[0, 1, 2]];
        node.normals = vec![Vec3::Z];
        node
    }

    #[test]
    fn test_center_pivot_moves_origin_to_centroid() {
        let mut node = triangle_node();
        node.center_pivot();

        assert_relative_eq!(node.origin.x, 11.0, epsilon = 1e-6);
        assert_relative_eq!(node.origin.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(node.origin.z, 0.0, epsilon = 1e-6);

        // world positions are unchanged
        let world: Vec<Vec3> = node.vertices.iter().map(|v| *v + node.origin).collect();
        assert_relative_eq!(world[0].x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(world[1].x, 13.0, epsilon = 1e-5);
        assert_relative_eq!(world[2].y, 3.0, epsilon = 1e-5);

        // local centroid is now the origin
        let sum: Vec3 = node.vertices.iter().copied().sum();
        assert!(sum.length() < 1e-5);
    }

    #[test]
    fn test_center_pivot_is_idempotent() {
        let mut once = triangle_node();
        once.center_pivot();

        let mut twice = once.clone();
        twice.center_pivot();

        assert!((once.origin - twice.origin).length() < 1e-5);
        for (a, b) in once.vertices.iter().zip(&twice.vertices) {
            assert!((*a - *b).length() < 1e-5);
        }
    }

    #[test]
    fn test_center_pivot_no_vertices_is_noop() {
        let mut node = MeshNode::new("empty", Vec3::new(1.0, 2.0, 3.0));
        node.center_pivot();
        assert_eq!(node.origin, Vec3::new(1.0, 2.0, 3.0));
        assert!(node.vertices.is_empty());
    }
}
