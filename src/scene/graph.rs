use super::Material;
use crate::geometry::Center;
use crate::mesh::{Edge, Triangle};

/// One extruded building placed in the scene
#[derive(Debug, Clone)]
pub struct BuildingNode {
    pub label: String,
    pub depth: f64,
    /// Translation relative to the scene origin
    pub position: [f64; 3],
    /// Triangles around the building's own center
    pub mesh: Vec<Triangle>,
    /// Outline segments around the building's own center
    pub edges: Vec<Edge>,
}

impl BuildingNode {
    fn offset(&self) -> [f32; 3] {
        self.position.map(|c| c as f32)
    }

    /// Mesh triangles in scene coordinates
    pub fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        let offset = self.offset();
        self.mesh.iter().map(move |t| t.translated(offset))
    }

    /// Outline segments in scene coordinates
    pub fn world_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let offset = self.offset();
        self.edges.iter().map(move |e| e.translated(offset))
    }
}

/// Buildings currently on display
///
/// The scene is cleared and refilled on every reload; `revision` changes
/// each time so renderers can skip re-exporting unchanged content.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<BuildingNode>,
    origin: Option<Center>,
    revision: u64,
    pub material: Material,
}

impl Scene {
    pub fn new(material: Material) -> Self {
        Self {
            material,
            ..Default::default()
        }
    }

    pub fn nodes(&self) -> &[BuildingNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Geographic center every node position is relative to
    pub fn origin(&self) -> Option<Center> {
        self.origin
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Remove every node and set a new origin
    pub fn reset(&mut self, origin: Option<Center>) {
        self.nodes.clear();
        self.origin = origin;
        self.revision += 1;
    }

    pub fn add(&mut self, node: BuildingNode) {
        self.nodes.push(node);
        self.revision += 1;
    }

    pub fn triangle_count(&self) -> usize {
        self.nodes.iter().map(|n| n.mesh.len()).sum()
    }

    pub fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.nodes.iter().flat_map(BuildingNode::world_triangles)
    }

    pub fn world_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().flat_map(BuildingNode::world_edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(position: [f64; 3]) -> BuildingNode {
        BuildingNode {
            label: "a".to_string(),
            depth: 1.0,
            position,
            mesh: vec![Triangle::new(
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
            )],
            edges: vec![Edge::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0])],
        }
    }

    #[test]
    fn test_world_coordinates() {
        let mut scene = Scene::default();
        scene.add(node([10.0, 20.0, 0.0]));
        scene.add(node([-5.0, 0.0, 0.0]));

        let triangles: Vec<Triangle> = scene.world_triangles().collect();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0].vertices[1], [11.0, 20.0, 0.0]);
        assert_eq!(triangles[1].vertices[2], [-5.0, 1.0, 0.0]);

        let edges: Vec<Edge> = scene.world_edges().collect();
        assert_eq!(edges[0].end, [10.0, 20.0, 1.0]);
        assert_eq!(scene.triangle_count(), 2);
    }

    #[test]
    fn test_reset_bumps_revision() {
        let mut scene = Scene::default();
        scene.add(node([0.0, 0.0, 0.0]));
        let before = scene.revision();

        scene.reset(Some(Center::new(1.0, 2.0)));
        assert!(scene.is_empty());
        assert_eq!(scene.origin(), Some(Center::new(1.0, 2.0)));
        assert!(scene.revision() > before);
    }
}
