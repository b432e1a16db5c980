use crate::{
    graph::GraphView,
    layout::{Layout, Positions},
};
use glam::Vec2;
use std::f32::consts::TAU;

/// Places nodes evenly on a circle around the origin, in index order.
///
/// Deterministic, which makes it handy for reproducible drawings.
#[derive(Debug, Clone)]
pub struct CircularLayout {
    pub radius: f32,
}

impl Default for CircularLayout {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl Layout for CircularLayout {
    fn layout(&self, graph: &GraphView) -> Positions {
        let count = graph.node_count();
        if count == 1 {
            return graph.node_indices().map(|n| (n, Vec2::ZERO)).collect();
        }

        graph
            .node_indices()
            .map(|n| {
                let angle = TAU * n.index() as f32 / count as f32;
                (n, Vec2::from_angle(angle) * self.radius)
            })
            .collect()
    }
}
