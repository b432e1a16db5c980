//! Node placement.
//!
//! A [`Layout`] assigns every node of a [`GraphView`] a position in 2D data
//! coordinates. Plain closures work as layouts too:
//!
//! ```
//! use glam::Vec2;
//! use weight_grapher::{graph::GraphView, layout::{Layout, Positions}};
//!
//! let on_a_line = |graph: &GraphView| -> Positions {
//!     graph
//!         .node_indices()
//!         .map(|n| (n, Vec2::new(n.index() as f32, 0.0)))
//!         .collect()
//! };
//! let graph = GraphView::from_edges([(0u32, 1u32, 1.0)]);
//! assert_eq!(on_a_line.layout(&graph).len(), 2);
//! ```

pub mod circular;
pub mod spring;

use crate::{error::GraphError, graph::GraphView};
use glam::Vec2;
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// Node positions keyed by graph node.
pub type Positions = HashMap<NodeIndex, Vec2>;

pub trait Layout {
    fn layout(&self, graph: &GraphView) -> Positions;
}

impl<F> Layout for F
where
    F: Fn(&GraphView) -> Positions,
{
    fn layout(&self, graph: &GraphView) -> Positions {
        self(graph)
    }
}

/// Flattens `positions` into a sequence indexed by node, visiting keys in sorted order.
///
/// Every node in `0..node_count` must have a position and no others may be present.
pub fn sorted_positions(positions: &Positions, node_count: usize) -> Result<Vec<Vec2>, GraphError> {
    let mut keys: Vec<NodeIndex> = positions.keys().copied().collect();
    keys.sort();

    if let Some(missing) = keys.iter().enumerate().find_map(|(i, k)| (k.index() != i).then_some(i)) {
        return Err(GraphError::MissingPosition(missing));
    }
    if keys.len() < node_count {
        return Err(GraphError::MissingPosition(keys.len()));
    }
    if keys.len() > node_count {
        return Err(GraphError::PositionCount {
            expected: node_count,
            found: keys.len(),
        });
    }

    Ok(keys.iter().map(|k| positions[k]).collect())
}

/// Centers `positions` on the origin and scales them so the largest coordinate
/// magnitude equals `scale`.
pub(crate) fn rescale(positions: &mut [Vec2], scale: f32) {
    if positions.is_empty() {
        return;
    }
    let mean = positions.iter().copied().sum::<Vec2>() / positions.len() as f32;
    let mut lim: f32 = 0.0;
    for p in positions.iter_mut() {
        *p -= mean;
        lim = lim.max(p.abs().max_element());
    }
    if lim > 0.0 {
        for p in positions.iter_mut() {
            *p *= scale / lim;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(entries: &[(usize, Vec2)]) -> Positions {
        entries
            .iter()
            .map(|(i, p)| (NodeIndex::new(*i), *p))
            .collect()
    }

    #[test]
    fn sorted_positions_orders_by_node() {
        let layout = positions(&[(2, Vec2::X), (0, Vec2::Y), (1, Vec2::ONE)]);
        let sorted = sorted_positions(&layout, 3).unwrap();
        assert_eq!(sorted, vec![Vec2::Y, Vec2::ONE, Vec2::X]);
    }

    #[test]
    fn sorted_positions_reports_gap() {
        let layout = positions(&[(0, Vec2::ZERO), (2, Vec2::ONE)]);
        assert!(matches!(
            sorted_positions(&layout, 3),
            Err(GraphError::MissingPosition(1))
        ));
    }

    #[test]
    fn sorted_positions_reports_missing_tail() {
        let layout = positions(&[(0, Vec2::ZERO)]);
        assert!(matches!(
            sorted_positions(&layout, 2),
            Err(GraphError::MissingPosition(1))
        ));
    }

    #[test]
    fn sorted_positions_rejects_extra_nodes() {
        let layout = positions(&[(0, Vec2::ZERO), (1, Vec2::ONE)]);
        assert!(matches!(
            sorted_positions(&layout, 1),
            Err(GraphError::PositionCount {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn rescale_centers_and_bounds() {
        let mut points = vec![Vec2::new(2.0, 2.0), Vec2::new(4.0, 2.0), Vec2::new(3.0, 5.0)];
        rescale(&mut points, 2.0);

        let mean = points.iter().copied().sum::<Vec2>() / 3.0;
        assert!(mean.length() < 1e-5);
        let lim = points.iter().map(|p| p.abs().max_element()).fold(0.0, f32::max);
        assert!((lim - 2.0).abs() < 1e-5);
    }
}
