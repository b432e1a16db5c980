//! Force directed placement: nodes repel each other, edges pull their ends together.

use crate::{
    graph::GraphView,
    layout::{rescale, Layout, Positions},
};
use glam::Vec2;
use log::{debug, trace};
use petgraph::{graph::NodeIndex, visit::EdgeRef};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Closest two nodes are treated as being when computing forces.
const MIN_DISTANCE: f32 = 0.01;

/// Fruchterman-Reingold spring layout.
///
/// Starts from random positions and runs a fixed number of iterations. Each
/// node moves at most the current temperature per iteration, and the
/// temperature cools linearly to zero. Heavier edges pull harder.
#[derive(Debug, Clone)]
pub struct SpringLayout {
    iterations: usize,
    optimal_distance: Option<f32>,
    temperature: f32,
    scale: f32,
    seed: Option<u64>,
}

impl SpringLayout {
    pub fn builder() -> SpringLayoutBuilder {
        SpringLayoutBuilder::default()
    }

    /// Repel force acting on the node at `pos1` due to the node at `pos2`.
    fn repel_force(pos1: Vec2, pos2: Vec2, k: f32) -> Vec2 {
        let dir_vec = pos1 - pos2;
        let distance = dir_vec.length().max(MIN_DISTANCE);
        dir_vec.normalize_or(Vec2::ZERO) * (k * k / distance)
    }

    /// Spring force pulling the node at `pos1` towards the node at `pos2`.
    fn attract_force(pos1: Vec2, pos2: Vec2, k: f32, weight: f32) -> Vec2 {
        let dir_vec = pos2 - pos1;
        let distance = dir_vec.length().max(MIN_DISTANCE);
        dir_vec.normalize_or(Vec2::ZERO) * (distance * distance / k * weight)
    }

    /// Temperature at the start of each iteration, then the final one, which is `0`
    /// unless no iterations run.
    fn temperatures(&self) -> impl Iterator<Item = f32> + '_ {
        let steps = self.iterations.max(1) as f32;
        (0..=self.iterations).map(move |i| self.temperature * (1.0 - i as f32 / steps).max(0.0))
    }

    fn initial_positions(&self, count: usize) -> Vec<Vec2> {
        fn sample(rng: &mut impl Rng, count: usize) -> Vec<Vec2> {
            (0..count)
                .map(|_| Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()))
                .collect()
        }

        match self.seed {
            Some(seed) => sample(&mut StdRng::seed_from_u64(seed), count),
            None => sample(&mut rand::thread_rng(), count),
        }
    }
}

impl Default for SpringLayout {
    fn default() -> Self {
        SpringLayoutBuilder::default().build()
    }
}

impl Layout for SpringLayout {
    fn layout(&self, graph: &GraphView) -> Positions {
        let count = graph.node_count();
        match count {
            0 => return Positions::new(),
            1 => return graph.node_indices().map(|n| (n, Vec2::ZERO)).collect(),
            _ => {}
        }

        let mut positions = self.initial_positions(count);
        let k = self
            .optimal_distance
            .unwrap_or_else(|| 1.0 / (count as f32).sqrt());
        let max_weight = graph
            .edge_references()
            .map(|e| *e.weight())
            .fold(0.0, f64::max);

        for (iteration, temperature) in self.temperatures().take(self.iterations).enumerate() {
            let mut displacement = vec![Vec2::ZERO; count];

            for i in 0..count {
                for j in (i + 1)..count {
                    let force = Self::repel_force(positions[i], positions[j], k);
                    displacement[i] += force;
                    displacement[j] -= force;
                }
            }

            for edge in graph.edge_references() {
                let (src, target) = (edge.source().index(), edge.target().index());
                if src == target || max_weight <= 0.0 {
                    continue;
                }
                let weight = (*edge.weight() / max_weight) as f32;
                let force = Self::attract_force(positions[src], positions[target], k, weight);
                displacement[src] += force;
                displacement[target] -= force;
            }

            let mut moved = 0.0;
            for (pos, disp) in positions.iter_mut().zip(&displacement) {
                let length = disp.length();
                if length > 0.0 {
                    let step = length.min(temperature);
                    *pos += *disp / length * step;
                    moved += step;
                }
            }
            trace!("(SL) [{iteration}] t: {temperature} | moved: {moved}");
        }

        rescale(&mut positions, self.scale);
        debug!(
            "Spring layout placed {count} nodes in {} iterations (k = {k})",
            self.iterations
        );

        positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| (NodeIndex::new(i), p))
            .collect()
    }
}

/// Builder for `SpringLayout`
pub struct SpringLayoutBuilder {
    iterations: usize,
    optimal_distance: Option<f32>,
    temperature: f32,
    scale: f32,
    seed: Option<u64>,
}

impl SpringLayoutBuilder {
    /// Get a Instance of `SpringLayoutBuilder` with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// How many force iterations to run.
    ///
    /// `0` leaves nodes at their random starting positions.
    ///
    /// Default: `50`
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Preferred distance between connected nodes.
    ///
    /// Panics when the distance is `0` or below
    ///
    /// Default: `1 / sqrt(node count)`
    pub fn optimal_distance(mut self, distance: f32) -> Self {
        if distance.is_nan() || distance <= 0.0 {
            panic!("optimal distance may not be 0 or below!");
        }
        self.optimal_distance = Some(distance);
        self
    }

    /// Largest distance a node may move in the first iteration.
    ///
    /// Panics when the temperature is negative
    ///
    /// Default: `0.1`
    pub fn temperature(mut self, temperature: f32) -> Self {
        if temperature < 0.0 {
            panic!("temperature may not be negative!");
        }
        self.temperature = temperature;
        self
    }

    /// Largest coordinate magnitude of the finished layout.
    ///
    /// Panics when scale is `0` or below
    ///
    /// Default: `1.0`
    pub fn scale(mut self, scale: f32) -> Self {
        if scale <= 0.0 {
            panic!("scale may not be 0 or below!");
        }
        self.scale = scale;
        self
    }

    /// Seed for the starting positions. Without one every call differs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Constructs a instance of `SpringLayout`
    pub fn build(self) -> SpringLayout {
        SpringLayout {
            iterations: self.iterations,
            optimal_distance: self.optimal_distance,
            temperature: self.temperature,
            scale: self.scale,
            seed: self.seed,
        }
    }
}

impl Default for SpringLayoutBuilder {
    /// Get a Instance of `SpringLayoutBuilder` with default values
    fn default() -> Self {
        Self {
            iterations: 50,
            optimal_distance: None,
            temperature: 0.1,
            scale: 1.0,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::sorted_positions;

    fn graph(count: usize, edges: &[(u32, u32, f64)]) -> GraphView {
        let mut graph = GraphView::with_capacity(count, edges.len());
        for i in 0..count {
            graph.add_node(i);
        }
        graph.extend_with_edges(edges);
        graph
    }

    #[test]
    fn empty_and_single_node() {
        let layout = SpringLayout::default();
        assert!(layout.layout(&graph(0, &[])).is_empty());

        let single = layout.layout(&graph(1, &[]));
        assert_eq!(single[&NodeIndex::new(0)], Vec2::ZERO);
    }

    #[test]
    fn places_every_node_within_scale() {
        let layout = SpringLayout::builder().scale(3.0).seed(1).build();
        let positions = layout.layout(&graph(5, &[(0, 1, 100.0), (1, 2, 50.0), (3, 4, 10.0)]));
        let sorted = sorted_positions(&positions, 5).unwrap();

        let lim = sorted.iter().map(|p| p.abs().max_element()).fold(0.0, f32::max);
        assert!((lim - 3.0).abs() < 1e-4);
        assert!(sorted.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn same_seed_same_layout() {
        let g = graph(4, &[(0, 1, 100.0), (2, 3, 40.0), (3, 0, 5.0)]);
        let a = SpringLayout::builder().seed(42).build().layout(&g);
        let b = SpringLayout::builder().seed(42).build().layout(&g);
        assert_eq!(a, b);
    }

    #[test]
    fn connected_nodes_end_up_closer() {
        let g = graph(3, &[(0, 1, 100.0)]);
        let positions = SpringLayout::builder().seed(7).build().layout(&g);
        let p = sorted_positions(&positions, 3).unwrap();

        let linked = p[0].distance(p[1]);
        assert!(linked < p[0].distance(p[2]));
        assert!(linked < p[1].distance(p[2]));
    }

    #[test]
    fn repel_pushes_apart_and_attract_pulls_together() {
        let repel = SpringLayout::repel_force(Vec2::ZERO, Vec2::X, 1.0);
        assert!(repel.x < 0.0);
        let attract = SpringLayout::attract_force(Vec2::ZERO, Vec2::X, 1.0, 1.0);
        assert!(attract.x > 0.0);
        assert_eq!(SpringLayout::repel_force(Vec2::ONE, Vec2::ONE, 1.0), Vec2::ZERO);
    }

    #[test]
    fn temperature_cools_linearly_to_zero() {
        let layout = SpringLayout::builder().iterations(4).temperature(0.2).build();
        let schedule: Vec<f32> = layout.temperatures().collect();
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule[0], 0.2);
        assert!((schedule[2] - 0.1).abs() < 1e-6);
        assert_eq!(schedule[4], 0.0);

        let still = SpringLayout::builder().iterations(0).build();
        assert_eq!(still.temperatures().collect::<Vec<_>>(), vec![0.1]);
    }

    #[test]
    fn zero_iterations_keeps_start_positions_finite() {
        let layout = SpringLayout::builder().iterations(0).seed(3).build();
        let positions = layout.layout(&graph(3, &[(0, 1, 100.0)]));
        let sorted = sorted_positions(&positions, 3).unwrap();
        assert!(sorted.iter().all(|p| p.is_finite()));
    }

    #[test]
    #[should_panic]
    fn zero_optimal_distance_panics() {
        let _ = SpringLayout::builder().optimal_distance(0.0);
    }

    #[test]
    #[should_panic]
    fn zero_scale_panics() {
        let _ = SpringLayout::builder().scale(0.0);
    }
}
