//! The weighted directed graph built from a dense weight matrix, and its plot.

use crate::{
    error::GraphError,
    layout::{sorted_positions, spring::SpringLayout, Layout},
    surface::{
        self,
        style::{ArrowOverrides, PointStyle},
        DrawingSurface,
    },
    weights::{TruncatedWeights, DEFAULT_CUTOFF},
};
use glam::Vec2;
use log::{debug, info, trace};
use ndarray::{Array2, ArrayView2};
use petgraph::graph::DiGraph;
use sprs::TriMat;
use std::fmt;

/// Directed graph view: node weight is the matrix index, edge weight the normalized weight.
pub type GraphView = DiGraph<usize, f64>;

/// A directed graph whose edge weights come from a normalized weight matrix.
///
/// Holds three views of the same weights: the dense truncated matrix, a
/// coordinate list of its nonzero entries and a [`GraphView`].
pub struct WeightedGraph {
    weights: Array2<f64>,
    trunc_weights: TruncatedWeights,
    coo_weights: TriMat<f64>,
    graph: GraphView,
    layout: Box<dyn Layout>,
}

impl WeightedGraph {
    /// Builds the graph, dropping entries below [`DEFAULT_CUTOFF`].
    pub fn new(weights: ArrayView2<'_, f64>) -> Result<Self, GraphError> {
        Self::with_cutoff(weights, Some(DEFAULT_CUTOFF))
    }

    /// Builds the graph, dropping entries below `cutoff`. `None` keeps every entry.
    ///
    /// Negative entries survive a `None` or negative cutoff and stay negative
    /// after rescaling. They are drawn as arrows of zero width by
    /// [`SvgCanvas`](crate::surface::svg::SvgCanvas) and repel instead of
    /// attracting in the spring layout.
    ///
    /// The input is copied. Self transitions are ignored and the remaining
    /// weights rescaled so the heaviest edge weighs
    /// [`MAX_WEIGHT`](crate::weights::MAX_WEIGHT).
    pub fn with_cutoff(
        weights: ArrayView2<'_, f64>,
        cutoff: Option<f64>,
    ) -> Result<Self, GraphError> {
        let trunc_weights = TruncatedWeights::from_weights(weights, cutoff)?;
        let coo_weights = Self::coordinate_list(&trunc_weights);
        let graph = Self::directed_graph(&trunc_weights);

        info!(
            "Built weighted graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            weights: weights.to_owned(),
            trunc_weights,
            coo_weights,
            graph,
            layout: Box::new(SpringLayout::default()),
        })
    }

    /// Replace the layout used when [`plot`](Self::plot) is not given positions.
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.set_layout(layout);
        self
    }

    pub fn set_layout(&mut self, layout: impl Layout + 'static) {
        self.layout = Box::new(layout);
    }

    /// The unmodified copy of the input matrix.
    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    pub fn trunc_weights(&self) -> &TruncatedWeights {
        &self.trunc_weights
    }

    /// Nonzero truncated weights in row-major order.
    pub fn coo_weights(&self) -> &TriMat<f64> {
        &self.coo_weights
    }

    pub fn graph(&self) -> &GraphView {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.trunc_weights.len()
    }

    /// Iterates `(source, target, weight)` for every nonzero entry.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.coo_weights
            .row_inds()
            .iter()
            .zip(self.coo_weights.col_inds())
            .zip(self.coo_weights.data())
            .map(|((r, c), w)| (*r, *c, *w))
    }

    /// Draws nodes as points and every edge as a curved arrow whose width is `weight / scale`.
    ///
    /// Without a `surface` the thread's current canvas (see
    /// [`surface::with_current`]) is used. Without `positions` the configured
    /// layout places the nodes, giving a fresh layout on every call.
    pub fn plot(
        &self,
        surface: Option<&mut dyn DrawingSurface>,
        positions: Option<&[Vec2]>,
        options: &PlotOptions,
    ) -> Result<PlotSummary, GraphError> {
        if !(options.scale.is_finite() && options.scale > 0.0) {
            return Err(GraphError::InvalidScale(options.scale));
        }

        let positions = match positions {
            Some(positions) => positions.to_vec(),
            None => sorted_positions(&self.layout.layout(&self.graph), self.node_count())?,
        };
        if positions.len() != self.node_count() {
            return Err(GraphError::PositionCount {
                expected: self.node_count(),
                found: positions.len(),
            });
        }

        match surface {
            Some(surface) => Ok(self.draw(surface, &positions, options)),
            None => Ok(surface::with_current(|canvas| {
                self.draw(canvas, &positions, options)
            })),
        }
    }

    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        positions: &[Vec2],
        options: &PlotOptions,
    ) -> PlotSummary {
        surface.scatter(positions, &options.points);

        let mut arrows = 0;
        for (src, target, weight) in self.edges() {
            if src == target {
                continue;
            }
            let line_width = weight as f32 / options.scale;
            trace!("[{src} -> {target}] w: {weight} | lw: {line_width}");
            surface.annotate_arrow(
                positions[src],
                positions[target],
                &options.arrows.resolve(line_width),
            );
            arrows += 1;
        }

        debug!("Plotted {} nodes and {arrows} arrows", positions.len());
        PlotSummary {
            nodes: positions.len(),
            arrows,
        }
    }

    fn coordinate_list(trunc_weights: &TruncatedWeights) -> TriMat<f64> {
        let view = trunc_weights.view();
        let mut triplets = TriMat::with_capacity(view.dim(), trunc_weights.nnz());
        for ((row, col), &value) in view.indexed_iter() {
            if value != 0.0 {
                triplets.add_triplet(row, col, value);
            }
        }
        triplets
    }

    fn directed_graph(trunc_weights: &TruncatedWeights) -> GraphView {
        let view = trunc_weights.view();
        let mut graph = GraphView::with_capacity(view.nrows(), trunc_weights.nnz());
        let nodes: Vec<_> = (0..view.nrows()).map(|i| graph.add_node(i)).collect();
        for ((row, col), &value) in view.indexed_iter() {
            if value != 0.0 {
                graph.add_edge(nodes[row], nodes[col], value);
            }
        }
        graph
    }
}

impl fmt::Debug for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedGraph")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("trunc_weights", &self.trunc_weights)
            .finish_non_exhaustive()
    }
}

/// Styling and scaling for [`WeightedGraph::plot`].
#[derive(Debug, Clone)]
pub struct PlotOptions {
    scale: f32,
    points: PointStyle,
    arrows: ArrowOverrides,
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Divisor applied to weights to get arrow line widths.
    ///
    /// Weights go up to `100`, so `10.0` gives lines at most 10 pixels wide.
    ///
    /// Default: `1.0`
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Style of the node markers.
    pub fn points(mut self, points: PointStyle) -> Self {
        self.points = points;
        self
    }

    /// Overrides for the default arrow style.
    pub fn arrows(mut self, arrows: ArrowOverrides) -> Self {
        self.arrows = arrows;
        self
    }
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            points: PointStyle::default(),
            arrows: ArrowOverrides::default(),
        }
    }
}

/// What a call to [`WeightedGraph::plot`] drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSummary {
    pub nodes: usize,
    pub arrows: usize,
}
