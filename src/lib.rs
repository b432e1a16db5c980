//! # Example
//! ```no_run
//!use ndarray::array;
//!use weight_grapher::prelude::*;
//!
//!let transitions = array![
//!    [0.90, 0.08, 0.02],
//!    [0.10, 0.85, 0.05],
//!    [0.00, 0.30, 0.70],
//!];
//!
//!let graph = WeightedGraph::new(transitions.view())
//!    .unwrap()
//!    .with_layout(SpringLayout::builder().seed(3).build());
//!
//!let mut canvas = SvgCanvas::new().with_background(Color::WHITE);
//!graph
//!    .plot(Some(&mut canvas), None, &PlotOptions::new().scale(10.0))
//!    .unwrap();
//!canvas.save("transitions.svg", 800, 800).unwrap();
//! ```

pub mod error;
pub mod graph;
pub mod layout;
pub mod surface;
pub mod weights;

/// Exports all the core types of the library.
pub mod prelude {
    pub use crate::error::GraphError;
    pub use crate::graph::{GraphView, PlotOptions, PlotSummary, WeightedGraph};
    pub use crate::layout::{
        circular::CircularLayout,
        spring::{SpringLayout, SpringLayoutBuilder},
        Layout, Positions,
    };
    pub use crate::surface::{
        recorder::RecordingSurface,
        style::{ArrowHead, ArrowOverrides, ArrowStyle, Color, Connection, PointStyle},
        svg::SvgCanvas,
        DrawingSurface,
    };
    pub use crate::weights::{TruncatedWeights, DEFAULT_CUTOFF, MAX_WEIGHT};
}
