//! Draws a Markov transition matrix as an SVG.
//!
//! ```bash
//! cargo run --example transition_matrix -- [matrix.json] [out.svg]
//! ```

use anyhow::{ensure, Context};
use ndarray::Array2;
use serde::Deserialize;
use weight_grapher::prelude::*;

const BUNDLED: &str = include_str!("transitions.json");

#[derive(Deserialize)]
struct MatrixFile {
    name: String,
    weights: Vec<Vec<f64>>,
}

impl MatrixFile {
    fn to_array(&self) -> anyhow::Result<Array2<f64>> {
        let rows = self.weights.len();
        let cols = self.weights.first().map_or(0, Vec::len);
        ensure!(
            self.weights.iter().all(|row| row.len() == cols),
            "rows of {} have different lengths",
            self.name
        );
        let flat = self.weights.iter().flatten().copied().collect();
        Ok(Array2::from_shape_vec((rows, cols), flat)?)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => BUNDLED.to_string(),
    };
    let output = args.next().unwrap_or_else(|| "transitions.svg".to_string());

    let matrix: MatrixFile = serde_json::from_str(&source)?;
    let graph = WeightedGraph::new(matrix.to_array()?.view())?
        .with_layout(SpringLayout::builder().seed(17).build());

    let mut canvas = SvgCanvas::new().with_background(Color::WHITE);
    let options = PlotOptions::new()
        .scale(8.0)
        .points(PointStyle {
            radius: 10.0,
            ..PointStyle::default()
        })
        .arrows(ArrowOverrides::default().color(Color::rgb(60, 60, 60)));
    let summary = graph.plot(Some(&mut canvas), None, &options)?;
    canvas.save(&output, 800, 800)?;

    println!(
        "{}: {} nodes, {} arrows -> {output}",
        matrix.name, summary.nodes, summary.arrows
    );
    Ok(())
}
