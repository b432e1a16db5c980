//! Drawing surfaces a [`WeightedGraph`](crate::graph::WeightedGraph) can be plotted onto.

pub mod recorder;
pub mod style;
pub mod svg;

use crate::surface::{
    style::{ArrowStyle, PointStyle},
    svg::SvgCanvas,
};
use glam::Vec2;
use std::cell::RefCell;

/// Anything that can draw node markers and arrows in data coordinates.
pub trait DrawingSurface {
    /// Draws every point in `points` with the same style.
    fn scatter(&mut self, points: &[Vec2], style: &PointStyle);

    /// Draws an arrow starting at `tail` whose tip sits at `head`.
    fn annotate_arrow(&mut self, tail: Vec2, head: Vec2, style: &ArrowStyle);
}

thread_local! {
    static CURRENT_CANVAS: RefCell<SvgCanvas> = RefCell::new(SvgCanvas::new());
}

/// Lends the current default canvas of this thread to `f`.
///
/// Plotting without an explicit surface draws here.
pub fn with_current<R>(f: impl FnOnce(&mut SvgCanvas) -> R) -> R {
    CURRENT_CANVAS.with(|canvas| f(&mut canvas.borrow_mut()))
}

/// Removes the current default canvas, leaving an empty one in its place.
pub fn take_current() -> SvgCanvas {
    CURRENT_CANVAS.with(|canvas| canvas.take())
}
