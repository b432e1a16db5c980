//! A surface that only remembers what it was asked to draw.

use crate::surface::{
    style::{ArrowStyle, PointStyle},
    DrawingSurface,
};
use glam::Vec2;

/// One recorded [`DrawingSurface::scatter`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterCall {
    pub points: Vec<Vec2>,
    pub style: PointStyle,
}

/// One recorded [`DrawingSurface::annotate_arrow`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowCall {
    pub tail: Vec2,
    pub head: Vec2,
    pub style: ArrowStyle,
}

/// Records every drawing call in order, useful for checking a plot without rendering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub scatters: Vec<ScatterCall>,
    pub arrows: Vec<ArrowCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawingSurface for RecordingSurface {
    fn scatter(&mut self, points: &[Vec2], style: &PointStyle) {
        self.scatters.push(ScatterCall {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    fn annotate_arrow(&mut self, tail: Vec2, head: Vec2, style: &ArrowStyle) {
        self.arrows.push(ArrowCall {
            tail,
            head,
            style: style.clone(),
        });
    }
}
