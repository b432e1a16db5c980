//! A drawing surface that renders to a standalone SVG document.

use crate::{
    error::GraphError,
    surface::{
        style::{ArrowHead, ArrowStyle, Color, Connection, PointStyle},
        DrawingSurface,
    },
};
use glam::Vec2;
use log::{debug, info};
use std::{collections::BTreeSet, path::Path};

/// Space kept free around the drawing, in pixels.
const MARGIN: f32 = 24.0;

/// Side length of an arrow tip, in pixels.
const HEAD_SIZE: f32 = 10.0;

#[derive(Debug, Clone)]
enum Primitive {
    Points {
        points: Vec<Vec2>,
        style: PointStyle,
    },
    Arrow {
        tail: Vec2,
        head: Vec2,
        style: ArrowStyle,
    },
}

impl Primitive {
    fn coords(&self) -> Vec<Vec2> {
        match self {
            Primitive::Points { points, .. } => points.clone(),
            Primitive::Arrow { tail, head, .. } => vec![*tail, *head],
        }
    }
}

/// Collects drawing calls and renders them as SVG on demand.
///
/// Coordinates are data coordinates with the y axis pointing up. They are
/// fitted into the viewport when rendering, keeping the aspect ratio.
#[derive(Debug, Clone, Default)]
pub struct SvgCanvas {
    primitives: Vec<Primitive>,
    background: Option<Color>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the whole viewport with `color` before drawing.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Number of recorded drawing calls.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Renders everything drawn so far into a `width` x `height` SVG document.
    pub fn render(&self, width: u32, height: u32) -> String {
        let transform = ViewTransform::fit(self.extent(), [width, height]);

        let mut markers = BTreeSet::new();
        let mut arrows = Vec::new();
        let mut nodes = Vec::new();

        for primitive in &self.primitives {
            match primitive {
                Primitive::Points { points, style } => {
                    nodes.extend(points.iter().map(|p| {
                        let p = transform.apply(*p);
                        format!(
                            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" fill-opacity="{:.2}"/>"#,
                            p.x, p.y, style.radius, style.color, style.alpha
                        )
                    }));
                }
                Primitive::Arrow { tail, head, style } => {
                    if style.head != ArrowHead::None {
                        markers.insert((style.head, style.color));
                    }
                    arrows.push(arrow_path(&transform, *tail, *head, style));
                }
            }
        }

        debug!(
            "Rendering {} arrows and {} points into {width}x{height}",
            arrows.len(),
            nodes.len()
        );

        let defs: Vec<String> = markers
            .into_iter()
            .map(|(head, color)| marker_def(head, color))
            .collect();
        let background = self
            .background
            .map(|color| format!(r#"<rect width="100%" height="100%" fill="{color}"/>"#))
            .unwrap_or_default();

        // Arrows go first so node markers sit on top of the line ends.
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">
  <defs>{}</defs>
  {background}
  {}
  {}
</svg>
"#,
            defs.join(""),
            arrows.join("\n  "),
            nodes.join("\n  ")
        )
    }

    /// Renders and writes the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>, width: u32, height: u32) -> Result<(), GraphError> {
        let path = path.as_ref();
        std::fs::write(path, self.render(width, height))?;
        info!("Saved {} drawing calls to {}", self.len(), path.display());
        Ok(())
    }

    /// Bounding box of all recorded coordinates as `(min, max)`.
    fn extent(&self) -> Option<(Vec2, Vec2)> {
        let mut min = Vec2::INFINITY;
        let mut max = Vec2::NEG_INFINITY;
        let mut any = false;

        for c in self.primitives.iter().flat_map(Primitive::coords) {
            min = min.min(c);
            max = max.max(c);
            any = true;
        }
        any.then_some((min, max))
    }
}

impl DrawingSurface for SvgCanvas {
    fn scatter(&mut self, points: &[Vec2], style: &PointStyle) {
        self.primitives.push(Primitive::Points {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    fn annotate_arrow(&mut self, tail: Vec2, head: Vec2, style: &ArrowStyle) {
        self.primitives.push(Primitive::Arrow {
            tail,
            head,
            style: style.clone(),
        });
    }
}

/// Maps data coordinates (y up) onto viewport pixels (y down).
struct ViewTransform {
    min: Vec2,
    offset: Vec2,
    scale: f32,
    height: f32,
}

impl ViewTransform {
    fn fit(extent: Option<(Vec2, Vec2)>, boundary: [u32; 2]) -> Self {
        let size = Vec2::new(boundary[0] as f32, boundary[1] as f32);
        let usable = (size - 2.0 * MARGIN).max(Vec2::ONE);

        let Some((min, max)) = extent else {
            return Self {
                min: Vec2::ZERO,
                offset: size / 2.0,
                scale: 1.0,
                height: size.y,
            };
        };

        // A single point or an axis-aligned line has no span along some axis,
        // the division then yields infinity and the other axis decides.
        let span = max - min;
        let scale = match (usable / span).min_element() {
            s if s.is_finite() => s,
            _ => 1.0,
        };
        let offset = (size - span * scale) / 2.0;

        Self {
            min,
            offset,
            scale,
            height: size.y,
        }
    }

    fn apply(&self, position: Vec2) -> Vec2 {
        let p = self.offset + (position - self.min) * self.scale;
        Vec2::new(p.x, self.height - p.y)
    }
}

fn marker_id(head: ArrowHead, color: Color) -> String {
    let kind = match head {
        ArrowHead::Open => "open",
        ArrowHead::Filled => "filled",
        ArrowHead::None => "none",
    };
    format!("head-{kind}-{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn marker_def(head: ArrowHead, color: Color) -> String {
    let shape = match head {
        ArrowHead::Filled => format!(r#"<path d="M 0 0 L 10 5 L 0 10 z" fill="{color}"/>"#),
        _ => format!(
            r#"<path d="M 0 0 L 10 5 L 0 10" fill="none" stroke="{color}" stroke-width="1.5"/>"#
        ),
    };
    format!(
        r#"<marker id="{}" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="{HEAD_SIZE}" markerHeight="{HEAD_SIZE}" markerUnits="userSpaceOnUse" orient="auto">{shape}</marker>"#,
        marker_id(head, color)
    )
}

fn arrow_path(transform: &ViewTransform, tail: Vec2, head: Vec2, style: &ArrowStyle) -> String {
    let start = transform.apply(tail);
    let end = transform.apply(head);
    let d = match style.connection {
        Connection::Straight => format!(
            "M {:.1} {:.1} L {:.1} {:.1}",
            start.x, start.y, end.x, end.y
        ),
        Connection::Arc3 { rad } => {
            let ctrl = transform.apply(arc3_control(tail, head, rad));
            format!(
                "M {:.1} {:.1} Q {:.1} {:.1} {:.1} {:.1}",
                start.x, start.y, ctrl.x, ctrl.y, end.x, end.y
            )
        }
    };
    let marker = match style.head {
        ArrowHead::None => String::new(),
        head_kind => format!(r#" marker-end="url(#{})""#, marker_id(head_kind, style.color)),
    };
    format!(
        r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-opacity="{:.2}" stroke-linecap="round"{marker}/>"#,
        style.color,
        style.line_width.max(0.0),
        style.alpha
    )
}

/// Control point of an arc3 connection: the chord midpoint pushed sideways by `rad` chords.
pub(crate) fn arc3_control(tail: Vec2, head: Vec2, rad: f32) -> Vec2 {
    let mid = (tail + head) / 2.0;
    let d = head - tail;
    mid + rad * Vec2::new(d.y, -d.x)
}
