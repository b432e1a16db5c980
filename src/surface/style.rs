//! Styling passed through to a [`DrawingSurface`](super::DrawingSurface).

use std::fmt;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const STEEL_BLUE: Color = Color::rgb(70, 130, 180);
    pub const CRIMSON: Color = Color::rgb(220, 20, 60);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How node markers are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PointStyle {
    pub color: Color,
    /// Marker radius in pixels.
    pub radius: f32,
    /// `1.0` -> opaque, `0.0` -> invisible.
    pub alpha: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: Color::STEEL_BLUE,
            radius: 6.0,
            alpha: 1.0,
        }
    }
}

/// Shape of the arrow tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ArrowHead {
    /// Two open strokes, `->`.
    #[default]
    Open,
    /// Filled triangle, `-|>`.
    Filled,
    /// No tip, `-`.
    None,
}

/// Path taken between the tail and the head of an arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Connection {
    Straight,
    /// Quadratic curve bending away from the straight line by `rad` times its length.
    Arc3 { rad: f32 },
}

impl Default for Connection {
    fn default() -> Self {
        Connection::Arc3 { rad: 0.2 }
    }
}

/// Fully resolved style of a single arrow.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowStyle {
    pub head: ArrowHead,
    pub connection: Connection,
    pub color: Color,
    pub alpha: f32,
    pub line_width: f32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            head: ArrowHead::default(),
            connection: Connection::default(),
            color: Color::BLACK,
            alpha: 1.0,
            line_width: 1.0,
        }
    }
}

/// Caller overrides layered over [`ArrowStyle::default`].
///
/// The line width is not overridable, it always encodes the edge weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrowOverrides {
    pub head: Option<ArrowHead>,
    pub connection: Option<Connection>,
    pub color: Option<Color>,
    pub alpha: Option<f32>,
}

impl ArrowOverrides {
    pub fn head(mut self, head: ArrowHead) -> Self {
        self.head = Some(head);
        self
    }

    pub fn connection(mut self, connection: Connection) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Resolves the overrides into the style of an arrow of width `line_width`.
    pub fn resolve(&self, line_width: f32) -> ArrowStyle {
        let defaults = ArrowStyle::default();
        ArrowStyle {
            head: self.head.unwrap_or(defaults.head),
            connection: self.connection.unwrap_or(defaults.connection),
            color: self.color.unwrap_or(defaults.color),
            alpha: self.alpha.unwrap_or(defaults.alpha),
            line_width,
        }
    }
}
