//! 2D drawing surface used by the visual styles.
//!
//! Styles describe each frame as paths plus paints; a [`Canvas`] turns them
//! into pixels (see [`crate::raster::PixmapCanvas`]) or records them
//! ([`DisplayList`]).

use glam::Vec2;

use crate::color::{clamp_alpha, Hsla};

/// Path construction verb
#[derive(Clone, Debug, PartialEq)]
pub enum PathVerb {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Quadratic curve (control point, end point)
    QuadTo(Vec2, Vec2),
    Close,
    /// Full circle as its own closed sub-path
    Circle { center: Vec2, radius: f32 },
}

/// Vector path built from [`PathVerb`]s
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    verbs: Vec<PathVerb>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            verbs: Vec::with_capacity(capacity),
        }
    }

    /// Closed circle path
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self {
            verbs: vec![PathVerb::Circle { center, radius }],
        }
    }

    /// Straight segment path
    pub fn line(from: Vec2, to: Vec2) -> Self {
        Self {
            verbs: vec![PathVerb::MoveTo(from), PathVerb::LineTo(to)],
        }
    }

    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.verbs.push(PathVerb::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        self.verbs.push(PathVerb::LineTo(p));
        self
    }

    pub fn quad_to(&mut self, control: Vec2, end: Vec2) -> &mut Self {
        self.verbs.push(PathVerb::QuadTo(control, end));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.verbs.push(PathVerb::Close);
        self
    }

    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Axis-aligned bounds of all points (control points included)
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut points = self.verbs.iter().flat_map(|verb| match *verb {
            PathVerb::MoveTo(p) | PathVerb::LineTo(p) => vec![p],
            PathVerb::QuadTo(c, p) => vec![c, p],
            PathVerb::Circle { center, radius } => {
                vec![center - Vec2::splat(radius), center + Vec2::splat(radius)]
            }
            PathVerb::Close => vec![],
        });
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// Gradient color stop, offset in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Hsla,
}

impl GradientStop {
    pub fn new(offset: f32, color: Hsla) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Paint source
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(Hsla),
    Linear {
        start: Vec2,
        end: Vec2,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Vec2,
        radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl Fill {
    /// Stops of a gradient, or the single solid color as one stop
    pub fn stops(&self) -> Vec<GradientStop> {
        match self {
            Fill::Solid(color) => vec![GradientStop::new(0.0, *color)],
            Fill::Linear { stops, .. } | Fill::Radial { stops, .. } => stops.clone(),
        }
    }
}

/// Compositing mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    #[default]
    SourceOver,
    /// Additive blending for bloom
    Lighter,
}

/// Soft glow around a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Hsla,
    /// Blur radius in pixels
    pub blur: f32,
}

/// Fill or stroke style
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    pub fill: Fill,
    pub blend: Blend,
    pub glow: Option<Glow>,
}

impl Paint {
    pub fn solid(color: Hsla) -> Self {
        Self {
            fill: Fill::Solid(color),
            blend: Blend::SourceOver,
            glow: None,
        }
    }

    pub fn linear(start: Vec2, end: Vec2, stops: Vec<GradientStop>) -> Self {
        Self {
            fill: Fill::Linear { start, end, stops },
            blend: Blend::SourceOver,
            glow: None,
        }
    }

    pub fn radial(center: Vec2, radius: f32, stops: Vec<GradientStop>) -> Self {
        Self {
            fill: Fill::Radial {
                center,
                radius,
                stops,
            },
            blend: Blend::SourceOver,
            glow: None,
        }
    }

    pub fn blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    /// Attach a glow; blur values that round to nothing are dropped
    pub fn glow(mut self, color: Hsla, blur: f32) -> Self {
        self.glow = (blur > 0.5 && color.a > 0.0).then_some(Glow { color, blur });
        self
    }
}

/// Stroke geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    /// Round caps and joins instead of butt/miter
    pub round: bool,
}

impl StrokeStyle {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            round: false,
        }
    }

    pub fn round(width: f32) -> Self {
        Self { width, round: true }
    }
}

/// Drawing surface for one frame
pub trait Canvas {
    /// Width in pixels (may be 0 while the window is minimized)
    fn width(&self) -> f32;

    /// Height in pixels
    fn height(&self) -> f32;

    /// Paint the whole surface black at the given opacity
    ///
    /// `1.0` erases the previous frame; lower values leave motion trails.
    fn clear(&mut self, alpha: f32);

    fn fill(&mut self, path: &Path, paint: &Paint);

    fn stroke(&mut self, path: &Path, paint: &Paint, stroke: StrokeStyle);
}

/// A recorded drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        alpha: f32,
    },
    Fill {
        path: Path,
        paint: Paint,
    },
    Stroke {
        path: Path,
        paint: Paint,
        stroke: StrokeStyle,
    },
}

impl DrawCommand {
    pub fn paint(&self) -> Option<&Paint> {
        match self {
            DrawCommand::Clear { .. } => None,
            DrawCommand::Fill { paint, .. } | DrawCommand::Stroke { paint, .. } => Some(paint),
        }
    }
}

/// Canvas that records commands instead of rasterizing them
#[derive(Clone, Debug)]
pub struct DisplayList {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop all recorded commands
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for DisplayList {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Clear {
            alpha: clamp_alpha(alpha),
        });
    }

    fn fill(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn stroke(&mut self, path: &Path, paint: &Paint, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            paint: paint.clone(),
            stroke,
        });
    }
}
