//! CPU rasterization of canvas commands with tiny-skia.

use tiny_skia::{
    BlendMode, Color, FillRule, GradientStop as SkStop, LineCap, LineJoin, LinearGradient,
    Paint as SkPaint, PathBuilder, Pixmap, Point, RadialGradient, Rect, Shader, SpreadMode,
    Stroke, Transform,
};

use crate::canvas::{Blend, Canvas, Fill, GradientStop, Path, PathVerb, Paint, StrokeStyle};
use crate::color::Hsla;

/// Glow underlay opacity relative to the glow color
const GLOW_ALPHA: f32 = 0.35;

/// Canvas backed by an RGBA pixmap
///
/// A zero-sized canvas has no pixmap; it reports 0 dimensions so the frame
/// scheduler skips drawing.
pub struct PixmapCanvas {
    pixmap: Option<Pixmap>,
    width: u32,
    height: u32,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            pixmap: None,
            width: 0,
            height: 0,
        };
        canvas.resize(width, height);
        canvas
    }

    /// Reallocate the pixmap when the size changes (contents reset to black)
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.pixmap.is_some() && (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixmap = Pixmap::new(width, height).map(|mut pixmap| {
            pixmap.fill(Color::BLACK);
            pixmap
        });
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Premultiplied RGBA8 pixels, row-major
    pub fn data(&self) -> Option<&[u8]> {
        self.pixmap.as_ref().map(|p| p.data())
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    fn draw_glow(pixmap: &mut Pixmap, path: &tiny_skia::Path, paint: &Paint, width: f32) {
        let Some(glow) = paint.glow else {
            return;
        };
        let mut glow_paint = SkPaint::default();
        glow_paint.anti_alias = true;
        glow_paint.blend_mode = blend_mode(paint.blend);
        glow_paint.shader = Shader::SolidColor(sk_color(
            glow.color.with_alpha(glow.color.a * GLOW_ALPHA),
        ));
        let stroke = Stroke {
            width: width + glow.blur,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(path, &glow_paint, &stroke, Transform::identity(), None);
    }
}

impl Canvas for PixmapCanvas {
    fn width(&self) -> f32 {
        self.pixmap.as_ref().map_or(0.0, |_| self.width as f32)
    }

    fn height(&self) -> f32 {
        self.pixmap.as_ref().map_or(0.0, |_| self.height as f32)
    }

    fn clear(&mut self, alpha: f32) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        if alpha >= 1.0 {
            pixmap.fill(Color::BLACK);
            return;
        }
        let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width as f32, self.height as f32) else {
            return;
        };
        let mut paint = SkPaint::default();
        paint.shader = Shader::SolidColor(sk_color(Hsla::BLACK.with_alpha(alpha)));
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn fill(&mut self, path: &Path, paint: &Paint) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(sk_path) = build_path(path) else {
            return;
        };
        Self::draw_glow(pixmap, &sk_path, paint, 0.0);
        pixmap.fill_path(
            &sk_path,
            &sk_paint(paint),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke(&mut self, path: &Path, paint: &Paint, stroke: StrokeStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        if stroke.width <= 0.0 {
            return;
        }
        let Some(sk_path) = build_path(path) else {
            return;
        };
        Self::draw_glow(pixmap, &sk_path, paint, stroke.width);
        let sk_stroke = Stroke {
            width: stroke.width,
            line_cap: if stroke.round {
                LineCap::Round
            } else {
                LineCap::Butt
            },
            line_join: if stroke.round {
                LineJoin::Round
            } else {
                LineJoin::Miter
            },
            ..Stroke::default()
        };
        pixmap.stroke_path(
            &sk_path,
            &sk_paint(paint),
            &sk_stroke,
            Transform::identity(),
            None,
        );
    }
}

fn build_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for verb in path.verbs() {
        match *verb {
            PathVerb::MoveTo(p) => pb.move_to(p.x, p.y),
            PathVerb::LineTo(p) => pb.line_to(p.x, p.y),
            PathVerb::QuadTo(c, p) => pb.quad_to(c.x, c.y, p.x, p.y),
            PathVerb::Close => pb.close(),
            PathVerb::Circle { center, radius } => {
                if radius > 0.0 {
                    pb.push_circle(center.x, center.y, radius);
                }
            }
        }
    }
    pb.finish()
}

fn sk_color(color: Hsla) -> Color {
    let [r, g, b, a] = color.to_rgba();
    Color::from_rgba(r, g, b, a).unwrap_or(Color::TRANSPARENT)
}

fn sk_stops(stops: &[GradientStop]) -> Vec<SkStop> {
    stops
        .iter()
        .map(|stop| SkStop::new(stop.offset, sk_color(stop.color)))
        .collect()
}

fn blend_mode(blend: Blend) -> BlendMode {
    match blend {
        Blend::SourceOver => BlendMode::SourceOver,
        Blend::Lighter => BlendMode::Plus,
    }
}

fn sk_shader(fill: &Fill) -> Shader<'static> {
    let shader = match fill {
        Fill::Solid(color) => return Shader::SolidColor(sk_color(*color)),
        Fill::Linear { start, end, stops } => LinearGradient::new(
            Point::from_xy(start.x, start.y),
            Point::from_xy(end.x, end.y),
            sk_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        ),
        Fill::Radial {
            center,
            radius,
            stops,
        } => RadialGradient::new(
            Point::from_xy(center.x, center.y),
            Point::from_xy(center.x, center.y),
            *radius,
            sk_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        ),
    };
    // Degenerate gradients (zero length or radius) fall back to the last stop
    shader.unwrap_or_else(|| {
        let last = fill.stops().last().map_or(Hsla::TRANSPARENT, |s| s.color);
        Shader::SolidColor(sk_color(last))
    })
}

fn sk_paint(paint: &Paint) -> SkPaint<'static> {
    let mut sk = SkPaint::default();
    sk.anti_alias = true;
    sk.blend_mode = blend_mode(paint.blend);
    sk.shader = sk_shader(&paint.fill);
    sk
}
