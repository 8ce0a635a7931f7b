//! nannou backend for [`ChartSpec`].
//!
//! Model coordinates go through the spec's camera transform and are then
//! fitted into the target rect (nannou is centred with y pointing up).

use nannou::prelude::*;

use crate::rendering::primitives::{Color, Point, Shape, Stroke};
use crate::rendering::spec::ChartSpec;

/// Arc resolution for wedge outlines, in points per degree
const ARC_POINTS_PER_DEGREE: f64 = 1.0;

struct Frame {
    rect: Rect,
    fit: f64,
    width: f64,
    height: f64,
    scale: f64,
    translate: (f64, f64),
}

impl Frame {
    fn new(spec: &ChartSpec, rect: Rect) -> Self {
        let fit = (rect.w() as f64 / spec.width).min(rect.h() as f64 / spec.height);
        Self {
            rect,
            fit,
            width: spec.width,
            height: spec.height,
            scale: spec.transform.scale,
            translate: (spec.transform.x, spec.transform.y),
        }
    }

    fn point(&self, model: Point) -> Point2 {
        let vx = model.x * self.scale + self.translate.0;
        let vy = model.y * self.scale + self.translate.1;
        pt2(
            self.rect.x() + ((vx - self.width / 2.0) * self.fit) as f32,
            self.rect.y() - ((vy - self.height / 2.0) * self.fit) as f32,
        )
    }

    fn length(&self, model: f64) -> f32 {
        (model * self.scale * self.fit) as f32
    }
}

fn rgba(color: Color, opacity: f64) -> Srgba {
    srgba(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        (color.a as f64 / 255.0 * opacity) as f32,
    )
}

fn polar(center: Point, degree: f64, radius: f64) -> Point {
    let a = degree.to_radians();
    Point::new(center.x + radius * a.sin(), center.y - radius * a.cos())
}

fn draw_line(draw: &Draw, frame: &Frame, from: Point, to: Point, stroke: &Stroke, opacity: f64) {
    let color = rgba(stroke.color, opacity);
    let weight = frame.length(stroke.width);
    let Some(dash) = stroke.dash_array.as_deref().filter(|d| d.len() >= 2) else {
        draw.line()
            .start(frame.point(from))
            .end(frame.point(to))
            .weight(weight)
            .color(color);
        return;
    };

    let length = from.distance(&to);
    let period = dash[0] + dash[1];
    if length <= 0.0 || period <= 0.0 {
        return;
    }
    let mut offset = 0.0;
    while offset < length {
        let end = (offset + dash[0]).min(length);
        draw.line()
            .start(frame.point(from.lerp(&to, offset / length)))
            .end(frame.point(from.lerp(&to, end / length)))
            .weight(weight)
            .color(color);
        offset += period;
    }
}

/// Draw every shape of `spec` into `rect`
pub fn draw_chart(draw: &Draw, spec: &ChartSpec, rect: Rect) {
    let frame = Frame::new(spec, rect);
    draw.rect().xy(rect.xy()).wh(rect.wh()).color(rgba(spec.background_color, 1.0));

    for shape in &spec.shapes {
        match shape {
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
                opacity,
            } => {
                let ellipse = draw
                    .ellipse()
                    .xy(frame.point(*center))
                    .radius(frame.length(*radius));
                let ellipse = match fill {
                    Some(fill) => ellipse.color(rgba(*fill, *opacity)),
                    None => ellipse.no_fill(),
                };
                if let Some(stroke) = stroke {
                    ellipse
                        .stroke(rgba(stroke.color, *opacity))
                        .stroke_weight(frame.length(stroke.width));
                }
            }
            Shape::Wedge {
                center,
                radius_inner,
                radius_outer,
                start_angle,
                end_angle,
                fill,
                stroke,
                opacity,
            } => {
                let steps = (((end_angle - start_angle) * ARC_POINTS_PER_DEGREE).ceil() as usize).max(2);
                let degree_at = |i: usize| start_angle + (end_angle - start_angle) * i as f64 / steps as f64;
                let mut outline: Vec<Point2> = (0..=steps)
                    .map(|i| frame.point(polar(*center, degree_at(i), *radius_outer)))
                    .collect();
                outline.extend(
                    (0..=steps)
                        .rev()
                        .map(|i| frame.point(polar(*center, degree_at(i), *radius_inner))),
                );
                if let Some(fill) = fill {
                    draw.polygon()
                        .points(outline.clone())
                        .color(rgba(*fill, *opacity));
                }
                if let Some(stroke) = stroke {
                    if let Some(first) = outline.first().copied() {
                        outline.push(first);
                    }
                    draw.polyline()
                        .weight(frame.length(stroke.width))
                        .points(outline)
                        .color(rgba(stroke.color, *opacity));
                }
            }
            Shape::Line {
                from,
                to,
                stroke,
                opacity,
            } => draw_line(draw, &frame, *from, *to, stroke, *opacity),
            Shape::Text {
                position,
                content,
                size,
                color,
                opacity,
                ..
            } => {
                draw.text(content)
                    .xy(frame.point(*position))
                    .font_size(frame.length(*size).max(1.0) as u32)
                    .color(rgba(*color, *opacity));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportTransform;

    fn spec_with(transform: ViewportTransform) -> ChartSpec {
        let mut spec = ChartSpec::new(1000.0, 1000.0);
        spec.transform = transform;
        spec
    }

    #[test]
    fn test_frame_maps_model_centre_to_rect_centre() {
        let rect = Rect::from_w_h(500.0, 500.0);
        let frame = Frame::new(&spec_with(ViewportTransform::IDENTITY), rect);
        let centre = frame.point(Point::new(500.0, 500.0));
        assert!(centre.x.abs() < 1e-4 && centre.y.abs() < 1e-4);

        // Model y grows downwards, nannou y grows upwards
        let top = frame.point(Point::new(500.0, 0.0));
        assert!((top.y - 250.0).abs() < 1e-4);
        assert_eq!(frame.length(10.0), 5.0);
    }

    #[test]
    fn test_frame_applies_camera_transform() {
        let rect = Rect::from_w_h(1000.0, 1000.0);
        let transform = ViewportTransform::new(-500.0, -500.0, 2.0);
        let frame = Frame::new(&spec_with(transform), rect);
        // (500, 500) -> view (500, 500) -> rect centre
        let p = frame.point(Point::new(500.0, 500.0));
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
        assert_eq!(frame.length(3.0), 6.0);
    }

    #[test]
    fn test_draw_chart_accepts_every_shape() {
        let mut spec = spec_with(ViewportTransform::IDENTITY);
        let stroke = Stroke::dashed(Color::WHITE, 3.0, &[10.0, 10.0]);
        spec.shapes.push(Shape::Line {
            from: Point::new(100.0, 100.0),
            to: Point::new(400.0, 100.0),
            stroke,
            opacity: 0.5,
        });
        let draw = Draw::new();
        draw_chart(&draw, &spec, Rect::from_w_h(800.0, 600.0));
    }
}
