//! Canvas rendering of the wheel and needle.

use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Context, Line as CanvasLine},
};

use spindle_engine::SpinSession;
use spindle_types::SliceId;

const WHEEL_RADIUS: f64 = 1.0;
const LABEL_RADIUS: f64 = 0.78;
const NEEDLE_LENGTH: f64 = 1.18;
const RIM_SEGMENTS: u32 = 120;

/// Draw the wheel at its current rotation with the needle on top.
pub fn draw_wheel(frame: &mut Frame, area: Rect, session: &SpinSession) {
    let rotation = session.wheel_rotation();
    let pointer = session.pointer_angle();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.4, 1.4])
        .y_bounds([-1.4, 1.4])
        .paint(move |ctx| {
            draw_rim(ctx);
            draw_slices(ctx, session, rotation);
            draw_needle(ctx, pointer);
        });
    frame.render_widget(canvas, area);
}

fn draw_rim(ctx: &mut Context) {
    let mut previous = polar(0.0, WHEEL_RADIUS);
    for segment in 1..=RIM_SEGMENTS {
        let degree = 360.0 * f64::from(segment) / f64::from(RIM_SEGMENTS);
        let point = polar(degree, WHEEL_RADIUS);
        ctx.draw(&CanvasLine {
            x1: previous.0,
            y1: previous.1,
            x2: point.0,
            y2: point.1,
            color: Color::White,
        });
        previous = point;
    }
}

fn draw_slices(ctx: &mut Context, session: &SpinSession, rotation: f64) {
    for id in SliceId::all() {
        let band = session.slices().band(id);

        // Spoke at each band edge, rotated with the wheel.
        for edge in [band.min_degree, band.max_degree] {
            let (x, y) = polar(edge + rotation, WHEEL_RADIUS);
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: 0.0,
                x2: x,
                y2: y,
                color: Color::DarkGray,
            });
        }

        let middle = (band.min_degree + band.max_degree) / 2.0;
        let (x, y) = polar(middle + rotation, LABEL_RADIUS);
        ctx.print(x, y, id.to_string());
    }
}

fn draw_needle(ctx: &mut Context, pointer_angle: f64) {
    let (x, y) = polar(pointer_angle, NEEDLE_LENGTH);
    ctx.draw(&CanvasLine {
        x1: 0.0,
        y1: 0.0,
        x2: x,
        y2: y,
        color: Color::Red,
    });
}

/// Wheel-degree to canvas coordinates: 0 degrees points up, positive
/// degrees run clockwise.
fn polar(degree: f64, radius: f64) -> (f64, f64) {
    let radians = degree.to_radians();
    (radius * radians.sin(), radius * radians.cos())
}
