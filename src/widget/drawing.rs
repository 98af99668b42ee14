//! Shared drawing utilities for the viewport canvases

use cosmic::iced_core::{Color, Point};
use cosmic::iced_widget::canvas;

use crate::render::style;

/// Draw one numbered keypoint marker: a filled dot with a contrasting
/// outline, and the 1-based label beside it
pub fn draw_marker(
    frame: &mut canvas::Frame,
    at: Point,
    label: usize,
    color: Color,
    radius: f32,
) {
    let dot = canvas::Path::circle(at, radius);
    frame.fill(&dot, color);
    frame.stroke(
        &dot,
        canvas::Stroke::default()
            .with_color(Color::WHITE)
            .with_width(style::marker::OUTLINE),
    );

    frame.fill_text(canvas::Text {
        content: label.to_string(),
        position: Point::new(
            at.x + radius + style::marker::LABEL_GAP,
            at.y - radius - style::marker::LABEL_GAP,
        ),
        color,
        size: style::marker::LABEL_SIZE.into(),
        ..canvas::Text::default()
    });
}
