//! Canvas program for the 2D image viewport
//!
//! Translates mouse events into session messages (pick, zoom, pan) and draws
//! the image with its numbered keypoint markers. Positions in emitted
//! messages are pane-local and come with the pane size so the handler can
//! resolve the same view transform this widget draws with.

use cosmic::iced_core::{image::FilterMethod, Color, Point, Rectangle, Size};
use cosmic::iced_widget::canvas;
use glam::DVec2;

use crate::config::PairPickConfig;
use crate::session::messages::Msg;
use crate::session::state::ImagePane;
use crate::widget::drawing::draw_marker;

/// Background behind the image
const BACKDROP: Color = Color::from_rgb(0.12, 0.12, 0.13);

pub struct ImageViewport<'a> {
    pub pane: &'a ImagePane,
    pub config: &'a PairPickConfig,
}

/// State for tracking the cursor and an active pan drag
#[derive(Default)]
pub struct ImageViewportState {
    cursor: Point,
    panning: bool,
}

impl canvas::Program<Msg, cosmic::Theme, cosmic::Renderer> for ImageViewport<'_> {
    type State = ImageViewportState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: cosmic::iced_core::mouse::Cursor,
    ) -> (canvas::event::Status, Option<Msg>) {
        use cosmic::iced_core::mouse::{Button, Event as MouseEvent, ScrollDelta};

        let pane_size = DVec2::new(bounds.width as f64, bounds.height as f64);
        match event {
            canvas::Event::Mouse(MouseEvent::ButtonPressed(Button::Left)) => {
                let Some(pos) = cursor.position_in(bounds) else {
                    return (canvas::event::Status::Ignored, None);
                };
                state.cursor = pos;
                return (
                    canvas::event::Status::Captured,
                    Some(Msg::image_pick(
                        DVec2::new(pos.x as f64, pos.y as f64),
                        pane_size,
                    )),
                );
            }
            canvas::Event::Mouse(MouseEvent::ButtonPressed(
                Button::Right | Button::Middle,
            )) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    state.cursor = pos;
                    state.panning = true;
                    return (canvas::event::Status::Captured, None);
                }
            }
            canvas::Event::Mouse(MouseEvent::ButtonReleased(
                Button::Right | Button::Middle,
            )) => {
                state.panning = false;
            }
            canvas::Event::Mouse(MouseEvent::CursorMoved { .. }) => {
                if let Some(pos) = cursor.position_in(bounds) {
                    let previous = state.cursor;
                    state.cursor = pos;
                    if state.panning {
                        let delta =
                            DVec2::new((pos.x - previous.x) as f64, (pos.y - previous.y) as f64);
                        return (
                            canvas::event::Status::Captured,
                            Some(Msg::image_pan(delta)),
                        );
                    }
                }
            }
            canvas::Event::Mouse(MouseEvent::WheelScrolled { delta }) => {
                if cursor.position_in(bounds).is_some() {
                    let steps = match delta {
                        ScrollDelta::Lines { y, .. } => y,
                        ScrollDelta::Pixels { y, .. } => y / 20.0,
                    };
                    let at = DVec2::new(state.cursor.x as f64, state.cursor.y as f64);
                    return (
                        canvas::event::Status::Captured,
                        Some(Msg::image_zoom(at, steps, pane_size)),
                    );
                }
            }
            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &cosmic::Renderer,
        _theme: &cosmic::Theme,
        bounds: Rectangle,
        _cursor: cosmic::iced_core::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKDROP);

        let pane_size = DVec2::new(bounds.width as f64, bounds.height as f64);
        let transform = self.pane.view.transform(self.pane.image_size(), pane_size);
        let origin = transform.to_screen(DVec2::ZERO);
        let extent = self.pane.image_size() * transform.scale;
        frame.draw_image(
            Rectangle::new(
                Point::new(origin.x as f32, origin.y as f32),
                Size::new(extent.x as f32, extent.y as f32),
            ),
            canvas::Image::new(self.pane.source.handle.clone())
                .filter_method(FilterMethod::Nearest),
        );

        let color = Color::from(self.config.marker_color);
        for (index, kp) in self.pane.picker.keypoints().iter().enumerate() {
            let screen = transform.to_screen(DVec2::new(kp.anchor.x, kp.anchor.y));
            draw_marker(
                &mut frame,
                Point::new(screen.x as f32, screen.y as f32),
                index + 1,
                color,
                self.config.marker_radius,
            );
        }

        vec![frame.into_geometry()]
    }
}
