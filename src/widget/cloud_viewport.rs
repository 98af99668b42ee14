//! Canvas program for the 3D point cloud viewport
//!
//! Translates mouse events into session messages (pick, orbit, pan, dolly)
//! and draws the projected point set with its numbered keypoint markers.
//! Ctrl is tracked from keyboard modifier events so the pick gate can be
//! applied by the controller, not the widget.

use cosmic::iced_core::{Color, Point, Rectangle, Size};
use cosmic::iced_widget::canvas;
use glam::DVec2;

use crate::config::PairPickConfig;
use crate::render::style;
use crate::session::messages::Msg;
use crate::session::state::CloudPane;
use crate::widget::drawing::draw_marker;

/// Background behind the point set
const BACKDROP: Color = Color::from_rgb(0.08, 0.08, 0.1);
/// Off-pane margin within which projected points are still drawn
const CULL_MARGIN: f64 = 4.0;

pub struct CloudViewport<'a> {
    pub pane: &'a CloudPane,
    pub config: &'a PairPickConfig,
}

/// State for tracking the cursor, held modifiers, and active drags
#[derive(Default)]
pub struct CloudViewportState {
    cursor: Point,
    ctrl_down: bool,
    orbiting: bool,
    panning: bool,
}

impl canvas::Program<Msg, cosmic::Theme, cosmic::Renderer> for CloudViewport<'_> {
    type State = CloudViewportState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: cosmic::iced_core::mouse::Cursor,
    ) -> (canvas::event::Status, Option<Msg>) {
        use cosmic::iced_core::keyboard;
        use cosmic::iced_core::mouse::{Button, Event as MouseEvent, ScrollDelta};

        let pane_size = DVec2::new(bounds.width as f64, bounds.height as f64);
        match event {
            canvas::Event::Keyboard(keyboard::Event::ModifiersChanged(mods)) => {
                state.ctrl_down = mods.control();
                return (canvas::event::Status::Captured, None);
            }
            canvas::Event::Mouse(MouseEvent::ButtonPressed(Button::Left)) => {
                let Some(pos) = cursor.position_in(bounds) else {
                    return (canvas::event::Status::Ignored, None);
                };
                state.cursor = pos;
                // A click both picks (gate permitting) and starts an orbit drag
                state.orbiting = true;
                return (
                    canvas::event::Status::Captured,
                    Some(Msg::cloud_pick(
                        DVec2::new(pos.x as f64, pos.y as f64),
                        pane_size,
                        state.ctrl_down,
                    )),
                );
            }
            canvas::Event::Mouse(MouseEvent::ButtonReleased(Button::Left)) => {
                state.orbiting = false;
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
                    let delta =
                        DVec2::new((pos.x - previous.x) as f64, (pos.y - previous.y) as f64);
                    if state.orbiting {
                        return (
                            canvas::event::Status::Captured,
                            Some(Msg::cloud_orbit(delta)),
                        );
                    }
                    if state.panning {
                        return (
                            canvas::event::Status::Captured,
                            Some(Msg::cloud_pan(delta, pane_size)),
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
                    return (
                        canvas::event::Status::Captured,
                        Some(Msg::cloud_dolly(steps)),
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
        let point_size = self.config.cloud_point_size;
        let half = point_size * 0.5;
        for (index, &position) in self.pane.cloud.positions().iter().enumerate() {
            let Some((screen, _)) = self.pane.camera.project(position, pane_size) else {
                continue;
            };
            if screen.x < -CULL_MARGIN
                || screen.y < -CULL_MARGIN
                || screen.x > pane_size.x + CULL_MARGIN
                || screen.y > pane_size.y + CULL_MARGIN
            {
                continue;
            }
            let [r, g, b] = match self.pane.cloud.intensity_t(index) {
                Some(t) => style::intensity_color(t),
                None => style::cloud::PLAIN_POINT,
            };
            frame.fill_rectangle(
                Point::new(screen.x as f32 - half, screen.y as f32 - half),
                Size::new(point_size, point_size),
                Color::from_rgb(r, g, b),
            );
        }

        let color = Color::from(self.config.marker_color);
        for (index, kp) in self.pane.picker.keypoints().iter().enumerate() {
            let Some((screen, _)) = self.pane.camera.project(kp.anchor, pane_size) else {
                continue;
            };
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
