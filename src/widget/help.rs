//! Help drawer summarizing mouse bindings and the save workflow

use cosmic::iced_core::{Background, Border, Length};
use cosmic::iced_widget::column;
use cosmic::widget::{container, text};
use cosmic::Element;

use crate::config::PairPickConfig;
use crate::session::messages::Msg;

pub fn build_help_drawer(config: &PairPickConfig) -> Element<'static, Msg> {
    let pick_binding = config.cloud_pick_modifier.describe();

    let content = column![
        text::title4("pairpick"),
        text::body("Pick the same landmarks in both viewports; keypoints pair by number."),
        text::body(""),
        text::heading("Image (2D)"),
        text::body("Left click adds a keypoint"),
        text::body("Right drag pans, wheel zooms"),
        text::body(""),
        text::heading("Point cloud (3D)"),
        text::body(format!("{pick_binding} adds a keypoint")),
        text::body("Left drag orbits, right drag pans, wheel zooms"),
        text::body(""),
        text::heading("Saving"),
        text::body("Both lists must hold the same number of keypoints."),
        text::body("Files are plain text: one 'x y' or 'x y z' per line."),
    ]
    .spacing(4);

    container(content)
        .padding(16)
        .width(Length::Fixed(300.0))
        .height(Length::Fill)
        .class(cosmic::theme::Container::Custom(Box::new(|theme| {
            let cosmic_theme = theme.cosmic();
            cosmic::iced::widget::container::Style {
                background: Some(Background::Color(
                    cosmic_theme.background.component.base.into(),
                )),
                border: Border {
                    radius: cosmic_theme.corner_radii.radius_s.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })))
        .into()
}
