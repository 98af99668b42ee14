//! Toolbar and status bar for the main window

use cosmic::iced_core::{Alignment, Length};
use cosmic::iced_widget::row;
use cosmic::widget::{button, checkbox, container, horizontal_space, icon, text, tooltip};
use cosmic::Element;

use crate::domain::Side;
use crate::session::messages::Msg;
use crate::session::state::{StatusKind, Workspace};

/// Build the main toolbar: open/save/load actions, per-side edits, the RGB
/// display toggle, help and quit
pub fn build_toolbar(ws: &Workspace) -> Element<'static, Msg> {
    let toolbar = row![
        toolbar_button("document-open-symbolic", "Open image…", Msg::open_image()),
        toolbar_button(
            "document-open-symbolic",
            "Open point cloud…",
            Msg::open_cloud()
        ),
        text::body("2D:"),
        toolbar_button(
            "document-open-symbolic",
            "Load image keypoints…",
            Msg::load_points(Side::Image)
        ),
        toolbar_button(
            "document-save-symbolic",
            "Save image keypoints…",
            Msg::save_points(Side::Image)
        ),
        toolbar_button(
            "edit-undo-symbolic",
            "Delete last image keypoint",
            Msg::delete_last(Side::Image)
        ),
        toolbar_button(
            "edit-clear-all-symbolic",
            "Delete all image keypoints",
            Msg::delete_all(Side::Image)
        ),
        text::body("3D:"),
        toolbar_button(
            "document-open-symbolic",
            "Load cloud keypoints…",
            Msg::load_points(Side::Cloud)
        ),
        toolbar_button(
            "document-save-symbolic",
            "Save cloud keypoints…",
            Msg::save_points(Side::Cloud)
        ),
        toolbar_button(
            "edit-undo-symbolic",
            "Delete last cloud keypoint",
            Msg::delete_last(Side::Cloud)
        ),
        toolbar_button(
            "edit-clear-all-symbolic",
            "Delete all cloud keypoints",
            Msg::delete_all(Side::Cloud)
        ),
        checkbox("RGB", ws.config.rgb_display).on_toggle(Msg::set_rgb_display),
        horizontal_space(),
        toolbar_button("help-about-symbolic", "Help", Msg::toggle_help()),
        toolbar_button("application-exit-symbolic", "Quit", Msg::quit()),
    ]
    .spacing(4)
    .align_y(Alignment::Center);

    container(toolbar)
        .padding(4)
        .width(Length::Fill)
        .into()
}

/// Build the status bar: keypoint counts plus the last action's outcome
pub fn build_status_bar(ws: &Workspace) -> Element<'static, Msg> {
    let (image, cloud) = ws.counts();
    let counts = text::body(format!("2D: {image}  |  3D: {cloud}"));

    let status: Element<'static, Msg> = match &ws.status {
        Some(status) if status.kind == StatusKind::Error => {
            text::body(status.text.clone())
                .class(cosmic::theme::Text::Color(cosmic::iced::Color::from_rgb(
                    0.9, 0.3, 0.3,
                )))
                .into()
        }
        Some(status) => text::body(status.text.clone()).into(),
        None => text::body("").into(),
    };

    container(
        row![counts, horizontal_space(), status]
            .spacing(8)
            .align_y(Alignment::Center),
    )
    .padding([2, 8])
    .width(Length::Fill)
    .into()
}

fn toolbar_button(
    icon_name: &'static str,
    tip: &'static str,
    msg: Msg,
) -> Element<'static, Msg> {
    tooltip(
        button::custom(
            icon::Icon::from(icon::from_name(icon_name).size(16))
                .width(Length::Fixed(16.0))
                .height(Length::Fixed(16.0)),
        )
        .class(cosmic::theme::Button::Icon)
        .on_press(msg)
        .padding(8),
        tip,
        tooltip::Position::Bottom,
    )
    .into()
}
