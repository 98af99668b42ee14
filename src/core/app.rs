//! Application shell and correspondence coordinator
//!
//! The [`App`] owns the workspace (both viewport panes and their keypoint
//! lists) and dispatches every session message to its handler. All list
//! mutation and file I/O happens synchronously inside `update`; the native
//! file dialogs are the only async step.

use cosmic::iced_core::Length;
use cosmic::iced_widget::{canvas, column, row};
use cosmic::widget::container;
use cosmic::{app, Element};

use crate::config::PairPickConfig;
use crate::session::handlers;
use crate::session::messages::Msg;
use crate::session::state::Workspace;
use crate::widget::cloud_viewport::CloudViewport;
use crate::widget::image_viewport::ImageViewport;
use crate::widget::{help, toolbar};

pub(crate) fn run() -> cosmic::iced::Result {
    let settings =
        cosmic::app::Settings::default().size(cosmic::iced::Size::new(1280.0, 768.0));
    cosmic::app::run::<App>(settings, ())
}

pub struct App {
    pub core: app::Core,
    pub workspace: Workspace,
}

impl cosmic::Application for App {
    type Executor = cosmic::executor::Default;

    type Flags = ();

    type Message = Msg;

    const APP_ID: &'static str = "io.github.pairpick";

    fn core(&self) -> &app::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut app::Core {
        &mut self.core
    }

    fn init(
        core: app::Core,
        _flags: Self::Flags,
    ) -> (Self, cosmic::iced::Task<cosmic::Action<Self::Message>>) {
        (
            Self {
                core,
                workspace: Workspace::new(PairPickConfig::load()),
            },
            cosmic::iced::Task::none(),
        )
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let ws = &self.workspace;

        let image_pane: Element<'_, Msg> = match &ws.image {
            Some(pane) => canvas::Canvas::new(ImageViewport {
                pane,
                config: &ws.config,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
            None => placeholder("Open an image to pick 2D keypoints"),
        };

        let cloud_pane: Element<'_, Msg> = match &ws.cloud {
            Some(pane) => canvas::Canvas::new(CloudViewport {
                pane,
                config: &ws.config,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
            None => placeholder("Open a point cloud to pick 3D keypoints"),
        };

        let mut panes = row![image_pane, cloud_pane].spacing(4);
        if ws.help_open {
            panes = panes.push(help::build_help_drawer(&ws.config));
        }

        column![
            toolbar::build_toolbar(ws),
            panes.width(Length::Fill).height(Length::Fill),
            toolbar::build_status_bar(ws),
        ]
        .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
    ) -> cosmic::iced::Task<cosmic::Action<Self::Message>> {
        let ws = &mut self.workspace;
        match message {
            Msg::File(m) => handlers::handle_file_msg(ws, m).map(cosmic::Action::App),
            Msg::Image(m) => handlers::handle_image_msg(ws, m).map(cosmic::Action::App),
            Msg::Cloud(m) => handlers::handle_cloud_msg(ws, m).map(cosmic::Action::App),
            Msg::Edit(m) => handlers::handle_edit_msg(ws, m).map(cosmic::Action::App),
            Msg::Ui(m) => handlers::handle_ui_msg(ws, m).map(cosmic::Action::App),
        }
    }
}

fn placeholder(message: &'static str) -> Element<'static, Msg> {
    container(cosmic::widget::text::body(message))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
