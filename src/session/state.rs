//! Session state: the workspace and its two viewport panes
//!
//! Each pane couples loaded content with its view state and its
//! `PickController`. Opening content builds a fresh pane, so the previous
//! keypoint list for that side is discarded while the other side is left
//! untouched.

use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::DVec2;

use crate::config::{PairPickConfig, PickModifier};
use crate::domain::Side;
use crate::files::cloud::PointCloud;
use crate::files::image::ImageSource;
use crate::picker::image::PlanarView;
use crate::picker::{PickController, PickGate};
use crate::render::camera::OrbitCamera;

/// The image viewport: decoded image, view transform, keypoint picker
pub struct ImagePane {
    pub source: ImageSource,
    pub view: PlanarView,
    pub picker: PickController,
    pub path: PathBuf,
}

impl ImagePane {
    pub fn open(path: &Path, rgb_display: bool) -> anyhow::Result<Self> {
        let source = ImageSource::open(path, rgb_display)?;
        Ok(Self {
            source,
            view: PlanarView::default(),
            picker: PickController::image(),
            path: path.to_path_buf(),
        })
    }

    pub fn image_size(&self) -> DVec2 {
        DVec2::new(self.source.width() as f64, self.source.height() as f64)
    }
}

/// The cloud viewport: point set, orbit camera, keypoint picker
pub struct CloudPane {
    pub cloud: PointCloud,
    pub camera: OrbitCamera,
    pub picker: PickController,
    pub path: PathBuf,
}

impl CloudPane {
    pub fn open(path: &Path, gate: PickGate) -> anyhow::Result<Self> {
        let cloud = PointCloud::load(path)
            .with_context(|| format!("could not load point cloud {}", path.display()))?;
        let (min, max) = cloud.bounds();
        Ok(Self {
            cloud,
            camera: OrbitCamera::fit(min, max),
            picker: PickController::cloud(gate),
            path: path.to_path_buf(),
        })
    }
}

/// Outcome reported in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Everything the coordinator owns
pub struct Workspace {
    pub config: PairPickConfig,
    pub image: Option<ImagePane>,
    pub cloud: Option<CloudPane>,
    pub status: Option<Status>,
    pub help_open: bool,
}

impl Workspace {
    pub fn new(config: PairPickConfig) -> Self {
        Self {
            config,
            image: None,
            cloud: None,
            status: None,
            help_open: false,
        }
    }

    /// Gate for freshly created cloud pickers, from config
    pub fn cloud_gate(&self) -> PickGate {
        match self.config.cloud_pick_modifier {
            PickModifier::None => PickGate::Always,
            PickModifier::Ctrl => PickGate::WithCtrl,
        }
    }

    /// Keypoint counts as (image, cloud); absent panes count zero
    pub fn counts(&self) -> (usize, usize) {
        (
            self.image
                .as_ref()
                .map_or(0, |p| p.picker.keypoints().len()),
            self.cloud
                .as_ref()
                .map_or(0, |p| p.picker.keypoints().len()),
        )
    }

    /// The picker owning `side`'s list, when that pane is loaded
    pub fn picker_mut(&mut self, side: Side) -> Option<&mut PickController> {
        match side {
            Side::Image => self.image.as_mut().map(|p| &mut p.picker),
            Side::Cloud => self.cloud.as_mut().map(|p| &mut p.picker),
        }
    }

    pub fn report_info(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{text}");
        self.status = Some(Status::info(text));
    }

    pub fn report_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{text}");
        self.status = Some(Status::error(text));
    }
}
