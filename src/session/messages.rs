//! Message types for the correspondence session
//!
//! This module contains:
//! - Msg enum with nested sub-enums for organized message handling
//! - Convenience constructors used by the widget layer

use std::path::PathBuf;

use glam::DVec2;

use crate::domain::Side;

// ============================================================================
// File Workflow Types
// ============================================================================

/// File open/save workflow messages. Each action comes in a request/`Chosen`
/// pair: the request opens the native dialog, `Chosen` carries its result
/// (`None` when the dialog was cancelled).
#[derive(Debug, Clone)]
pub enum FileMsg {
    /// Open an image into the 2D viewport
    OpenImage,
    OpenImageChosen(Option<PathBuf>),
    /// Open a point cloud into the 3D viewport
    OpenCloud,
    OpenCloudChosen(Option<PathBuf>),
    /// Load a keypoint list from text, replacing the side's list
    LoadPoints(Side),
    LoadPointsChosen(Side, Option<PathBuf>),
    /// Save a keypoint list to text (guarded by the equal-count rule)
    SavePoints(Side),
    SavePointsChosen(Side, Option<PathBuf>),
}

// ============================================================================
// Viewport Interaction Types
// ============================================================================

/// Interactions reported by the image canvas. Pane-local positions come with
/// the pane size so the view transform can be resolved at handling time.
#[derive(Debug, Clone)]
pub enum ImageMsg {
    /// Primary click at a pane position
    Pick { pos: DVec2, pane: DVec2 },
    /// Wheel zoom centered on the cursor (positive steps zoom in)
    Zoom {
        at: DVec2,
        steps: f32,
        pane: DVec2,
    },
    /// Secondary-button drag delta
    Pan { delta: DVec2 },
}

/// Interactions reported by the cloud canvas
#[derive(Debug, Clone)]
pub enum CloudMsg {
    /// Primary click with the Ctrl state at click time
    Pick {
        pos: DVec2,
        pane: DVec2,
        ctrl: bool,
    },
    /// Primary-button drag delta rotating the camera
    Orbit { delta: DVec2 },
    /// Secondary-button drag delta sliding the focal target
    Pan { delta: DVec2, pane: DVec2 },
    /// Wheel dolly (positive steps move toward the target)
    Dolly { steps: f32 },
}

// ============================================================================
// Edit and UI Types
// ============================================================================

/// Keypoint list edits forwarded to a side's picker
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// Remove the most recent keypoint
    DeleteLast(Side),
    /// Remove every keypoint
    DeleteAll(Side),
}

/// Remaining UI messages
#[derive(Debug, Clone)]
pub enum UiMsg {
    /// Show or hide the help drawer
    ToggleHelp,
    /// Switch the image display between RGB and channel magnitude
    SetRgbDisplay(bool),
    /// Exit the application
    Quit,
}

// ============================================================================
// Main Message Enum
// ============================================================================

/// Messages for correspondence session interactions
#[derive(Debug, Clone)]
pub enum Msg {
    /// File open/save workflow messages
    File(FileMsg),
    /// Image viewport interactions
    Image(ImageMsg),
    /// Cloud viewport interactions
    Cloud(CloudMsg),
    /// Keypoint list edits
    Edit(EditMsg),
    /// Remaining UI messages
    Ui(UiMsg),
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl Msg {
    // File shortcuts
    pub fn open_image() -> Self {
        Self::File(FileMsg::OpenImage)
    }
    pub fn open_cloud() -> Self {
        Self::File(FileMsg::OpenCloud)
    }
    pub fn load_points(side: Side) -> Self {
        Self::File(FileMsg::LoadPoints(side))
    }
    pub fn save_points(side: Side) -> Self {
        Self::File(FileMsg::SavePoints(side))
    }

    // Viewport shortcuts
    pub fn image_pick(pos: DVec2, pane: DVec2) -> Self {
        Self::Image(ImageMsg::Pick { pos, pane })
    }
    pub fn image_zoom(at: DVec2, steps: f32, pane: DVec2) -> Self {
        Self::Image(ImageMsg::Zoom { at, steps, pane })
    }
    pub fn image_pan(delta: DVec2) -> Self {
        Self::Image(ImageMsg::Pan { delta })
    }
    pub fn cloud_pick(pos: DVec2, pane: DVec2, ctrl: bool) -> Self {
        Self::Cloud(CloudMsg::Pick { pos, pane, ctrl })
    }
    pub fn cloud_orbit(delta: DVec2) -> Self {
        Self::Cloud(CloudMsg::Orbit { delta })
    }
    pub fn cloud_pan(delta: DVec2, pane: DVec2) -> Self {
        Self::Cloud(CloudMsg::Pan { delta, pane })
    }
    pub fn cloud_dolly(steps: f32) -> Self {
        Self::Cloud(CloudMsg::Dolly { steps })
    }

    // Edit shortcuts
    pub fn delete_last(side: Side) -> Self {
        Self::Edit(EditMsg::DeleteLast(side))
    }
    pub fn delete_all(side: Side) -> Self {
        Self::Edit(EditMsg::DeleteAll(side))
    }

    // UI shortcuts
    pub fn toggle_help() -> Self {
        Self::Ui(UiMsg::ToggleHelp)
    }
    pub fn set_rgb_display(rgb: bool) -> Self {
        Self::Ui(UiMsg::SetRgbDisplay(rgb))
    }
    pub fn quit() -> Self {
        Self::Ui(UiMsg::Quit)
    }
}
