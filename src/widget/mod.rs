//! Widgets for the main window
//!
//! This module provides:
//! - The two viewport canvases (image and point cloud)
//! - Shared marker drawing
//! - The toolbar and the help drawer

pub mod cloud_viewport;
pub mod drawing;
pub mod help;
pub mod image_viewport;
pub mod toolbar;
