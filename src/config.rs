//! Configuration persistence for pairpick settings

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::iced::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for MarkerColor {
    fn default() -> Self {
        // Red markers, matching the classic seed-point convention
        Self {
            r: 0.9,
            g: 0.1,
            b: 0.1,
        }
    }
}

impl From<MarkerColor> for Color {
    fn from(c: MarkerColor) -> Self {
        Color::from_rgb(c.r, c.g, c.b)
    }
}

impl From<Color> for MarkerColor {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Modifier key required for picking in the point cloud viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PickModifier {
    /// Every primary click picks a point
    None,
    /// Only Ctrl + primary click picks; a plain click orbits the camera
    #[default]
    Ctrl,
}

impl PickModifier {
    /// Human-readable description shown in the help drawer
    pub fn describe(self) -> &'static str {
        match self {
            PickModifier::None => "Left click",
            PickModifier::Ctrl => "Ctrl + left click",
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, CosmicConfigEntry)]
#[version = 1]
pub struct PairPickConfig {
    /// Color for keypoint markers in both viewports
    pub marker_color: MarkerColor,
    /// Keypoint dot radius in logical pixels
    pub marker_radius: f32,
    /// Rendered size of a cloud point in logical pixels
    pub cloud_point_size: f32,
    /// Modifier gating for cloud picks (image picks are never gated)
    pub cloud_pick_modifier: PickModifier,
    /// Whether images open in RGB display mode (false = channel magnitude)
    #[serde(default = "default_rgb_display")]
    pub rgb_display: bool,
}

fn default_rgb_display() -> bool {
    true
}

impl PairPickConfig {
    /// Configuration ID for cosmic-config
    pub const ID: &'static str = "io.github.pairpick";

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => match Self::get_entry(&config) {
                Ok(entry) => entry,
                Err((errs, entry)) => {
                    log::warn!("Error loading config, using defaults: {:?}", errs);
                    entry
                }
            },
            Err(err) => {
                log::warn!("Could not create config handler: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => {
                if let Err(err) = self.write_entry(&config) {
                    log::error!("Failed to save config: {:?}", err);
                }
            }
            Err(err) => {
                log::error!("Could not create config handler for saving: {:?}", err);
            }
        }
    }
}

impl Default for PairPickConfig {
    fn default() -> Self {
        Self {
            marker_color: MarkerColor::default(),
            // Large enough to hit at a glance, small enough not to hide pixels
            marker_radius: 4.0,
            cloud_point_size: 2.0,
            // Ctrl-gated picking leaves plain drags free for orbiting
            cloud_pick_modifier: PickModifier::Ctrl,
            rgb_display: default_rgb_display(),
        }
    }
}
