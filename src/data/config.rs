//! Layout and timing tuning for the shell.
//!
//! Every offset constant the row/column policies use lives here rather than
//! in code, so a theme can reshape the wheel without touching the state
//! machine.
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub alpha: f32,
    pub zoom: f32,
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavTuning {
    /// Edge length of one item icon, the unit for horizontal slides.
    pub icon_size: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,

    pub screen_margin_left: f32,
    pub screen_margin_top: f32,
    pub label_margin_left: f32,
    pub title_margin_left: f32,
    pub title_margin_top: f32,
    pub font_size: f32,

    /// Row-offset multipliers for entries above the selection, at the top
    /// level and past the submenu depth threshold respectively.
    pub above_item_offset: f32,
    pub above_subitem_offset: f32,
    /// Row-offset multiplier for entries below the selection.
    pub under_item_offset: f32,
    /// The selected row is pinned to `vertical_spacing * active_item_factor`.
    pub active_item_factor: f32,
    /// Depths strictly greater than this use `above_subitem_offset`.
    pub submenu_depth_threshold: usize,

    pub item_active: NodeStyle,
    pub item_passive: NodeStyle,
    pub category_active: NodeStyle,
    pub category_passive: NodeStyle,

    pub transition_millis: u64,
}

impl Default for NavTuning {
    fn default() -> Self {
        Self {
            icon_size: 128.0,
            horizontal_spacing: 200.0,
            vertical_spacing: 64.0,
            screen_margin_left: 336.0,
            screen_margin_top: 288.0,
            label_margin_left: 85.0,
            title_margin_left: 60.0,
            title_margin_top: 60.0,
            font_size: 32.0,
            above_item_offset: -1.0,
            above_subitem_offset: 1.5,
            under_item_offset: 5.0,
            active_item_factor: 3.0,
            submenu_depth_threshold: 1,
            item_active: NodeStyle {
                alpha: 1.0,
                zoom: 1.0,
            },
            item_passive: NodeStyle {
                alpha: 0.5,
                zoom: 0.5,
            },
            category_active: NodeStyle {
                alpha: 1.0,
                zoom: 1.0,
            },
            category_passive: NodeStyle {
                alpha: 0.5,
                zoom: 0.5,
            },
            transition_millis: 166,
        }
    }
}

/// Discrete scale ladder keyed on window width.
pub fn scale_for_width(width: f32) -> f32 {
    if width >= 3840.0 {
        2.0
    } else if width >= 2560.0 {
        1.5
    } else if width >= 1920.0 {
        1.0
    } else if width >= 1280.0 {
        0.75
    } else if width >= 640.0 {
        0.5
    } else {
        0.25
    }
}

impl NavTuning {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_millis)
    }

    /// Returns a copy with every pixel-denominated field scaled.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            icon_size: self.icon_size * factor,
            horizontal_spacing: self.horizontal_spacing * factor,
            vertical_spacing: self.vertical_spacing * factor,
            screen_margin_left: self.screen_margin_left * factor,
            screen_margin_top: self.screen_margin_top * factor,
            label_margin_left: self.label_margin_left * factor,
            title_margin_left: self.title_margin_left * factor,
            title_margin_top: self.title_margin_top * factor,
            font_size: self.font_size * factor,
            ..self.clone()
        }
    }

    /// Loads tuning from a JSON file, falling back to defaults when the
    /// file is absent or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(tuning) => tuning,
                Err(error) => {
                    warn!("ignoring malformed tuning file {}: {error}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
