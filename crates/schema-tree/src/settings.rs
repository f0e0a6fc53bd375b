use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a mapping edge whose endpoint cannot be found when
/// the scene is composed (typically after a schema reload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Log, record the edge as orphaned and keep drawing
    #[default]
    Skip,
    /// Abort the whole render pass
    FailFast,
}

/// Canvas geometry and interaction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperSettings {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub margin: f32,
    /// Horizontal share of the canvas given to each schema tree
    pub tree_width_fraction: f32,
    /// Pointer-to-node distance below which a node counts as hit
    pub distance_threshold: f32,
    pub unresolved_edges: EdgePolicy,
    pub label_font_size: f32,
}

impl Default for MapperSettings {
    fn default() -> Self {
        Self {
            canvas_width: 1000.0,
            canvas_height: 1000.0,
            margin: 100.0,
            tree_width_fraction: 0.25,
            distance_threshold: 10.0,
            unresolved_edges: EdgePolicy::Skip,
            label_font_size: 12.0,
        }
    }
}

impl MapperSettings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("tree_width_fraction", self.tree_width_fraction),
            ("distance_threshold", self.distance_threshold),
            ("label_font_size", self.label_font_size),
        ] {
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive { field, value });
            }
        }
        if self.margin < 0.0 || 2.0 * self.margin >= self.canvas_height {
            return Err(SettingsError::MarginOutOfRange(self.margin));
        }
        Ok(())
    }

    fn drawable_height(&self) -> f32 {
        self.canvas_height - 2.0 * self.margin
    }

    fn tree_width(&self) -> f32 {
        self.canvas_width * self.tree_width_fraction
    }

    /// Source tree grows rightward from the left margin.
    pub fn source_bounds(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.tree_width(),
            self.drawable_height(),
        )
    }

    /// Target tree grows leftward from the right margin.
    pub fn target_bounds(&self) -> Rect {
        Rect::new(
            self.canvas_width - self.margin,
            self.margin,
            -self.tree_width(),
            self.drawable_height(),
        )
    }

    /// Centre column holding intermediate nodes.
    pub fn intermediate_bounds(&self) -> Rect {
        Rect::new(
            self.canvas_width / 2.0,
            self.margin,
            0.0,
            self.drawable_height(),
        )
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("margin {0} does not leave room to draw")]
    MarginOutOfRange(f32),
}
