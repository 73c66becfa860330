//! JSON configuration for rendering.

use std::{fs, path::Path};

use rerank_core::{CoordSpace, RecordIoError};
use rerank_draw::{BoxStyle, Color, PointStyle, SequenceStyle, DEFAULT_TARGET_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Canvas used when base images are letterboxed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterboxConfig {
    pub target: [u32; 2],
    pub fill: Color,
}

impl Default for LetterboxConfig {
    fn default() -> Self {
        Self {
            target: [DEFAULT_TARGET_SIZE.0, DEFAULT_TARGET_SIZE.1],
            fill: Color::WHITE,
        }
    }
}

impl LetterboxConfig {
    pub fn target_size(&self) -> (u32, u32) {
        (self.target[0], self.target[1])
    }
}

/// Rendering configuration. Every field is optional in the JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Coordinate space of gaze sequences and REC points.
    ///
    /// Left unset on purpose: the producers disagree, so callers must say.
    pub space: Option<CoordSpace>,
    pub sequence: SequenceStyle,
    pub point: PointStyle,
    pub bbox: BoxStyle,
    /// Also outline the gold box on gaze/REC overlays.
    pub bbox_on_overlays: bool,
    pub letterbox: LetterboxConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        let overlay_box = BoxStyle {
            width: 2,
            ..BoxStyle::default()
        };
        Self {
            space: None,
            sequence: SequenceStyle::default(),
            point: PointStyle::default(),
            bbox: overlay_box,
            bbox_on_overlays: true,
            letterbox: LetterboxConfig::default(),
        }
    }
}

impl VizConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, VizError> {
        let path = path.as_ref();
        let parse = || -> Result<Self, RecordIoError> {
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        };
        parse().map_err(|source| VizError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), VizError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Declared coordinate space, with `override_space` taking precedence.
    pub fn resolve_space(&self, override_space: Option<CoordSpace>) -> Result<CoordSpace, VizError> {
        override_space.or(self.space).ok_or(VizError::MissingSpace)
    }
}
