use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::terrain::carver::Rect;
use crate::terrain::platform::PlatformKind;

/// One platform entry in a level table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub center: Vec2,
    pub half_extents: Vec2,
    #[serde(default)]
    pub kind: PlatformKind,
}

impl PlatformSpec {
    pub fn new(cx: f32, cy: f32, hw: f32, hh: f32, kind: PlatformKind) -> Self {
        Self {
            center: Vec2::new(cx, cy),
            half_extents: Vec2::new(hw, hh),
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.center, self.half_extents)
    }
}

/// Static layout of one level: platforms plus fixed spawn points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    pub platforms: Vec<PlatformSpec>,
    #[serde(default)]
    pub spawn_points: Vec<Vec2>,
}

/// Ordered collection of level layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLibrary {
    pub levels: Vec<LevelLayout>,
}

impl LevelLibrary {
    /// The levels shipped with the engine.
    pub fn builtin() -> Self {
        Self {
            levels: super::builtin::levels(),
        }
    }

    /// Parse a library from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelLayout> {
        self.levels.get(index)
    }

    /// Resolve a level index, wrapping out-of-range indices around.
    /// Returns `None` only for an empty library.
    pub fn resolve(&self, index: usize) -> Option<(usize, &LevelLayout)> {
        if self.levels.is_empty() {
            return None;
        }
        let resolved = index % self.levels.len();
        if resolved != index {
            log::warn!(
                "level {} out of range ({} levels), using level {}",
                index,
                self.levels.len(),
                resolved
            );
        }
        Some((resolved, &self.levels[resolved]))
    }
}

impl Default for LevelLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
