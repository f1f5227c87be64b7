//! Slide items and their media status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to visual content (URL or path). Never dereferenced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRef(String);

impl SourceRef {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single slide. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideItem {
    pub source: SourceRef,
    pub title: String,
    pub description: String,
}

impl SlideItem {
    pub fn new(source: &str, title: &str, description: &str) -> Self {
        Self {
            source: SourceRef::new(source),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Load state of a slide's media, as reported by the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MediaStatus {
    #[default]
    Pending,
    Loaded,
    /// Load failed; a placeholder is shown instead
    Placeholder,
}

/// The demo slides shown when no list is configured
pub fn default_slides() -> Vec<SlideItem> {
    vec![
        SlideItem::new(
            "https://picsum.photos/800/400?random=1",
            "Beautiful Landscape",
            "A stunning view of mountains and valleys",
        ),
        SlideItem::new(
            "https://picsum.photos/800/400?random=2",
            "Ocean Waves",
            "Peaceful waves crashing on the shore",
        ),
        SlideItem::new(
            "https://picsum.photos/800/400?random=3",
            "City Skyline",
            "Modern architecture against the sky",
        ),
        SlideItem::new(
            "https://picsum.photos/800/400?random=4",
            "Forest Path",
            "A winding path through lush greenery",
        ),
        SlideItem::new(
            "https://picsum.photos/800/400?random=5",
            "Desert Sunset",
            "Golden hour in the vast desert",
        ),
        SlideItem::new(
            "https://picsum.photos/800/400?random=6",
            "Snowy Mountains",
            "Majestic peaks covered in snow",
        ),
    ]
}
