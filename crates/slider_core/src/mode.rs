//! Slider effect modes

use crate::SliderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual transition style. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EffectMode {
    #[default]
    #[serde(rename = "auto-play")]
    AutoSlide,
    #[serde(rename = "fade")]
    Fade,
    #[serde(rename = "coverflow")]
    Coverflow,
    #[serde(rename = "stacked-cards")]
    StackedCards,
    #[serde(rename = "fullscreen")]
    Fullscreen,
}

impl EffectMode {
    pub const ALL: [EffectMode; 5] = [
        EffectMode::AutoSlide,
        EffectMode::Fade,
        EffectMode::Coverflow,
        EffectMode::StackedCards,
        EffectMode::Fullscreen,
    ];

    /// Effect-menu name
    pub fn name(&self) -> &'static str {
        match self {
            EffectMode::AutoSlide => "auto-play",
            EffectMode::Fade => "fade",
            EffectMode::Coverflow => "coverflow",
            EffectMode::StackedCards => "stacked-cards",
            EffectMode::Fullscreen => "fullscreen",
        }
    }

    /// Class applied to the slider container, if any
    pub fn container_class(&self) -> Option<&'static str> {
        match self {
            EffectMode::AutoSlide => None,
            EffectMode::Fade => Some("fade-effect"),
            EffectMode::Coverflow => Some("coverflow"),
            EffectMode::StackedCards => Some("stacked-cards"),
            EffectMode::Fullscreen => Some("fullscreen"),
        }
    }

    /// Does entering this mode start the repeating advance timer?
    pub fn advances_on_entry(&self) -> bool {
        !matches!(self, EffectMode::Coverflow)
    }

    /// Does navigation rotate the card order instead of moving the index?
    pub fn rotates_stack(&self) -> bool {
        matches!(self, EffectMode::StackedCards)
    }

    /// Does showing a slide play the entry animation?
    pub fn animates_entry(&self) -> bool {
        matches!(self, EffectMode::AutoSlide | EffectMode::Fullscreen)
    }

    pub fn cycle(&self) -> EffectMode {
        match self {
            EffectMode::AutoSlide => EffectMode::Fade,
            EffectMode::Fade => EffectMode::Coverflow,
            EffectMode::Coverflow => EffectMode::StackedCards,
            EffectMode::StackedCards => EffectMode::Fullscreen,
            EffectMode::Fullscreen => EffectMode::AutoSlide,
        }
    }

    /// Get status text
    pub fn status_text(&self) -> &'static str {
        match self {
            EffectMode::AutoSlide => "Effect:Slide",
            EffectMode::Fade => "Effect:Fade",
            EffectMode::Coverflow => "Effect:Cover",
            EffectMode::StackedCards => "Effect:Stack",
            EffectMode::Fullscreen => "Effect:Full",
        }
    }
}

impl fmt::Display for EffectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectMode {
    type Err = SliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        EffectMode::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| SliderError::UnknownEffect(s.to_string()))
    }
}
