//! Render instructions and the renderer seam
//!
//! The controller decides *what* is shown; a [`Renderer`] decides *how*.
//! Every instruction names the element it touches so a renderer can report
//! a missing element instead of failing the whole operation.

use slider_core::{EffectMode, SlideItem, SlideTag, SliderError};
use std::collections::HashSet;
use std::time::Duration;

/// Which slide strip an instruction targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The slider laid out in the page
    Main,
    /// The copy shown above the fullscreen overlay
    Fullscreen,
}

/// A single layout/visibility instruction
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    /// Recreate one slide element per item, in item order
    BuildSlides(Vec<SlideItem>),
    AddContainerClass(&'static str),
    RemoveContainerClass(&'static str),
    /// Natural item order; no transform, opacity override or slide tags
    ResetSlideStyles,
    /// Slide the strip so `index` is in view
    TranslateTo { surface: Surface, index: usize },
    /// Fade: `index` fully opaque, every other slide transparent
    FocusSlide { index: usize },
    /// Replace all slide tags with these
    TagSlides(Vec<(usize, SlideTag)>),
    /// Draw slides in this order, last on top
    SetStackOrder(Vec<usize>),
    SetCardSwapping { slide: usize, swapping: bool },
    SetEntryAnimation { slide: usize, active: bool },
    UpdateIndicators { active: usize, total: usize },
    CreateOverlay,
    FadeOutOverlay,
    RemoveOverlay,
    CreateFullscreenSurface,
    RemoveFullscreenSurface,
    SetOriginalHidden(bool),
    SetPlayState { playing: bool },
    SetSpeedLabel { interval: Duration },
    HighlightEffect(EffectMode),
    ShowPlaceholder { slide: usize },
    /// Empty the slide strip and indicators
    Clear,
}

impl RenderOp {
    /// Name of the element the instruction needs
    pub fn target(&self) -> &'static str {
        match self {
            RenderOp::BuildSlides(_)
            | RenderOp::ResetSlideStyles
            | RenderOp::FocusSlide { .. }
            | RenderOp::TagSlides(_)
            | RenderOp::SetStackOrder(_)
            | RenderOp::SetCardSwapping { .. }
            | RenderOp::SetEntryAnimation { .. }
            | RenderOp::ShowPlaceholder { .. }
            | RenderOp::Clear => "slides",
            RenderOp::TranslateTo { surface: Surface::Main, .. } => "slides",
            RenderOp::TranslateTo { surface: Surface::Fullscreen, .. }
            | RenderOp::CreateFullscreenSurface
            | RenderOp::RemoveFullscreenSurface => "fullscreen",
            RenderOp::AddContainerClass(_)
            | RenderOp::RemoveContainerClass(_)
            | RenderOp::SetOriginalHidden(_) => "container",
            RenderOp::UpdateIndicators { .. } => "indicators",
            RenderOp::CreateOverlay | RenderOp::FadeOutOverlay | RenderOp::RemoveOverlay => "overlay",
            RenderOp::SetPlayState { .. } | RenderOp::SetSpeedLabel { .. } => "controls",
            RenderOp::HighlightEffect(_) => "effects_menu",
        }
    }
}

/// Receives render instructions from the controller
pub trait Renderer {
    /// Apply one instruction. A missing element is reported as
    /// [`SliderError::ElementMissing`]; the controller logs it and carries on.
    fn apply(&mut self, op: &RenderOp) -> Result<(), SliderError>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn apply(&mut self, op: &RenderOp) -> Result<(), SliderError> {
        (**self).apply(op)
    }
}

/// Renderer that records every instruction it accepts.
///
/// Elements can be marked missing to exercise the degraded paths.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    ops: Vec<RenderOp>,
    missing: HashSet<&'static str>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose `target` element does not exist
    pub fn with_missing(mut self, target: &'static str) -> Self {
        self.missing.insert(target);
        self
    }

    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn contains(&self, op: &RenderOp) -> bool {
        self.ops.contains(op)
    }

    /// Most recent stack order sent, if any
    pub fn last_stack_order(&self) -> Option<&[usize]> {
        self.ops.iter().rev().find_map(|op| match op {
            RenderOp::SetStackOrder(order) => Some(order.as_slice()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn apply(&mut self, op: &RenderOp) -> Result<(), SliderError> {
        let target = op.target();
        if self.missing.contains(target) {
            return Err(SliderError::ElementMissing(target.to_string()));
        }
        self.ops.push(op.clone());
        Ok(())
    }
}
