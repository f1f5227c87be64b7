//! Effect Slider UI Layer
//!
//! Provides:
//! - The slide effect controller
//! - Render instructions and the renderer seam
//! - Input handling

pub mod components;
pub mod input;
pub mod renderer;

pub use components::SlideEffectController;
pub use input::{InputHandler, Modifiers, PointerEvent, SwipeTracker};
pub use renderer::{RecordingRenderer, RenderOp, Renderer, Surface};
