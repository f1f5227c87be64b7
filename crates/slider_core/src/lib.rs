//! Effect Slider Core Domain Logic
//!
//! This crate contains:
//! - Slide items and slider state
//! - Effect modes
//! - Navigation arithmetic and the stacked-card order
//! - Scheduled tasks with cancel handles
//! - Command system
//! - Configuration
//! - Error types

pub mod card_stack;
pub mod command;
pub mod config;
pub mod error;
pub mod mode;
pub mod navigation;
pub mod scheduler;
pub mod slide;
pub mod state;

pub use card_stack::CardStack;
pub use command::{Command, CommandId, CommandParams};
pub use config::{LogConfig, SliderConfig, SliderSettings};
pub use error::SliderError;
pub use mode::EffectMode;
pub use navigation::{coverflow_tags, next_index, prev_index, wrap_index, SlideTag};
pub use scheduler::{FiredTimer, Scheduler, TimerHandle, TimerQueue, TimerTask};
pub use slide::{default_slides, MediaStatus, SlideItem, SourceRef};
pub use state::{CurrentSlide, SliderState};
