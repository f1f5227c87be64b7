//! UI Components

pub mod effect_controller;

pub use effect_controller::SlideEffectController;
