//! Input handling and keybinding resolution

use slider_core::{Command, CommandId, EffectMode};
use std::collections::HashMap;

/// Modifier keys held during a key press
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// Pointer input on slider elements
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the image area
    Enter,
    /// Pointer left the image area
    Leave,
    /// Click on a slide
    SlideClick,
    IndicatorClick(usize),
    PrevButton,
    NextButton,
    PlayPauseButton,
    EffectButton(EffectMode),
    SpeedInput(i64),
    CloseFullscreen,
}

/// Input handler that maps keys/pointer events to commands
pub struct InputHandler {
    /// Key bindings: key string -> command spec
    bindings: HashMap<String, String>,

    /// Current modifier state
    modifiers: Modifiers,
}

impl InputHandler {
    /// Create a new input handler with bindings
    pub fn new(bindings: &HashMap<String, Vec<String>>) -> Self {
        // Invert the bindings map: command -> keys becomes key -> command
        let mut key_to_command = HashMap::new();

        for (command, keys) in bindings {
            for key in keys {
                key_to_command.insert(key.to_lowercase(), command.clone());
            }
        }

        Self {
            bindings: key_to_command,
            modifiers: Modifiers::default(),
        }
    }

    /// Update modifier state
    pub fn update_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Handle a key press and return the corresponding command
    pub fn handle_key(&self, key: &str) -> Option<Command> {
        let key_str = normalize_key(key);
        if key_str.is_empty() {
            return None;
        }
        let full_key = self.build_key_string(key_str);

        tracing::debug!("Key pressed: {}", full_key);

        let spec = self.bindings.get(&full_key.to_lowercase())?;
        match Command::parse(spec) {
            Ok(cmd) => Some(cmd),
            Err(e) => {
                tracing::warn!("Ignoring binding for {}: {}", full_key, e);
                None
            }
        }
    }

    /// Build a key string with modifiers
    fn build_key_string(&self, key: &str) -> String {
        let mut parts = Vec::new();

        if self.modifiers.ctrl {
            parts.push("Ctrl");
        }
        if self.modifiers.alt {
            parts.push("Alt");
        }
        if self.modifiers.shift {
            parts.push("Shift");
        }

        parts.push(key);
        parts.join("+")
    }

    /// Handle pointer input
    pub fn handle_pointer(&self, event: PointerEvent) -> Option<Command> {
        let cmd = match event {
            PointerEvent::Enter => Command::new(CommandId::POINTER_ENTER),
            PointerEvent::Leave => Command::new(CommandId::POINTER_LEAVE),
            PointerEvent::SlideClick => Command::new(CommandId::STACK_CARD_CLICK),
            PointerEvent::IndicatorClick(i) => Command::goto(i as i64),
            PointerEvent::PrevButton => Command::new(CommandId::SLIDE_PREV),
            PointerEvent::NextButton => Command::new(CommandId::SLIDE_NEXT),
            PointerEvent::PlayPauseButton => Command::new(CommandId::PLAY_TOGGLE),
            PointerEvent::EffectButton(mode) => Command::set_effect(mode),
            PointerEvent::SpeedInput(ms) => Command::set_speed(ms),
            PointerEvent::CloseFullscreen => Command::new(CommandId::VIEW_EXIT_FULLSCREEN),
        };
        Some(cmd)
    }
}

/// Map browser-style and short key names onto binding names
fn normalize_key(key: &str) -> &str {
    match key {
        "ArrowLeft" => "Left",
        "ArrowRight" => "Right",
        "ArrowUp" => "Up",
        "ArrowDown" => "Down",
        " " | "Spacebar" => "Space",
        "Esc" => "Escape",
        "Enter" => "Return",
        "+" => "Plus",
        "-" => "Minus",
        other => other.trim(),
    }
}

/// Classifies a horizontal touch gesture as next/previous
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start_x: Option<f32>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish a gesture. A leftward swipe past the threshold means next,
    /// rightward means previous.
    pub fn touch_end(&mut self, x: f32) -> Option<Command> {
        let start = self.start_x.take()?;
        let diff = start - x;

        if diff.abs() <= self.threshold {
            return None;
        }
        if diff > 0.0 {
            Some(Command::new(CommandId::SLIDE_NEXT))
        } else {
            Some(Command::new(CommandId::SLIDE_PREV))
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slider_core::SliderConfig;

    fn handler() -> InputHandler {
        InputHandler::new(&SliderConfig::default().keybindings)
    }

    #[test]
    fn test_arrow_keys() {
        let input = handler();
        assert_eq!(input.handle_key("ArrowRight"), Some(Command::new(CommandId::SLIDE_NEXT)));
        assert_eq!(input.handle_key("Left"), Some(Command::new(CommandId::SLIDE_PREV)));
        assert_eq!(input.handle_key(" "), Some(Command::new(CommandId::PLAY_TOGGLE)));
        assert_eq!(input.handle_key("Esc"), Some(Command::new(CommandId::VIEW_EXIT_FULLSCREEN)));
    }

    #[test]
    fn test_effect_keys() {
        let input = handler();
        assert_eq!(input.handle_key("4"), Some(Command::set_effect(EffectMode::StackedCards)));
        assert_eq!(input.handle_key("F"), Some(Command::new(CommandId::VIEW_ENTER_FULLSCREEN)));
    }

    #[test]
    fn test_modifiers_change_binding() {
        let mut input = handler();
        input.update_modifiers(Modifiers { ctrl: true, ..Default::default() });
        assert_eq!(input.handle_key("Right"), None);
        input.update_modifiers(Modifiers::default());
        assert!(input.handle_key("Right").is_some());
    }

    #[test]
    fn test_unbound_and_broken_bindings() {
        let mut bindings = HashMap::new();
        bindings.insert("nonsense".to_string(), vec!["x".to_string()]);
        let input = InputHandler::new(&bindings);
        assert_eq!(input.handle_key("x"), None);
        assert_eq!(input.handle_key("q"), None);
        assert_eq!(input.handle_key(""), None);
    }

    #[test]
    fn test_pointer_events() {
        let input = handler();
        assert_eq!(input.handle_pointer(PointerEvent::IndicatorClick(3)), Some(Command::goto(3)));
        assert_eq!(
            input.handle_pointer(PointerEvent::Enter),
            Some(Command::new(CommandId::POINTER_ENTER))
        );
    }

    #[test]
    fn test_swipe() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(300.0);
        assert_eq!(swipe.touch_end(200.0), Some(Command::new(CommandId::SLIDE_NEXT)));

        swipe.touch_start(100.0);
        assert_eq!(swipe.touch_end(220.0), Some(Command::new(CommandId::SLIDE_PREV)));

        swipe.touch_start(100.0);
        assert_eq!(swipe.touch_end(150.0), None);

        // End without start
        assert_eq!(swipe.touch_end(0.0), None);

        swipe.touch_start(0.0);
        swipe.cancel();
        assert_eq!(swipe.touch_end(500.0), None);
    }
}
