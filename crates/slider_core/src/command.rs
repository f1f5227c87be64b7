//! Command system for user actions

use crate::{EffectMode, SliderError};
use serde::{Deserialize, Serialize};

/// Command identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Navigation commands
    pub const SLIDE_NEXT: &'static str = "slide.next";
    pub const SLIDE_PREV: &'static str = "slide.prev";
    pub const SLIDE_FIRST: &'static str = "slide.first";
    pub const SLIDE_LAST: &'static str = "slide.last";
    pub const SLIDE_GOTO: &'static str = "slide.goto";

    // Effect commands
    pub const EFFECT_SET: &'static str = "effect.set";
    pub const EFFECT_CYCLE: &'static str = "effect.cycle";

    // Auto-advance commands
    pub const PLAY_TOGGLE: &'static str = "play.toggle";
    pub const PLAY_FASTER: &'static str = "play.faster";
    pub const PLAY_SLOWER: &'static str = "play.slower";
    pub const PLAY_SPEED: &'static str = "play.speed";

    // View commands
    pub const VIEW_ENTER_FULLSCREEN: &'static str = "view.enter_fullscreen";
    pub const VIEW_EXIT_FULLSCREEN: &'static str = "view.exit_fullscreen";

    // Pointer commands
    pub const POINTER_ENTER: &'static str = "pointer.enter";
    pub const POINTER_LEAVE: &'static str = "pointer.leave";
    pub const STACK_CARD_CLICK: &'static str = "stack.card_click";
}

/// Command with optional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: CommandId,
    pub params: CommandParams,
}

/// Command parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandParams {
    pub int_value: Option<i64>,
    pub string_value: Option<String>,
}

impl Command {
    pub fn new(id: &str) -> Self {
        Self {
            id: CommandId::new(id),
            params: CommandParams::default(),
        }
    }

    pub fn with_int(mut self, value: i64) -> Self {
        self.params.int_value = Some(value);
        self
    }

    pub fn with_string(mut self, value: &str) -> Self {
        self.params.string_value = Some(value.to_string());
        self
    }

    pub fn goto(index: i64) -> Self {
        Self::new(CommandId::SLIDE_GOTO).with_int(index)
    }

    pub fn set_effect(mode: EffectMode) -> Self {
        Self::new(CommandId::EFFECT_SET).with_string(mode.name())
    }

    pub fn set_speed(ms: i64) -> Self {
        Self::new(CommandId::PLAY_SPEED).with_int(ms)
    }

    /// Parse a binding string such as `slide.goto:3` or `effect.set:fade`.
    ///
    /// A numeric argument becomes `int_value`, anything else `string_value`.
    pub fn parse(spec: &str) -> Result<Self, SliderError> {
        let spec = spec.trim();
        let (id, arg) = match spec.split_once(':') {
            Some((id, arg)) => (id.trim(), Some(arg.trim())),
            None => (spec, None),
        };

        if id.is_empty() || !id.contains('.') {
            return Err(SliderError::UnknownCommand(spec.to_string()));
        }

        let cmd = Command::new(id);
        Ok(match arg {
            None | Some("") => cmd,
            Some(arg) => match arg.parse::<i64>() {
                Ok(n) => cmd.with_int(n),
                Err(_) => cmd.with_string(arg),
            },
        })
    }

    /// Effect named by the string parameter
    pub fn effect(&self) -> Result<EffectMode, SliderError> {
        self.params
            .string_value
            .as_deref()
            .ok_or_else(|| SliderError::InvalidParameter(format!("{} needs an effect name", self.id.as_str())))?
            .parse()
    }

    /// Integer parameter, required
    pub fn int(&self) -> Result<i64, SliderError> {
        self.params
            .int_value
            .ok_or_else(|| SliderError::InvalidParameter(format!("{} needs a number", self.id.as_str())))
    }
}
