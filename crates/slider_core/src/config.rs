//! Slider configuration

use crate::slide::{default_slides, SlideItem};
use crate::{CommandId, EffectMode, SliderError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main slider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub log: LogConfig,
    pub slider: SliderSettings,
    pub keybindings: HashMap<String, Vec<String>>,
    pub slides: Vec<SlideItem>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            slider: SliderSettings::default(),
            keybindings: default_keybindings(),
            slides: default_slides(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    pub retention_days: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            retention_days: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderSettings {
    pub initial_mode: EffectMode,
    pub auto_advance_ms: u64,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    /// Step for faster/slower commands
    pub interval_step_ms: u64,
    pub pause_on_hover: bool,
    pub swipe_threshold_px: f32,
    pub entry_animation_ms: u64,
    pub card_swap_ms: u64,
    pub overlay_fade_ms: u64,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            initial_mode: EffectMode::AutoSlide,
            auto_advance_ms: 3000,
            min_interval_ms: 500,
            max_interval_ms: 60_000,
            interval_step_ms: 1000,
            pause_on_hover: true,
            swipe_threshold_px: 50.0,
            entry_animation_ms: 600,
            card_swap_ms: 800,
            overlay_fade_ms: 300,
        }
    }
}

impl SliderSettings {
    /// Clamp a requested interval into the configured bounds
    pub fn clamp_interval(&self, ms: i64) -> Duration {
        let ms = ms.max(0) as u64;
        // Inverted bounds collapse onto the minimum
        let max = self.max_interval_ms.max(self.min_interval_ms);
        Duration::from_millis(ms.max(self.min_interval_ms).min(max))
    }

    pub fn auto_advance(&self) -> Duration {
        self.clamp_interval(self.auto_advance_ms as i64)
    }

    pub fn entry_animation(&self) -> Duration {
        Duration::from_millis(self.entry_animation_ms)
    }

    pub fn card_swap(&self) -> Duration {
        Duration::from_millis(self.card_swap_ms)
    }

    pub fn overlay_fade(&self) -> Duration {
        Duration::from_millis(self.overlay_fade_ms)
    }

    pub fn interval_step(&self) -> Duration {
        Duration::from_millis(self.interval_step_ms)
    }
}

impl SliderConfig {
    /// Load configuration from the default location
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a file
    pub fn load_from(path: &Path) -> Result<Self, SliderError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SliderError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("dev", "EffectSlider", "EffectSlider")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }

    pub fn validate(&self) -> Result<(), SliderError> {
        let s = &self.slider;
        if s.min_interval_ms == 0 {
            return Err(SliderError::Config("min_interval_ms must be positive".into()));
        }
        if s.min_interval_ms > s.max_interval_ms {
            return Err(SliderError::Config(format!(
                "min_interval_ms ({}) exceeds max_interval_ms ({})",
                s.min_interval_ms, s.max_interval_ms
            )));
        }
        if !(s.swipe_threshold_px > 0.0) {
            return Err(SliderError::Config("swipe_threshold_px must be positive".into()));
        }
        Ok(())
    }
}

fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();

    // Navigation
    kb.insert(CommandId::SLIDE_PREV.into(), vec!["Left".into()]);
    kb.insert(CommandId::SLIDE_NEXT.into(), vec!["Right".into()]);
    kb.insert(CommandId::SLIDE_FIRST.into(), vec!["Home".into()]);
    kb.insert(CommandId::SLIDE_LAST.into(), vec!["End".into()]);

    // Auto-advance
    kb.insert(CommandId::PLAY_TOGGLE.into(), vec!["Space".into()]);
    kb.insert(CommandId::PLAY_FASTER.into(), vec!["Plus".into(), "=".into()]);
    kb.insert(CommandId::PLAY_SLOWER.into(), vec!["Minus".into()]);

    // Effects
    for (i, mode) in EffectMode::ALL.iter().enumerate() {
        kb.insert(
            format!("{}:{}", CommandId::EFFECT_SET, mode.name()),
            vec![(i + 1).to_string()],
        );
    }
    kb.insert(CommandId::EFFECT_CYCLE.into(), vec!["e".into()]);

    // View
    kb.insert(CommandId::VIEW_ENTER_FULLSCREEN.into(), vec!["f".into(), "F11".into()]);
    kb.insert(CommandId::VIEW_EXIT_FULLSCREEN.into(), vec!["Escape".into()]);

    kb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SliderConfig::default();
        assert_eq!(config.slider.auto_advance(), Duration::from_secs(3));
        assert_eq!(config.slider.initial_mode, EffectMode::AutoSlide);
        assert_eq!(config.slides.len(), 6);
        assert_eq!(config.keybindings["effect.set:fade"], vec!["2".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SliderConfig::from_toml_str(
            r#"
            [slider]
            initial_mode = "coverflow"
            auto_advance_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(config.slider.initial_mode, EffectMode::Coverflow);
        assert_eq!(config.slider.auto_advance(), Duration::from_millis(1500));
        assert_eq!(config.slider.swipe_threshold_px, 50.0);
        assert_eq!(config.slides.len(), 6);
    }

    #[test]
    fn test_custom_slides() {
        let config = SliderConfig::from_toml_str(
            r#"
            [[slides]]
            source = "a.jpg"
            title = "A"
            description = "first"
            "#,
        )
        .unwrap();
        assert_eq!(config.slides, vec![SlideItem::new("a.jpg", "A", "first")]);
    }

    #[test]
    fn test_invalid_config() {
        let err = SliderConfig::from_toml_str("[slider]\nmin_interval_ms = 9000\nmax_interval_ms = 100\n");
        assert!(matches!(err, Err(SliderError::Config(_))));

        let err = SliderConfig::from_toml_str("[slider]\ninitial_mode = \"timed-cards\"\n");
        assert!(matches!(err, Err(SliderError::TomlDe(_))));
    }

    #[test]
    fn test_clamp_interval() {
        let s = SliderSettings::default();
        assert_eq!(s.clamp_interval(0), Duration::from_millis(500));
        assert_eq!(s.clamp_interval(-20), Duration::from_millis(500));
        assert_eq!(s.clamp_interval(2500), Duration::from_millis(2500));
        assert_eq!(s.clamp_interval(1_000_000), Duration::from_secs(60));
    }

    #[test]
    fn test_clamp_interval_inverted_bounds() {
        let s = SliderSettings {
            min_interval_ms: 5000,
            max_interval_ms: 100,
            ..SliderSettings::default()
        };
        assert_eq!(s.clamp_interval(0), Duration::from_millis(5000));
        assert_eq!(s.clamp_interval(9000), Duration::from_millis(5000));
        assert_eq!(s.auto_advance(), Duration::from_millis(5000));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SliderConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back = SliderConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.slides, config.slides);
        assert_eq!(back.keybindings, config.keybindings);
    }
}
