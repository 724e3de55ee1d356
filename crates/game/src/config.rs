use angler_input::KeyBindings;
use angler_kernel::GameConfig;
use angler_render::CameraConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::GameError;

/// Everything needed to build a [`Game`](crate::Game), loadable from JSON.
///
/// Omitted sections fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnglerConfig {
    pub game: GameConfig,
    pub camera: CameraConfig,
    /// Key name to intent spec overrides, e.g. `"v": "switch_view:top"`.
    pub bindings: BTreeMap<String, String>,
}

impl AnglerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.key_bindings()?;
        config.game.validate().map_err(angler_kernel::SetupError::from)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Default bindings with this config's overrides applied.
    pub fn key_bindings(&self) -> Result<KeyBindings, GameError> {
        Ok(KeyBindings::default().with_overrides(&self.bindings)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angler_common::ViewMode;
    use angler_input::Intent;

    #[test]
    fn empty_json_is_default() {
        let config = AnglerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnglerConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AnglerConfig::from_json_str(
            r#"{ "game": { "layout": { "fish_count": 4 } }, "camera": { "chase_smoothing": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.game.layout.fish_count, 4);
        assert_eq!(config.game.layout.islands, 8);
        assert_eq!(config.camera.chase_smoothing, 0.5);
        assert_eq!(config.camera.top_smoothing, 0.025);
    }

    #[test]
    fn binding_overrides_apply() {
        let config =
            AnglerConfig::from_json_str(r#"{ "bindings": { "t": "switch_view:top" } }"#).unwrap();
        let bindings = config.key_bindings().unwrap();
        assert_eq!(bindings.resolve("t"), Some(Intent::SwitchView(ViewMode::TopDown)));
        assert_eq!(bindings.resolve("ArrowUp"), Some(Intent::MoveForward));
    }

    #[test]
    fn invalid_view_mode_fails_at_load() {
        let err = AnglerConfig::from_json_str(r#"{ "bindings": { "t": "switch_view:orbit" } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::Input(angler_input::InputError::InvalidViewMode(_))
        ));
    }

    #[test]
    fn invalid_game_values_fail_at_load() {
        let err = AnglerConfig::from_json_str(r#"{ "game": { "boat": { "max_speed": 0 } } }"#)
            .unwrap_err();
        assert!(matches!(err, GameError::Setup(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            AnglerConfig::from_json_str("{ nope"),
            Err(GameError::Json(_))
        ));
    }
}
