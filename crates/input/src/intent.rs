use angler_common::ViewMode;
use std::str::FromStr;

use crate::bindings::InputError;

/// A discrete request from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveForward,
    MoveBackward,
    RotateLeft,
    RotateRight,
    StartSession,
    SwitchView(ViewMode),
    ToggleRadiusDisplay,
}

impl FromStr for Intent {
    type Err = InputError;

    /// Parse an intent spec such as `move_forward` or `switch_view:top`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim().to_ascii_lowercase();
        if let Some(mode) = spec.strip_prefix("switch_view:") {
            let mode = mode.parse::<ViewMode>()?;
            return Ok(Intent::SwitchView(mode));
        }
        match spec.as_str() {
            "move_forward" => Ok(Intent::MoveForward),
            "move_backward" => Ok(Intent::MoveBackward),
            "rotate_left" => Ok(Intent::RotateLeft),
            "rotate_right" => Ok(Intent::RotateRight),
            "start_session" | "start" => Ok(Intent::StartSession),
            "toggle_radius_display" | "toggle_radius" => Ok(Intent::ToggleRadiusDisplay),
            _ => Err(InputError::UnknownIntent(s.to_string())),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::MoveForward => f.write_str("move_forward"),
            Intent::MoveBackward => f.write_str("move_backward"),
            Intent::RotateLeft => f.write_str("rotate_left"),
            Intent::RotateRight => f.write_str("rotate_right"),
            Intent::StartSession => f.write_str("start_session"),
            Intent::SwitchView(mode) => write!(f, "switch_view:{mode}"),
            Intent::ToggleRadiusDisplay => f.write_str("toggle_radius_display"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_intents() {
        assert_eq!("move_forward".parse::<Intent>().unwrap(), Intent::MoveForward);
        assert_eq!("START".parse::<Intent>().unwrap(), Intent::StartSession);
        assert_eq!(
            "toggle_radius".parse::<Intent>().unwrap(),
            Intent::ToggleRadiusDisplay
        );
    }

    #[test]
    fn parses_view_switch() {
        assert_eq!(
            "switch_view:top".parse::<Intent>().unwrap(),
            Intent::SwitchView(ViewMode::TopDown)
        );
        assert_eq!(
            "switch_view:boat".parse::<Intent>().unwrap(),
            Intent::SwitchView(ViewMode::Chase)
        );
    }

    #[test]
    fn unknown_view_mode_is_reported() {
        let err = "switch_view:orbit".parse::<Intent>().unwrap_err();
        assert!(matches!(err, InputError::InvalidViewMode(_)));
    }

    #[test]
    fn unknown_intent_is_reported() {
        let err = "jump".parse::<Intent>().unwrap_err();
        assert_eq!(err, InputError::UnknownIntent("jump".into()));
    }

    #[test]
    fn display_parses_back() {
        for intent in [
            Intent::MoveBackward,
            Intent::RotateRight,
            Intent::SwitchView(ViewMode::Free),
            Intent::ToggleRadiusDisplay,
        ] {
            assert_eq!(intent.to_string().parse::<Intent>().unwrap(), intent);
        }
    }
}
