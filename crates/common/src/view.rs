use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Camera mode selected by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ViewMode {
    /// Follows behind the boat.
    #[default]
    Chase,
    /// Looks down on the boat from above.
    TopDown,
    /// Detached from the boat.
    Free,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid view mode: {0:?} (expected boat, top or free)")]
pub struct ParseViewModeError(pub String);

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Chase => "boat",
            ViewMode::TopDown => "top",
            ViewMode::Free => "free",
        }
    }
}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boat" | "chase" => Ok(ViewMode::Chase),
            "top" | "topdown" | "top_down" => Ok(ViewMode::TopDown),
            "free" => Ok(ViewMode::Free),
            _ => Err(ParseViewModeError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ViewMode {
    type Error = ParseViewModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ViewMode> for String {
    fn from(mode: ViewMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("boat".parse::<ViewMode>(), Ok(ViewMode::Chase));
        assert_eq!("Chase".parse::<ViewMode>(), Ok(ViewMode::Chase));
        assert_eq!("top".parse::<ViewMode>(), Ok(ViewMode::TopDown));
        assert_eq!(" free ".parse::<ViewMode>(), Ok(ViewMode::Free));
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = "orbit".parse::<ViewMode>().unwrap_err();
        assert_eq!(err, ParseViewModeError("orbit".into()));
        assert!(err.to_string().contains("orbit"));
    }

    #[test]
    fn display_round_trips() {
        for mode in [ViewMode::Chase, ViewMode::TopDown, ViewMode::Free] {
            assert_eq!(mode.to_string().parse::<ViewMode>(), Ok(mode));
        }
    }
}
