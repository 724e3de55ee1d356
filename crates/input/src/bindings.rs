use angler_common::{ParseViewModeError, ViewMode};
use std::collections::BTreeMap;

use crate::intent::Intent;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    InvalidViewMode(#[from] ParseViewModeError),
    #[error("unknown intent: {0:?}")]
    UnknownIntent(String),
}

/// Key name to intent table.
///
/// Key names follow the browser `KeyboardEvent.key` spelling (`ArrowUp`,
/// `Enter`, `r`). Lookups are exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: BTreeMap<String, Intent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert("ArrowUp".to_string(), Intent::MoveForward);
        map.insert("ArrowDown".to_string(), Intent::MoveBackward);
        map.insert("ArrowLeft".to_string(), Intent::RotateLeft);
        map.insert("ArrowRight".to_string(), Intent::RotateRight);
        map.insert("Enter".to_string(), Intent::StartSession);
        map.insert("1".to_string(), Intent::SwitchView(ViewMode::Chase));
        map.insert("2".to_string(), Intent::SwitchView(ViewMode::TopDown));
        map.insert("3".to_string(), Intent::SwitchView(ViewMode::Free));
        map.insert("r".to_string(), Intent::ToggleRadiusDisplay);
        Self { map }
    }
}

impl KeyBindings {
    /// A table with no bindings.
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: impl Into<String>, intent: Intent) {
        self.map.insert(key.into(), intent);
    }

    /// Bind `key` to an intent spec such as `switch_view:top`.
    pub fn bind_spec(&mut self, key: impl Into<String>, spec: &str) -> Result<(), InputError> {
        let intent = spec.parse::<Intent>()?;
        self.bind(key, intent);
        Ok(())
    }

    /// Apply `key -> spec` overrides on top of the current table. Fails on
    /// the first bad spec without applying any of the overrides.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Result<Self, InputError> {
        let parsed = overrides
            .into_iter()
            .map(|(key, spec)| spec.parse::<Intent>().map(|intent| (key.clone(), intent)))
            .collect::<Result<Vec<_>, _>>()?;
        for (key, intent) in parsed {
            self.bind(key, intent);
        }
        Ok(self)
    }

    pub fn unbind(&mut self, key: &str) -> Option<Intent> {
        self.map.remove(key)
    }

    /// Intent bound to a pressed key. Unbound keys are ignored.
    pub fn resolve(&self, key: &str) -> Option<Intent> {
        let intent = self.map.get(key).copied();
        if intent.is_none() {
            tracing::trace!(key, "unbound key");
        }
        intent
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Intent)> {
        self.map.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
