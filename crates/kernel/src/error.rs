/// A configuration value that cannot produce a playable session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid config field `{field}`: {reason}")]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors from building or replenishing a session layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(
        "could not place {what}: placed {placed} of {requested} after {attempts} attempts; \
         lower the count or spacing, or enlarge the map"
    )]
    PlacementExhausted {
        what: &'static str,
        placed: usize,
        requested: usize,
        attempts: u32,
    },
}
