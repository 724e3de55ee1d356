//! Asset readiness registry.
//!
//! Meshes and textures load asynchronously outside the core. The core only
//! tracks whether each named asset is drawable yet, and skips draws (never
//! simulation) for assets that are not.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Mesh names the game draws.
pub mod names {
    pub const RAFT: &str = "assets/raft.obj";
    pub const ISLAND: &str = "assets/island.obj";
    pub const SHIPWRECK: &str = "assets/shipwreck.obj";
    pub const FISH: &str = "assets/fish.obj";

    /// Meshes that arrive asynchronously and must be gated.
    pub const STREAMED: [&str; 4] = [RAFT, ISLAND, SHIPWRECK, FISH];
}

/// Asset id derived from the asset name, stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

impl AssetId {
    pub fn of(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        AssetId(u64::from_le_bytes(bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Errors from asset lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("asset not registered: {0}")]
    NotFound(String),
    #[error("asset not ready yet: {0}")]
    NotReady(String),
    #[error("asset failed to load: {name}: {reason}")]
    Failed { name: String, reason: String },
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    state: LoadState,
}

/// Tracks load state per asset.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    assets: BTreeMap<AssetId, Entry>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every streamed mesh registered and already ready.
    pub fn all_ready() -> Self {
        let mut store = Self::new();
        for name in names::STREAMED {
            let id = store.register(name);
            store.mark_ready(id);
        }
        store
    }

    /// Every streamed mesh registered and still loading.
    pub fn all_loading() -> Self {
        let mut store = Self::new();
        for name in names::STREAMED {
            store.register(name);
        }
        store
    }

    /// Register an asset as loading. Re-registering keeps the current state.
    pub fn register(&mut self, name: &str) -> AssetId {
        let id = AssetId::of(name);
        self.assets.entry(id).or_insert_with(|| Entry {
            name: name.to_string(),
            state: LoadState::Loading,
        });
        id
    }

    pub fn mark_ready(&mut self, id: AssetId) -> bool {
        self.set_state(id, LoadState::Ready)
    }

    pub fn mark_failed(&mut self, id: AssetId, reason: impl Into<String>) -> bool {
        self.set_state(id, LoadState::Failed(reason.into()))
    }

    fn set_state(&mut self, id: AssetId, state: LoadState) -> bool {
        match self.assets.get_mut(&id) {
            Some(entry) => {
                tracing::debug!(name = %entry.name, ?state, "asset state changed");
                entry.state = state;
                true
            }
            None => false,
        }
    }

    /// Mark every loading asset ready.
    pub fn finish_loading(&mut self) {
        for entry in self.assets.values_mut() {
            if entry.state == LoadState::Loading {
                entry.state = LoadState::Ready;
            }
        }
    }

    pub fn state(&self, name: &str) -> Option<&LoadState> {
        self.assets.get(&AssetId::of(name)).map(|e| &e.state)
    }

    /// Id of a drawable asset, or why it cannot be drawn.
    pub fn require(&self, name: &str) -> Result<AssetId, AssetError> {
        let id = AssetId::of(name);
        match self.assets.get(&id).map(|e| &e.state) {
            Some(LoadState::Ready) => Ok(id),
            Some(LoadState::Loading) => Err(AssetError::NotReady(name.to_string())),
            Some(LoadState::Failed(reason)) => Err(AssetError::Failed {
                name: name.to_string(),
                reason: reason.clone(),
            }),
            None => Err(AssetError::NotFound(name.to_string())),
        }
    }

    pub fn is_ready(&self, name: &str) -> bool {
        self.require(name).is_ok()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.assets
            .values()
            .filter(|e| e.state == LoadState::Ready)
            .count()
    }
}

pub fn crate_info() -> &'static str {
    "angler-assets v0.1.0"
}
