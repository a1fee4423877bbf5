//! # Durable projection of store state
//!
//! Each store publishes a restricted projection of its fields under one
//! storage key. The projection is written after every update and read once
//! when the store is created; loading flags, errors and fetched lists are never
//! part of it, so a reload restores the projection and resets everything else.
//!
//! Stored values keep the `{"state": {...}, "version": 0}` envelope that the
//! previous web client wrote, so existing browser data still restores.
//!
//! ## Pieces
//!
//! | Item | Role |
//! |------|------|
//! | [`KeyValueStorage`] | String key/value backend (`localStorage`, files, memory). |
//! | [`Persist`] | Declares a state's storage key and projection. |
//! | [`Persisted`] | A [`StateHandle`] decorator that writes the projection after every update. |
//! | [`restore`] | Rebuilds a state from its stored projection, or its default. |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::state::StateHandle;

/// Synchronous string storage, shaped like the browser's `localStorage`.
///
/// Implementations swallow their own I/O errors: a failed write leaves the
/// previous value, a failed read is `None`.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// A state with a persisted projection.
pub trait Persist: Default {
    const STORAGE_KEY: &'static str;
    const VERSION: u32 = 0;

    type Projection: Serialize + DeserializeOwned;

    fn project(&self) -> Self::Projection;

    /// Overlay a restored projection onto an initial state.
    fn apply(&mut self, projection: Self::Projection);
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<P> {
    state: P,
    #[serde(default)]
    version: u32,
}

/// Build the initial state for `S`, restoring its projection if one is stored.
pub fn restore<S: Persist>(storage: &impl KeyValueStorage) -> S {
    let mut state = S::default();
    let Some(raw) = storage.get_item(S::STORAGE_KEY) else {
        return state;
    };
    match serde_json::from_str::<Envelope<S::Projection>>(&raw) {
        Ok(envelope) if envelope.version == S::VERSION => state.apply(envelope.state),
        Ok(envelope) => {
            tracing::warn!(
                key = S::STORAGE_KEY,
                found = envelope.version,
                expected = S::VERSION,
                "Discarding persisted state from another version"
            );
        }
        Err(e) => {
            tracing::warn!(key = S::STORAGE_KEY, "Discarding unreadable persisted state: {}", e);
        }
    }
    state
}

/// Write the projection of `state` to `storage`.
pub fn save<S: Persist>(storage: &impl KeyValueStorage, state: &S) {
    write_projection::<S>(storage, state.project());
}

fn write_projection<S: Persist>(storage: &impl KeyValueStorage, projection: S::Projection) {
    let envelope = Envelope {
        state: projection,
        version: S::VERSION,
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => storage.set_item(S::STORAGE_KEY, &json),
        Err(e) => tracing::error!(key = S::STORAGE_KEY, "Failed to serialize state: {}", e),
    }
}

/// A state handle that persists its projection on every update.
#[derive(Clone, Debug)]
pub struct Persisted<H, K> {
    inner: H,
    storage: K,
}

impl<H, K> Persisted<H, K> {
    pub fn new(inner: H, storage: K) -> Self {
        Self { inner, storage }
    }
}

impl<S, H, K> StateHandle<S> for Persisted<H, K>
where
    S: Persist,
    H: StateHandle<S>,
    K: KeyValueStorage,
{
    fn snapshot(&self) -> S {
        self.inner.snapshot()
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        let mut projection = None;
        self.inner.update(|state| {
            f(state);
            projection = Some(state.project());
        });
        if let Some(projection) = projection {
            write_projection::<S>(&self.storage, projection);
        }
    }
}
