//! # Store crate: client state for the Itda meeting app
//!
//! Platform-independent core shared by the web frontend and any native host.
//! Nothing here knows about Dioxus or HTTP: stores receive a [`StateHandle`]
//! and a backend implementation, and are driven by the UI.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | none | Domain records: users, meetings, AI search results, request bodies |
//! | [`normalize`] | none | Table-driven mapping of drifting server payloads onto the models |
//! | [`backend`] | none | `AuthBackend`, `MeetingBackend`, `AiBackend` seams and `BackendError` |
//! | [`state`] | none | `StateHandle` capability and the in-process `SharedState` |
//! | [`persist`] | none | Projection persistence (`Persist`, `Persisted`, `restore`) |
//! | [`auth`] | none | Session store |
//! | [`meeting`] | none | Meeting listings, search, detail, create/join |
//! | [`ai_search`] | none | AI matching with latest-search-wins |
//! | [`guards`] | none | Route access decisions |
//! | [`form`] | none | Meeting creation form and validation |
//! | [`display`] | none | Date, cost and distance text |
//! | [`config`] | none | `client.toml` |
//! | `local_storage` | `web` on wasm32 | Browser `localStorage` backend |

pub mod ai_search;
pub mod auth;
pub mod backend;
pub mod config;
pub mod display;
pub mod form;
pub mod guards;
pub mod meeting;
pub mod models;
pub mod normalize;
pub mod persist;
pub mod state;

mod file_store;
mod memory;
pub use file_store::FileStorage;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

#[cfg(test)]
mod testing;

pub use ai_search::{AiSearch, AiSearchState, SearchOutcome, SearchView};
pub use auth::{AuthState, AuthStore};
pub use backend::{AiBackend, AuthBackend, BackendError, MeetingBackend};
pub use config::ClientConfig;
pub use form::MeetingForm;
pub use guards::{Guard, GuardDecision};
pub use meeting::{MeetingState, MeetingStore};
pub use models::{AiSearchResult, MeetingDetail, MeetingSummary, Recommendation, User};
pub use persist::{KeyValueStorage, Persisted};
pub use state::{SharedState, StateHandle};
