//! Shared UI for the it-da client.
//!
//! Components here know nothing about the router: anything that navigates
//! reports an app path (`/meetings/3`) or an id through an `EventHandler`, and
//! the platform package turns it into a route.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod state;
pub use state::SignalHandle;

mod platform;
pub use platform::{alert, load_config, platform_storage, scroll_to_top, PlatformStorage};

mod provider;
pub use provider::{
    use_ai_search_state, use_auth, use_meeting_state, use_stores, AiSearchActions, Auth,
    Meetings, PersistedHandle, StoreProvider, Stores,
};

mod header;
pub use header::AppHeader;

mod meeting_card;
pub use meeting_card::{AiRecommendCard, MeetingCard, MeetingGrid};

mod home_sections;
pub use home_sections::{category_icon, CategoryGrid, RecentItems, SearchSection};

mod recommendation;
pub use recommendation::{LowConfidenceNotice, MiniCard, RecommendationCard, RelaxNotice};

mod overlay;
pub use overlay::{ConfirmDialog, LoadingOverlay, ModalOverlay};
