//! Store context and hooks for the UI.
//!
//! [`StoreProvider`] restores the persisted projections, wires the stores to
//! signal-backed handles and the HTTP backend, and checks the session once on
//! mount. Views reach them through [`use_stores`], [`use_auth`],
//! [`use_meeting_state`] and [`use_ai_search_state`].

use api::HttpBackend;
use dioxus::prelude::*;
use store::ai_search::AiSearchState;
use store::persist::restore;
use store::{AiSearch, AuthState, AuthStore, ClientConfig, MeetingState, MeetingStore, Persisted};

use crate::platform::{platform_storage, PlatformStorage};
use crate::state::SignalHandle;

/// A signal handle that also writes its projection to platform storage.
pub type PersistedHandle<S> = Persisted<SignalHandle<S>, PlatformStorage>;

pub type Auth = AuthStore<PersistedHandle<AuthState>, HttpBackend>;
pub type Meetings = MeetingStore<PersistedHandle<MeetingState>, HttpBackend>;
pub type AiSearchActions = AiSearch<SignalHandle<AiSearchState>, HttpBackend>;

/// Everything a view needs to act on the stores.
#[derive(Clone)]
pub struct Stores {
    pub auth: Auth,
    pub meetings: Meetings,
    pub backend: HttpBackend,
    pub config: ClientConfig,
}

impl Stores {
    /// AI search actions bound to a page-local state signal.
    pub fn ai_search(&self, state: Signal<AiSearchState>) -> AiSearchActions {
        AiSearch::new(SignalHandle::new(state), self.backend.clone())
            .with_top_n(self.config.search.top_n)
            .with_guest_user_id(self.config.api.guest_user_id)
    }
}

fn build_stores(
    config: &ClientConfig,
    auth_state: Signal<AuthState>,
    meeting_state: Signal<MeetingState>,
) -> Result<Stores, api::ConfigError> {
    let backend = HttpBackend::from_config(config)?.with_token_storage(platform_storage());
    let auth = AuthStore::new(
        Persisted::new(SignalHandle::new(auth_state), platform_storage()),
        backend.clone(),
    );
    let meetings = MeetingStore::new(
        Persisted::new(SignalHandle::new(meeting_state), platform_storage()),
        backend.clone(),
    )
    .with_page_size(config.search.page_size);
    Ok(Stores {
        auth,
        meetings,
        backend,
        config: config.clone(),
    })
}

pub fn use_stores() -> Stores {
    use_context::<Stores>()
}

/// The session, as a signal that updates on login, logout and session checks.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_meeting_state() -> Signal<MeetingState> {
    use_context::<Signal<MeetingState>>()
}

/// State of the AI matching page. Lives above the router so a search can be
/// cancelled while its page unmounts.
pub fn use_ai_search_state() -> Signal<AiSearchState> {
    use_context::<Signal<AiSearchState>>()
}

/// Provider component that owns the stores. Wrap the router with it.
#[component]
pub fn StoreProvider(config: ClientConfig, children: Element) -> Element {
    let auth_state = use_signal(|| restore::<AuthState>(&platform_storage()));
    let meeting_state = use_signal(|| restore::<MeetingState>(&platform_storage()));
    use_context_provider(|| auth_state);
    use_context_provider(|| meeting_state);
    use_context_provider(|| Signal::new(AiSearchState::default()));

    // Decided once per mount, so the hooks below run in a stable order.
    let stores = use_hook(|| build_stores(&config, auth_state, meeting_state));
    let stores = match stores {
        Ok(stores) => stores,
        Err(e) => {
            tracing::error!("Cannot start the client: {}", e);
            return rsx! {
                div { class: "fatal-error",
                    h2 { "설정 오류" }
                    p { "{e}" }
                }
            };
        }
    };
    use_context_provider(|| stores.clone());

    let auth = stores.auth.clone();
    let _session = use_resource(move || {
        let auth = auth.clone();
        async move { auth.check_session().await }
    });

    rsx! {
        {children}
    }
}
