//! # Auth store: the signed-in session
//!
//! [`AuthState`] is the only owner of the current [`User`]. Whether the user is
//! authenticated is derived from `user` rather than stored next to it, so the
//! two can never disagree in any snapshot.
//!
//! [`AuthStore`] wraps a [`StateHandle`] and an [`AuthBackend`] and exposes the
//! session actions. `login`, `signup` and `save_preferences` are user-initiated:
//! besides recording the error in the state they hand it back so the page can
//! show it. `logout` and `check_session` never fail from the caller's view.
//!
//! The persisted projection (`auth-storage`) is `{user, isAuthenticated,
//! hasPreference}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::{AuthBackend, BackendError};
use crate::models::{LoginRequest, PreferenceProfile, SignupRequest, User};
use crate::normalize::{has_preference, normalize_user};
use crate::persist::Persist;
use crate::state::StateHandle;

/// Session state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// The signed-in user finished the preference setup flow.
    pub has_preference: bool,
    pub is_loading: bool,
    /// At least one session check, login or logout has completed since start.
    pub session_checked: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.user_id)
    }

    fn sign_in(&mut self, user: User, has_preference: bool) {
        self.user = Some(user);
        self.has_preference = has_preference;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.has_preference = false;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProjection {
    pub user: Option<User>,
    pub is_authenticated: bool,
    #[serde(default)]
    pub has_preference: bool,
}

impl Persist for AuthState {
    const STORAGE_KEY: &'static str = "auth-storage";
    type Projection = AuthProjection;

    fn project(&self) -> AuthProjection {
        AuthProjection {
            user: self.user.clone(),
            is_authenticated: self.is_authenticated(),
            has_preference: self.has_preference,
        }
    }

    fn apply(&mut self, projection: AuthProjection) {
        // A projection that contradicts itself restores as signed out.
        match projection.user {
            Some(user) if projection.is_authenticated => {
                self.sign_in(user, projection.has_preference)
            }
            _ => self.sign_out(),
        }
    }
}

fn session_from_payload(payload: &Value) -> Result<(User, Option<bool>), BackendError> {
    let user = normalize_user(payload)
        .ok_or_else(|| BackendError::Decode("session payload has no user id".to_string()))?;
    Ok((user, has_preference(payload)))
}

/// Session actions over an injected state handle and backend.
#[derive(Clone, Debug)]
pub struct AuthStore<H, B> {
    state: H,
    backend: B,
}

impl<H, B> AuthStore<H, B> {
    pub fn new(state: H, backend: B) -> Self {
        Self { state, backend }
    }
}

impl<H, B> AuthStore<H, B>
where
    H: StateHandle<AuthState>,
    B: AuthBackend,
{
    pub fn snapshot(&self) -> AuthState {
        self.state.snapshot()
    }

    fn commit_session(&self, user: User, preference: Option<bool>) {
        self.state.update(|s| {
            // Without a flag in the payload, keep what we knew about this same user.
            let same_user = s.user_id() == Some(user.user_id);
            let has_preference = preference.unwrap_or(same_user && s.has_preference);
            s.sign_in(user, has_preference);
            s.is_loading = false;
            s.session_checked = true;
        });
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<User, BackendError> {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result = self
            .backend
            .login(&credentials)
            .await
            .and_then(|payload| session_from_payload(&payload));

        match result {
            Ok((user, preference)) => {
                tracing::info!(user_id = user.user_id, "Login succeeded");
                self.commit_session(user.clone(), preference);
                Ok(user)
            }
            Err(e) => {
                tracing::error!("Login failed: {}", e);
                self.state.update(|s| {
                    s.error = Some(e.to_string());
                    s.is_loading = false;
                });
                Err(e)
            }
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<(), BackendError> {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.backend.signup(&request).await {
            Ok(()) => {
                tracing::info!("Signup succeeded for {}", request.email);
                self.state.update(|s| s.is_loading = false);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Signup failed: {}", e);
                self.state.update(|s| {
                    s.error = Some(e.to_string());
                    s.is_loading = false;
                });
                Err(e)
            }
        }
    }

    /// Local state is cleared even when the backend call fails.
    pub async fn logout(&self) {
        self.state.update(|s| s.is_loading = true);

        if let Err(e) = self.backend.logout().await {
            tracing::warn!("Logout request failed, clearing local session anyway: {}", e);
        } else {
            tracing::info!("Logged out");
        }

        self.state.update(|s| {
            s.sign_out();
            s.is_loading = false;
            s.session_checked = true;
        });
    }

    /// Ask the backend who we are. Skipped while another auth request is pending.
    pub async fn check_session(&self) {
        if self.state.snapshot().is_loading {
            tracing::debug!("Session check skipped, auth request already in flight");
            return;
        }
        self.state.update(|s| s.is_loading = true);

        let result = self
            .backend
            .check_session()
            .await
            .and_then(|payload| session_from_payload(&payload));

        match result {
            Ok((user, preference)) => {
                tracing::info!(user_id = user.user_id, "Session restored");
                self.commit_session(user, preference);
            }
            Err(e) => {
                tracing::info!("No active session: {}", e);
                self.state.update(|s| {
                    s.sign_out();
                    s.is_loading = false;
                    s.session_checked = true;
                });
            }
        }
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    pub async fn save_preferences(&self, profile: PreferenceProfile) -> Result<(), BackendError> {
        let Some(user_id) = self.state.snapshot().user_id() else {
            return Err(BackendError::Status {
                status: 401,
                message: "로그인이 필요합니다".to_string(),
            });
        };
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.backend.save_preferences(user_id, &profile).await {
            Ok(()) => {
                tracing::info!(user_id, "Preference profile saved");
                self.state.update(|s| {
                    s.has_preference = true;
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("Saving preferences failed: {}", e);
                self.state.update(|s| {
                    s.error = Some(e.to_string());
                    s.is_loading = false;
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use crate::persist::{restore, KeyValueStorage, Persisted};
    use crate::state::SharedState;
    use crate::testing::{FakeBackend, Recording};
    use serde_json::json;

    fn session_payload() -> Value {
        json!({"userId": 7, "email": "jisu@itda.kr", "username": "jisu", "nickname": "지수"})
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "jisu@itda.kr".to_string(),
            password: "secret".to_string(),
        }
    }

    fn assert_invariant(history: &[AuthState]) {
        for s in history {
            assert_eq!(s.is_authenticated(), s.user.is_some());
            assert_eq!(s.project().is_authenticated, s.user.is_some());
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let state = Recording::new(AuthState::default());
        let backend = FakeBackend::default().with_login(Ok(session_payload()));
        let store = AuthStore::new(state.clone(), backend);

        let user = store.login(credentials()).await.unwrap();
        assert_eq!(user.display_name(), "지수");

        let snapshot = store.snapshot();
        assert!(snapshot.is_authenticated());
        assert!(!snapshot.is_loading);
        assert!(snapshot.session_checked);
        assert_eq!(state.loading_history(|s| s.is_loading), vec![true, false]);
        assert_invariant(&state.history());
    }

    #[tokio::test]
    async fn test_login_failure_records_and_returns_error() {
        let state = Recording::new(AuthState::default());
        let backend = FakeBackend::default().with_login(Err(BackendError::Status {
            status: 401,
            message: "bad credentials".to_string(),
        }));
        let store = AuthStore::new(state.clone(), backend);

        let err = store.login(credentials()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));

        let snapshot = store.snapshot();
        assert!(!snapshot.is_authenticated());
        assert!(snapshot.error.is_some());
        assert_eq!(state.loading_history(|s| s.is_loading), vec![true, false]);

        store.clear_error();
        assert!(store.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn test_login_payload_without_id_is_a_failure() {
        let backend = FakeBackend::default().with_login(Ok(json!({"email": "x@y.z"})));
        let store = AuthStore::new(SharedState::new(AuthState::default()), backend);
        assert!(matches!(
            store.login(credentials()).await,
            Err(BackendError::Decode(_))
        ));
        assert!(!store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_even_on_failure() {
        let state = SharedState::new(AuthState::default());
        let backend = FakeBackend::default()
            .with_login(Ok(session_payload()))
            .with_logout(Err(BackendError::Transport("offline".to_string())));
        let store = AuthStore::new(state, backend);

        store.login(credentials()).await.unwrap();
        store.logout().await;

        let snapshot = store.snapshot();
        assert!(snapshot.user.is_none());
        assert!(!snapshot.is_authenticated());
        assert!(!snapshot.has_preference);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_check_session_success_and_failure() {
        let backend = FakeBackend::default()
            .with_session(Ok(json!({"user_id": 3, "email": "a@b.c", "username": "a", "has_preference": true})));
        let store = AuthStore::new(SharedState::new(AuthState::default()), backend);
        store.check_session().await;
        let snapshot = store.snapshot();
        assert_eq!(snapshot.user_id(), Some(3));
        assert!(snapshot.has_preference);
        assert!(snapshot.session_checked);

        let backend = FakeBackend::default().with_session(Err(BackendError::Status {
            status: 401,
            message: "expired".to_string(),
        }));
        let state = Recording::new(AuthState {
            user: Some(User::default()),
            ..AuthState::default()
        });
        let store = AuthStore::new(state.clone(), backend);
        store.check_session().await;
        assert!(!store.snapshot().is_authenticated());
        assert_eq!(state.loading_history(|s| s.is_loading), vec![true, false]);
        assert_invariant(&state.history());
    }

    #[tokio::test]
    async fn test_check_session_skipped_while_loading() {
        let state = SharedState::new(AuthState {
            is_loading: true,
            ..AuthState::default()
        });
        let backend = FakeBackend::default().with_session(Ok(session_payload()));
        let store = AuthStore::new(state, backend.clone());
        store.check_session().await;
        assert_eq!(backend.calls("check_session"), 0);
        assert!(store.snapshot().user.is_none());
    }

    #[tokio::test]
    async fn test_save_preferences() {
        let backend = FakeBackend::default().with_login(Ok(session_payload()));
        let store = AuthStore::new(SharedState::new(AuthState::default()), backend);

        // Signed out: rejected without a request
        assert_eq!(
            store.save_preferences(PreferenceProfile::default()).await.unwrap_err().status(),
            Some(401)
        );

        store.login(credentials()).await.unwrap();
        assert!(!store.snapshot().has_preference);
        store.save_preferences(PreferenceProfile::default()).await.unwrap();
        assert!(store.snapshot().has_preference);
    }

    #[tokio::test]
    async fn test_persisted_projection_survives_reload() {
        let storage = MemoryStorage::new();
        let handle = Persisted::new(SharedState::new(AuthState::default()), storage.clone());
        let backend = FakeBackend::default().with_login(Ok(session_payload()));
        let store = AuthStore::new(handle, backend);
        store.login(credentials()).await.unwrap();

        let raw = storage.get_item("auth-storage").unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["state"]["isAuthenticated"], true);
        assert_eq!(value["state"]["user"]["userId"], 7);
        assert_eq!(value["version"], 0);
        assert!(value["state"].get("isLoading").is_none());

        let reloaded: AuthState = restore(&storage);
        assert_eq!(reloaded.user_id(), Some(7));
        assert!(!reloaded.is_loading);
        assert!(!reloaded.session_checked);
        assert!(reloaded.error.is_none());
    }

    #[test]
    fn test_contradictory_projection_restores_signed_out() {
        let storage = MemoryStorage::new();
        storage.set_item(
            "auth-storage",
            r#"{"state":{"user":{"userId":1,"email":"","username":""},"isAuthenticated":false},"version":0}"#,
        );
        let restored: AuthState = restore(&storage);
        assert!(restored.user.is_none());
    }
}
