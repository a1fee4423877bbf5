//! Test doubles shared by the store tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::oneshot;

use crate::backend::{AiBackend, AuthBackend, BackendError, MeetingBackend};
use crate::form::MeetingForm;
use crate::models::{
    AiSearchRequest, AiSearchResult, LoginRequest, MeetingSearchRequest, PreferenceProfile,
    SignupRequest,
};
use crate::state::{SharedState, StateHandle};

/// A state handle that records a snapshot after every update.
#[derive(Debug)]
pub struct Recording<S> {
    state: SharedState<S>,
    history: Arc<Mutex<Vec<S>>>,
}

impl<S> Clone for Recording<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            history: Arc::clone(&self.history),
        }
    }
}

impl<S: Clone> Recording<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: SharedState::new(initial),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn history(&self) -> Vec<S> {
        self.history.lock().unwrap().clone()
    }

    pub fn loading_history(&self, flag: impl Fn(&S) -> bool) -> Vec<bool> {
        let mut flags: Vec<bool> = self.history().iter().map(flag).collect();
        flags.dedup();
        flags
    }
}

impl<S: Clone> StateHandle<S> for Recording<S> {
    fn snapshot(&self) -> S {
        self.state.snapshot()
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        self.state.update(f);
        self.history.lock().unwrap().push(self.state.snapshot());
    }
}

type Scripted<T> = Option<Result<T, BackendError>>;

#[derive(Default)]
struct Script {
    login: Scripted<Value>,
    logout: Scripted<()>,
    session: Scripted<Value>,
    list: Scripted<Value>,
    search: Scripted<Value>,
    detail: Scripted<Value>,
    category: Scripted<Value>,
    personalized: Scripted<Value>,
    created: Scripted<i64>,
    join: Scripted<()>,
    ai: VecDeque<(Result<AiSearchResult, BackendError>, Option<oneshot::Receiver<()>>)>,
    calls: HashMap<&'static str, usize>,
    last_search: Option<MeetingSearchRequest>,
    last_category: Option<(String, Option<String>)>,
    ai_requests: Vec<AiSearchRequest>,
}

/// Scripted backend. Unscripted value endpoints fail, unscripted unit endpoints succeed.
#[derive(Clone, Default)]
pub struct FakeBackend {
    script: Arc<Mutex<Script>>,
}

fn unscripted<T>() -> Result<T, BackendError> {
    Err(BackendError::Transport("not scripted".to_string()))
}

impl FakeBackend {
    fn with(self, f: impl FnOnce(&mut Script)) -> Self {
        f(&mut self.script.lock().unwrap());
        self
    }

    pub fn with_login(self, r: Result<Value, BackendError>) -> Self {
        self.with(|s| s.login = Some(r))
    }

    pub fn with_logout(self, r: Result<(), BackendError>) -> Self {
        self.with(|s| s.logout = Some(r))
    }

    pub fn with_session(self, r: Result<Value, BackendError>) -> Self {
        self.with(|s| s.session = Some(r))
    }

    pub fn with_list(self, r: Result<Value, BackendError>) -> Self {
        self.with(|s| s.list = Some(r))
    }

    pub fn with_search(self, r: Result<Value, BackendError>) -> Self {
        self.with(|s| s.search = Some(r))
    }

    pub fn with_detail(self, r: Result<Value, BackendError>) -> Self {
        self.with(|s| s.detail = Some(r))
    }

    pub fn with_category(self, r: Result<Value, BackendError>) -> Self {
        self.with(|s| s.category = Some(r))
    }

    pub fn with_personalized(self, r: Result<Value, BackendError>) -> Self {
        self.with(|s| s.personalized = Some(r))
    }

    pub fn with_created(self, r: Result<i64, BackendError>) -> Self {
        self.with(|s| s.created = Some(r))
    }

    pub fn with_join(self, r: Result<(), BackendError>) -> Self {
        self.with(|s| s.join = Some(r))
    }

    /// Queue an AI search response delivered as soon as it is requested.
    pub fn with_ai(self, r: Result<AiSearchResult, BackendError>) -> Self {
        self.with(|s| s.ai.push_back((r, None)))
    }

    /// Queue an AI search response held back until the returned sender fires.
    pub fn gated_ai(&self, r: Result<AiSearchResult, BackendError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().ai.push_back((r, Some(rx)));
        tx
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.script
            .lock()
            .unwrap()
            .calls
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    pub fn last_search_request(&self) -> Option<MeetingSearchRequest> {
        self.script.lock().unwrap().last_search.clone()
    }

    pub fn last_category(&self) -> Option<(String, Option<String>)> {
        self.script.lock().unwrap().last_category.clone()
    }

    pub fn ai_requests(&self) -> Vec<AiSearchRequest> {
        self.script.lock().unwrap().ai_requests.clone()
    }

    fn record<T>(&self, endpoint: &'static str, pick: impl FnOnce(&mut Script) -> Scripted<T>) -> Option<Result<T, BackendError>> {
        let mut script = self.script.lock().unwrap();
        *script.calls.entry(endpoint).or_default() += 1;
        pick(&mut script)
    }
}

impl AuthBackend for FakeBackend {
    async fn login(&self, _request: &LoginRequest) -> Result<Value, BackendError> {
        self.record("login", |s| s.login.clone()).unwrap_or_else(unscripted)
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<(), BackendError> {
        self.record("signup", |_| None).unwrap_or(Ok(()))
    }

    async fn logout(&self) -> Result<(), BackendError> {
        self.record("logout", |s| s.logout.clone()).unwrap_or(Ok(()))
    }

    async fn check_session(&self) -> Result<Value, BackendError> {
        self.record("check_session", |s| s.session.clone())
            .unwrap_or_else(unscripted)
    }

    async fn save_preferences(&self, _user_id: i64, _profile: &PreferenceProfile) -> Result<(), BackendError> {
        self.record("save_preferences", |_| None).unwrap_or(Ok(()))
    }
}

impl MeetingBackend for FakeBackend {
    async fn list_meetings(&self) -> Result<Value, BackendError> {
        self.record("list_meetings", |s| s.list.clone())
            .unwrap_or_else(unscripted)
    }

    async fn search_meetings(&self, request: &MeetingSearchRequest) -> Result<Value, BackendError> {
        self.record("search_meetings", |s| {
            s.last_search = Some(request.clone());
            s.search.clone()
        })
        .unwrap_or_else(unscripted)
    }

    async fn meeting_by_id(&self, _meeting_id: i64) -> Result<Value, BackendError> {
        self.record("meeting_by_id", |s| s.detail.clone())
            .unwrap_or_else(unscripted)
    }

    async fn meetings_by_category(&self, category: &str, subcategory: Option<&str>) -> Result<Value, BackendError> {
        self.record("meetings_by_category", |s| {
            s.last_category = Some((category.to_string(), subcategory.map(str::to_string)));
            s.category.clone()
        })
        .unwrap_or_else(unscripted)
    }

    async fn personalized_recommendation(&self, _user_id: i64) -> Result<Value, BackendError> {
        self.record("personalized_recommendation", |s| s.personalized.clone())
            .unwrap_or_else(unscripted)
    }

    async fn create_meeting(&self, _form: &MeetingForm) -> Result<i64, BackendError> {
        self.record("create_meeting", |s| s.created.clone())
            .unwrap_or_else(unscripted)
    }

    async fn join_meeting(&self, _meeting_id: i64) -> Result<(), BackendError> {
        self.record("join_meeting", |s| s.join.clone()).unwrap_or(Ok(()))
    }
}

impl AiBackend for FakeBackend {
    async fn search(&self, request: &AiSearchRequest) -> Result<AiSearchResult, BackendError> {
        let next = {
            let mut script = self.script.lock().unwrap();
            *script.calls.entry("ai_search").or_default() += 1;
            script.ai_requests.push(request.clone());
            script.ai.pop_front()
        };
        let Some((result, gate)) = next else {
            return unscripted();
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }
}
