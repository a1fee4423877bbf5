//! Backend seams the stores talk through.
//!
//! The HTTP implementation lives in the `api` crate; tests plug in fakes.
//! Methods hand back raw JSON where the payload still needs normalizing, so
//! the mapping table in [`crate::normalize`] stays the single adapter.

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::form::MeetingForm;
use crate::models::{
    AiSearchRequest, AiSearchResult, LoginRequest, MeetingSearchRequest, PreferenceProfile,
    SignupRequest,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// The request never produced a response (DNS, refused, CORS, aborted).
    #[error("network error: {0}")]
    Transport(String),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A response arrived but its body was not what we expected.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Session endpoints.
pub trait AuthBackend {
    fn login(&self, request: &LoginRequest) -> impl Future<Output = Result<Value, BackendError>>;
    fn signup(&self, request: &SignupRequest) -> impl Future<Output = Result<(), BackendError>>;
    fn logout(&self) -> impl Future<Output = Result<(), BackendError>>;
    fn check_session(&self) -> impl Future<Output = Result<Value, BackendError>>;
    fn save_preferences(
        &self,
        user_id: i64,
        profile: &PreferenceProfile,
    ) -> impl Future<Output = Result<(), BackendError>>;
}

/// Meeting endpoints of the main API.
pub trait MeetingBackend {
    fn list_meetings(&self) -> impl Future<Output = Result<Value, BackendError>>;
    fn search_meetings(
        &self,
        request: &MeetingSearchRequest,
    ) -> impl Future<Output = Result<Value, BackendError>>;
    fn meeting_by_id(&self, meeting_id: i64) -> impl Future<Output = Result<Value, BackendError>>;
    fn meetings_by_category(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> impl Future<Output = Result<Value, BackendError>>;
    fn personalized_recommendation(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Value, BackendError>>;
    /// Returns the new meeting id.
    fn create_meeting(&self, form: &MeetingForm) -> impl Future<Output = Result<i64, BackendError>>;
    fn join_meeting(&self, meeting_id: i64) -> impl Future<Output = Result<(), BackendError>>;
}

/// The AI matching server.
pub trait AiBackend {
    fn search(
        &self,
        request: &AiSearchRequest,
    ) -> impl Future<Output = Result<AiSearchResult, BackendError>>;
}
