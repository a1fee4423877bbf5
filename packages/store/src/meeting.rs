//! # Meeting store: listings, search, detail and the personalized pick
//!
//! [`MeetingStore`] owns the meeting list shown on the home and listing pages,
//! the detail currently open, the personalized recommendation and the "recent"
//! strip. Every fetch degrades to a safe value instead of surfacing an error:
//! a failed list becomes empty, a failed recommendation becomes `None`. Only
//! the detail and category fetches record a user-facing message.
//!
//! Creating and joining meetings are user actions whose outcome the page
//! reports, so they return a `Result` and leave the state alone.
//!
//! The persisted projection (`meeting-storage`) is `{recentItems,
//! selectedCategory}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{BackendError, MeetingBackend};
use crate::form::{FormError, MeetingForm};
use crate::models::{MeetingDetail, MeetingSearchRequest, MeetingSummary, RecentItem, RecentItemKind};
use crate::normalize::{normalize_meeting, normalize_meeting_detail, unwrap_meeting_list, unwrap_record};
use crate::persist::Persist;
use crate::state::StateHandle;

/// Category value meaning "no filter".
pub const ALL_CATEGORIES: &str = "전체";

const DETAIL_ERROR: &str = "모임 정보를 불러오는데 실패했습니다.";
const CATEGORY_ERROR: &str = "카테고리 모임을 불러오는데 실패했습니다.";

#[derive(Clone, Debug, PartialEq)]
pub struct MeetingState {
    pub meetings: Vec<MeetingSummary>,
    pub recent_items: Vec<RecentItem>,
    pub ai_recommendation: Option<MeetingSummary>,
    pub selected_category: String,
    pub search_query: String,
    pub is_loading: bool,
    pub current_meeting: Option<MeetingDetail>,
    pub error: Option<String>,
}

impl Default for MeetingState {
    fn default() -> Self {
        Self {
            meetings: Vec::new(),
            recent_items: Vec::new(),
            ai_recommendation: None,
            selected_category: ALL_CATEGORIES.to_string(),
            search_query: String::new(),
            is_loading: false,
            current_meeting: None,
            error: None,
        }
    }
}

impl MeetingState {
    /// Meetings matching the selected category.
    pub fn visible_meetings(&self) -> Vec<&MeetingSummary> {
        self.meetings
            .iter()
            .filter(|m| {
                self.selected_category == ALL_CATEGORIES
                    || m.category.as_deref() == Some(self.selected_category.as_str())
            })
            .collect()
    }

    /// Distinct subcategories among the loaded meetings, in first-seen order.
    pub fn subcategories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for sub in self.meetings.iter().filter_map(|m| m.subcategory.as_deref()) {
            if !sub.is_empty() && !seen.iter().any(|s| s == sub) {
                seen.push(sub.to_string());
            }
        }
        seen
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingProjection {
    #[serde(default)]
    pub recent_items: Vec<RecentItem>,
    #[serde(default = "default_category")]
    pub selected_category: String,
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

impl Persist for MeetingState {
    const STORAGE_KEY: &'static str = "meeting-storage";
    type Projection = MeetingProjection;

    fn project(&self) -> MeetingProjection {
        MeetingProjection {
            recent_items: self.recent_items.clone(),
            selected_category: self.selected_category.clone(),
        }
    }

    fn apply(&mut self, projection: MeetingProjection) {
        self.recent_items = projection.recent_items;
        self.selected_category = projection.selected_category;
    }
}

/// Placeholder activity until the server tracks it.
pub fn placeholder_recent_items() -> Vec<RecentItem> {
    [
        (1, "🏃", "한강 러닝 크루", "2시간 전", RecentItemKind::Chat),
        (2, "☕", "성수 카페 투어", "어제", RecentItemKind::Meeting),
        (3, "📚", "독서 토론회", "3일 전", RecentItemKind::Meeting),
        (4, "🎨", "원데이 드로잉", "1주 전", RecentItemKind::Chat),
    ]
    .into_iter()
    .map(|(id, icon, title, time, kind)| RecentItem {
        id,
        icon: icon.to_string(),
        title: title.to_string(),
        time: time.to_string(),
        kind,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeetingActionError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Clone, Debug)]
pub struct MeetingStore<H, B> {
    state: H,
    backend: B,
    page_size: u32,
}

impl<H, B> MeetingStore<H, B> {
    pub fn new(state: H, backend: B) -> Self {
        Self {
            state,
            backend,
            page_size: 50,
        }
    }

    /// Builder method for the keyword search page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

impl<H, B> MeetingStore<H, B>
where
    H: StateHandle<MeetingState>,
    B: MeetingBackend,
{
    pub fn snapshot(&self) -> MeetingState {
        self.state.snapshot()
    }

    pub async fn fetch_meetings(&self) {
        self.state.update(|s| s.is_loading = true);

        let meetings = match self.backend.list_meetings().await {
            Ok(payload) => unwrap_meeting_list(&payload),
            Err(e) => {
                tracing::error!("Failed to fetch meetings: {}", e);
                Vec::new()
            }
        };
        tracing::debug!("Fetched {} meetings", meetings.len());

        self.state.update(|s| {
            s.meetings = meetings;
            s.is_loading = false;
        });
    }

    pub fn fetch_recent_items(&self) {
        self.state.update(|s| s.recent_items = placeholder_recent_items());
    }

    /// Load the personalized pick. Anything but an explicit success clears it.
    pub async fn fetch_ai_recommendation(&self, user_id: i64) {
        let recommendation = match self.backend.personalized_recommendation(user_id).await {
            Ok(payload) if payload.get("success").and_then(|v| v.as_bool()) == Some(true) => {
                // Meeting fields sit next to `success`, or inside a `data` envelope.
                let record = unwrap_record(&payload);
                let meeting = normalize_meeting(record);
                meeting.meeting_id.is_some().then_some(meeting)
            }
            Ok(_) => {
                tracing::info!(user_id, "No personalized recommendation available");
                None
            }
            Err(e) => {
                tracing::error!("Failed to fetch personalized recommendation: {}", e);
                None
            }
        };
        self.state.update(|s| s.ai_recommendation = recommendation);
    }

    pub fn set_category(&self, category: impl Into<String>) {
        let category = category.into();
        self.state.update(|s| s.selected_category = category);
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.update(|s| s.search_query = query);
    }

    pub async fn search_meetings(&self, keyword: &str) {
        self.state.update(|s| {
            s.is_loading = true;
            s.search_query = keyword.to_string();
        });

        let request = MeetingSearchRequest {
            keyword: keyword.to_string(),
            page: 0,
            size: self.page_size,
        };
        let meetings = match self.backend.search_meetings(&request).await {
            Ok(payload) => unwrap_meeting_list(&payload),
            Err(e) => {
                tracing::error!("Meeting search for {:?} failed: {}", keyword, e);
                Vec::new()
            }
        };

        self.state.update(|s| {
            s.meetings = meetings;
            s.is_loading = false;
        });
    }

    pub async fn fetch_meeting_by_id(&self, meeting_id: i64) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.backend.meeting_by_id(meeting_id).await {
            Ok(payload) => {
                let detail = normalize_meeting_detail(unwrap_record(&payload));
                self.state.update(|s| {
                    s.current_meeting = Some(detail);
                    s.is_loading = false;
                });
            }
            Err(e) => {
                tracing::error!(meeting_id, "Failed to fetch meeting: {}", e);
                self.state.update(|s| {
                    s.current_meeting = None;
                    s.error = Some(DETAIL_ERROR.to_string());
                    s.is_loading = false;
                });
            }
        }
    }

    /// On failure the previous list stays and an error message is recorded.
    pub async fn fetch_meetings_by_category(&self, category: &str, subcategory: Option<&str>) {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.backend.meetings_by_category(category, subcategory).await {
            Ok(payload) => {
                let meetings = unwrap_meeting_list(&payload);
                self.state.update(|s| {
                    s.meetings = meetings;
                    s.is_loading = false;
                });
            }
            Err(e) => {
                tracing::error!(category, ?subcategory, "Failed to fetch category meetings: {}", e);
                self.state.update(|s| {
                    s.error = Some(CATEGORY_ERROR.to_string());
                    s.is_loading = false;
                });
            }
        }
    }

    /// Validate and submit the form. Returns the new meeting id.
    pub async fn create_meeting(&self, form: &MeetingForm) -> Result<i64, MeetingActionError> {
        form.validate()?;
        let meeting_id = self.backend.create_meeting(form).await.map_err(|e| {
            tracing::error!("Failed to create meeting: {}", e);
            e
        })?;
        tracing::info!(meeting_id, "Meeting created");
        Ok(meeting_id)
    }

    pub async fn join_meeting(&self, meeting_id: i64) -> Result<(), BackendError> {
        self.backend.join_meeting(meeting_id).await.map_err(|e| {
            tracing::error!(meeting_id, "Failed to join meeting: {}", e);
            e
        })?;
        tracing::info!(meeting_id, "Joined meeting");
        Ok(())
    }
}
