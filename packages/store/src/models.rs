//! # Domain models for sessions, meetings and AI recommendations
//!
//! The canonical in-memory shapes the stores hold and the views render. Server
//! payloads never deserialize straight into [`MeetingSummary`], [`MeetingDetail`]
//! or [`User`]; they go through [`crate::normalize`] first, which is the only
//! place that knows about snake_case/camelCase drift on the wire.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The signed-in identity held by the auth store. |
//! | [`MeetingSummary`] | A meeting card: listing, search results, personalized pick. Every field the server may omit is an `Option`. |
//! | [`MeetingDetail`] | A summary plus location, schedule and organizer details for the detail page. |
//! | [`RecentItem`] | An entry of the "recent" strip on the home page. |
//! | [`AiSearchResult`] | The AI matching response. Transient, held by the matching page only. |
//! | [`Recommendation`] | One ranked meeting inside an [`AiSearchResult`], already denormalized by the AI server. |
//!
//! Request bodies ([`LoginRequest`], [`SignupRequest`], [`MeetingSearchRequest`],
//! [`AiSearchRequest`], [`PreferenceProfile`]) serialize to exactly what the
//! backend expects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl User {
    /// Nickname when set, username otherwise.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Canonical meeting card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    pub meeting_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub location_name: Option<String>,
    pub meeting_time: Option<String>,
    pub max_participants: Option<i64>,
    pub current_participants: Option<i64>,
    pub expected_cost: Option<i64>,
    pub vibe: Option<String>,
    pub image_url: Option<String>,
    pub avg_rating: Option<f64>,
    /// Falls back to 0 when the payload names no organizer.
    pub organizer_id: i64,
}

/// Organizer block of a meeting detail.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerSummary {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub nickname: Option<String>,
}

/// Everything the detail page shows about one meeting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetail {
    #[serde(flatten)]
    pub summary: MeetingSummary,
    pub location_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_type: Option<String>,
    pub time_slot: Option<String>,
    pub status: Option<String>,
    pub organizer: Option<OrganizerSummary>,
}

/// Where a recent item links to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecentItemKind {
    Chat,
    Meeting,
}

/// An entry of the home page "recent" strip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecentItem {
    pub id: i64,
    pub icon: String,
    pub title: String,
    /// Relative, human readable: "2시간 전".
    pub time: String,
    #[serde(rename = "type")]
    pub kind: RecentItemKind,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/signup`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferenceProfile>,
}

/// Preferred time of day, as the AI server understands it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Morning,
    Afternoon,
    #[default]
    Evening,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetType {
    #[default]
    Free,
    Paid,
}

/// The preference profile collected by the setup flow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    pub interests: Vec<String>,
    pub time_preference: TimePreference,
    pub budget_type: BudgetType,
}

/// Body of `POST /meetings/search`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeetingSearchRequest {
    pub keyword: String,
    pub page: u32,
    pub size: u32,
}

/// Body of `POST /ai/recommendations/search`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiSearchRequest {
    pub user_prompt: String,
    pub user_id: i64,
    pub top_n: u32,
}

/// How the AI server read the user's prompt.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    #[serde(default, deserialize_with = "lenient::value")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub time_slot: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub location_query: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub vibe: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub max_cost: Option<i64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub keywords: Option<Vec<String>>,
    /// 0..=1; vague prompts come back at 0.4 or below.
    #[serde(default, deserialize_with = "lenient::opt_float")]
    pub confidence: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationOrganizer {
    #[serde(deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(deserialize_with = "lenient::float")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub meetings: u32,
}

/// One ranked meeting in an AI search result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    #[serde(deserialize_with = "lenient::int")]
    pub meeting_id: i64,
    #[serde(deserialize_with = "lenient::value")]
    pub title: String,
    #[serde(deserialize_with = "lenient::value")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::value")]
    pub subcategory: Option<String>,
    #[serde(deserialize_with = "lenient::value")]
    pub location_name: Option<String>,
    #[serde(deserialize_with = "lenient::value")]
    pub location_address: Option<String>,
    #[serde(deserialize_with = "lenient::opt_float")]
    pub distance_km: Option<f64>,
    #[serde(deserialize_with = "lenient::value")]
    pub meeting_time: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub expected_cost: i64,
    #[serde(deserialize_with = "lenient::count")]
    pub current_participants: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub max_participants: u32,
    #[serde(deserialize_with = "lenient::float")]
    pub match_score: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub predicted_rating: f64,
    #[serde(deserialize_with = "lenient::value")]
    pub key_points: Vec<String>,
    #[serde(deserialize_with = "lenient::value")]
    pub reasoning: String,
    #[serde(deserialize_with = "lenient::value")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient::value")]
    pub organizer: Option<RecommendationOrganizer>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTraceStep {
    #[serde(deserialize_with = "lenient::count")]
    pub level: u32,
    #[serde(deserialize_with = "lenient::value")]
    pub label: String,
    pub payload: Value,
    #[serde(deserialize_with = "lenient::count")]
    pub count: u32,
}

/// How far the AI server relaxed the query before it found candidates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTrace {
    #[serde(deserialize_with = "lenient::value")]
    pub steps: Vec<SearchTraceStep>,
    #[serde(deserialize_with = "lenient::count")]
    pub final_level: u32,
    #[serde(deserialize_with = "lenient::value")]
    pub final_label: String,
    #[serde(deserialize_with = "lenient::value")]
    pub fallback: bool,
}

/// Response of the AI matching endpoint.
///
/// Every field decodes leniently: `null` or a value of the wrong type reads
/// as absent instead of failing the whole result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSearchResult {
    #[serde(deserialize_with = "lenient::value")]
    pub user_prompt: String,
    #[serde(deserialize_with = "lenient::value")]
    pub parsed_query: Option<ParsedQuery>,
    #[serde(deserialize_with = "lenient::count")]
    pub total_candidates: u32,
    #[serde(deserialize_with = "lenient::recommendations")]
    pub recommendations: Vec<Recommendation>,
    #[serde(deserialize_with = "lenient::value")]
    pub fallback: Option<bool>,
    #[serde(deserialize_with = "lenient::value")]
    pub search_trace: Option<SearchTrace>,
}

/// Field decoders for AI server payloads. Numbers may arrive as strings or
/// floats; anything unreadable becomes the field's default.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Recommendation;
    use crate::normalize::{as_f64, as_i64};

    pub fn value<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(raw).unwrap_or_default())
    }

    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        opt_int(deserializer).map(Option::unwrap_or_default)
    }

    pub fn opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(as_i64(Some(&raw)))
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let n = opt_int(deserializer)?;
        Ok(n.and_then(|n| u32::try_from(n).ok()).unwrap_or_default())
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        opt_float(deserializer).map(Option::unwrap_or_default)
    }

    pub fn opt_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(as_f64(Some(&raw)))
    }

    /// Entries that are not objects are skipped; the rest keep their order.
    pub fn recommendations<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Recommendation>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let Value::Array(items) = raw else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }
}

impl AiSearchResult {
    pub fn confidence(&self) -> Option<f64> {
        self.parsed_query.as_ref().and_then(|q| q.confidence)
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_nickname() {
        let mut user = User {
            user_id: 1,
            email: "a@b.c".to_string(),
            username: "kim".to_string(),
            nickname: Some("산책러".to_string()),
        };
        assert_eq!(user.display_name(), "산책러");
        user.nickname = Some(String::new());
        assert_eq!(user.display_name(), "kim");
    }

    #[test]
    fn test_ai_search_result_tolerates_sparse_payload() {
        let json = r#"{
            "user_prompt": "등산",
            "parsed_query": {"category": "스포츠", "confidence": 0.4, "user_location": {"latitude": 37.5}},
            "recommendations": [{"meeting_id": 7, "title": "북한산", "match_score": 91, "key_points": ["초보 환영"]}]
        }"#;
        let result: AiSearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.confidence(), Some(0.4));
        assert_eq!(result.recommendations[0].match_score, 91.0);
        assert_eq!(result.recommendations[0].max_participants, 0);
        assert!(result.search_trace.is_none());
        let parsed = result.parsed_query.unwrap();
        assert!(parsed.extra.contains_key("user_location"));
    }

    #[test]
    fn test_ai_search_result_reads_bad_numbers_as_absent() {
        let json = r#"{
            "parsed_query": {"max_cost": 20000.0, "confidence": "0.8", "category": 3},
            "total_candidates": null,
            "recommendations": [
                {"meeting_id": "1", "title": "a", "expected_cost": null, "max_participants": -4,
                 "match_score": "87.5", "key_points": null, "organizer": {"rating": null}},
                "garbage"
            ]
        }"#;
        let result: AiSearchResult = serde_json::from_str(json).unwrap();
        let parsed = result.parsed_query.as_ref().unwrap();
        assert_eq!(parsed.max_cost, Some(20000));
        assert_eq!(parsed.confidence, Some(0.8));
        assert_eq!(parsed.category, None);
        assert_eq!(result.total_candidates, 0);

        assert_eq!(result.recommendations.len(), 1);
        let rec = &result.recommendations[0];
        assert_eq!(rec.meeting_id, 1);
        assert_eq!(rec.title, "a");
        assert_eq!(rec.expected_cost, 0);
        assert_eq!(rec.max_participants, 0);
        assert_eq!(rec.match_score, 87.5);
        assert!(rec.key_points.is_empty());
        assert_eq!(rec.organizer.as_ref().map(|o| o.rating), Some(0.0));
    }

    #[test]
    fn test_recent_item_kind_serializes_as_type() {
        let item = RecentItem {
            id: 1,
            icon: "📚".to_string(),
            title: "독서 토론회".to_string(),
            time: "3일 전".to_string(),
            kind: RecentItemKind::Meeting,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "meeting");
    }
}
