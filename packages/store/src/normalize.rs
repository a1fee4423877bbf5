//! # Server record normalization
//!
//! The backend is inconsistent about key casing: the Spring API answers in
//! camelCase, the AI server in snake_case, and a few endpoints nest the
//! organizer. Every record crossing into the stores goes through this module
//! exactly once.
//!
//! Each canonical field has one row in a mapping table listing the paths it
//! may be found under. The canonical key wins when present; an explicit `null`
//! counts as absent. A value of the wrong JSON type is also treated as absent,
//! so every function here is total.
//!
//! | canonical | alternates |
//! |-----------|------------|
//! | `meetingId` | `meeting_id` |
//! | `locationName` | `location_name` |
//! | `meetingTime` | `meeting_time` |
//! | `maxParticipants` | `max_participants` |
//! | `currentParticipants` | `current_participants` |
//! | `expectedCost` | `expected_cost` |
//! | `imageUrl` | `image_url` |
//! | `avgRating` | `avg_rating` |
//! | `organizerId` | `organizer.user_id`, `organizer.userId` |

use serde_json::Value;

use crate::models::{MeetingDetail, MeetingSummary, OrganizerSummary, User};

/// One row of a mapping table.
#[derive(Clone, Copy, Debug)]
pub struct FieldMapping {
    pub canonical: &'static str,
    /// Dotted paths, tried in order after the canonical key.
    pub alternates: &'static [&'static str],
}

const fn field(canonical: &'static str, alternates: &'static [&'static str]) -> FieldMapping {
    FieldMapping {
        canonical,
        alternates,
    }
}

pub const MEETING_FIELDS: &[FieldMapping] = &[
    field("meetingId", &["meeting_id"]),
    field("title", &[]),
    field("description", &[]),
    field("category", &[]),
    field("subcategory", &[]),
    field("locationName", &["location_name"]),
    field("meetingTime", &["meeting_time"]),
    field("maxParticipants", &["max_participants"]),
    field("currentParticipants", &["current_participants"]),
    field("expectedCost", &["expected_cost"]),
    field("vibe", &[]),
    field("imageUrl", &["image_url"]),
    field("avgRating", &["avg_rating"]),
    field("organizerId", &["organizer.user_id", "organizer.userId"]),
    field("locationAddress", &["location_address"]),
    field("latitude", &[]),
    field("longitude", &[]),
    field("locationType", &["location_type"]),
    field("timeSlot", &["time_slot"]),
    field("status", &[]),
];

pub const ORGANIZER_FIELDS: &[FieldMapping] = &[
    field("userId", &["user_id"]),
    field("username", &["name"]),
    field("nickname", &[]),
];

pub const USER_FIELDS: &[FieldMapping] = &[
    field("userId", &["user_id", "id"]),
    field("email", &[]),
    field("username", &["name"]),
    field("nickname", &[]),
    field("hasPreference", &["has_preference"]),
];

/// Envelope keys a single record or a list may be wrapped in.
const RECORD_ENVELOPES: &[&str] = &["meeting", "data"];

fn at_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |node, key| node.get(key))
        .filter(|v| !v.is_null())
}

/// Resolve `canonical` in `record` through `table`.
///
/// Keys missing from the table are looked up verbatim.
pub fn lookup<'a>(record: &'a Value, table: &[FieldMapping], canonical: &str) -> Option<&'a Value> {
    if let Some(found) = at_path(record, canonical) {
        return Some(found);
    }
    table
        .iter()
        .find(|m| m.canonical == canonical)
        .and_then(|m| m.alternates.iter().find_map(|alt| at_path(record, alt)))
}

fn as_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn as_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn as_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Map any server meeting record onto [`MeetingSummary`].
pub fn normalize_meeting(record: &Value) -> MeetingSummary {
    let get = |key: &str| lookup(record, MEETING_FIELDS, key);
    MeetingSummary {
        meeting_id: as_i64(get("meetingId")),
        title: as_string(get("title")),
        description: as_string(get("description")),
        category: as_string(get("category")),
        subcategory: as_string(get("subcategory")),
        location_name: as_string(get("locationName")),
        meeting_time: as_string(get("meetingTime")),
        max_participants: as_i64(get("maxParticipants")),
        current_participants: as_i64(get("currentParticipants")),
        expected_cost: as_i64(get("expectedCost")),
        vibe: as_string(get("vibe")),
        image_url: as_string(get("imageUrl")),
        avg_rating: as_f64(get("avgRating")),
        organizer_id: as_i64(get("organizerId")).unwrap_or(0),
    }
}

/// Map a server meeting record onto [`MeetingDetail`].
pub fn normalize_meeting_detail(record: &Value) -> MeetingDetail {
    let get = |key: &str| lookup(record, MEETING_FIELDS, key);
    let organizer = record
        .get("organizer")
        .filter(|o| o.is_object())
        .map(|o| {
            let get = |key: &str| lookup(o, ORGANIZER_FIELDS, key);
            OrganizerSummary {
                user_id: as_i64(get("userId")),
                username: as_string(get("username")),
                nickname: as_string(get("nickname")),
            }
        });
    MeetingDetail {
        summary: normalize_meeting(record),
        location_address: as_string(get("locationAddress")),
        latitude: as_f64(get("latitude")),
        longitude: as_f64(get("longitude")),
        location_type: as_string(get("locationType")),
        time_slot: as_string(get("timeSlot")),
        status: as_string(get("status")),
        organizer,
    }
}

/// Map a login or session payload onto a [`User`].
///
/// Returns `None` when the payload carries no user id.
pub fn normalize_user(record: &Value) -> Option<User> {
    let get = |key: &str| lookup(record, USER_FIELDS, key);
    Some(User {
        user_id: as_i64(get("userId"))?,
        email: as_string(get("email")).unwrap_or_default(),
        username: as_string(get("username")).unwrap_or_default(),
        nickname: as_string(get("nickname")),
    })
}

/// Whether a session payload reports a completed preference profile.
pub fn has_preference(record: &Value) -> Option<bool> {
    as_bool(lookup(record, USER_FIELDS, "hasPreference"))
}

/// Extract and normalize a meeting list from any of the known envelopes.
///
/// Accepts `{"meetings": [..]}`, a bare array and `{"data": {"meetings": [..]}}`
/// (or `{"data": [..]}`). Anything else, including `{"meetings": null}`, is an
/// empty list.
pub fn unwrap_meeting_list(payload: &Value) -> Vec<MeetingSummary> {
    let list = match payload {
        Value::Array(items) => Some(items),
        Value::Object(_) => payload
            .get("meetings")
            .and_then(Value::as_array)
            .or_else(|| {
                payload.get("data").and_then(|data| {
                    data.as_array()
                        .or_else(|| data.get("meetings").and_then(Value::as_array))
                })
            }),
        _ => None,
    };
    list.map(|items| items.iter().map(normalize_meeting).collect())
        .unwrap_or_default()
}

/// Peel a single-record envelope (`{"meeting": {..}}` / `{"data": {..}}`).
pub fn unwrap_record(payload: &Value) -> &Value {
    RECORD_ENVELOPES
        .iter()
        .find_map(|key| payload.get(*key).filter(|v| v.is_object()))
        .unwrap_or(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_keys_fill_canonical_fields() {
        let meeting = normalize_meeting(&json!({
            "meeting_id": 12,
            "title": "한강 선셋 피크닉",
            "location_name": "여의도 한강공원",
            "meeting_time": "2026-05-01T18:30:00",
            "max_participants": 8,
            "current_participants": 3,
            "expected_cost": 5000,
            "image_url": "https://img/1.png",
            "avg_rating": 4.5,
            "organizer": {"user_id": 42}
        }));
        assert_eq!(meeting.meeting_id, Some(12));
        assert_eq!(meeting.location_name.as_deref(), Some("여의도 한강공원"));
        assert_eq!(meeting.max_participants, Some(8));
        assert_eq!(meeting.current_participants, Some(3));
        assert_eq!(meeting.expected_cost, Some(5000));
        assert_eq!(meeting.avg_rating, Some(4.5));
        assert_eq!(meeting.organizer_id, 42);
    }

    #[test]
    fn test_canonical_key_wins() {
        let meeting = normalize_meeting(&json!({
            "meetingId": 1,
            "meeting_id": 2,
            "locationName": "canonical",
            "location_name": "legacy",
            "organizerId": 5,
            "organizer": {"user_id": 6}
        }));
        assert_eq!(meeting.meeting_id, Some(1));
        assert_eq!(meeting.location_name.as_deref(), Some("canonical"));
        assert_eq!(meeting.organizer_id, 5);
    }

    #[test]
    fn test_null_canonical_falls_through_to_legacy() {
        let meeting = normalize_meeting(&json!({"meetingId": null, "meeting_id": 9}));
        assert_eq!(meeting.meeting_id, Some(9));
    }

    #[test]
    fn test_camel_case_organizer_and_missing_fields() {
        let meeting = normalize_meeting(&json!({"organizer": {"userId": 3}}));
        assert_eq!(meeting.organizer_id, 3);
        assert!(meeting.title.is_none());
        assert!(meeting.image_url.is_none());

        let orphan = normalize_meeting(&json!({"title": "x"}));
        assert_eq!(orphan.organizer_id, 0);
    }

    #[test]
    fn test_malformed_input_is_absent_not_fatal() {
        let meeting = normalize_meeting(&json!({"meetingId": "abc", "maxParticipants": [1], "title": 5}));
        assert_eq!(meeting.meeting_id, None);
        assert_eq!(meeting.max_participants, None);
        assert_eq!(meeting.title, None);

        assert_eq!(normalize_meeting(&json!("nope")), MeetingSummary::default());
        assert_eq!(normalize_meeting(&Value::Null), MeetingSummary::default());

        let numeric_strings = normalize_meeting(&json!({"meetingId": "17", "expectedCost": "0"}));
        assert_eq!(numeric_strings.meeting_id, Some(17));
        assert_eq!(numeric_strings.expected_cost, Some(0));
    }

    #[test]
    fn test_unwrap_meeting_list_envelopes() {
        let wrapped = json!({"meetings": [{"meetingId": 1}, {"meeting_id": 2}]});
        let ids: Vec<_> = unwrap_meeting_list(&wrapped).iter().map(|m| m.meeting_id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);

        assert_eq!(unwrap_meeting_list(&json!([{"meetingId": 3}])).len(), 1);
        assert_eq!(unwrap_meeting_list(&json!({"data": {"meetings": [{}]}})).len(), 1);
        assert_eq!(unwrap_meeting_list(&json!({"data": [{}, {}]})).len(), 2);

        assert!(unwrap_meeting_list(&json!({"meetings": null})).is_empty());
        assert!(unwrap_meeting_list(&json!({"total": 0})).is_empty());
        assert!(unwrap_meeting_list(&json!("meetings")).is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let list = unwrap_meeting_list(&json!([{"meetingId": 1}, {"meetingId": 1}]));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_normalize_detail_with_organizer() {
        let detail = normalize_meeting_detail(&json!({
            "meetingId": 4,
            "location_address": "서울 영등포구 여의동로 330",
            "latitude": 37.5665,
            "location_type": "OUTDOOR",
            "timeSlot": "EVENING",
            "organizer": {"user_id": 8, "name": "minji"}
        }));
        assert_eq!(detail.summary.meeting_id, Some(4));
        assert_eq!(detail.summary.organizer_id, 8);
        assert_eq!(detail.location_type.as_deref(), Some("OUTDOOR"));
        let organizer = detail.organizer.unwrap();
        assert_eq!(organizer.user_id, Some(8));
        assert_eq!(organizer.username.as_deref(), Some("minji"));
    }

    #[test]
    fn test_unwrap_record() {
        let wrapped = json!({"meeting": {"meetingId": 1}});
        assert_eq!(unwrap_record(&wrapped)["meetingId"], 1);
        let bare = json!({"meetingId": 2});
        assert_eq!(unwrap_record(&bare)["meetingId"], 2);
    }

    #[test]
    fn test_normalize_user() {
        let user = normalize_user(&json!({
            "user_id": 5,
            "email": "a@b.c",
            "username": "kim",
            "has_preference": true
        }))
        .unwrap();
        assert_eq!(user.user_id, 5);
        assert_eq!(user.nickname, None);
        assert_eq!(has_preference(&json!({"has_preference": true})), Some(true));
        assert_eq!(has_preference(&json!({})), None);
        assert!(normalize_user(&json!({"email": "a@b.c"})).is_none());
    }
}
