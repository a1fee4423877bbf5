//! Meeting creation form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CATEGORIES: &[&str] = &["스포츠", "맛집", "카페", "문화예술", "스터디", "취미활동", "소셜"];

pub const VIBES: &[&str] = &["활기찬", "여유로운", "힐링", "진지한", "즐거운", "감성적인", "건강한", "배움"];

pub const MIN_PARTICIPANTS: u32 = 2;
pub const MAX_PARTICIPANTS: u32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Indoor,
    #[default]
    Outdoor,
}

impl LocationType {
    pub const ALL: [LocationType; 2] = [LocationType::Indoor, LocationType::Outdoor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "INDOOR",
            Self::Outdoor => "OUTDOOR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Indoor => "실내",
            Self::Outdoor => "야외",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    #[default]
    Evening,
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "MORNING",
            Self::Afternoon => "AFTERNOON",
            Self::Evening => "EVENING",
            Self::Night => "NIGHT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "오전",
            Self::Afternoon => "오후",
            Self::Evening => "저녁",
            Self::Night => "밤",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0}을(를) 입력해주세요")]
    Missing(&'static str),

    #[error("최대 인원은 2~100명 사이여야 합니다")]
    ParticipantsOutOfRange,

    #[error("예상 비용은 0원 이상이어야 합니다")]
    NegativeCost,

    #[error("알 수 없는 카테고리입니다: {0}")]
    UnknownCategory(String),
}

/// Body of `POST /meetings`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    /// `datetime-local` value, e.g. `2026-05-01T18:30`.
    pub meeting_time: String,
    pub location_name: String,
    pub location_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub max_participants: u32,
    pub expected_cost: i64,
    pub location_type: LocationType,
    pub vibe: String,
    pub time_slot: TimeSlot,
}

impl Default for MeetingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            subcategory: String::new(),
            meeting_time: String::new(),
            location_name: String::new(),
            location_address: String::new(),
            // Seoul City Hall
            latitude: 37.5665,
            longitude: 126.978,
            max_participants: 10,
            expected_cost: 0,
            location_type: LocationType::Outdoor,
            vibe: VIBES[0].to_string(),
            time_slot: TimeSlot::Evening,
        }
    }
}

impl MeetingForm {
    /// Check what the form marks as required before anything is sent.
    pub fn validate(&self) -> Result<(), FormError> {
        let required = [
            (&self.title, "모임 제목"),
            (&self.description, "모임 설명"),
            (&self.category, "카테고리"),
            (&self.meeting_time, "모임 일시"),
            (&self.location_name, "장소 이름"),
            (&self.vibe, "분위기"),
        ];
        if let Some((_, label)) = required.iter().find(|(v, _)| v.trim().is_empty()) {
            return Err(FormError::Missing(*label));
        }
        if !CATEGORIES.contains(&self.category.as_str()) {
            return Err(FormError::UnknownCategory(self.category.clone()));
        }
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&self.max_participants) {
            return Err(FormError::ParticipantsOutOfRange);
        }
        if self.expected_cost < 0 {
            return Err(FormError::NegativeCost);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> MeetingForm {
        MeetingForm {
            title: "한강 선셋 러닝".to_string(),
            description: "퇴근 후 가볍게 5km".to_string(),
            category: "스포츠".to_string(),
            meeting_time: "2026-05-01T19:00".to_string(),
            location_name: "여의도 한강공원".to_string(),
            ..MeetingForm::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = MeetingForm::default();
        assert_eq!(form.max_participants, 10);
        assert_eq!(form.vibe, "활기찬");
        assert_eq!(form.location_type, LocationType::Outdoor);
        assert_eq!(form.time_slot, TimeSlot::Evening);
    }

    #[test]
    fn test_validate() {
        assert_eq!(filled().validate(), Ok(()));
        assert_eq!(
            MeetingForm::default().validate(),
            Err(FormError::Missing("모임 제목"))
        );

        let mut form = filled();
        form.max_participants = 1;
        assert_eq!(form.validate(), Err(FormError::ParticipantsOutOfRange));
        form.max_participants = 101;
        assert_eq!(form.validate(), Err(FormError::ParticipantsOutOfRange));

        let mut form = filled();
        form.expected_cost = -1000;
        assert_eq!(form.validate(), Err(FormError::NegativeCost));

        let mut form = filled();
        form.category = "게임".to_string();
        assert!(matches!(form.validate(), Err(FormError::UnknownCategory(_))));
    }

    #[test]
    fn test_serializes_camel_case_with_enum_names() {
        let value = serde_json::to_value(filled()).unwrap();
        assert_eq!(value["maxParticipants"], 10);
        assert_eq!(value["locationType"], "OUTDOOR");
        assert_eq!(value["timeSlot"], "EVENING");
        assert_eq!(value["locationName"], "여의도 한강공원");
    }
}
