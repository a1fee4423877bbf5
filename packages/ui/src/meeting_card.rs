//! Meeting cards for listings, search results and the personalized pick.

use dioxus::prelude::*;
use store::display::{cost_text, meeting_time_short, participants_text};
use store::MeetingSummary;

use crate::icons::{FaCalendarDays, FaLocationDot, FaStar, FaUsers};
use crate::Icon;

#[component]
pub fn MeetingCard(meeting: MeetingSummary, on_select: EventHandler<i64>) -> Element {
    let title = meeting.title.clone().unwrap_or_default();
    let location = meeting.location_name.clone().unwrap_or_else(|| "장소 미정".to_string());
    let when = meeting_time_short(meeting.meeting_time.as_deref());
    let members = participants_text(meeting.current_participants, meeting.max_participants);
    let cost = cost_text(meeting.expected_cost.unwrap_or(0));
    let meeting_id = meeting.meeting_id;

    rsx! {
        article {
            class: "meeting-card",
            onclick: move |_| {
                if let Some(id) = meeting_id {
                    on_select.call(id);
                }
            },
            if let Some(url) = meeting.image_url.clone() {
                img { class: "meeting-thumb", src: "{url}", alt: "{title}" }
            } else {
                div { class: "meeting-thumb placeholder", "🎈" }
            }
            div { class: "meeting-body",
                div { class: "meeting-tags",
                    if let Some(category) = meeting.category.clone() {
                        span { class: "tag", "{category}" }
                    }
                    if let Some(vibe) = meeting.vibe.clone() {
                        span { class: "tag subtle", "{vibe}" }
                    }
                }
                h3 { class: "meeting-title", "{title}" }
                div { class: "meeting-meta",
                    span { Icon { icon: FaLocationDot, width: 12, height: 12 } " {location}" }
                    span { Icon { icon: FaCalendarDays, width: 12, height: 12 } " {when}" }
                }
                div { class: "meeting-meta",
                    span { Icon { icon: FaUsers, width: 12, height: 12 } " {members}" }
                    span { class: "meeting-cost", "{cost}" }
                    if let Some(rating) = meeting.avg_rating {
                        span { Icon { icon: FaStar, width: 12, height: 12 } " {rating:.1}" }
                    }
                }
            }
        }
    }
}

/// Grid of meeting cards with an empty-state line.
#[component]
pub fn MeetingGrid(
    meetings: Vec<MeetingSummary>,
    on_select: EventHandler<i64>,
    #[props(default = "아직 모임이 없어요".to_string())] empty_text: String,
) -> Element {
    rsx! {
        if meetings.is_empty() {
            p { class: "empty-text", "{empty_text}" }
        } else {
            div { class: "meeting-grid",
                for (idx, meeting) in meetings.into_iter().enumerate() {
                    MeetingCard {
                        key: "{idx}",
                        meeting,
                        on_select,
                    }
                }
            }
        }
    }
}

/// The personalized recommendation shown on the home page.
#[component]
pub fn AiRecommendCard(meeting: MeetingSummary, on_select: EventHandler<i64>) -> Element {
    let title = meeting.title.clone().unwrap_or_default();
    let location = meeting.location_name.clone().unwrap_or_default();
    let when = meeting_time_short(meeting.meeting_time.as_deref());
    let meeting_id = meeting.meeting_id;

    rsx! {
        section { class: "ai-recommend-card",
            div { class: "ai-recommend-label", "🤖 AI 맞춤 추천" }
            div { class: "ai-recommend-body",
                if let Some(url) = meeting.image_url.clone() {
                    img { class: "ai-recommend-image", src: "{url}", alt: "{title}" }
                }
                div {
                    h3 { "{title}" }
                    p { class: "meeting-meta", "{location} · {when}" }
                    if let Some(description) = meeting.description.clone() {
                        p { class: "ai-recommend-description", "{description}" }
                    }
                }
            }
            button {
                class: "primary-button",
                disabled: meeting_id.is_none(),
                onclick: move |_| {
                    if let Some(id) = meeting_id {
                        on_select.call(id);
                    }
                },
                "자세히 보기"
            }
        }
    }
}
