use dioxus::prelude::*;
use store::display::{cost_text, meeting_time_text, participants_text};
use ui::icons::{FaCalendarDays, FaLocationDot, FaUsers, FaWonSign};
use ui::{alert, use_auth, use_meeting_state, use_stores, ConfirmDialog, Icon};

use crate::Route;

#[component]
pub fn MeetingDetail(meeting_id: i64) -> Element {
    let stores = use_stores();
    let auth = use_auth();
    let meeting_state = use_meeting_state();
    let nav = use_navigator();

    let mut id_signal = use_signal(|| meeting_id);
    if *id_signal.peek() != meeting_id {
        id_signal.set(meeting_id);
    }

    let meetings = stores.meetings.clone();
    let mut loader = use_resource(move || {
        let meetings = meetings.clone();
        let id = id_signal();
        async move { meetings.fetch_meeting_by_id(id).await }
    });

    let mut confirming = use_signal(|| false);
    let mut joining = use_signal(|| false);

    let meetings = stores.meetings.clone();
    let handle_join = move |_| {
        confirming.set(false);
        let meetings = meetings.clone();
        let id = id_signal();
        joining.set(true);
        spawn(async move {
            match meetings.join_meeting(id).await {
                Ok(()) => {
                    alert("모임 참여 신청이 완료되었습니다!");
                    loader.restart();
                }
                Err(e) => alert(&format!("참여 신청에 실패했습니다: {e}")),
            }
            joining.set(false);
        });
    };

    let on_join_click = move |_| {
        if auth.read().is_authenticated() {
            confirming.set(true);
        } else {
            alert("로그인이 필요합니다.");
            nav.push(Route::Login {});
        }
    };

    let (detail, loading, error) = {
        let state = meeting_state.read();
        (
            state
                .current_meeting
                .clone()
                .filter(|d| d.summary.meeting_id == Some(meeting_id)),
            state.is_loading,
            state.error.clone(),
        )
    };

    let Some(detail) = detail else {
        return rsx! {
            div { class: "meeting-detail-page",
                if let Some(error) = error {
                    p { class: "form-error", "{error}" }
                    button {
                        class: "secondary-button",
                        onclick: move |_| {
                            nav.push(Route::MeetingList {});
                        },
                        "목록으로"
                    }
                } else if loading {
                    p { class: "empty-text", "불러오는 중..." }
                }
            }
        };
    };

    let summary = &detail.summary;
    let title = summary.title.clone().unwrap_or_default();
    let when = meeting_time_text(summary.meeting_time.as_deref());
    let location = summary.location_name.clone().unwrap_or_else(|| "장소 미정".to_string());
    let address = detail.location_address.clone().unwrap_or_default();
    let cost = cost_text(summary.expected_cost.unwrap_or(0));
    let members = participants_text(summary.current_participants, summary.max_participants);
    let organizer = detail.organizer.as_ref().map(|o| {
        o.nickname
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| o.username.clone())
            .unwrap_or_default()
    });
    let is_full = matches!(
        (summary.current_participants, summary.max_participants),
        (Some(current), Some(max)) if current >= max
    );

    rsx! {
        div { class: "meeting-detail-page",
            if let Some(url) = summary.image_url.clone() {
                img { class: "meeting-image", src: "{url}", alt: "{title}" }
            }
            div { class: "meeting-tags",
                if let Some(category) = summary.category.clone() {
                    span { class: "tag", "{category}" }
                }
                if let Some(sub) = summary.subcategory.clone() {
                    span { class: "tag subtle", "{sub}" }
                }
                if let Some(vibe) = summary.vibe.clone() {
                    span { class: "tag subtle", "{vibe}" }
                }
            }
            h1 { class: "meeting-title", "{title}" }
            if let Some(name) = organizer {
                p { class: "subtle", "주최 {name}" }
            }
            div { class: "meeting-info",
                div { class: "info-row",
                    Icon { icon: FaCalendarDays, width: 14, height: 14 }
                    " {when}"
                }
                div { class: "info-row",
                    Icon { icon: FaLocationDot, width: 14, height: 14 }
                    " {location}"
                    if !address.is_empty() {
                        span { class: "subtle", " · {address}" }
                    }
                }
                div { class: "info-row",
                    Icon { icon: FaWonSign, width: 14, height: 14 }
                    " {cost}"
                }
                div { class: "info-row",
                    Icon { icon: FaUsers, width: 14, height: 14 }
                    " {members}"
                }
            }
            if let Some(description) = summary.description.clone() {
                p { class: "meeting-description", "{description}" }
            }
            button {
                class: "join-button",
                disabled: joining() || is_full,
                onclick: on_join_click,
                if is_full {
                    "모집 마감"
                } else if joining() {
                    "참여 신청 중..."
                } else {
                    "참여하기"
                }
            }
        }
        if confirming() {
            ConfirmDialog {
                title: "모임 참여",
                message: "「{title}」 모임에 참여 신청할까요?",
                confirm_label: "참여하기",
                on_confirm: handle_join,
                on_cancel: move |_| confirming.set(false),
            }
        }
    }
}
