use dioxus::prelude::*;
use store::models::{RecentItem, RecentItemKind};
use store::Guard;
use ui::{
    alert, use_auth, use_meeting_state, use_stores, AiRecommendCard, CategoryGrid, MeetingGrid,
    RecentItems, SearchSection,
};

use super::Guarded;
use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        Guarded { guards: vec![Guard::Preferences],
            HomePage {}
        }
    }
}

#[component]
fn HomePage() -> Element {
    let stores = use_stores();
    let auth = use_auth();
    let meeting_state = use_meeting_state();
    let nav = use_navigator();
    let preview = stores.config.home.meeting_preview;

    // Only the user id, so session loading flags do not refetch.
    let signed_in_id = use_memo(move || auth.read().user_id());

    let meetings = stores.meetings.clone();
    let _loader = use_resource(move || {
        let meetings = meetings.clone();
        let user_id = signed_in_id();
        async move {
            meetings.fetch_recent_items();
            meetings.fetch_meetings().await;
            if let Some(user_id) = user_id {
                meetings.fetch_ai_recommendation(user_id).await;
            }
        }
    });

    let on_search = move |query: String| {
        nav.push(Route::AiMatching { q: query });
    };

    let on_recent = move |item: RecentItem| match item.kind {
        RecentItemKind::Meeting => {
            nav.push(Route::MeetingDetail { meeting_id: item.id });
        }
        RecentItemKind::Chat => alert("채팅은 아직 준비 중이에요."),
    };

    let (preview_meetings, recent, pick, loading) = {
        let state = meeting_state.read();
        (
            state.meetings.iter().take(preview).cloned().collect::<Vec<_>>(),
            state.recent_items.clone(),
            state.ai_recommendation.clone(),
            state.is_loading,
        )
    };
    let greeting = auth
        .read()
        .user
        .as_ref()
        .map(|u| format!("{}님, 오늘은 어떤 모임을 찾으세요?", u.display_name()))
        .unwrap_or_else(|| "오늘은 어떤 모임을 찾으세요?".to_string());

    rsx! {
        div { class: "home-page",
            h1 { class: "home-greeting", "{greeting}" }
            SearchSection { on_search }

            if let Some(meeting) = pick {
                AiRecommendCard {
                    meeting,
                    on_select: move |meeting_id| {
                        nav.push(Route::MeetingDetail { meeting_id });
                    },
                }
            }

            if !recent.is_empty() {
                RecentItems { items: recent, on_select: on_recent }
            }

            section {
                h2 { class: "section-title", "카테고리" }
                CategoryGrid {
                    on_select: move |category| {
                        nav.push(Route::CategoryDetail { category, sub: String::new() });
                    },
                }
            }

            section {
                div { class: "section-header",
                    h2 { class: "section-title", "새로 열린 모임" }
                    button {
                        class: "link-button",
                        onclick: move |_| {
                            nav.push(Route::MeetingList {});
                        },
                        "전체 보기"
                    }
                }
                if loading && preview_meetings.is_empty() {
                    p { class: "empty-text", "불러오는 중..." }
                } else {
                    MeetingGrid {
                        meetings: preview_meetings,
                        on_select: move |meeting_id| {
                            nav.push(Route::MeetingDetail { meeting_id });
                        },
                    }
                }
            }
        }
    }
}
