//! All meetings with keyword search and a category filter.

use dioxus::prelude::*;
use store::form::CATEGORIES;
use store::meeting::ALL_CATEGORIES;
use ui::{use_meeting_state, use_stores, MeetingGrid, SearchSection};

use crate::Route;

#[component]
pub fn MeetingList() -> Element {
    let stores = use_stores();
    let meeting_state = use_meeting_state();
    let nav = use_navigator();

    let meetings = stores.meetings.clone();
    let _loader = use_resource(move || {
        let meetings = meetings.clone();
        async move {
            meetings.set_search_query("");
            meetings.fetch_meetings().await;
        }
    });

    let meetings = stores.meetings.clone();
    let on_search = move |keyword: String| {
        let meetings = meetings.clone();
        spawn(async move { meetings.search_meetings(&keyword).await });
    };

    let meetings = stores.meetings.clone();
    let on_reset = move |_| {
        let meetings = meetings.clone();
        spawn(async move {
            meetings.set_search_query("");
            meetings.fetch_meetings().await;
        });
    };

    let (visible, selected, query, loading) = {
        let state = meeting_state.read();
        (
            state.visible_meetings().into_iter().cloned().collect::<Vec<_>>(),
            state.selected_category.clone(),
            state.search_query.clone(),
            state.is_loading,
        )
    };
    let filters: Vec<&'static str> = std::iter::once(ALL_CATEGORIES)
        .chain(CATEGORIES.iter().copied())
        .collect();

    rsx! {
        div { class: "meeting-list-page",
            h1 { "모임 찾기" }
            SearchSection {
                on_search,
                placeholder: "모임 이름이나 키워드로 검색",
                show_examples: false,
            }
            if !query.is_empty() {
                div { class: "search-summary",
                    span { "“{query}” 검색 결과 {visible.len()}개" }
                    button { class: "link-button", onclick: on_reset, "전체 모임 보기" }
                }
            }
            div { class: "chip-row",
                for category in filters {
                    button {
                        key: "{category}",
                        class: if selected == category { "chip active" } else { "chip" },
                        onclick: {
                            let meetings = stores.meetings.clone();
                            move |_| meetings.set_category(category)
                        },
                        "{category}"
                    }
                }
            }
            if loading {
                p { class: "empty-text", "불러오는 중..." }
            } else {
                MeetingGrid {
                    meetings: visible,
                    on_select: move |meeting_id| {
                        nav.push(Route::MeetingDetail { meeting_id });
                    },
                    empty_text: "조건에 맞는 모임이 없어요",
                }
            }
        }
    }
}
