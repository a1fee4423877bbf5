//! Category browsing: the grid and one category's meetings.

use dioxus::prelude::*;
use ui::{category_icon, use_meeting_state, use_stores, CategoryGrid, MeetingGrid};

use crate::Route;

#[component]
pub fn CategoryList() -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "category-page",
            h1 { "카테고리" }
            p { class: "subtle", "관심 있는 분야의 모임을 둘러보세요." }
            CategoryGrid {
                on_select: move |category| {
                    nav.push(Route::CategoryDetail { category, sub: String::new() });
                },
            }
        }
    }
}

/// Meetings of `category`, optionally narrowed to `sub` (empty = all).
#[component]
pub fn CategoryDetail(category: String, sub: String) -> Element {
    let stores = use_stores();
    let meeting_state = use_meeting_state();
    let nav = use_navigator();

    let mut params = use_signal(|| (category.clone(), sub.clone()));
    if *params.peek() != (category.clone(), sub.clone()) {
        params.set((category.clone(), sub.clone()));
    }

    // Chips come from the unfiltered category listing, so they survive picking one.
    let mut subcategories = use_signal(Vec::<String>::new);

    let meetings = stores.meetings.clone();
    let _loader = use_resource(move || {
        let meetings = meetings.clone();
        let (category, sub) = params();
        async move {
            if sub.is_empty() {
                meetings.fetch_meetings_by_category(&category, None).await;
                subcategories.set(meetings.snapshot().subcategories());
            } else {
                meetings.fetch_meetings_by_category(&category, Some(&sub)).await;
            }
        }
    });

    let (list, loading, error) = {
        let state = meeting_state.read();
        (state.meetings.clone(), state.is_loading, state.error.clone())
    };
    let chips = subcategories();

    rsx! {
        div { class: "category-detail-page",
            button {
                class: "link-button",
                onclick: move |_| {
                    nav.push(Route::CategoryList {});
                },
                "← 카테고리"
            }
            h1 { "{category_icon(&category)} {category}" }
            if !chips.is_empty() {
                div { class: "chip-row",
                    button {
                        class: if sub.is_empty() { "chip active" } else { "chip" },
                        onclick: {
                            let category = category.clone();
                            move |_| {
                                nav.push(Route::CategoryDetail {
                                    category: category.clone(),
                                    sub: String::new(),
                                });
                            }
                        },
                        "전체"
                    }
                    for chip in chips {
                        button {
                            key: "{chip}",
                            class: if sub == chip { "chip active" } else { "chip" },
                            onclick: {
                                let category = category.clone();
                                let chip = chip.clone();
                                move |_| {
                                    nav.push(Route::CategoryDetail {
                                        category: category.clone(),
                                        sub: chip.clone(),
                                    });
                                }
                            },
                            "{chip}"
                        }
                    }
                }
            }
            if let Some(error) = error {
                p { class: "form-error", "{error}" }
            }
            if loading {
                p { class: "empty-text", "불러오는 중..." }
            } else {
                MeetingGrid {
                    meetings: list,
                    on_select: move |meeting_id| {
                        nav.push(Route::MeetingDetail { meeting_id });
                    },
                    empty_text: "이 카테고리에는 아직 모임이 없어요",
                }
            }
        }
    }
}
