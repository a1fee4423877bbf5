//! AI matching results for a free-text prompt (`/ai-matching?q=`).

use dioxus::prelude::*;
use store::ai_search::{classify, AiSearchState, SearchView};
use store::Guard;
use ui::{
    alert, scroll_to_top, use_ai_search_state, use_auth, use_stores, LoadingOverlay,
    LowConfidenceNotice, MiniCard, RecommendationCard, RelaxNotice,
};

use super::Guarded;
use crate::Route;

#[component]
pub fn AiMatching(q: String) -> Element {
    rsx! {
        Guarded { guards: vec![Guard::Preferences, Guard::Session],
            MatchingPage { q }
        }
    }
}

#[component]
fn MatchingPage(q: String) -> Element {
    let stores = use_stores();
    let auth = use_auth();
    let nav = use_navigator();
    let state = use_ai_search_state();
    let search = use_hook(|| {
        // Never flash the previous visit's result.
        let mut state = state;
        state.set(AiSearchState::pending());
        stores.ai_search(state)
    });
    let threshold = stores.config.search.low_confidence_threshold;

    // Route param -> signal, so a new `q` on the same page restarts the search.
    let mut prompt = use_signal(|| q.clone());
    if *prompt.peek() != q {
        prompt.set(q.clone());
    }

    let runner = search.clone();
    use_effect(move || {
        let prompt = prompt();
        if prompt.trim().is_empty() {
            nav.replace(Route::Home {});
            return;
        }
        let runner = runner.clone();
        let user_id = auth.peek().user_id();
        spawn(async move {
            runner.search(prompt.trim(), user_id).await;
        });
    });

    let canceller = search.clone();
    use_drop(move || canceller.cancel());

    let mut joining = use_signal(|| false);
    let meetings = stores.meetings.clone();
    let on_join = move |meeting_id: i64| {
        let meetings = meetings.clone();
        joining.set(true);
        spawn(async move {
            match meetings.join_meeting(meeting_id).await {
                Ok(()) => {
                    alert("모임 참여 신청이 완료되었습니다!");
                    nav.push(Route::MeetingDetail { meeting_id });
                }
                Err(e) => alert(&format!("참여 신청에 실패했습니다: {e}")),
            }
            joining.set(false);
        });
    };

    let selector = search.clone();
    let on_select = EventHandler::new(move |index: usize| {
        selector.select(index);
        scroll_to_top();
    });
    let toggler = search.clone();
    let on_toggle = move |_| toggler.toggle_reasoning();

    let snapshot = state.read().clone();
    let view = classify(&snapshot, threshold);

    rsx! {
        div { class: "ai-matching-page",
            div { class: "prompt-echo",
                span { class: "subtle", "검색어" }
                h1 { "“{snapshot.prompt}”" }
            }
            {match view {
                SearchView::Loading => rsx! {
                    LoadingOverlay {
                        message: "AI가 최적의 모임을 찾고 있어요...",
                        detail: "잠시만 기다려주세요",
                    }
                },
                SearchView::NoResults => rsx! {
                    div { class: "no-results",
                        p { "😢 조건에 맞는 모임을 찾지 못했어요." }
                        p { class: "subtle", "다른 검색어로 다시 시도해보세요." }
                        button {
                            class: "primary-button",
                            onclick: move |_| {
                                nav.push(Route::Home {});
                            },
                            "다시 검색하기"
                        }
                    }
                },
                SearchView::Results { low_confidence, banner } => {
                    let recommendations = snapshot
                        .result
                        .as_ref()
                        .map(|r| r.recommendations.clone())
                        .unwrap_or_default();
                    let current_index = snapshot.current_index;
                    rsx! {
                        if low_confidence {
                            LowConfidenceNotice {
                                on_retry: move |_| {
                                    nav.push(Route::Home {});
                                },
                            }
                        }
                        if let Some(banner) = banner {
                            RelaxNotice { banner }
                        }
                        if let Some(current) = snapshot.current().cloned() {
                            RecommendationCard {
                                recommendation: current,
                                show_full_reasoning: snapshot.show_full_reasoning,
                                on_toggle_reasoning: on_toggle,
                                on_join,
                                joining: joining(),
                            }
                        }
                        if recommendations.len() > 1 {
                            h3 { class: "section-title", "다른 추천 모임" }
                            div { class: "mini-cards",
                                for (index, recommendation) in recommendations.into_iter().enumerate() {
                                    if index != current_index {
                                        MiniCard {
                                            key: "{index}",
                                            recommendation,
                                            index,
                                            on_select,
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }}
        }
    }
}
