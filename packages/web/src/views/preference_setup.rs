//! First-run preference profile: interests, preferred time, budget.

use dioxus::prelude::*;
use store::form::CATEGORIES;
use store::models::{BudgetType, PreferenceProfile, TimePreference};
use store::Guard;
use ui::{alert, category_icon, use_auth, use_stores};

use super::Guarded;
use crate::Route;

const TIME_CHOICES: [(TimePreference, &str); 3] = [
    (TimePreference::Morning, "오전"),
    (TimePreference::Afternoon, "오후"),
    (TimePreference::Evening, "저녁"),
];

const BUDGET_CHOICES: [(BudgetType, &str); 2] = [
    (BudgetType::Free, "무료 모임 위주"),
    (BudgetType::Paid, "유료도 괜찮아요"),
];

#[component]
pub fn PreferenceSetup() -> Element {
    rsx! {
        Guarded { guards: vec![Guard::Session],
            PreferenceForm {}
        }
    }
}

#[component]
fn PreferenceForm() -> Element {
    let stores = use_stores();
    let auth = use_auth();
    let nav = use_navigator();
    let mut profile = use_signal(PreferenceProfile::default);

    let auth_store = stores.auth.clone();
    let handle_save = move |_| {
        let current = profile();
        if current.interests.is_empty() {
            alert("관심 카테고리를 하나 이상 선택해주세요.");
            return;
        }
        let auth_store = auth_store.clone();
        spawn(async move {
            match auth_store.save_preferences(current).await {
                Ok(()) => {
                    nav.push(Route::Home {});
                }
                Err(e) => alert(&format!("선호도 저장에 실패했습니다: {e}")),
            }
        });
    };

    let saving = auth.read().is_loading;
    let selected = profile.read().clone();

    rsx! {
        div { class: "preference-page",
            h1 { "어떤 모임을 좋아하세요?" }
            p { class: "subtle", "선택한 내용을 바탕으로 AI가 모임을 추천해드려요." }

            h2 { class: "section-title", "관심 카테고리" }
            div { class: "category-grid",
                for category in CATEGORIES.iter().copied() {
                    button {
                        key: "{category}",
                        class: if selected.interests.iter().any(|c| c == category) { "category-tile active" } else { "category-tile" },
                        onclick: move |_| {
                            let mut p = profile.write();
                            if let Some(pos) = p.interests.iter().position(|c| c == category) {
                                p.interests.remove(pos);
                            } else {
                                p.interests.push(category.to_string());
                            }
                        },
                        span { class: "category-icon", "{category_icon(category)}" }
                        span { class: "category-name", "{category}" }
                    }
                }
            }

            h2 { class: "section-title", "선호 시간대" }
            div { class: "chip-row",
                for (time, label) in TIME_CHOICES {
                    button {
                        key: "{label}",
                        class: if selected.time_preference == time { "chip active" } else { "chip" },
                        onclick: move |_| profile.write().time_preference = time,
                        "{label}"
                    }
                }
            }

            h2 { class: "section-title", "예산" }
            div { class: "chip-row",
                for (budget, label) in BUDGET_CHOICES {
                    button {
                        key: "{label}",
                        class: if selected.budget_type == budget { "chip active" } else { "chip" },
                        onclick: move |_| profile.write().budget_type = budget,
                        "{label}"
                    }
                }
            }

            button {
                class: "primary-button wide",
                disabled: saving,
                onclick: handle_save,
                if saving { "저장 중..." } else { "시작하기" }
            }
        }
    }
}
