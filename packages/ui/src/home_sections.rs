//! Home page building blocks: prompt search, recent strip and category grid.

use dioxus::prelude::*;
use store::form::CATEGORIES;
use store::models::{RecentItem, RecentItemKind};

use crate::icons::FaMagnifyingGlass;
use crate::Icon;

const EXAMPLE_PROMPTS: &[&str] = &[
    "이번 주말 한강에서 가볍게 러닝할 사람",
    "퇴근 후 조용한 카페에서 책 읽기",
    "비용 부담 없는 저녁 보드게임",
];

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "스포츠" => "⚽",
        "맛집" => "🍜",
        "카페" => "☕",
        "문화예술" => "🎨",
        "스터디" => "📚",
        "취미활동" => "🎸",
        "소셜" => "🥂",
        _ => "✨",
    }
}

fn kind_label(kind: RecentItemKind) -> &'static str {
    match kind {
        RecentItemKind::Chat => "채팅",
        RecentItemKind::Meeting => "모임",
    }
}

/// Free-text prompt box. Blank submissions are ignored.
#[component]
pub fn SearchSection(
    on_search: EventHandler<String>,
    #[props(default = "어떤 모임을 찾고 있나요? AI가 찾아드릴게요".to_string())] placeholder: String,
    #[props(default = true)] show_examples: bool,
) -> Element {
    let mut query = use_signal(String::new);

    let submit = move |text: String| {
        let text = text.trim().to_string();
        if !text.is_empty() {
            on_search.call(text);
        }
    };

    rsx! {
        section { class: "search-section",
            form {
                class: "search-box",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit(query());
                },
                input {
                    r#type: "text",
                    placeholder: "{placeholder}",
                    value: "{query}",
                    oninput: move |evt: FormEvent| query.set(evt.value()),
                }
                button { r#type: "submit", class: "search-button",
                    Icon { icon: FaMagnifyingGlass, width: 16, height: 16 }
                }
            }
            if show_examples {
                div { class: "example-prompts",
                    for prompt in EXAMPLE_PROMPTS.iter().copied() {
                        button {
                            key: "{prompt}",
                            class: "chip",
                            onclick: move |_| submit(prompt.to_string()),
                            "{prompt}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn RecentItems(items: Vec<RecentItem>, on_select: EventHandler<RecentItem>) -> Element {
    rsx! {
        section { class: "recent-items",
            h2 { class: "section-title", "최근 활동" }
            div { class: "recent-strip",
                for item in items {
                    button {
                        key: "{item.id}",
                        class: "recent-item",
                        onclick: {
                            let item = item.clone();
                            move |_| on_select.call(item.clone())
                        },
                        span { class: "recent-icon", "{item.icon}" }
                        span { class: "recent-title", "{item.title}" }
                        span { class: "recent-time", "{kind_label(item.kind)} · {item.time}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn CategoryGrid(on_select: EventHandler<String>) -> Element {
    rsx! {
        div { class: "category-grid",
            for category in CATEGORIES.iter().copied() {
                button {
                    key: "{category}",
                    class: "category-tile",
                    onclick: move |_| on_select.call(category.to_string()),
                    span { class: "category-icon", "{category_icon(category)}" }
                    span { class: "category-name", "{category}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_an_icon() {
        for category in CATEGORIES {
            assert_ne!(category_icon(category), "✨", "{category}");
        }
        assert_eq!(category_icon("게임"), "✨");
    }
}
