//! Pieces of the AI matching result page.

use dioxus::prelude::*;
use store::ai_search::RelaxBanner;
use store::display::{cost_text, distance_text, meeting_time_short, meeting_time_text, score_text};
use store::Recommendation;

use crate::icons::{FaCalendarDays, FaLocationDot, FaUsers, FaWonSign};
use crate::Icon;

#[component]
pub fn RelaxNotice(banner: RelaxBanner) -> Element {
    rsx! {
        div { class: "relax-banner",
            {match banner {
                RelaxBanner::Fallback => rsx! {
                    b { "🔁 검색 결과가 없어" }
                    " 과거 취향 기반으로 추천했어요."
                },
                RelaxBanner::Relaxed(label) => rsx! {
                    b { "🔎 조건을 조금 완화해서" }
                    " 찾았어요: {label}"
                },
                RelaxBanner::Exact => rsx! {
                    b { "✅ 요청 조건 그대로" }
                    " 찾았어요."
                },
            }}
        }
    }
}

#[component]
pub fn LowConfidenceNotice(on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "low-confidence-notice",
            p { "🤔 검색어가 애매해서 정확한 추천이 어려울 수 있어요." }
            p { "더 구체적으로 검색해보시겠어요?" }
            button { onclick: move |_| on_retry.call(()), "다시 검색하기" }
        }
    }
}

/// The recommendation in focus: score, key points, details, reasoning, join.
#[component]
pub fn RecommendationCard(
    recommendation: Recommendation,
    show_full_reasoning: bool,
    on_toggle_reasoning: EventHandler<()>,
    on_join: EventHandler<i64>,
    #[props(default)] joining: bool,
) -> Element {
    let rec = recommendation;
    let when = meeting_time_text(rec.meeting_time.as_deref());
    let location = rec.location_name.clone().unwrap_or_else(|| "장소 미정".to_string());
    let distance = distance_text(rec.distance_km)
        .map(|d| format!(" ({d})"))
        .unwrap_or_default();
    let cost = cost_text(rec.expected_cost);
    let score = score_text(rec.match_score);
    let organizer = rec.organizer.as_ref().map(|o| {
        format!("주최 {} · ⭐ {:.1} · 모임 {}회", o.name, o.rating, o.meetings)
    });
    let meeting_id = rec.meeting_id;
    let reasoning_class = if show_full_reasoning {
        "reasoning-text expanded"
    } else {
        "reasoning-text"
    };

    rsx! {
        div { class: "ai-analysis",
            div { class: "match-score",
                div { class: "match-score-number", "{score}" }
                div { class: "match-score-label", "매칭률" }
            }
            if !rec.key_points.is_empty() {
                h3 { "✨ 핵심 포인트" }
                div { class: "key-points",
                    for (idx, point) in rec.key_points.iter().enumerate() {
                        div { key: "{idx}", class: "point-item", "{point}" }
                    }
                }
            }
        }
        div { class: "recommended-meeting",
            if let Some(url) = rec.image_url.clone() {
                img { class: "meeting-image", src: "{url}", alt: "{rec.title}" }
            }
            div { class: "meeting-content",
                h2 { class: "meeting-title", "{rec.title}" }
                div { class: "meeting-info",
                    div { class: "info-row",
                        Icon { icon: FaCalendarDays, width: 14, height: 14 }
                        " {when}"
                    }
                    div { class: "info-row",
                        Icon { icon: FaLocationDot, width: 14, height: 14 }
                        " {location}{distance}"
                    }
                    div { class: "info-row",
                        Icon { icon: FaWonSign, width: 14, height: 14 }
                        " {cost}"
                    }
                    div { class: "info-row",
                        Icon { icon: FaUsers, width: 14, height: 14 }
                        " 현재 {rec.current_participants}명 참여 중 (최대 {rec.max_participants}명)"
                    }
                    if let Some(organizer) = organizer {
                        div { class: "info-row subtle", "{organizer}" }
                    }
                }
                if !rec.reasoning.is_empty() {
                    div { class: "gpt-reasoning",
                        h4 { "🤖 AI가 추천한 이유" }
                        div { class: "{reasoning_class}", "{rec.reasoning}" }
                        button {
                            class: "toggle-reasoning",
                            onclick: move |_| on_toggle_reasoning.call(()),
                            if show_full_reasoning { "접기" } else { "더보기" }
                        }
                    }
                }
                button {
                    class: "join-button",
                    disabled: joining,
                    onclick: move |_| on_join.call(meeting_id),
                    if joining { "참여 신청 중..." } else { "이 모임 참여하기" }
                }
            }
        }
    }
}

/// A compact card for one of the other recommendations.
#[component]
pub fn MiniCard(recommendation: Recommendation, index: usize, on_select: EventHandler<usize>) -> Element {
    let rec = recommendation;
    let when = meeting_time_short(rec.meeting_time.as_deref());
    let location = rec.location_name.clone().unwrap_or_default();
    let score = score_text(rec.match_score);

    rsx! {
        div {
            class: "mini-meeting-card",
            onclick: move |_| on_select.call(index),
            if let Some(url) = rec.image_url.clone() {
                img { class: "mini-card-image", src: "{url}", alt: "{rec.title}" }
            }
            div { class: "mini-card-content",
                div { class: "mini-card-title", "{rec.title}" }
                div { class: "mini-card-info",
                    span { "{location}" }
                    span { "⏰ {when}" }
                }
                div { class: "mini-card-badge", "매칭률 {score}" }
            }
        }
    }
}
