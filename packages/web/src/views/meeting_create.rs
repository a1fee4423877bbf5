//! New meeting form.

use dioxus::prelude::*;
use store::form::{LocationType, MeetingForm, TimeSlot, CATEGORIES, MAX_PARTICIPANTS, MIN_PARTICIPANTS, VIBES};
use store::Guard;
use ui::{alert, use_stores};

use super::Guarded;
use crate::Route;

#[component]
pub fn MeetingCreate() -> Element {
    rsx! {
        Guarded { guards: vec![Guard::Session],
            CreateForm {}
        }
    }
}

#[component]
fn CreateForm() -> Element {
    let stores = use_stores();
    let nav = use_navigator();
    let mut form = use_signal(MeetingForm::default);
    let mut submitting = use_signal(|| false);

    let meetings = stores.meetings.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let meetings = meetings.clone();
        let current = form();
        submitting.set(true);
        spawn(async move {
            match meetings.create_meeting(&current).await {
                Ok(meeting_id) => {
                    alert("모임이 생성되었습니다!");
                    nav.push(Route::MeetingDetail { meeting_id });
                }
                Err(e) => alert(&e.to_string()),
            }
            submitting.set(false);
        });
    };

    let f = form.read().clone();

    rsx! {
        div { class: "meeting-create-page",
            h1 { "모임 만들기" }
            form { class: "meeting-form", onsubmit: handle_submit,
                label { r#for: "meeting-title", "모임 제목" }
                input {
                    id: "meeting-title",
                    value: "{f.title}",
                    placeholder: "예: 한강 저녁 러닝",
                    oninput: move |evt: FormEvent| form.write().title = evt.value(),
                }

                label { r#for: "meeting-description", "모임 설명" }
                textarea {
                    id: "meeting-description",
                    rows: "4",
                    value: "{f.description}",
                    oninput: move |evt: FormEvent| form.write().description = evt.value(),
                }

                div { class: "form-row",
                    div {
                        label { r#for: "meeting-category", "카테고리" }
                        select {
                            id: "meeting-category",
                            value: "{f.category}",
                            onchange: move |evt: FormEvent| form.write().category = evt.value(),
                            option { value: "", disabled: true, "선택해주세요" }
                            for category in CATEGORIES.iter().copied() {
                                option { key: "{category}", value: "{category}", "{category}" }
                            }
                        }
                    }
                    div {
                        label { r#for: "meeting-subcategory", "세부 카테고리" }
                        input {
                            id: "meeting-subcategory",
                            value: "{f.subcategory}",
                            placeholder: "예: 러닝",
                            oninput: move |evt: FormEvent| form.write().subcategory = evt.value(),
                        }
                    }
                }

                label { r#for: "meeting-time", "모임 일시" }
                input {
                    id: "meeting-time",
                    r#type: "datetime-local",
                    value: "{f.meeting_time}",
                    oninput: move |evt: FormEvent| form.write().meeting_time = evt.value(),
                }

                label { r#for: "meeting-location", "장소 이름" }
                input {
                    id: "meeting-location",
                    value: "{f.location_name}",
                    oninput: move |evt: FormEvent| form.write().location_name = evt.value(),
                }
                label { r#for: "meeting-address", "주소" }
                input {
                    id: "meeting-address",
                    value: "{f.location_address}",
                    oninput: move |evt: FormEvent| form.write().location_address = evt.value(),
                }

                div { class: "form-row",
                    div {
                        label { r#for: "meeting-max", "최대 인원" }
                        input {
                            id: "meeting-max",
                            r#type: "number",
                            min: "{MIN_PARTICIPANTS}",
                            max: "{MAX_PARTICIPANTS}",
                            value: "{f.max_participants}",
                            oninput: move |evt: FormEvent| {
                                if let Ok(n) = evt.value().parse() {
                                    form.write().max_participants = n;
                                }
                            },
                        }
                    }
                    div {
                        label { r#for: "meeting-cost", "예상 비용 (원)" }
                        input {
                            id: "meeting-cost",
                            r#type: "number",
                            min: "0",
                            step: "1000",
                            value: "{f.expected_cost}",
                            oninput: move |evt: FormEvent| {
                                if let Ok(n) = evt.value().parse() {
                                    form.write().expected_cost = n;
                                }
                            },
                        }
                    }
                }

                label { "장소 유형" }
                div { class: "chip-row",
                    for location_type in LocationType::ALL {
                        button {
                            key: "{location_type.as_str()}",
                            r#type: "button",
                            class: if f.location_type == location_type { "chip active" } else { "chip" },
                            onclick: move |_| form.write().location_type = location_type,
                            "{location_type.label()}"
                        }
                    }
                }

                label { "시간대" }
                div { class: "chip-row",
                    for slot in TimeSlot::ALL {
                        button {
                            key: "{slot.as_str()}",
                            r#type: "button",
                            class: if f.time_slot == slot { "chip active" } else { "chip" },
                            onclick: move |_| form.write().time_slot = slot,
                            "{slot.label()}"
                        }
                    }
                }

                label { "분위기" }
                div { class: "chip-row",
                    for vibe in VIBES.iter().copied() {
                        button {
                            key: "{vibe}",
                            r#type: "button",
                            class: if f.vibe == vibe { "chip active" } else { "chip" },
                            onclick: move |_| form.write().vibe = vibe.to_string(),
                            "{vibe}"
                        }
                    }
                }

                button {
                    class: "primary-button wide",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "만드는 중..." } else { "모임 만들기" }
                }
            }
        }
    }
}
