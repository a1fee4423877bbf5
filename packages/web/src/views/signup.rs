use dioxus::prelude::*;
use store::models::SignupRequest;
use store::Guard;
use ui::{alert, use_auth, use_stores};

use super::Guarded;
use crate::Route;

#[component]
pub fn Signup() -> Element {
    rsx! {
        Guarded { guards: vec![Guard::PublicOnly],
            SignupForm {}
        }
    }
}

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

#[component]
fn SignupForm() -> Element {
    let stores = use_stores();
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut password_confirm = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut nickname = use_signal(String::new);
    let mut address = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut local_error = use_signal(|| Option::<String>::None);

    let auth_store = stores.auth.clone();
    use_drop(move || auth_store.clear_error());

    let auth_store = stores.auth.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = SignupRequest {
            email: email().trim().to_string(),
            password: password(),
            username: username().trim().to_string(),
            address: address().trim().to_string(),
            nickname: optional(nickname()),
            phone: optional(phone()),
            preferences: None,
        };
        if request.email.is_empty() || request.password.is_empty() || request.username.is_empty() {
            local_error.set(Some("이메일, 비밀번호, 이름은 필수입니다.".to_string()));
            return;
        }
        if request.password != password_confirm() {
            local_error.set(Some("비밀번호가 일치하지 않습니다.".to_string()));
            return;
        }
        local_error.set(None);

        let auth_store = auth_store.clone();
        spawn(async move {
            if auth_store.signup(request).await.is_ok() {
                alert("회원가입이 완료되었습니다. 로그인해주세요.");
                nav.push(Route::Login {});
            }
        });
    };

    let (loading, error) = {
        let state = auth.read();
        (state.is_loading, local_error().or_else(|| state.error.clone()))
    };

    rsx! {
        div { class: "auth-page",
            h1 { class: "auth-title", "회원가입" }
            form { class: "auth-form", onsubmit: handle_submit,
                label { r#for: "signup-email", "이메일" }
                input {
                    id: "signup-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                label { r#for: "signup-password", "비밀번호" }
                input {
                    id: "signup-password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: "{password}",
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                label { r#for: "signup-password-confirm", "비밀번호 확인" }
                input {
                    id: "signup-password-confirm",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: "{password_confirm}",
                    oninput: move |evt: FormEvent| password_confirm.set(evt.value()),
                }
                label { r#for: "signup-username", "이름" }
                input {
                    id: "signup-username",
                    value: "{username}",
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }
                label { r#for: "signup-nickname", "닉네임 (선택)" }
                input {
                    id: "signup-nickname",
                    value: "{nickname}",
                    oninput: move |evt: FormEvent| nickname.set(evt.value()),
                }
                label { r#for: "signup-address", "주소" }
                input {
                    id: "signup-address",
                    placeholder: "서울시 강남구",
                    value: "{address}",
                    oninput: move |evt: FormEvent| address.set(evt.value()),
                }
                label { r#for: "signup-phone", "전화번호 (선택)" }
                input {
                    id: "signup-phone",
                    r#type: "tel",
                    value: "{phone}",
                    oninput: move |evt: FormEvent| phone.set(evt.value()),
                }
                if let Some(error) = error {
                    p { class: "form-error", "{error}" }
                }
                button { class: "primary-button", r#type: "submit", disabled: loading,
                    if loading { "가입 중..." } else { "가입하기" }
                }
            }
            p { class: "auth-switch",
                "이미 계정이 있으신가요? "
                button {
                    class: "link-button",
                    onclick: move |_| {
                        nav.push(Route::Login {});
                    },
                    "로그인"
                }
            }
        }
    }
}
