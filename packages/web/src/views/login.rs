//! Email/password sign-in.

use dioxus::prelude::*;
use store::models::LoginRequest;
use store::Guard;
use ui::{use_auth, use_stores};

use super::Guarded;
use crate::Route;

#[component]
pub fn Login() -> Element {
    rsx! {
        Guarded { guards: vec![Guard::PublicOnly],
            LoginForm {}
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let stores = use_stores();
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);

    let auth_store = stores.auth.clone();
    use_drop(move || auth_store.clear_error());

    let auth_store = stores.auth.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let credentials = LoginRequest {
            email: email().trim().to_string(),
            password: password(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return;
        }
        let auth_store = auth_store.clone();
        spawn(async move {
            if auth_store.login(credentials).await.is_ok() {
                nav.push(Route::Home {});
            }
        });
    };

    let (loading, error) = {
        let state = auth.read();
        (state.is_loading, state.error.clone())
    };

    rsx! {
        div { class: "auth-page",
            h1 { class: "auth-title", "로그인" }
            form { class: "auth-form", onsubmit: handle_submit,
                label { r#for: "login-email", "이메일" }
                input {
                    id: "login-email",
                    r#type: "email",
                    autocomplete: "email",
                    value: "{email}",
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                label { r#for: "login-password", "비밀번호" }
                input {
                    id: "login-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                if let Some(error) = error {
                    p { class: "form-error", "{error}" }
                }
                button { class: "primary-button", r#type: "submit", disabled: loading,
                    if loading { "로그인 중..." } else { "로그인" }
                }
            }
            p { class: "auth-switch",
                "아직 회원이 아니신가요? "
                button {
                    class: "link-button",
                    onclick: move |_| {
                        nav.push(Route::Signup {});
                    },
                    "회원가입"
                }
            }
        }
    }
}
