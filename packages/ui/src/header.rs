use dioxus::prelude::*;

use crate::icons::{FaPlus, FaRightFromBracket};
use crate::{use_auth, use_stores, Icon};

/// Top bar with the main sections and the session controls.
///
/// Navigation is reported as an app path through `on_navigate`; the platform
/// package maps it onto its router.
#[component]
pub fn AppHeader(on_navigate: EventHandler<String>) -> Element {
    let auth = use_auth();
    let stores = use_stores();
    let display_name = auth
        .read()
        .user
        .as_ref()
        .map(|u| u.display_name().to_string());

    let auth_store = stores.auth.clone();
    let handle_logout = move |_| {
        let auth_store = auth_store.clone();
        spawn(async move {
            auth_store.logout().await;
            on_navigate.call("/".to_string());
        });
    };

    rsx! {
        header { class: "app-header",
            button {
                class: "brand",
                onclick: move |_| on_navigate.call("/".to_string()),
                "it-da"
            }
            nav { class: "header-nav",
                button { onclick: move |_| on_navigate.call("/meetings".to_string()), "모임 찾기" }
                button { onclick: move |_| on_navigate.call("/category".to_string()), "카테고리" }
                button {
                    class: "header-create",
                    onclick: move |_| on_navigate.call("/meetings/create".to_string()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "모임 만들기" }
                }
            }
            div { class: "header-session",
                if let Some(name) = display_name {
                    span { class: "header-user", "{name}님" }
                    button {
                        class: "header-logout",
                        title: "로그아웃",
                        onclick: handle_logout,
                        Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                    }
                } else {
                    button {
                        class: "header-login",
                        onclick: move |_| on_navigate.call("/login".to_string()),
                        "로그인"
                    }
                }
            }
        }
    }
}
