use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Yes/no question on top of a [`ModalOverlay`].
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "확인".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay { on_close: on_cancel,
            h3 { class: "modal-title", "{title}" }
            p { class: "modal-message", "{message}" }
            div { class: "modal-actions",
                button { class: "secondary-button", onclick: move |_| on_cancel.call(()), "취소" }
                button { class: "primary-button", onclick: move |_| on_confirm.call(()), "{confirm_label}" }
            }
        }
    }
}

/// Spinner covering the page while something slow runs.
#[component]
pub fn LoadingOverlay(
    message: String,
    #[props(default)] detail: String,
) -> Element {
    rsx! {
        div { class: "loading-overlay",
            div { class: "loading-spinner" }
            div { class: "loading-text", "{message}" }
            if !detail.is_empty() {
                div { class: "loading-subtext", "{detail}" }
            }
        }
    }
}
