//! Route guard wrapper.

use dioxus::prelude::*;
use store::guards::evaluate_all;
use store::{Guard, GuardDecision};
use ui::use_auth;

use crate::route_for;

/// Render `children` only when every guard passes; otherwise redirect (or
/// wait for the first session check).
///
/// Pages put their hooks in a child component so nothing runs, and nothing
/// is fetched, for a visitor who is about to be redirected.
#[component]
pub fn Guarded(guards: Vec<Guard>, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let effect_guards = guards.clone();
    use_effect(move || {
        if let GuardDecision::Redirect(path) = evaluate_all(&effect_guards, &auth.read()) {
            tracing::debug!("Guard redirect to {}", path);
            nav.replace(route_for(path));
        }
    });

    let decision = evaluate_all(&guards, &auth.read());
    match decision {
        GuardDecision::Render => rsx! { {children} },
        GuardDecision::Redirect(_) | GuardDecision::Wait => rsx! {},
    }
}
