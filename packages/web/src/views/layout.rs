use dioxus::prelude::*;
use ui::AppHeader;

use crate::{route_for, Route};

/// Header plus the routed page.
#[component]
pub fn AppLayout() -> Element {
    let nav = use_navigator();

    rsx! {
        AppHeader {
            on_navigate: move |path: String| {
                nav.push(route_for(&path));
            },
        }
        main { class: "app-main",
            Outlet::<Route> {}
        }
    }
}
