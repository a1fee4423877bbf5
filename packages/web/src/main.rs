use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::{load_config, StoreProvider};
use views::{
    AiMatching, AppLayout, CategoryDetail, CategoryList, Home, Login, MeetingCreate,
    MeetingDetail, MeetingList, PreferenceSetup, Signup,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
        #[route("/user-preference/setup")]
        PreferenceSetup {},
        #[route("/ai-matching?:q")]
        AiMatching { q: String },
        #[route("/meetings")]
        MeetingList {},
        #[route("/meetings/create")]
        MeetingCreate {},
        #[route("/meetings/:meeting_id")]
        MeetingDetail { meeting_id: i64 },
        #[route("/category")]
        CategoryList {},
        #[route("/category/:category?:sub")]
        CategoryDetail { category: String, sub: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CLIENT_TOML: &str = include_str!("../client.toml");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("Logger already initialized: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| load_config(CLIENT_TOML));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::UI_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        StoreProvider { config,
            Router::<Route> {}
        }
    }
}

/// Resolve an app path such as `/meetings/3` to a route, falling back to home.
fn route_for(path: &str) -> Route {
    path.parse::<Route>().unwrap_or_else(|e| {
        tracing::warn!("No route for {}: {}", path, e);
        Route::Home {}
    })
}
