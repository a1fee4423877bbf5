//! Platform-specific storage, configuration and browser helpers.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorage`]
//! - **Native**: one file per key under `<data_dir>/itda/` via [`store::FileStorage`]

use store::ClientConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::FileStorage;

/// Durable key/value storage for the current platform.
pub fn platform_storage() -> PlatformStorage {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("itda");
        store::FileStorage::new(base)
    }
}

/// Resolve the client configuration.
///
/// Native builds prefer `<config_dir>/itda/client.toml` when it exists; the
/// compiled-in `embedded` text is the fallback everywhere.
pub fn load_config(embedded: &str) -> ClientConfig {
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let path = dirs::config_dir().map(|d| d.join("itda").join(ClientConfig::filename()));
        if let Some(text) = path.and_then(|p| std::fs::read_to_string(p).ok()) {
            tracing::info!("Using {} from the config directory", ClientConfig::filename());
            return ClientConfig::from_toml_or_default(&text);
        }
    }
    ClientConfig::from_toml_or_default(embedded)
}

/// Blocking message box in the browser; a log line elsewhere.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("{}", message);
    }
}

pub fn scroll_to_top() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let options = web_sys::ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }
}
