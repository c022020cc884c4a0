//! History Navigation
//!
//! Keeps the route signal and the address bar in sync through the History API.

use leptos::prelude::*;
use simulator_core::Route;
use wasm_bindgen::JsValue;

/// Path and query of the current address
pub fn current_location() -> String {
    let location = window().location();
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{}{}", path, search)
}

/// Add a history entry for `route`
pub fn push(route: &Route) {
    let url = route.path();
    match window().history() {
        Ok(history) => {
            if history.push_state_with_url(&JsValue::NULL, "", Some(&url)).is_err() {
                log::warn!("pushState to {} failed", url);
            }
        }
        Err(_) => log::warn!("history unavailable"),
    }
}

/// Rewrite the current history entry (redirects)
pub fn replace(route: &Route) {
    let url = route.path();
    if let Ok(history) = window().history() {
        if history.replace_state_with_url(&JsValue::NULL, "", Some(&url)).is_err() {
            log::warn!("replaceState to {} failed", url);
        }
    }
}

/// Follow back/forward buttons into `route`
pub fn listen(route: RwSignal<Route>) {
    let _ = window_event_listener(leptos::ev::popstate, move |_| {
        let next = Route::parse(&current_location());
        log::debug!("popstate -> {}", next.path());
        route.set(next);
    });
}
