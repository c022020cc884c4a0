//! Application Routes
//!
//! URL paths the front-end understands, parsed into a typed route.

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const CHARACTER_PATH: &str = "/character";

/// Paths reachable without a session
pub const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH, REGISTER_PATH];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Login, optionally remembering where the user was headed
    Login { from: Option<String> },
    Register,
    Character,
    Profile,
    Simulator { lesson_id: u64, simulator_id: u64 },
    NotFound(String),
}

impl Route {
    pub fn simulator(lesson_id: u64, simulator_id: u64) -> Self {
        Route::Simulator { lesson_id, simulator_id }
    }

    /// Parse a `pathname[?query]` string
    pub fn parse(location: &str) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => return Route::Home,
            LOGIN_PATH => return Route::Login { from: query.and_then(from_param) },
            REGISTER_PATH => return Route::Register,
            CHARACTER_PATH => return Route::Character,
            "/profile" => return Route::Profile,
            _ => {}
        }

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        if let ["lesson", lesson, "simulator", simulator] = segments.as_slice() {
            if let (Ok(lesson_id), Ok(simulator_id)) = (lesson.parse(), simulator.parse()) {
                return Route::Simulator { lesson_id, simulator_id };
            }
        }
        Route::NotFound(path.to_string())
    }

    /// Path (with query) this route is served at
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login { from: None } => LOGIN_PATH.to_string(),
            Route::Login { from: Some(from) } => {
                format!("{}?from={}", LOGIN_PATH, utf8_percent_encode(from, NON_ALPHANUMERIC))
            }
            Route::Register => REGISTER_PATH.to_string(),
            Route::Character => CHARACTER_PATH.to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Simulator { lesson_id, simulator_id } => {
                format!("/lesson/{}/simulator/{}", lesson_id, simulator_id)
            }
            Route::NotFound(path) => path.clone(),
        }
    }
}

fn from_param(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "from")
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .filter(|value| value.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulator_route() {
        assert_eq!(Route::parse("/lesson/4/simulator/17"), Route::simulator(4, 17));
        assert_eq!(Route::parse("/lesson/4/simulator/17/"), Route::simulator(4, 17));
        assert_eq!(
            Route::parse("/lesson/x/simulator/17"),
            Route::NotFound("/lesson/x/simulator/17".to_string())
        );
    }

    #[test]
    fn test_login_keeps_redirect_target() {
        let route = Route::Login { from: Some("/lesson/2/simulator/5".to_string()) };
        let path = route.path();
        assert_eq!(path, "/login?from=%2Flesson%2F2%2Fsimulator%2F5");
        assert_eq!(Route::parse(&path), route);
    }

    #[test]
    fn test_login_ignores_external_redirect() {
        assert_eq!(
            Route::parse("/login?from=https%3A%2F%2Fevil.example"),
            Route::Login { from: None }
        );
    }
}
