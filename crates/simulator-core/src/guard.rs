//! Access Guard
//!
//! Navigation predicates evaluated whenever the path, session or profile
//! changes: unauthenticated users go to login, users without a character go
//! to character creation, and users who already have one leave it.

use crate::models::UserProfile;
use crate::route::{Route, CHARACTER_PATH, PUBLIC_PATHS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin { from: Option<String> },
    RedirectToCharacter,
    RedirectToHome,
}

impl GuardDecision {
    /// Route to replace the current one with, if any
    pub fn redirect(&self) -> Option<Route> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin { from } => Some(Route::Login { from: from.clone() }),
            GuardDecision::RedirectToCharacter => Some(Route::Character),
            GuardDecision::RedirectToHome => Some(Route::Home),
        }
    }
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Non-public paths require a session token
pub fn check_access(path: &str, has_token: bool) -> GuardDecision {
    if is_public_path(path) || has_token {
        return GuardDecision::Allow;
    }
    let from = (path != "/").then(|| path.to_string());
    GuardDecision::RedirectToLogin { from }
}

/// A loaded profile without first/last name must create a character first;
/// once it has one, character creation sends it home
pub fn check_onboarding(path: &str, profile: Option<&UserProfile>) -> GuardDecision {
    if is_public_path(path) {
        return GuardDecision::Allow;
    }
    let Some(profile) = profile else {
        return GuardDecision::Allow;
    };
    match (path == CHARACTER_PATH, profile.has_character()) {
        (true, true) => GuardDecision::RedirectToHome,
        (false, false) => GuardDecision::RedirectToCharacter,
        _ => GuardDecision::Allow,
    }
}

/// Both guards in order: authentication first, onboarding second
pub fn evaluate(path: &str, has_token: bool, profile: Option<&UserProfile>) -> GuardDecision {
    match check_access(path, has_token) {
        GuardDecision::Allow if has_token => check_onboarding(path, profile),
        decision => decision,
    }
}

/// `evaluate` on the path of a parsed route, query excluded
pub fn evaluate_route(route: &Route, has_token: bool, profile: Option<&UserProfile>) -> GuardDecision {
    let path = route.path();
    let path = path.split_once('?').map_or(path.as_str(), |(path, _)| path);
    evaluate(path, has_token, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CharacterRequest;

    fn profile(first: Option<&str>, last: Option<&str>) -> UserProfile {
        UserProfile {
            username: "student".into(),
            email: "student@example.com".into(),
            first_name: first.map(Into::into),
            last_name: last.map(Into::into),
            avatar: Some("man1".into()),
            sex: Some("male".into()),
        }
    }

    #[test]
    fn test_protected_path_without_token_redirects_to_login() {
        assert_eq!(
            check_access("/lesson/1/simulator/2", false),
            GuardDecision::RedirectToLogin { from: Some("/lesson/1/simulator/2".into()) }
        );
        assert_eq!(check_access("/", false), GuardDecision::RedirectToLogin { from: None });
        assert_eq!(check_access("/profile", true), GuardDecision::Allow);
    }

    #[test]
    fn test_public_paths_always_allowed() {
        assert_eq!(check_access("/login", false), GuardDecision::Allow);
        assert_eq!(check_access("/register", false), GuardDecision::Allow);
    }

    #[test]
    fn test_missing_name_redirects_to_character() {
        let incomplete = profile(Some("Ivan"), None);
        assert_eq!(check_onboarding("/", Some(&incomplete)), GuardDecision::RedirectToCharacter);
        assert_eq!(check_onboarding("/character", Some(&incomplete)), GuardDecision::Allow);
        assert_eq!(check_onboarding("/", None), GuardDecision::Allow);

        let complete = profile(Some("Ivan"), Some("Petrov"));
        assert_eq!(check_onboarding("/", Some(&complete)), GuardDecision::Allow);
        assert_eq!(check_onboarding("/character", Some(&complete)), GuardDecision::RedirectToHome);
        assert_eq!(check_onboarding("/character", None), GuardDecision::Allow);
    }

    #[test]
    fn test_saved_character_reaches_home() {
        let mut current = profile(None, None);
        assert_eq!(evaluate_route(&Route::Character, true, Some(&current)), GuardDecision::Allow);

        current.apply_character(&CharacterRequest {
            first_name: "Ivan".into(),
            last_name: "Petrov".into(),
            sex: "male".into(),
            avatar: "man1".into(),
        });
        assert_eq!(evaluate_route(&Route::Home, true, Some(&current)), GuardDecision::Allow);
        assert_eq!(
            evaluate_route(&Route::Character, true, Some(&current)).redirect(),
            Some(Route::Home)
        );
    }

    #[test]
    fn test_login_checked_before_onboarding() {
        let incomplete = profile(None, None);
        assert_eq!(
            evaluate("/", false, Some(&incomplete)),
            GuardDecision::RedirectToLogin { from: None }
        );
        assert_eq!(evaluate("/", true, Some(&incomplete)), GuardDecision::RedirectToCharacter);
        assert_eq!(evaluate("/login", true, Some(&incomplete)), GuardDecision::Allow);
    }

    #[test]
    fn test_route_query_ignored() {
        let login = Route::Login { from: Some("/profile".into()) };
        assert_eq!(evaluate_route(&login, false, None), GuardDecision::Allow);
        assert_eq!(
            evaluate_route(&Route::Profile, false, None),
            GuardDecision::RedirectToLogin { from: Some("/profile".into()) }
        );
    }
}
