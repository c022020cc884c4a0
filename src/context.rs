//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use simulator_core::{flows, CacheTag, Error, Route, Session};

use crate::api::HttpBackend;
use crate::config::Config;
use crate::router;
use crate::storage::LocalStorageTokenStore;

pub type AppSession = Session<LocalStorageTokenStore>;

/// One counter per cache tag; bumping it re-runs the queries reading it
#[derive(Clone, Copy)]
struct CacheVersions {
    user: RwSignal<u32>,
    course: RwSignal<u32>,
    course_user: RwSignal<u32>,
    lessons: RwSignal<u32>,
    simulator: RwSignal<u32>,
}

impl CacheVersions {
    fn new() -> Self {
        Self {
            user: RwSignal::new(0),
            course: RwSignal::new(0),
            course_user: RwSignal::new(0),
            lessons: RwSignal::new(0),
            simulator: RwSignal::new(0),
        }
    }

    fn signal(&self, tag: CacheTag) -> RwSignal<u32> {
        match tag {
            CacheTag::User => self.user,
            CacheTag::Course => self.course,
            CacheTag::CourseUser => self.course_user,
            CacheTag::Lessons => self.lessons,
            CacheTag::Simulator => self.simulator,
        }
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: Config,
    /// Current page
    pub route: RwSignal<Route>,
    session: RwSignal<AppSession>,
    versions: CacheVersions,
}

impl AppContext {
    pub fn new(config: Config, route: Route) -> Self {
        Self {
            config,
            route: RwSignal::new(route),
            session: RwSignal::new(Session::restore(LocalStorageTokenStore)),
            versions: CacheVersions::new(),
        }
    }

    /// Tracked: effects re-run on sign-in and sign-out
    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_authenticated())
    }

    /// Backend client carrying the current token
    pub fn backend(&self) -> HttpBackend {
        let authorization = self.session.with_untracked(|s| s.authorization());
        HttpBackend::new(self.config.api_url, authorization)
    }

    /// Tracked read of a cache tag's version
    pub fn version(&self, tag: CacheTag) -> u32 {
        self.versions.signal(tag).get()
    }

    /// Mark cached queries stale so they reload
    pub fn invalidate(&self, tags: &[CacheTag]) {
        for tag in tags {
            log::debug!("invalidating {:?}", tag);
            self.versions.signal(*tag).update(|v| *v += 1);
        }
    }

    pub fn navigate(&self, route: Route) {
        router::push(&route);
        self.route.set(route);
    }

    /// Navigate without leaving a history entry
    pub fn redirect(&self, route: Route) {
        router::replace(&route);
        self.route.set(route);
    }

    pub fn sign_in(&self, token: &simulator_core::models::SessionToken) {
        self.session.update(|s| s.sign_in(token));
        self.invalidate(&[CacheTag::User, CacheTag::CourseUser, CacheTag::Lessons]);
    }

    pub fn sign_out(&self) {
        self.session.update(|s| s.sign_out());
        self.redirect(Route::Login { from: None });
    }

    /// Log a failed request; an expired session signs the user out
    pub fn report(&self, err: &Error) {
        let cleared = self
            .session
            .try_update(|s| flows::handle_auth_failure(s, err))
            .unwrap_or(false);
        if !cleared {
            log::error!("{}", err);
        }
    }
}
