//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use simulator_core::models::{Course, CourseUser, Lesson, UserProfile};

/// Server data shared across pages; `None` until loaded
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub course: Option<Course>,
    /// Progress of the signed-in user on the course
    pub course_user: Option<CourseUser>,
    pub profile: Option<UserProfile>,
    /// Ordered as returned by the backend
    pub lessons: Option<Vec<Lesson>>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Forget everything tied to the signed-out user
pub fn store_clear_user_data(store: &AppStore) {
    store.course_user().set(None);
    store.profile().set(None);
    store.lessons().set(None);
}

/// Look up a loaded lesson by ID
pub fn store_find_lesson(store: &AppStore, lesson_id: u64) -> Option<Lesson> {
    store.lessons().with_untracked(|lessons| {
        lessons.as_ref()?.iter().find(|lesson| lesson.id == lesson_id).cloned()
    })
}
