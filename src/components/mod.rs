//! UI Components
//!
//! Reusable Leptos components.

mod answer_field;
mod answer_option;
mod block_item;
mod character_form;
mod completion_banner;
mod form_field;
mod progress_bar;
mod simulator_sidebar;

pub use block_item::BlockItem;
pub use character_form::CharacterFormView;
pub use completion_banner::CompletionBanner;
pub use form_field::{field_message, form_message, FormField};
pub use progress_bar::ProgressBar;
pub use simulator_sidebar::SimulatorSidebar;
