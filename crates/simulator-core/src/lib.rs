//! Simulator Core
//!
//! Browser-independent logic of the course simulator: backend models and
//! interface, routing and the access guard, completion sequencing, answer
//! handling, session state and the user flows built on them.

pub mod answer;
pub mod backend;
pub mod block;
pub mod error;
pub mod flows;
pub mod forms;
pub mod guard;
pub mod models;
pub mod rich_text;
pub mod route;
pub mod sequencing;
pub mod session;
pub mod submission;

pub use backend::{CacheTag, CourseBackend, Endpoint, Method};
pub use error::{ApiError, Error, FieldErrors, Result, ValidationError};
pub use route::Route;
pub use session::{Session, TokenStore};
