//! HTTP Backend
//!
//! `CourseBackend` over the course REST API using `gloo-net`.

mod course_backend;
mod transport;

/// Client for one request batch, carrying the session's bearer token
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: &'static str,
    authorization: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &'static str, authorization: Option<String>) -> Self {
        Self { base_url, authorization }
    }
}
