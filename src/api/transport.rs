//! Request Transport
//!
//! Builds requests from the endpoint table and maps responses onto
//! `ApiError`.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use simulator_core::{ApiError, Endpoint, Method};

use super::HttpBackend;

impl HttpBackend {
    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn builder(&self, endpoint: &Endpoint) -> RequestBuilder {
        let url = self.url(endpoint);
        let builder = match endpoint.method() {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
        };
        match &self.authorization {
            Some(value) => builder.header("Authorization", value),
            None => builder,
        }
    }

    /// Send the request; non-2xx statuses become errors
    pub(super) async fn call<B: Serialize>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<Response, ApiError> {
        let builder = self.builder(&endpoint);
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        log::debug!("{:?} {}", endpoint.method(), endpoint.path());
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        log::warn!("{:?} {} failed: {}", endpoint.method(), endpoint.path(), err);
        Err(err)
    }

    pub(super) async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let response = self.call::<()>(endpoint, None).await?;
        decode(response).await
    }

    pub(super) async fn send<B: Serialize, T: DeserializeOwned>(&self, endpoint: Endpoint, body: &B) -> Result<T, ApiError> {
        let response = self.call(endpoint, Some(body)).await?;
        decode(response).await
    }

    /// Send and ignore the response body
    pub(super) async fn execute<B: Serialize>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<(), ApiError> {
        self.call(endpoint, body).await.map(|_| ())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}
