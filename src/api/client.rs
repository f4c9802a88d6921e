//! HTTP client for backend requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the venue backend, handling authentication, error envelopes, and
//! response parsing.

use super::ApiError;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Error envelope returned by the backend for failed requests.
///
#[derive(Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
}

/// Makes requests to one base URL and conforms response data to models.
///
pub struct Client {
    pub(crate) access_token: Option<String>,
    pub(crate) base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and request timeout.
    ///
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Client {
            access_token: None,
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn set_access_token(&mut self, access_token: Option<String>) {
        self.access_token = access_token;
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Return model data for the path or error.
    ///
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.call(Method::GET, path, None).await?;
        Self::read(response).await
    }

    /// Send a JSON body and return model data from the response.
    ///
    pub async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self.call(method, path, Some(body)).await?;
        Self::read(response).await
    }

    /// Make a request whose response body is irrelevant.
    ///
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let response = self.call(method, path, None).await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Make request and return the raw response or error.
    ///
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let request_url = format!("{}/{}", &self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method, request_url);

        let mut request = self.http_client.request(method, &request_url);
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        Ok(request.send().await?)
    }

    /// Return the response if successful, otherwise an error carrying the
    /// backend's message.
    ///
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        let message = serde_json::from_str::<ErrorEnvelope>(&response_text)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or(response_text);
        log::error!("API request failed with status {}: {}", status, message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        let response_bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&response_bytes).map_err(|e| {
            log::error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&response_bytes)
            );
            ApiError::Deserialization(e)
        })
    }
}
