//! reqwest-backed implementation of the school API calls

use std::time::Duration;

use reqwest::{
    header::{HeaderValue, ACCEPT},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{Course, Order, OrderPayload, OrderUpdate, Tutor};

use super::ApiError;

/// HTTP client for the school API
#[derive(Debug, Clone)]
pub struct SchoolApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SchoolApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// GET /api/courses
    pub async fn get_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.fetch_json(self.request(Method::GET, "/api/courses")).await
    }

    /// GET /api/courses/{id}
    pub async fn get_course(&self, id: u64) -> Result<Course, ApiError> {
        let endpoint = format!("/api/courses/{}", id);
        self.fetch_json(self.request(Method::GET, &endpoint)).await
    }

    /// GET /api/tutors
    pub async fn get_tutors(&self) -> Result<Vec<Tutor>, ApiError> {
        self.fetch_json(self.request(Method::GET, "/api/tutors")).await
    }

    /// GET /api/tutors/{id}
    pub async fn get_tutor(&self, id: u64) -> Result<Tutor, ApiError> {
        let endpoint = format!("/api/tutors/{}", id);
        self.fetch_json(self.request(Method::GET, &endpoint)).await
    }

    /// GET /api/orders
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.fetch_json(self.request(Method::GET, "/api/orders")).await
    }

    /// GET /api/orders/{id}
    pub async fn get_order(&self, id: u64) -> Result<Order, ApiError> {
        let endpoint = format!("/api/orders/{}", id);
        self.fetch_json(self.request(Method::GET, &endpoint)).await
    }

    /// POST /api/orders
    pub async fn create_order(&self, payload: &OrderPayload) -> Result<Order, ApiError> {
        payload
            .target()
            .map_err(|e| ApiError::InvalidPayload(e.message))?;

        let builder = self.request(Method::POST, "/api/orders").json(payload);
        self.fetch_json(builder).await
    }

    /// PUT /api/orders/{id}
    pub async fn update_order(&self, id: u64, update: &OrderUpdate) -> Result<Order, ApiError> {
        let endpoint = format!("/api/orders/{}", id);
        let builder = self.request(Method::PUT, &endpoint).json(update);
        self.fetch_json(builder).await
    }

    /// DELETE /api/orders/{id}
    pub async fn delete_order(&self, id: u64) -> Result<(), ApiError> {
        let endpoint = format!("/api/orders/{}", id);
        self.send(self.request(Method::DELETE, &endpoint)).await?;
        Ok(())
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, endpoint))
            .query(&[("api_key", self.api_key.as_str())])
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("API {} -> {}", response.url().path(), status.as_u16());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_error_message(status, &body),
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Message for a failed response: the JSON `error` field, else the raw body,
/// else `HTTP <code>`.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    let fallback = format!("HTTP {}", status.as_u16());

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return value
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or(fallback);
    }

    let text = body.trim();
    if text.is_empty() {
        fallback
    } else {
        text.to_string()
    }
}
