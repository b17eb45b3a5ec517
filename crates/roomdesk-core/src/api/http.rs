//! HTTP Client
//!
//! `reqwest`-backed implementation of the REST boundary. On wasm32 reqwest
//! runs on the browser's fetch API.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::{acknowledge, decode_list, decode_record, decode_saved, Saved};
use super::error::ApiError;
use super::{ListParams, RecordApi};
use crate::record::Record;
use crate::session::UserProfile;

/// Base URL plus the bearer token of the current session
#[derive(Clone, Debug)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request; on success returns the parsed body, or `None` for an
    /// empty body or 204
    async fn send(&self, builder: RequestBuilder) -> Result<Option<Value>, ApiError> {
        let response = builder.send().await.map_err(|e| {
            log::warn!("request failed: {}", e);
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            log::warn!("server returned {} ({} bytes)", status, body.len());
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Option<Value>, ApiError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>, ApiError> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Option<Value>, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }
}

/// `RecordApi` over REST for any deserializable record type
#[derive(Clone, Debug)]
pub struct HttpApi<T> {
    rest: RestClient,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> HttpApi<T> {
    pub fn new(rest: RestClient) -> Self {
        Self { rest, _record: PhantomData }
    }

    fn item_path(id: &T::Id) -> String {
        format!("{}/{}", T::RESOURCE, id)
    }
}

#[async_trait(?Send)]
impl<T> RecordApi<T> for HttpApi<T>
where
    T: Record + DeserializeOwned,
{
    async fn list(&self, params: &ListParams) -> Result<Vec<T>, ApiError> {
        let body = self.rest.get(T::RESOURCE, &params.to_pairs()).await?;
        let records = decode_list(body.unwrap_or(Value::Null))?;
        log::debug!("loaded {} {}", records.len(), T::RESOURCE);
        Ok(records)
    }

    async fn get(&self, id: &T::Id) -> Result<T, ApiError> {
        let body = self.rest.get(&Self::item_path(id), &[]).await?;
        decode_record(body)
    }

    async fn create(&self, body: &Value) -> Result<Saved<T>, ApiError> {
        let response = self.rest.post(T::RESOURCE, body).await?;
        decode_saved(response)
    }

    async fn update(&self, id: &T::Id, body: &Value) -> Result<Saved<T>, ApiError> {
        let response = self.rest.put(&Self::item_path(id), body).await?;
        decode_saved(response)
    }

    async fn delete(&self, id: &T::Id) -> Result<(), ApiError> {
        let response = self.rest.delete(&Self::item_path(id)).await?;
        acknowledge(response)
    }
}

// ========================
// Auth Endpoints
// ========================

#[derive(Serialize)]
struct LoginArgs<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Clone, Debug)]
pub struct AuthApi {
    rest: RestClient,
}

impl AuthApi {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self.rest.post("auth/login", &LoginArgs { username, password }).await?;
        decode_record(response)
    }

    /// Current user for the client's token
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let response = self.rest.get("auth/me", &[]).await?;
        decode_record(response)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.rest.post("auth/logout", &Value::Null).await?;
        acknowledge(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Room;

    #[test]
    fn test_url_joining_ignores_extra_slashes() {
        let rest = RestClient::new("https://api.example.com/v1/", None);
        assert_eq!(rest.url("/rooms"), "https://api.example.com/v1/rooms");
        assert_eq!(rest.url("rooms/4"), "https://api.example.com/v1/rooms/4");
    }

    #[test]
    fn test_item_path_uses_resource() {
        assert_eq!(HttpApi::<Room>::item_path(&7), "rooms/7");
    }
}
