//! HTTP client for the seating backend

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use seating_engine::{SeatingStore, StoreResult};
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Guest, TableNode};

/// Cookie carrying the session token
const TOKEN_COOKIE: &str = "token";

/// HTTP client for the event backend's REST API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the session cookie when a token is set
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(
                reqwest::header::COOKIE,
                format!("{TOKEN_COOKIE}={token}"),
            ),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.put(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.delete(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Unwrap the `ApiResponse` envelope
    ///
    /// A missing `data` field decodes as JSON `null`, so unit payloads work
    /// for endpoints that return no data.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %text, "Backend returned an error status");
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                && let Some(err) = envelope.to_error()
            {
                return Err(ClientError::Api(err));
            }
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(text),
                StatusCode::NOT_FOUND => ClientError::NotFound(text),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::Validation(text)
                }
                _ if status.is_server_error() => ClientError::Internal(text),
                _ => ClientError::Api(AppError::with_message(
                    ErrorCode::from_http_status(status),
                    text,
                )),
            });
        }

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}: {text}")))?;
        if let Some(err) = envelope.to_error() {
            return Err(ClientError::Api(err));
        }
        let data = envelope.data.unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(data)?)
    }
}

#[async_trait]
impl SeatingStore for HttpClient {
    async fn load_guests(&self, event_id: &str) -> StoreResult<Vec<Guest>> {
        Ok(self.get(&format!("api/events/{event_id}/guests")).await?)
    }

    async fn load_table_nodes(&self, event_id: &str) -> StoreResult<Vec<TableNode>> {
        Ok(self.get(&format!("api/events/{event_id}/nodes")).await?)
    }

    async fn create_table_node(&self, node: &TableNode) -> StoreResult<()> {
        let _: serde_json::Value = self.post("api/nodes", node).await?;
        Ok(())
    }

    async fn update_table_nodes(&self, nodes: &[TableNode]) -> StoreResult<()> {
        let _: serde_json::Value = self.put("api/nodes", nodes).await?;
        Ok(())
    }

    async fn delete_table_node(&self, id: &str) -> StoreResult<()> {
        let _: serde_json::Value = self.delete(&format!("api/nodes/{id}")).await?;
        Ok(())
    }

    async fn update_guests(&self, guests: &[Guest]) -> StoreResult<()> {
        let _: serde_json::Value = self.put("api/guests", guests).await?;
        Ok(())
    }

    async fn delete_guest(&self, id: &str) -> StoreResult<()> {
        let _: serde_json::Value = self.delete(&format!("api/guests/{id}")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.url("/api/nodes"),
            "http://localhost:8080/api/nodes"
        );
        assert_eq!(
            client.url("api/events/e1/guests"),
            "http://localhost:8080/api/events/e1/guests"
        );
    }

    #[test]
    fn test_token_from_config_and_builder() {
        let config = ClientConfig::default().with_token("t0");
        let client = config.build_http_client().unwrap();
        assert_eq!(client.token(), Some("t0"));
        assert_eq!(client.with_token("t1").token(), Some("t1"));
    }
}
