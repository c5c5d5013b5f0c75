//! Feed API client: bearer-token acquisition and cursor pagination
//!
//! Each language is fetched as a stream of pages ordered by id. Every page
//! request carries the id of the last record of the previous page as the
//! `after` cursor; the stream ends with the first empty page. The client
//! never retries; the caller decides what a failed fetch means for the run.

use crate::adapters::feed::models::{decode_variant, FeedPage, TokenResponse};
use crate::config::{AttributeSpec, FeedConfig};
use crate::domain::{
    CategoryRecord, FeedError, Result, SourceRecord, SyncError, VariantRecord,
};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use tokio::sync::{watch, Mutex};

/// Seconds subtracted from a token's lifetime before it is considered
/// expired, so a token is never used right at its edge.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 500;

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// HTTP client for the source feed.
pub struct FeedClient {
    http: Client,
    config: FeedConfig,
    token: Mutex<Option<CachedToken>>,
}

impl FeedClient {
    /// Creates a feed client from configuration.
    pub fn new(config: FeedConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SyncError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            token: Mutex::new(None),
        })
    }

    /// Fetches all category records for one language since the given
    /// timestamp, tagging each record with the language.
    pub async fn fetch_categories(
        &self,
        since: DateTime<Utc>,
        language: &str,
        cancel: &watch::Receiver<bool>,
    ) -> Result<Vec<CategoryRecord>> {
        let url = self.config.categories_url.clone();
        self.fetch_all_pages(&url, since, language, cancel, |results| {
            results
                .into_iter()
                .map(|value| {
                    let mut record: CategoryRecord = serde_json::from_value(value)
                        .map_err(|e| {
                            SyncError::Feed(FeedError::InvalidResponse(format!(
                                "category element: {e}"
                            )))
                        })?;
                    record.language = language.to_string();
                    Ok(record)
                })
                .collect()
        })
        .await
    }

    /// Fetches all variant records for one language since the given
    /// timestamp.
    ///
    /// Variant elements are decoded from raw JSON so the schema-configured
    /// attributes can be captured alongside the typed fields.
    pub async fn fetch_variants(
        &self,
        since: DateTime<Utc>,
        language: &str,
        schema: &[AttributeSpec],
        cancel: &watch::Receiver<bool>,
    ) -> Result<Vec<VariantRecord>> {
        let url = self.config.products_url.clone();
        self.fetch_all_pages(&url, since, language, cancel, |results| {
            results
                .into_iter()
                .map(|value| decode_variant(value, schema, language))
                .collect()
        })
        .await
    }

    /// Drains the page stream for one endpoint and language.
    ///
    /// `decode` turns one page of raw elements into records; the id of the
    /// last decoded record becomes the cursor of the next request.
    async fn fetch_all_pages<T, F>(
        &self,
        url: &str,
        since: DateTime<Utc>,
        language: &str,
        cancel: &watch::Receiver<bool>,
        decode: F,
    ) -> Result<Vec<T>>
    where
        T: SourceRecord,
        F: Fn(Vec<Value>) -> Result<Vec<T>>,
    {
        let mut records: Vec<T> = Vec::new();
        let mut after: Option<String> = None;

        loop {
            if *cancel.borrow() {
                return Err(SyncError::Cancelled);
            }

            let page = self.fetch_page(url, since, language, after.as_deref()).await?;
            if page.results.is_empty() {
                break;
            }

            let decoded = decode(page.results)?;
            // decode is total over the page, so decoded is never empty here
            after = decoded.last().map(|r| r.id().to_string());
            records.extend(decoded);
        }

        tracing::debug!(
            url = url,
            language = language,
            count = records.len(),
            "Drained feed page stream"
        );

        Ok(records)
    }

    async fn fetch_page(
        &self,
        url: &str,
        since: DateTime<Utc>,
        language: &str,
        after: Option<&str>,
    ) -> Result<FeedPage<Value>> {
        let token = self.bearer_token().await?;

        let mut query: Vec<(&str, String)> = vec![
            ("top", self.config.page_size.to_string()),
            ("sortAsc", "id".to_string()),
            ("language", language.to_string()),
            ("periodSince", since.to_rfc3339()),
        ];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self
            .http
            .get(url)
            .query(&query)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| SyncError::Feed(FeedError::ConnectionFailed(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Feed(status_error(status, body)));
        }

        response
            .json::<FeedPage<Value>>()
            .await
            .map_err(|e| SyncError::Feed(FeedError::InvalidResponse(e.to_string())))
    }

    /// Returns a valid bearer token, exchanging client credentials when the
    /// cached one is missing or about to expire.
    async fn bearer_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Utc::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        tracing::debug!(token_url = %self.config.token_url, "Acquiring feed access token");

        let body = serde_json::json!({
            "clientId": self.config.client_id,
            "clientSecret": self.config.client_secret.expose_secret().as_ref(),
        });

        let response = self
            .http
            .post(&self.config.token_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Feed(FeedError::AuthenticationFailed(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Feed(FeedError::AuthenticationFailed(format!(
                "token endpoint returned {status}: {body}"
            ))));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Feed(FeedError::InvalidResponse(e.to_string())))?;

        let expires_at =
            Utc::now() + Duration::seconds(token.expires_in - TOKEN_EXPIRY_MARGIN_SECS);
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at,
        });

        Ok(access_token)
    }
}

fn status_error(status: StatusCode, body: String) -> FeedError {
    if status.is_server_error() {
        FeedError::ServerError {
            status: status.as_u16(),
            message: body,
        }
    } else {
        FeedError::ClientError {
            status: status.as_u16(),
            message: body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn test_config(base: &str) -> FeedConfig {
        FeedConfig {
            token_url: format!("{base}/token"),
            client_id: "client".to_string(),
            client_secret: secret_string("secret".to_string()),
            categories_url: format!("{base}/categories"),
            products_url: format!("{base}/products"),
            page_size: 2,
            timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_token_is_cached_across_requests() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_body(r#"{"accessToken": "tok-1", "expiresIn": 3600}"#)
            .expect(1)
            .create_async()
            .await;

        let client = FeedClient::new(test_config(&server.url())).unwrap();
        assert_eq!(client.bearer_token().await.unwrap(), "tok-1");
        assert_eq!(client.bearer_token().await.unwrap(), "tok-1");
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_failure_maps_to_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(401)
            .with_body("bad credentials")
            .create_async()
            .await;

        let client = FeedClient::new(test_config(&server.url())).unwrap();
        let err = client.bearer_token().await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Feed(FeedError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_fetch_short_circuits() {
        let server = mockito::Server::new_async().await;
        let client = FeedClient::new(test_config(&server.url())).unwrap();
        let (tx, rx) = watch::channel(true);
        drop(tx);

        let err = client
            .fetch_categories(Utc::now(), "en", &rx)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Cancelled));
    }
}
