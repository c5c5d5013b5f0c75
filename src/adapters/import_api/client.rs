//! Import API client: container lifecycle and sub-batch submission
//!
//! Containers are looked up and created by deterministic key, making the
//! get-or-create sequence idempotent: repeated calls with the same key after
//! a successful creation return the existing container without mutation.

use crate::adapters::import_api::models::{
    ContainerLookup, EntityKind, ImportContainer, ImportRequest,
};
use crate::config::ImportConfig;
use crate::domain::{ImportError, Result, SyncError};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;

/// HTTP client for the staged import API.
pub struct ImportClient {
    http: Client,
    config: ImportConfig,
}

impl ImportClient {
    /// Creates an import client from configuration.
    pub fn new(config: ImportConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SyncError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Looks up a container by key.
    ///
    /// Returns `Found` on 200, `NotFound` on 404; any other status is a
    /// lookup failure.
    pub async fn lookup_container(&self, key: &str) -> Result<ContainerLookup> {
        let url = format!("{}/import-containers/{key}", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token())
            .send()
            .await
            .map_err(|e| SyncError::Import(ImportError::ConnectionFailed(e.to_string())))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(ContainerLookup::NotFound),
            status if status.is_success() => {
                let container = response.json::<ImportContainer>().await.map_err(|e| {
                    SyncError::Import(ImportError::InvalidResponse(e.to_string()))
                })?;
                Ok(ContainerLookup::Found(container))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(SyncError::Import(ImportError::ContainerLookupFailed {
                    key: key.to_string(),
                    status: status.as_u16(),
                    message: body,
                }))
            }
        }
    }

    /// Creates a container with the given key.
    pub async fn create_container(&self, key: &str) -> Result<ImportContainer> {
        let url = format!("{}/import-containers", self.config.base_url);
        let draft = ImportContainer {
            key: key.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token())
            .json(&draft)
            .send()
            .await
            .map_err(|e| SyncError::Import(ImportError::ConnectionFailed(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Import(ImportError::ContainerCreationFailed {
                key: key.to_string(),
                message: format!("{status}: {body}"),
            }));
        }

        response
            .json::<ImportContainer>()
            .await
            .map_err(|e| SyncError::Import(ImportError::InvalidResponse(e.to_string())))
    }

    /// Returns the container with the given key, creating it when the
    /// lookup reports it missing.
    pub async fn get_or_create_container(&self, key: &str) -> Result<ImportContainer> {
        match self.lookup_container(key).await? {
            ContainerLookup::Found(container) => Ok(container),
            ContainerLookup::NotFound => {
                tracing::info!(key = key, "Import container not found, creating");
                self.create_container(key).await
            }
        }
    }

    /// Submits one sub-batch of at most the transport limit of documents to
    /// a container.
    pub async fn submit_sub_batch<T: Serialize>(
        &self,
        kind: EntityKind,
        container_key: &str,
        resources: &[T],
    ) -> Result<()> {
        let url = format!(
            "{}/{}/import-containers/{container_key}",
            self.config.base_url,
            kind.slug()
        );
        let request = ImportRequest {
            resource_type: kind.resource_type(),
            resources,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token())
            .json(&request)
            .send()
            .await
            .map_err(|e| SyncError::Import(ImportError::ConnectionFailed(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Import(ImportError::SubmissionFailed {
                key: container_key.to_string(),
                status: status.as_u16(),
                message: body,
            }));
        }

        Ok(())
    }

    fn token(&self) -> &str {
        self.config.access_token.expose_secret().as_ref()
    }
}
