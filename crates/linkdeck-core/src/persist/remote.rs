//! Remote persistence.
//!
//! The remote store holds one collection per deployment behind a tiny links
//! API. The trait keeps the service layer testable; the HTTP implementation
//! talks to the companion server.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::collection::Collection;
use crate::config::PersistConfig;
use crate::error::{LinkdeckError, Result};

/// Wire shape of a save: the collection wrapped in a `linkData` field.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveLinksRequest<'a> {
    link_data: &'a Collection,
}

/// Where collections are fetched from and pushed to.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the stored collection; `None` when nothing is stored yet.
    async fn fetch(&self) -> Result<Option<Collection>>;

    /// Replace the stored collection.
    async fn store(&self, collection: &Collection) -> Result<()>;
}

/// [`RemoteStore`] over the HTTP links API.
pub struct HttpRemoteStore {
    client: Client,
    links_url: String,
}

impl HttpRemoteStore {
    /// Build a store against a server base URL such as
    /// `http://127.0.0.1:3001`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(PersistConfig::REQUEST_TIMEOUT)
            .user_agent("linkdeck/0.1")
            .build()
            .map_err(|e| LinkdeckError::Remote {
                message: format!("Failed to create HTTP client: {e}"),
                status: None,
            })?;

        Ok(HttpRemoteStore {
            client,
            links_url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                PersistConfig::LINKS_ENDPOINT
            ),
        })
    }

    pub fn links_url(&self) -> &str {
        &self.links_url
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn fetch(&self) -> Result<Option<Collection>> {
        let response = self.client.get(&self.links_url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("remote has no stored collection yet");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(LinkdeckError::Remote {
                message: format!("GET {} returned {}", self.links_url, response.status()),
                status: Some(response.status().as_u16()),
            });
        }
        Ok(Some(response.json().await?))
    }

    async fn store(&self, collection: &Collection) -> Result<()> {
        let response = self
            .client
            .post(&self.links_url)
            .json(&SaveLinksRequest {
                link_data: collection,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(LinkdeckError::Remote {
                message: format!("POST {} returned {}", self.links_url, response.status()),
                status: Some(response.status().as_u16()),
            });
        }
        Ok(())
    }
}
