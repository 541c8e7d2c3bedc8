//! Typed CRUD calls against the external API.
//!
//! [`RemoteStore`] is the seam the synchronizer talks through; the real
//! implementation is [`HttpRemoteStore`] over `reqwest`. Tests substitute
//! recording fakes to assert call patterns without a network.
//!
//! Failure mapping:
//! - connection-level failures and non-2xx statuses become
//!   [`StoreError::Transport`]
//! - a list body that is not a JSON array (or does not decode) normalizes
//!   to an empty collection with a warning, never an error
//! - a single-record body that does not decode is
//!   [`StoreError::MalformedResponse`]

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use listkeep_core::errors::{Result, StoreError};
use listkeep_core::records::RecordKind;
use listkeep_settings::Settings;

/// CRUD operations for one record kind against the remote API.
#[async_trait]
pub trait RemoteStore<K: RecordKind>: Send + Sync {
    /// Fetch the full collection, in server order.
    async fn list(&self) -> Result<Vec<K::Record>>;

    /// Fetch a single record by id.
    async fn fetch(&self, id: i64) -> Result<K::Record>;

    /// Create a record from a draft. The server assigns the id; the new
    /// record is only observable through a subsequent [`RemoteStore::list`].
    async fn create(&self, draft: &K::Draft) -> Result<()>;

    /// Overwrite the mutable fields of an existing record.
    async fn update(&self, id: i64, draft: &K::Draft) -> Result<()>;

    /// Delete a record by id.
    async fn remove(&self, id: i64) -> Result<()>;
}

// Shared-store delegation, so two surfaces can reuse one client.
#[async_trait]
impl<K: RecordKind, T: RemoteStore<K> + ?Sized> RemoteStore<K> for std::sync::Arc<T> {
    async fn list(&self) -> Result<Vec<K::Record>> {
        (**self).list().await
    }

    async fn fetch(&self, id: i64) -> Result<K::Record> {
        (**self).fetch(id).await
    }

    async fn create(&self, draft: &K::Draft) -> Result<()> {
        (**self).create(draft).await
    }

    async fn update(&self, id: i64, draft: &K::Draft) -> Result<()> {
        (**self).update(id, draft).await
    }

    async fn remove(&self, id: i64) -> Result<()> {
        (**self).remove(id).await
    }
}

/// HTTP client for one record kind, backed by `reqwest`.
pub struct HttpRemoteStore<K: RecordKind> {
    client: reqwest::Client,
    base_url: String,
    _kind: PhantomData<K>,
}

impl<K: RecordKind> HttpRemoteStore<K> {
    /// Build a store from settings (base URL and request timeout).
    pub fn new(settings: &Settings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .user_agent(concat!("listkeep/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            _kind: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, K::COLLECTION_PATH)
    }

    fn item_url(&self) -> String {
        format!("{}{}", self.base_url, K::ITEM_PATH)
    }
}

/// Map a request-level failure to a transport error.
fn into_transport(err: &reqwest::Error) -> StoreError {
    StoreError::connection(err.to_string())
}

/// Pass 2xx responses through; turn everything else into a transport error
/// carrying the status and a body snippet.
async fn ensure_2xx(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(200).collect();
    Err(StoreError::status(status.as_u16(), snippet))
}

#[async_trait]
impl<K: RecordKind> RemoteStore<K> for HttpRemoteStore<K> {
    async fn list(&self) -> Result<Vec<K::Record>> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| into_transport(&e))?;
        let response = ensure_2xx(response).await?;

        // The collection endpoint is expected to return an array, but a
        // misbehaving server must not wedge the UI: anything else
        // normalizes to an empty collection.
        let body: Value = match response.json().await {
            Ok(value) => value,
            Err(e) => {
                warn!(kind = K::NAME, error = %e, "list body was not JSON, treating as empty");
                return Ok(Vec::new());
            }
        };
        if !body.is_array() {
            warn!(kind = K::NAME, "list body was not an array, treating as empty");
            return Ok(Vec::new());
        }
        match serde_json::from_value::<Vec<K::Record>>(body) {
            Ok(records) => {
                debug!(kind = K::NAME, count = records.len(), "listed records");
                Ok(records)
            }
            Err(e) => {
                warn!(kind = K::NAME, error = %e, "list elements did not decode, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn fetch(&self, id: i64) -> Result<K::Record> {
        let response = self
            .client
            .get(self.item_url())
            .query(&[("id", id)])
            .send()
            .await
            .map_err(|e| into_transport(&e))?;
        let response = ensure_2xx(response).await?;
        response
            .json::<K::Record>()
            .await
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))
    }

    async fn create(&self, draft: &K::Draft) -> Result<()> {
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await
            .map_err(|e| into_transport(&e))?;
        let _ = ensure_2xx(response).await?;
        debug!(kind = K::NAME, "created record");
        Ok(())
    }

    async fn update(&self, id: i64, draft: &K::Draft) -> Result<()> {
        let response = self
            .client
            .put(self.item_url())
            .query(&[("id", id)])
            .json(draft)
            .send()
            .await
            .map_err(|e| into_transport(&e))?;
        let _ = ensure_2xx(response).await?;
        debug!(kind = K::NAME, id, "updated record");
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.item_url())
            .query(&[("id", id)])
            .send()
            .await
            .map_err(|e| into_transport(&e))?;
        let _ = ensure_2xx(response).await?;
        debug!(kind = K::NAME, id, "removed record");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
