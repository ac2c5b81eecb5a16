//! REST adapter speaking to the backoffice API over reqwest.
//!
//! URL layout is the flat collection scheme the backend serves:
//!
//! ```text
//! GET    {base}/{collection}?page=&limit=[&q=&fields=][&f.{field}=...]
//! POST   {base}/{collection}
//! PUT    {base}/{collection}/{id}
//! DELETE {base}/{collection}/{id}
//! ```
//!
//! Non-2xx responses carry an optional JSON body of the shape
//! `{"error": ..., "message": ..., "field": ...}`; whatever of it is
//! present flows into the mapped [`RepoError`].

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::adapters::filter_text;
use crate::config::CoreConfig;
use crate::error::{classify_reqwest_error, RepoError};
use crate::models::Entity;
use crate::query::QueryDescriptor;
use crate::repository::{EntityRepository, PageWindow};

/// Repository backed by the REST API, typed to one collection.
pub struct HttpRepository<E: Entity> {
    client: Client,
    base_url: String,
    _entity: PhantomData<E>,
}

impl<E: Entity> HttpRepository<E> {
    /// Connect to a base URL with a default client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Connect using config for base URL and request timeout.
    pub fn with_config(config: &CoreConfig) -> Self {
        let client = match Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", err);
                Client::new()
            }
        };
        Self::with_client(client, config.base_url.clone())
    }

    /// Connect with a caller-supplied client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, E::COLLECTION)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, E::COLLECTION, urlencoding::encode(id))
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
        url: &str,
        id: Option<&str>,
    ) -> Result<T, RepoError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| classify_reqwest_error(&e, url))
        } else {
            Err(error_from_response::<E>(response, id).await)
        }
    }
}

#[async_trait]
impl<E: Entity> EntityRepository for HttpRepository<E> {
    type Record = E;
    type Create = E::Draft;
    type Update = E::Draft;

    async fn list(&self, query: &QueryDescriptor) -> Result<PageWindow<E>, RepoError> {
        let url = format!("{}?{}", self.collection_url(), query_string(query));
        debug!("Fetching window from {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url))?;
        self.decode(response, &url, None).await
    }

    async fn create(&self, data: &E::Draft) -> Result<E, RepoError> {
        let url = self.collection_url();
        debug!("Creating record at {}", url);
        let response = self
            .client
            .post(&url)
            .json(data)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url))?;
        self.decode(response, &url, None).await
    }

    async fn update(&self, id: &str, data: &E::Draft) -> Result<E, RepoError> {
        let url = self.record_url(id);
        debug!("Updating record at {}", url);
        let response = self
            .client
            .put(&url)
            .json(data)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url))?;
        self.decode(response, &url, Some(id)).await
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let url = self.record_url(id);
        debug!("Deleting record at {}", url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response::<E>(response, Some(id)).await)
        }
    }
}

/// Serialize a descriptor into the query string the backend reads.
fn query_string(query: &QueryDescriptor) -> String {
    let mut parts = vec![
        format!("page={}", query.pagination.page),
        format!("limit={}", query.pagination.limit),
    ];
    if let Some(search) = &query.search {
        parts.push(format!("q={}", urlencoding::encode(&search.query)));
        parts.push(format!(
            "fields={}",
            urlencoding::encode(&search.fields.join(","))
        ));
    }
    for (field, value) in &query.filters {
        parts.push(format!(
            "f.{}={}",
            field,
            urlencoding::encode(&filter_text(value))
        ));
    }
    parts.join("&")
}

/// Error payload the backend attaches to non-2xx responses. Every field
/// is optional; older endpoints send bare statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

async fn error_from_response<E: Entity>(response: Response, id: Option<&str>) -> RepoError {
    let status = response.status();
    let body: ErrorBody = response.json().await.unwrap_or_default();
    let message = body
        .message
        .or(body.error)
        .unwrap_or_else(|| fallback_message(status));
    match (status.as_u16(), id) {
        (400 | 422, _) => RepoError::Validation {
            field: body.field,
            message,
        },
        (404, Some(id)) => RepoError::not_found(E::COLLECTION, id),
        (401 | 403, _) => RepoError::Authorization { message },
        (code, _) => RepoError::Transport {
            status: Some(code),
            message,
        },
    }
}

fn fallback_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
