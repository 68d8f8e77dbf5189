//! Resource cache: one fetch per URI, shared by every caller.
//!
//! The first `get` for a URI stores a shared future under that URI before any
//! I/O happens, so concurrent callers await the same fetch. Entries are
//! write-once and never evicted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use serde_json::{Value, json};
use thiserror::Error;

use crate::error::ResourceError;

// ─── Fetch collaborator ──────────────────────────────────────────────────────

/// Raw response body plus the transport's success flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub body: String,
    pub ok: bool,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ok: true,
        }
    }
}

/// Network or transport failure reported by a `Fetcher`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

/// The only network capability the viewer needs.
#[async_trait(?Send)]
pub trait Fetcher {
    async fn fetch(&self, uri: &str) -> Result<FetchResponse, TransportError>;
}

// ─── ResourceCache ────────────────────────────────────────────────────────────

type SharedResource = Shared<LocalBoxFuture<'static, Result<Rc<Value>, ResourceError>>>;

/// Memoizing, deduplicating JSON loader. Clones share the same entries.
#[derive(Clone)]
pub struct ResourceCache {
    fetcher: Rc<dyn Fetcher>,
    entries: Rc<RefCell<HashMap<String, SharedResource>>>,
}

impl ResourceCache {
    pub fn new(fetcher: impl Fetcher + 'static) -> Self {
        Self {
            fetcher: Rc::new(fetcher),
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Load `uri`, reusing an in-flight or completed request for the same URI.
    pub fn get(&self, uri: &str) -> impl Future<Output = Result<Rc<Value>, ResourceError>> + use<> {
        let mut entries = self.entries.borrow_mut();
        let shared = match entries.get(uri) {
            Some(existing) => {
                tracing::debug!(uri, "resource cache hit");
                existing.clone()
            }
            None => {
                tracing::debug!(uri, "resource cache miss; fetching");
                let fetcher = Rc::clone(&self.fetcher);
                let owned_uri = uri.to_string();
                let future = async move { load(fetcher.as_ref(), &owned_uri).await }
                    .boxed_local()
                    .shared();
                entries.insert(uri.to_string(), future.clone());
                future
            }
        };
        shared
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.entries.borrow().contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Fetch, parse, and check a document for registry-level errors.
async fn load(fetcher: &dyn Fetcher, uri: &str) -> Result<Rc<Value>, ResourceError> {
    let response = fetcher.fetch(uri).await.map_err(|err| {
        let error = ResourceError::fetch(uri, json!({ "message": err.message }));
        tracing::error!(uri, error = %err, "resource fetch failed");
        error
    })?;

    let parsed: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(err) if !response.ok => {
            tracing::error!(uri, "resource request was not successful");
            return Err(ResourceError::fetch(
                uri,
                json!({ "message": err.to_string(), "RawData": response.body }),
            ));
        }
        Err(err) => {
            tracing::error!(uri, error = %err, "resource parse failed");
            return Err(ResourceError::parse(
                uri,
                json!({ "message": err.to_string(), "RawData": response.body }),
            ));
        }
    };

    let registry_errors = ["error", "errors"]
        .into_iter()
        .filter_map(|key| parsed.get(key))
        .find(|value| !crate::syntax::jsonld::is_blank(value));
    if let Some(registry_errors) = registry_errors {
        let list = crate::syntax::normalize_array(Some(registry_errors))
            .into_iter()
            .map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        tracing::error!(uri, "registry returned errors");
        return Err(ResourceError::registry(uri, list, parsed));
    }

    if !response.ok {
        tracing::error!(uri, "resource request was not successful");
        return Err(ResourceError::fetch(uri, parsed));
    }

    Ok(Rc::new(parsed))
}

/// Registry resource URIs are fetched through their graph endpoint.
pub fn graph_uri(resource_uri: &str) -> String {
    resource_uri.replacen("/resources/", "/graph/", 1)
}

#[cfg(test)]
#[path = "../tests/rust/test_resource.rs"]
mod tests;
