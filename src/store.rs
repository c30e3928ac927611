//! Thin client for the hosted relational store (Supabase/PostgREST).
//!
//! Every operation is one HTTP round trip against `/rest/v1/{table}` with the
//! service-role credential attached. There is no retry, timeout wrapping or
//! caching here: a failed call surfaces immediately as a [`StoreError`] and the
//! request that triggered it fails.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Failed { status: StatusCode, body: String },
}

/// Handle to the hosted store. Cheap to clone; the inner reqwest client
/// shares its connection pool across clones.
#[derive(Debug, Clone)]
pub struct Store {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl Store {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Fetch rows from `table`. `params` are PostgREST query parameters,
    /// typically built with [`eq`], [`any_of`], [`columns`] and [`order`].
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(String, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .request(Method::GET, table)
            .query(params)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Insert rows into `table` and return the created representation
    /// (including store-generated columns such as `id` and `updated_at`).
    pub async fn insert<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        table: &str,
        rows: &B,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Patch all rows of `table` matching `params` with the given fields.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        table: &str,
        patch: &B,
        params: &[(String, String)],
    ) -> Result<(), StoreError> {
        let response = self
            .request(Method::PATCH, table)
            .query(params)
            .json(patch)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Insert-or-replace rows keyed by the `on_conflict` column list.
    pub async fn upsert<B: Serialize + ?Sized>(
        &self,
        table: &str,
        rows: &B,
        on_conflict: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .request(Method::POST, table)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Delete all rows of `table` matching `params`.
    pub async fn delete(
        &self,
        table: &str,
        params: &[(String, String)],
    ) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, table)
            .query(params)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Failed { status, body })
    }
}

// ==================== Query Parameter Helpers ====================

/// Equality filter: `column=eq.value`.
pub fn eq(column: &str, value: &str) -> (String, String) {
    (column.to_string(), format!("eq.{}", value))
}

/// Membership filter: `column=in.(a,b,c)`.
pub fn any_of(column: &str, values: &[String]) -> (String, String) {
    (column.to_string(), format!("in.({})", values.join(",")))
}

/// Column selection, including embedded resources such as
/// `*,translation_values(*)`.
pub fn columns(selection: &str) -> (String, String) {
    ("select".to_string(), selection.to_string())
}

/// Ascending ordering on one column.
pub fn order(column: &str) -> (String, String) {
    ("order".to_string(), column.to_string())
}
