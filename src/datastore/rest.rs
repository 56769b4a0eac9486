//! Realtime Database REST client. A node is removed with
//! `DELETE {database_url}/{path}.json?auth={id_token}`.

use super::{DataStore, DataStoreError};
use crate::{http, identity::Principal};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{error, info_span, instrument, Instrument};
use url::Url;

pub struct RestDataStore {
    client: Client,
    database_url: Url,
}

impl RestDataStore {
    /// # Errors
    /// Returns an error if `database_url` is not a valid http(s) URL or the HTTP client cannot be built.
    pub fn new(database_url: &str) -> Result<Self> {
        Ok(Self {
            client: http::client()?,
            database_url: http::base_url(database_url)?,
        })
    }
}

#[async_trait]
impl DataStore for RestDataStore {
    #[instrument(skip(self, principal))]
    async fn delete_at_path(
        &self,
        principal: &Principal,
        path: &str,
    ) -> Result<(), DataStoreError> {
        let node = format!("{}.json", path.trim_end_matches('/'));
        let delete_url = http::endpoint_url(&self.database_url, &node);

        let span = info_span!("datastore.delete", http.method = "DELETE", url = %delete_url);
        let response = self
            .client
            .delete(delete_url)
            .query(&[("auth", principal.id_token.expose_secret())])
            .send()
            .instrument(span)
            .await
            .map_err(|e| {
                error!("Failed to delete {}: {}", path, e);

                DataStoreError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await.unwrap_or_default();

            let error_message = http::error_message(&json_response);

            error!("Failed to delete {}: {}", path, error_message);

            return Err(DataStoreError(format!("{status}, {error_message}")));
        }

        Ok(())
    }
}
