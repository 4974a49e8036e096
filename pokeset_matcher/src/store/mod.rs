//! Airtable REST client for the shop's record tables.
//!
//! Airtable stores records as `{id, fields}`. This module lists tables page by
//! page, creates, updates and deletes single records, and maps non-success
//! responses to [`StoreError::Remote`]. Credentials are checked before every
//! request so a missing base id or token never reaches the network.

mod pages;
mod records;

use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

pub use pages::RecordPages;

/// Untyped record fields as Airtable returns them
pub type Fields = Map<String, Value>;

/// A single Airtable record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtableRecord<T = Fields> {
    pub id: String,
    pub fields: T,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

impl AirtableRecord<Fields> {
    /// Flattens into `{recordId, ...fields}`, the shape the HTTP API returns
    pub fn flatten(self) -> Value {
        let mut out = Map::new();
        out.insert("recordId".to_string(), Value::String(self.id));
        out.extend(self.fields);
        Value::Object(out)
    }
}

/// Airtable API client bound to one base
pub struct AirtableClient {
    pub(crate) client: Client,
    pub(crate) config: StoreConfig,
}

impl AirtableClient {
    /// Creates a client. Missing credentials are reported per call, not here.
    pub fn new(config: StoreConfig) -> Self {
        info!("Creating Airtable client for {}", config.api_url);
        if let Some(token) = &config.api_token {
            debug!("API token length: {}", token.len());
        }
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Base id and token, or a configuration error naming what is missing
    fn credentials(&self) -> Result<(&str, &str)> {
        match (&self.config.base_id, &self.config.api_token) {
            (Some(base), Some(token)) => Ok((base, token)),
            _ => Err(StoreError::Config(format!(
                "{} not set",
                self.config.missing_settings().join(" and ")
            ))),
        }
    }

    /// Authorised request against a table URL
    pub(crate) fn request(&self, method: Method, table: &str) -> Result<RequestBuilder> {
        let (base, token) = self.credentials()?;
        let url = format!(
            "{}/{}/{}",
            self.config.api_url,
            base,
            urlencoding::encode(table)
        );
        debug!("{method} {url}");

        Ok(self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header("Content-Type", "application/json"))
    }

    /// Sends a request and decodes a JSON response, turning non-2xx statuses
    /// into [`StoreError::Remote`] carrying the response body.
    pub(crate) async fn send_json<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Airtable request failed with {status}: {body}");
            return Err(StoreError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
