//! Single-record create, update and delete

use log::{debug, info};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{AirtableClient, AirtableRecord};
use crate::error::{Result, StoreError};

/// Batch envelope used by update and delete responses
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct RecordBatch<T> {
    #[serde(default = "Vec::new")]
    records: Vec<AirtableRecord<T>>,
}

impl AirtableClient {
    /// Creates one record and returns it as stored
    pub async fn create_one<F, T>(&self, table: &str, fields: &F) -> Result<AirtableRecord<T>>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, table)?
            .json(&json!({ "fields": fields }));
        let record: AirtableRecord<T> = self.send_json(request).await?;
        info!("Created record {} in '{}'", record.id, table);
        Ok(record)
    }

    /// Updates the given fields of one record. Fails with
    /// [`StoreError::MissingRecord`] if Airtable does not echo the record back.
    pub async fn update_one<F, T>(&self, table: &str, id: &str, fields: &F) -> Result<AirtableRecord<T>>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::PATCH, table)?
            .json(&json!({ "records": [{ "id": id, "fields": fields }] }));
        let batch: RecordBatch<T> = self.send_json(request).await?;

        let record = batch
            .records
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::MissingRecord(id.to_string()))?;
        info!("Updated record {} in '{}'", record.id, table);
        Ok(record)
    }

    /// Deletes one record
    pub async fn delete_one(&self, table: &str, id: &str) -> Result<()> {
        let request = self
            .request(Method::DELETE, table)?
            .query(&[("records[]", id)]);
        let response: serde_json::Value = self.send_json(request).await?;
        debug!("Delete response: {response}");
        info!("Deleted record {} from '{}'", id, table);
        Ok(())
    }
}
