//! Lazy, restartable listing of a table

use log::{debug, info};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;

use super::{AirtableClient, AirtableRecord};
use crate::config::TableConfig;
use crate::error::Result;

/// One page of a list response. `offset` is present while more pages follow.
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct ListPage<T> {
    records: Vec<AirtableRecord<T>>,
    #[serde(default)]
    offset: Option<String>,
}

/// Cursor over the pages of a table listing.
///
/// Each [`next_page`](Self::next_page) call fetches one page, so memory stays
/// bounded by the page size. A failed fetch leaves the cursor where it was and
/// the same page is requested again on the next call.
pub struct RecordPages<'a, T> {
    client: &'a AirtableClient,
    table: &'a TableConfig,
    offset: Option<String>,
    exhausted: bool,
    pages_fetched: usize,
    _records: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> RecordPages<'a, T> {
    pub(crate) fn new(client: &'a AirtableClient, table: &'a TableConfig) -> Self {
        Self {
            client,
            table,
            offset: None,
            exhausted: false,
            pages_fetched: 0,
            _records: PhantomData,
        }
    }

    /// Fetches the next page, or `None` once the table has been read
    pub async fn next_page(&mut self) -> Result<Option<Vec<AirtableRecord<T>>>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(view) = &self.table.view {
            params.push(("view", view.as_str()));
        }
        if let Some(offset) = &self.offset {
            params.push(("offset", offset.as_str()));
        }

        let request = self
            .client
            .request(Method::GET, &self.table.name)?
            .query(&params);
        let page: ListPage<T> = self.client.send_json(request).await?;

        self.pages_fetched += 1;
        debug!(
            "Fetched page {} of '{}' ({} records, more: {})",
            self.pages_fetched,
            self.table.name,
            page.records.len(),
            page.offset.is_some()
        );

        self.exhausted = page.offset.is_none();
        self.offset = page.offset;
        Ok(Some(page.records))
    }

    /// Starts over from the first page
    pub fn restart(&mut self) {
        self.offset = None;
        self.exhausted = false;
        self.pages_fetched = 0;
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Drains the remaining pages, concatenated in server order
    pub async fn collect_all(mut self) -> Result<Vec<AirtableRecord<T>>> {
        let mut records = Vec::new();
        while let Some(page) = self.next_page().await? {
            records.extend(page);
        }
        info!(
            "Listed {} records from '{}' in {} page(s)",
            records.len(),
            self.table.name,
            self.pages_fetched
        );
        Ok(records)
    }
}

impl AirtableClient {
    /// Page cursor over a table, starting at the first page
    pub fn pages<'a, T: DeserializeOwned>(&'a self, table: &'a TableConfig) -> RecordPages<'a, T> {
        RecordPages::new(self, table)
    }

    /// Every record of a table, following the pagination offset until exhausted
    pub async fn list_all<T: DeserializeOwned>(&self, table: &TableConfig) -> Result<Vec<AirtableRecord<T>>> {
        self.pages(table).collect_all().await
    }
}
