//! Catalog and inventory snapshots loaded from the store
//!
//! Snapshots are fetched whole for every match run and thrown away
//! afterwards, so the store stays the only source of truth.

use log::info;
use pokeset_common::{match_rows, CatalogCard, InventoryItem, MatchResult, WantRow};

use crate::error::Result;
use crate::store::AirtableClient;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub catalog: Vec<CatalogCard>,
    pub inventory: Vec<InventoryItem>,
}

impl Snapshot {
    /// Lists the catalog and inventory tables
    pub async fn load(store: &AirtableClient) -> Result<Self> {
        let config = store.config();
        let (catalog, inventory) = tokio::try_join!(
            store.list_all::<CatalogCard>(&config.catalog),
            store.list_all::<InventoryItem>(&config.inventory),
        )?;

        let snapshot = Self {
            catalog: catalog.into_iter().map(|r| r.fields).collect(),
            inventory: inventory.into_iter().map(|r| r.fields).collect(),
        };
        info!(
            "Loaded snapshot: {} catalog cards, {} stock items ({} in stock)",
            snapshot.catalog.len(),
            snapshot.inventory.len(),
            snapshot.inventory.iter().filter(|i| i.in_stock()).count()
        );
        Ok(snapshot)
    }

    pub fn match_rows(&self, rows: &[WantRow]) -> Vec<MatchResult> {
        match_rows(rows, &self.catalog, &self.inventory)
    }
}
