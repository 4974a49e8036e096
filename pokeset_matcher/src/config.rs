//! Command-line and environment configuration
//!
//! Every flag falls back to an environment variable. The parsed [`Args`] are
//! turned into a [`StoreConfig`] once at startup and handed to the store
//! client; nothing reads the environment while serving requests.

use clap::Parser;
use std::path::PathBuf;

/// Airtable REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// PokeSet want-list matcher - serves the inventory API and matches want-lists
#[derive(Parser, Debug, Clone)]
#[command(name = "pokeset_matcher")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Airtable base id
    #[arg(long, env = "AIRTABLE_BASE_ID")]
    pub base_id: Option<String>,

    /// Airtable personal access token
    #[arg(long, env = "AIRTABLE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Airtable API root
    #[arg(long, env = "AIRTABLE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Inventory table name
    #[arg(long, env = "AIRTABLE_INVENTORY_TABLE", default_value = "inventory")]
    pub inventory_table: String,

    /// Optional view used when listing inventory
    #[arg(long, env = "AIRTABLE_INVENTORY_VIEW")]
    pub inventory_view: Option<String>,

    /// Catalog table name
    #[arg(long, env = "AIRTABLE_CATALOG_TABLE", default_value = "catalog")]
    pub catalog_table: String,

    /// Optional view used when listing the catalog
    #[arg(long, env = "AIRTABLE_CATALOG_VIEW")]
    pub catalog_view: Option<String>,

    /// Orders table name
    #[arg(long, env = "AIRTABLE_ORDERS_TABLE", default_value = "orders")]
    pub orders_table: String,

    /// Key required in `x-admin-key` for inventory/catalog edits (unset: no check)
    #[arg(long, env = "POKESET_ADMIN_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,

    /// Port for the web server
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Match a want-list file (.csv or paste text) against the store, print the result and exit
    #[arg(long)]
    pub match_file: Option<PathBuf>,

    /// With --match-file: request an order for every unavailable or over-budget card
    #[arg(long, requires = "match_file")]
    pub order_email: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Args {
    /// Store settings; empty values count as unset
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            api_url: self.api_url.trim_end_matches('/').to_string(),
            base_id: non_empty(&self.base_id),
            api_token: non_empty(&self.api_token),
            inventory: TableConfig::new(&self.inventory_table, non_empty(&self.inventory_view)),
            catalog: TableConfig::new(&self.catalog_table, non_empty(&self.catalog_view)),
            orders: TableConfig::new(&self.orders_table, None),
        }
    }

    pub fn admin_key(&self) -> Option<String> {
        non_empty(&self.admin_key)
    }
}

/// The three record collections the shop keeps in Airtable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Inventory,
    Catalog,
    Orders,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Inventory => "inventory",
            Resource::Catalog => "catalog",
            Resource::Orders => "orders",
        }
    }
}

/// A table and the view to list it through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub name: String,
    pub view: Option<String>,
}

impl TableConfig {
    pub fn new(name: &str, view: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            view,
        }
    }
}

/// Everything the store client needs to reach Airtable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub api_url: String,
    pub base_id: Option<String>,
    pub api_token: Option<String>,
    pub inventory: TableConfig,
    pub catalog: TableConfig,
    pub orders: TableConfig,
}

impl StoreConfig {
    /// Config with default table names, mostly for tests and tools
    pub fn new(api_url: &str, base_id: Option<&str>, api_token: Option<&str>) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            base_id: base_id.map(str::to_string),
            api_token: api_token.map(str::to_string),
            inventory: TableConfig::new(Resource::Inventory.as_str(), None),
            catalog: TableConfig::new(Resource::Catalog.as_str(), None),
            orders: TableConfig::new(Resource::Orders.as_str(), None),
        }
    }

    pub fn table(&self, resource: Resource) -> &TableConfig {
        match resource {
            Resource::Inventory => &self.inventory,
            Resource::Catalog => &self.catalog,
            Resource::Orders => &self.orders,
        }
    }

    /// Names of required settings that are missing
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base_id.is_none() {
            missing.push("AIRTABLE_BASE_ID");
        }
        if self.api_token.is_none() {
            missing.push("AIRTABLE_API_TOKEN");
        }
        missing
    }
}
