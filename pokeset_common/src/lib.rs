//! PokeSet Common - want-list matching for trading-card inventory
//!
//! Pure logic shared by the matcher server and its command-line mode: the
//! catalog/inventory data model, want-list parsing and normalization, matching
//! against catalog and stock snapshots, and cart aggregation.

pub mod cart;
pub mod error;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod want_list;

pub use cart::{proposed_cart, CartItem, OrderRequest, ProposedCart};
pub use error::{Result, WantListError};
pub use matching::{
    build_search_links, find_catalog_match, find_inventory_match, match_row, match_rows,
};
pub use models::{
    CatalogCard, InventoryItem, MatchResult, MatchStatus, NormalizedRow, SearchLink, WantRow,
};
pub use normalize::{normalize_finish, normalize_row, validate_row, Validation};
pub use want_list::{parse_csv, parse_paste, read_want_list, WantListDefaults};
