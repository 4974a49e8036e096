//! Unit tests for the Airtable client module.


use crate::config::StoreConfig;
use crate::store::AirtableClient;

pub(super) fn client_with_mock(mock_uri: &str) -> AirtableClient {
    AirtableClient::new(StoreConfig::new(mock_uri, Some("appTEST"), Some("patTEST")))
}
