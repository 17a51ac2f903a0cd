//! View-model configuration.

use livelist_transport::TimeoutClass;
use serde::{Deserialize, Serialize};

/// Settings for list requests.
///
/// Every field has a default, so a partial JSON/TOML document is enough
/// to override just what differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Endpoint for both next-page and refetch requests.
    pub room_page_url: String,

    /// Rooms requested per next-page fetch when the caller doesn't say.
    pub page_size: usize,

    /// Lower bound on the number of rooms a refetch asks for. A refetch
    /// also never asks for fewer rooms than are currently shown.
    pub min_refetch_count: usize,

    pub timeout: TimeoutClass,

    /// Header that carries the auth token.
    pub token_header: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            room_page_url: "/v1/room/page".to_string(),
            page_size: 10,
            min_refetch_count: 10,
            timeout: TimeoutClass::Low,
            token_header: "token".to_string(),
        }
    }
}

impl ListConfig {
    /// Count for a refetch when `current` rooms are displayed.
    pub fn refetch_count(&self, current: usize) -> usize {
        current.max(self.min_refetch_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ListConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.min_refetch_count, 10);
        assert_eq!(config.timeout, TimeoutClass::Low);
        assert_eq!(config.token_header, "token");
    }

    #[test]
    fn test_refetch_count_never_below_minimum_or_current() {
        let config = ListConfig::default();
        assert_eq!(config.refetch_count(0), 10);
        assert_eq!(config.refetch_count(3), 10);
        assert_eq!(config.refetch_count(10), 10);
        assert_eq!(config.refetch_count(15), 15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ListConfig =
            serde_json::from_str(r#"{"page_size": 20, "timeout": "medium"}"#)
                .unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.timeout, TimeoutClass::Medium);
        assert_eq!(config.room_page_url, "/v1/room/page");
    }
}
