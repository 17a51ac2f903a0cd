//! Room categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five fixed partitions of the room listing.
///
/// A category is used three ways: as the key of a per-category list, as
/// the `type` value sent to the server, and as the "which list is on
/// screen" selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Multi-host rooms.
    #[default]
    Multi,
    /// Single-host rooms.
    Single,
    /// Host-versus-host battles.
    Pk,
    /// Avatar (virtual host) rooms.
    Virtual,
    /// Live shopping rooms.
    Shopping,
}

impl Category {
    pub const COUNT: usize = 5;

    /// Every category, in wire order.
    pub const ALL: [Category; Self::COUNT] = [
        Self::Multi,
        Self::Single,
        Self::Pk,
        Self::Virtual,
        Self::Shopping,
    ];

    /// Dense index in `0..5`, for array-backed storage.
    pub fn index(self) -> usize {
        match self {
            Self::Multi => 0,
            Self::Single => 1,
            Self::Pk => 2,
            Self::Virtual => 3,
            Self::Shopping => 4,
        }
    }

    /// The value sent as the `type` request parameter.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Multi => "1",
            Self::Single => "2",
            Self::Pk => "3",
            Self::Virtual => "4",
            Self::Shopping => "5",
        }
    }

    /// Inverse of [`wire_value`](Self::wire_value).
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.wire_value() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multi => write!(f, "multi"),
            Self::Single => write!(f, "single"),
            Self::Pk => write!(f, "pk"),
            Self::Virtual => write!(f, "virtual"),
            Self::Shopping => write!(f, "shopping"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_position_in_all() {
        for (i, c) in Category::ALL.into_iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_wire_values_are_unique_and_invertible() {
        for c in Category::ALL {
            assert_eq!(Category::from_wire(c.wire_value()), Some(c));
        }
        assert_eq!(Category::from_wire("0"), None);
        assert_eq!(Category::from_wire("multi"), None);
    }

    #[test]
    fn test_default_is_multi() {
        assert_eq!(Category::default(), Category::Multi);
    }

    #[test]
    fn test_display_and_serde_use_lowercase_names() {
        assert_eq!(Category::Pk.to_string(), "pk");
        assert_eq!(
            serde_json::to_string(&Category::Shopping).unwrap(),
            "\"shopping\""
        );
        let c: Category = serde_json::from_str("\"virtual\"").unwrap();
        assert_eq!(c, Category::Virtual);
    }
}
