//! The room owner's role descriptor.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProtocolError;
use crate::fields::{
    as_record, optional_str, required_str, required_u32, Record,
};

/// What a participant is allowed to do in a room.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    #[default]
    Owner,
    Broadcaster,
    Audience,
}

impl RoleKind {
    /// Decodes the integer used on the wire (`1`, `2`, `3`).
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Owner),
            2 => Some(Self::Broadcaster),
            3 => Some(Self::Audience),
            _ => None,
        }
    }

    pub fn wire_value(self) -> i64 {
        match self {
            Self::Owner => 1,
            Self::Broadcaster => 2,
            Self::Audience => 3,
        }
    }
}

/// Identity of a room participant, as embedded in a room record's
/// `owner` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDescriptor {
    pub kind: RoleKind,
    pub user_id: String,
    pub name: String,
    /// Numeric media-session id.
    pub uid: u32,
    pub avatar: String,
}

impl RoleDescriptor {
    /// An owner with no avatar.
    pub fn owner(
        user_id: impl Into<String>,
        name: impl Into<String>,
        uid: u32,
    ) -> Self {
        Self {
            kind: RoleKind::Owner,
            user_id: user_id.into(),
            name: name.into(),
            uid,
            avatar: String::new(),
        }
    }

    /// Validates an `owner` object.
    ///
    /// Requires `userId`, `userName` (strings) and `uid` (non-negative
    /// integer). `avatar` defaults to `""` and `role` to owner.
    pub fn parse(value: &Value) -> Result<Self, ProtocolError> {
        let record = as_record(value, "owner")?;
        Self::from_record(record).map_err(|e| e.nested_in("owner"))
    }

    fn from_record(record: &Record) -> Result<Self, ProtocolError> {
        let kind = match record.get("role").filter(|v| !v.is_null()) {
            None => RoleKind::Owner,
            Some(v) => v
                .as_i64()
                .and_then(RoleKind::from_wire)
                .ok_or_else(|| ProtocolError::TypeMismatch("role".into()))?,
        };

        Ok(Self {
            kind,
            user_id: required_str(record, "userId")?.to_string(),
            name: required_str(record, "userName")?.to_string(),
            uid: required_u32(record, "uid")?,
            avatar: optional_str(record, "avatar")?
                .unwrap_or_default()
                .to_string(),
        })
    }
}
