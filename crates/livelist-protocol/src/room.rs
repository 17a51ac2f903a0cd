//! A single entry of the room listing.

use serde::Serialize;
use serde_json::Value;

use crate::fields::{as_record, optional_str, optional_u32, required, required_str};
use crate::{ProtocolError, RoleDescriptor};

/// Number of decorative cover images a room can be assigned to.
pub const IMAGE_SLOTS: u64 = 12;

/// One live room.
///
/// Rooms are validated on construction and never change afterwards; a
/// refreshed listing replaces them wholesale. `image_index` is derived
/// from the numeric room id and picks one of [`IMAGE_SLOTS`] local cover
/// images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    name: String,
    room_id: String,
    image_url: String,
    person_count: u32,
    image_index: u8,
    owner: RoleDescriptor,
}

impl Room {
    /// Creates a room with an empty name and thumbnail and no viewers.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidRoomId`] if `room_id` is not a
    /// non-negative integer written as plain decimal digits.
    pub fn new(
        room_id: impl Into<String>,
        owner: RoleDescriptor,
    ) -> Result<Self, ProtocolError> {
        let room_id = room_id.into();
        let image_index = image_index_for(&room_id)?;
        Ok(Self {
            name: String::new(),
            room_id,
            image_url: String::new(),
            person_count: 0,
            image_index,
            owner,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_person_count(mut self, person_count: u32) -> Self {
        self.person_count = person_count;
        self
    }

    /// Validates one room record from a list response.
    ///
    /// `roomName`, `roomId` and `owner` are required. `currentUsers`
    /// defaults to 0 and `thumbnail` to `""` when absent, but must have
    /// the right type when present.
    pub fn parse(value: &Value) -> Result<Self, ProtocolError> {
        let record = as_record(value, "room")?;

        let name = required_str(record, "roomName")?;
        let room_id = required_str(record, "roomId")?;
        let person_count = optional_u32(record, "currentUsers")?.unwrap_or(0);
        let image_url = optional_str(record, "thumbnail")?.unwrap_or_default();
        let owner = RoleDescriptor::parse(required(record, "owner")?)?;

        Ok(Self::new(room_id, owner)?
            .with_name(name)
            .with_image_url(image_url)
            .with_person_count(person_count))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn person_count(&self) -> u32 {
        self.person_count
    }

    /// Always in `0..IMAGE_SLOTS`.
    pub fn image_index(&self) -> u8 {
        self.image_index
    }

    pub fn owner(&self) -> &RoleDescriptor {
        &self.owner
    }
}

/// `room_id mod IMAGE_SLOTS`, folded one decimal digit at a time so ids
/// of any length are accepted.
fn image_index_for(room_id: &str) -> Result<u8, ProtocolError> {
    if room_id.is_empty() {
        return Err(ProtocolError::InvalidRoomId(room_id.to_string()));
    }
    let mut index = 0u64;
    for c in room_id.chars() {
        let digit = c
            .to_digit(10)
            .ok_or_else(|| ProtocolError::InvalidRoomId(room_id.to_string()))?;
        index = (index * 10 + u64::from(digit)) % IMAGE_SLOTS;
    }
    Ok(index as u8)
}
