//! Unpacking the list response envelope.
//!
//! ```text
//! { "code": 0, "msg": "", "data": { "list": [ {room}, {room}, ... ] } }
//! ```

use serde_json::Value;

use crate::fields::{as_record, optional_str, required, required_i64};
use crate::{ProtocolError, Room};

/// `code` value that means success.
const CODE_OK: i64 = 0;

/// Checks the response-level status.
///
/// # Errors
/// - [`ProtocolError::MalformedStatus`] if the body is not an object or
///   `code` is missing or not an integer.
/// - [`ProtocolError::Status`] if `code` is anything but 0.
pub fn check_status(body: &Value) -> Result<(), ProtocolError> {
    let malformed =
        |e: ProtocolError| ProtocolError::MalformedStatus(Box::new(e));
    let record = as_record(body, "response").map_err(malformed)?;
    let code = required_i64(record, "code").map_err(malformed)?;
    if code == CODE_OK {
        return Ok(());
    }
    let message = optional_str(record, "msg")
        .ok()
        .flatten()
        .unwrap_or_default()
        .to_string();
    Err(ProtocolError::Status { code, message })
}

/// Extracts and validates `data.list`.
///
/// One bad record fails the whole page; no partial list is returned.
pub fn parse_room_list(body: &Value) -> Result<Vec<Room>, ProtocolError> {
    let record = as_record(body, "response")?;
    let data = as_record(required(record, "data")?, "data")?;
    let items = required(data, "list")
        .map_err(|e| e.nested_in("data"))?
        .as_array()
        .ok_or_else(|| ProtocolError::TypeMismatch("data.list".into()))?;
    items.iter().map(Room::parse).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn room(id: &str) -> Value {
        json!({
            "roomName": format!("room {id}"),
            "roomId": id,
            "owner": {"userId": "u", "userName": "n", "uid": 1},
        })
    }

    #[test]
    fn test_parse_room_list_preserves_server_order() {
        let body = json!({"code": 0, "data": {"list": [room("3"), room("1"), room("2")]}});
        let rooms = parse_room_list(&body).unwrap();
        let ids: Vec<&str> = rooms.iter().map(Room::room_id).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_parse_room_list_empty_list() {
        let body = json!({"data": {"list": []}});
        assert!(parse_room_list(&body).unwrap().is_empty());
    }

    #[test]
    fn test_one_bad_record_fails_the_page() {
        let mut bad = room("2");
        bad.as_object_mut().unwrap().remove("roomId");
        let body = json!({"data": {"list": [room("1"), bad, room("3")]}});
        assert_eq!(
            parse_room_list(&body).unwrap_err(),
            ProtocolError::MissingField("roomId".into())
        );
    }

    #[test]
    fn test_missing_data_or_list() {
        assert_eq!(
            parse_room_list(&json!({"code": 0})).unwrap_err(),
            ProtocolError::MissingField("data".into())
        );
        assert_eq!(
            parse_room_list(&json!({"data": {}})).unwrap_err(),
            ProtocolError::MissingField("data.list".into())
        );
        assert_eq!(
            parse_room_list(&json!({"data": {"list": {}}})).unwrap_err(),
            ProtocolError::TypeMismatch("data.list".into())
        );
    }

    #[test]
    fn test_check_status_ok() {
        assert!(check_status(&json!({"code": 0, "data": {}})).is_ok());
    }

    #[test]
    fn test_check_status_non_zero_code() {
        let err = check_status(&json!({"code": 1001, "msg": "token expired"}))
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::Status {
                code: 1001,
                message: "token expired".into()
            }
        );
    }

    #[test]
    fn test_check_status_requires_integer_code() {
        assert_eq!(
            check_status(&json!({"data": {}})).unwrap_err(),
            ProtocolError::MalformedStatus(Box::new(ProtocolError::MissingField(
                "code".into()
            )))
        );
        assert_eq!(
            check_status(&json!({"code": "0"})).unwrap_err(),
            ProtocolError::MalformedStatus(Box::new(ProtocolError::TypeMismatch(
                "code".into()
            )))
        );
        assert!(matches!(
            check_status(&json!([])).unwrap_err(),
            ProtocolError::MalformedStatus(_)
        ));
    }
}
