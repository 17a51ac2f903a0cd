//! Error types for the protocol layer.

/// Ways a server response can fail validation.
///
/// Field names are the wire keys, with a dotted prefix for nested
/// records (`owner.userId`), so a log line points straight at the
/// offending key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// A required key is absent or `null`.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A key is present but holds the wrong JSON type (or an
    /// out-of-range value for its type).
    #[error("field `{0}` has the wrong type")]
    TypeMismatch(String),

    /// The room id is not a non-negative integer.
    #[error("invalid room id {0:?}")]
    InvalidRoomId(String),

    /// The response-level status code reported failure.
    #[error("server returned code {code}: {message}")]
    Status { code: i64, message: String },

    /// The response-level status could not be read at all: `code` is
    /// missing or not an integer. Holds the underlying field error.
    #[error("malformed response status: {0}")]
    MalformedStatus(Box<ProtocolError>),
}

impl ProtocolError {
    /// Prefixes the field path with `parent.`. Other variants are
    /// returned unchanged.
    pub(crate) fn nested_in(self, parent: &str) -> Self {
        match self {
            Self::MissingField(field) => {
                Self::MissingField(format!("{parent}.{field}"))
            }
            Self::TypeMismatch(field) => {
                Self::TypeMismatch(format!("{parent}.{field}"))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_in_prefixes_field_errors() {
        let err = ProtocolError::MissingField("userId".into()).nested_in("owner");
        assert_eq!(err, ProtocolError::MissingField("owner.userId".into()));
        assert_eq!(err.to_string(), "missing field `owner.userId`");
    }

    #[test]
    fn test_nested_in_leaves_status_alone() {
        let err = ProtocolError::Status {
            code: 3,
            message: "x".into(),
        };
        assert_eq!(err.clone().nested_in("owner"), err);
    }

    #[test]
    fn test_malformed_status_display_names_the_field() {
        let err = ProtocolError::MalformedStatus(Box::new(
            ProtocolError::MissingField("code".into()),
        ));
        assert_eq!(
            err.to_string(),
            "malformed response status: missing field `code`"
        );
    }
}
