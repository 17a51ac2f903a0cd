//! Request descriptions handed to a [`RequestClient`](crate::RequestClient).

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// HttpMethod
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

// ---------------------------------------------------------------------------
// TimeoutClass
// ---------------------------------------------------------------------------

/// Coarse timeout bucket. The client decides what each class means; the
/// durations returned by [`TimeoutClass::duration`] are the suggested
/// defaults.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutClass {
    /// Short requests such as list pages.
    #[default]
    Low,
    Medium,
    /// Uploads and other slow requests.
    High,
}

impl TimeoutClass {
    pub fn duration(self) -> Duration {
        match self {
            Self::Low => Duration::from_secs(10),
            Self::Medium => Duration::from_secs(20),
            Self::High => Duration::from_secs(60),
        }
    }
}

// ---------------------------------------------------------------------------
// RetryOption
// ---------------------------------------------------------------------------

/// What a failure handler wants the client to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOption {
    /// Try the same task again after the given delay.
    Retry { after: Duration },
    /// Give up. No further handler calls for this task.
    Resign,
}

// ---------------------------------------------------------------------------
// RequestTask
// ---------------------------------------------------------------------------

/// One outgoing request.
///
/// `event` is a short name used for logging and metrics on the client
/// side (e.g. `"room-page"`); it is not sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTask {
    pub event: String,
    pub method: HttpMethod,
    pub url: String,
    pub timeout: TimeoutClass,
    pub headers: BTreeMap<String, String>,
    pub parameters: Map<String, Value>,
}

impl RequestTask {
    /// Creates a GET task with no headers and no parameters.
    pub fn get(event: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            method: HttpMethod::Get,
            url: url.into(),
            timeout: TimeoutClass::default(),
            headers: BTreeMap::new(),
            parameters: Map::new(),
        }
    }

    pub fn timeout(mut self, timeout: TimeoutClass) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_builds_empty_task() {
        let task = RequestTask::get("room-page", "/v1/room/page");
        assert_eq!(task.method, HttpMethod::Get);
        assert_eq!(task.event, "room-page");
        assert_eq!(task.timeout, TimeoutClass::Low);
        assert!(task.headers.is_empty());
        assert!(task.parameters.is_empty());
    }

    #[test]
    fn test_builder_methods_set_headers_and_params() {
        let task = RequestTask::get("e", "/u")
            .timeout(TimeoutClass::High)
            .header("token", "t-1")
            .param("count", 10)
            .param("type", "1");
        assert_eq!(task.timeout, TimeoutClass::High);
        assert_eq!(task.headers.get("token").map(String::as_str), Some("t-1"));
        assert_eq!(task.parameters["count"], Value::from(10));
        assert_eq!(task.parameters["type"], Value::from("1"));
    }

    #[test]
    fn test_timeout_classes_are_ordered() {
        assert!(TimeoutClass::Low.duration() < TimeoutClass::Medium.duration());
        assert!(TimeoutClass::Medium.duration() < TimeoutClass::High.duration());
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
