//! Common API response wrapper types.
//!
//! [`ApiResponse`] provides the standard envelope for all successful API
//! responses. Error responses are produced by [`ApiError`](crate::error::ApiError).

use serde::{Deserialize, Deserializer, Serialize};

/// Decodes an absent-or-`null` field as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing key is covered too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Standard API response envelope.
///
/// `data` is always present: an empty search serializes as `"data": []`,
/// never as a missing field or `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for successful responses.
    pub success: bool,
    /// Optional human-readable status line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response with data.
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data,
        }
    }

    /// Create a successful response with data and a status message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_serializes_as_array() {
        let json = serde_json::to_value(ApiResponse::ok(Vec::<u32>::new())).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": [] }));
    }

    #[test]
    fn message_is_included_when_set() {
        let json = serde_json::to_value(ApiResponse::ok_with_message(1, "done")).unwrap();
        assert_eq!(json["message"], "done");
    }
}
