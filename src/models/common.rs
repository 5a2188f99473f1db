use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope around every JSON body: `data` on success, `error` on failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Stable machine-readable code, e.g. `DUPLICATE_ACTIVE_ENROLLMENT`.
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Success with a note for the client, e.g. after a simulated payment.
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_body_carries_only_the_error() {
        let body = serde_json::to_value(ApiResponse::failure("NOT_FOUND", "Menu not found")).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": { "code": "NOT_FOUND", "message": "Menu not found" }
            })
        );
    }

    #[test]
    fn test_success_with_message() {
        let body =
            serde_json::to_value(ApiResponse::success_with_message(7, "Profile updated")).unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "data": 7, "message": "Profile updated" })
        );
    }
}
