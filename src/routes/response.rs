use serde::Serialize;

/// The envelope every JSON endpoint answers with. Error strings are fixed,
/// user-safe messages: internal causes only ever reach the logs.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(data: serde_json::Value) -> ApiResponse {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn failure(error: &str) -> ApiResponse {
        ApiResponse {
            success: false,
            data: None,
            message: None,
            error: Some(error.to_string()),
        }
    }
}
