use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard JSON envelope for error responses.
///
/// Page and API payloads are returned directly; this envelope only wraps
/// failures so clients get a predictable error shape.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
        }
    }
}
