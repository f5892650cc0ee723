use serde::Serialize;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints:
/// ```json
/// {
///   "isSuccess": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `isSuccess` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
///
/// Error responses carry only `isSuccess` and `message`; `data` is omitted
/// entirely rather than filled with a placeholder:
/// ```json
/// {
///   "isSuccess": false,
///   "message": "Member not found"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and no data.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            data: None,
            message: message.into(),
        }
    }
}
