use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    pub error: JsonRpcError,
}

impl JsonRpcErrorResponse {
    pub fn new(error: JsonRpcError, id: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            error,
        }
    }

    pub fn from_error(err: &AppError, id: Option<Value>) -> Value {
        serde_json::to_value(Self::new(err.user_safe_format(), id))
            .expect("JsonRpcErrorResponse serialization failed")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid params - {0}")]
    InvalidParams(String),

    #[error("Internal server error - {0}")]
    InternalServerError(String),

    #[error("Database error - {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Serialization error - {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error - {0}")]
    IoError(#[from] std::io::Error),

    #[error("Method not found - {0}")]
    MethodNotFound(String),

    #[error("User not found")]
    UserNotFound,

    #[error("No prompt for this day")]
    PromptNotFound,

    #[error("Submission not found")]
    SubmissionNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("Favorite not found")]
    FavoriteNotFound,

    #[error("Already submitted for this day")]
    SubmissionExists,

    #[error("Already friends")]
    FriendshipExists,

    #[error("Already favorited")]
    AlreadyFavorited,

    #[error("Not the owner of this favorite")]
    NotFavoriteOwner,

    #[error("Unknown stat type - {0}")]
    UnknownStat(String),

    #[error("Push delivery error - {0}")]
    PushDelivery(String),

    #[error("TryInitError - {0}")]
    TryInitError(#[from] tracing_subscriber::util::TryInitError),
}

impl AppError {
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidParams(_) => -32602,
            Self::InternalServerError(_) => -32603,
            Self::MethodNotFound(_) => -32601,
            Self::DatabaseError(_) => -32070,
            Self::SerializationError(_) => -32072,
            Self::IoError(_) => -32080,
            Self::TryInitError(_) => -32081,
            Self::UserNotFound => -32011,
            Self::PromptNotFound => -32012,
            Self::SubmissionNotFound => -32013,
            Self::CommentNotFound => -32014,
            Self::FavoriteNotFound => -32015,
            Self::SubmissionExists => -32030,
            Self::FriendshipExists => -32031,
            Self::AlreadyFavorited => -32032,
            Self::NotFavoriteOwner => -32040,
            Self::UnknownStat(_) => -32050,
            Self::PushDelivery(_) => -32060,
        }
    }

    pub fn user_safe_format(&self) -> JsonRpcError {
        match self {
            Self::InvalidParams(msg) => JsonRpcError {
                code: self.code(),
                message: msg.clone(),
                data: None,
            },
            Self::DatabaseError(error) => {
                tracing::error!(error = %error, "Database error");

                JsonRpcError {
                    code: self.code(),
                    message: "Service temporarily unavailable. Please try again later.".to_string(),
                    data: None,
                }
            }
            Self::SerializationError(error) => {
                tracing::error!(error = %error, "Serialization error");

                JsonRpcError {
                    code: self.code(),
                    message: "Internal server error".to_string(),
                    data: None,
                }
            }
            Self::InternalServerError(error) => {
                tracing::error!(error = %error, "Internal server error");

                JsonRpcError {
                    code: self.code(),
                    message: "Internal server error".to_string(),
                    data: None,
                }
            }
            Self::IoError(error) => {
                tracing::error!(error = %error, "IO error");

                JsonRpcError {
                    code: self.code(),
                    message: "Service temporarily unavailable. Please try again later.".to_string(),
                    data: None,
                }
            }
            Self::TryInitError(error) => {
                tracing::error!(error = %error, "TryInitError");

                JsonRpcError {
                    code: self.code(),
                    message: "Internal server error".to_string(),
                    data: None,
                }
            }
            Self::PushDelivery(error) => {
                tracing::warn!(error = %error, "Push delivery error");

                JsonRpcError {
                    code: self.code(),
                    message: "Notification delivery failed.".to_string(),
                    data: None,
                }
            }
            Self::MethodNotFound(method) => JsonRpcError {
                code: self.code(),
                message: format!("Method '{}' not found", method),
                data: None,
            },
            Self::PromptNotFound => JsonRpcError {
                code: self.code(),
                message: "No drawing prompt exists for this day yet.".to_string(),
                data: None,
            },
            Self::SubmissionExists => JsonRpcError {
                code: self.code(),
                message: "You already submitted a drawing for this day.".to_string(),
                data: None,
            },
            Self::FriendshipExists => JsonRpcError {
                code: self.code(),
                message: "You are already friends with this user.".to_string(),
                data: None,
            },
            Self::AlreadyFavorited => JsonRpcError {
                code: self.code(),
                message: "This submission is already in your favorites.".to_string(),
                data: None,
            },
            _ => JsonRpcError {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::PromptNotFound
            | Self::SubmissionNotFound
            | Self::CommentNotFound
            | Self::FavoriteNotFound
            | Self::MethodNotFound(_) => StatusCode::NOT_FOUND,
            Self::SubmissionExists | Self::FriendshipExists | Self::AlreadyFavorited => {
                StatusCode::CONFLICT
            }
            Self::InvalidParams(_) | Self::UnknownStat(_) => StatusCode::BAD_REQUEST,
            Self::NotFavoriteOwner => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&AppError> for JsonRpcError {
    fn from(error: &AppError) -> Self {
        error.user_safe_format()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let json_error = self.user_safe_format();
        let body = serde_json::to_string(&json_error)
            .unwrap_or_else(|_| r#"{"code":-32603,"message":"Internal server error"}"#.to_string());

        (status, [("content-type", "application/json")], body).into_response()
    }
}
