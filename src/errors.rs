use axum::http::StatusCode;
use thiserror::Error;

/// Error type shared by the studio services and view-model types.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("{0}")]
    Validation(String),

    /// Another editor action is still in flight; the caller should retry
    /// once the current one settles.
    #[error("another action is already in flight")]
    Busy,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("storage i/o failed: {0}")]
    Storage(#[from] std::io::Error),

    /// The external SEO workflow answered with a non-success HTTP status.
    #[error("workflow returned {status} {reason}")]
    Workflow { status: u16, reason: String },

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl StudioError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// HTTP status the REST layer reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            StudioError::Validation(_) => StatusCode::BAD_REQUEST,
            StudioError::Busy => StatusCode::CONFLICT,
            StudioError::NotFound { .. } => StatusCode::NOT_FOUND,
            StudioError::Workflow { .. } => StatusCode::BAD_GATEWAY,
            StudioError::Storage(_) | StudioError::Database(_) | StudioError::Http(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
