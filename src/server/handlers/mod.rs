pub mod designs;
pub mod health;
pub mod seo;
pub mod taxonomy;

use axum::http::StatusCode;

use crate::errors::StudioError;

/// Map a service error onto the status reported to the client. The cause
/// only reaches the log.
pub(crate) fn error_status(err: StudioError) -> StatusCode {
    let status = err.status_code();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::debug!("Request rejected: {}", err);
    }
    status
}
