// HTTP error mapping
use crate::domain::range::RangeError;
use crate::domain::snapshot::StatKeyError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Stat(#[from] StatKeyError),
    #[error("tracker backend error: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Range(_) | ApiError::Stat(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(RangeError::MissingCustomBounds).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StatKeyError("mana".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("connection refused")).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
