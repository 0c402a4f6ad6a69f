use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Catalog service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Select an anime on both sides first")]
    IncompleteSelection,

    #[error("The selected anime have no genre in common")]
    NoCommonGenre,

    #[error("No anime found for the common genres")]
    NoCandidatesFound,

    #[error("No more matching anime")]
    NoMoreCandidates,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Stable machine-readable code sent alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UpstreamUnavailable(_) => "upstream_unavailable",
            AppError::IncompleteSelection => "incomplete_selection",
            AppError::NoCommonGenre => "no_common_genre",
            AppError::NoCandidatesFound => "no_candidates_found",
            AppError::NoMoreCandidates => "no_more_candidates",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidInput(_) => "invalid_input",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::IncompleteSelection | AppError::NoMoreCandidates => StatusCode::CONFLICT,
            AppError::NoCommonGenre => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NoCandidatesFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamUnavailable(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_errors_map_to_client_statuses() {
        assert_eq!(AppError::IncompleteSelection.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::NoCommonGenre.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::NoCandidatesFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NoMoreCandidates.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_upstream_failure_is_bad_gateway() {
        let err = AppError::UpstreamUnavailable("status 500".to_string());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "upstream_unavailable");
        assert_eq!(err.to_string(), "Catalog service unavailable: status 500");
    }
}
