//! Mapping of pipeline failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stimulus_engine::core::pipeline::PipelineError;
use stimulus_engine::core::store::StoreError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Client mistakes are 4xx; everything the materials author or the
    /// deployment must fix is a 500.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(err) => match err {
                PipelineError::MissingParameter(_)
                | PipelineError::MaterialsCount { .. }
                | PipelineError::Store(StoreError::InvalidIdentifier(_)) => StatusCode::BAD_REQUEST,
                PipelineError::UnknownVariant(_) | PipelineError::Store(StoreError::NotFound(_)) => {
                    StatusCode::NOT_FOUND
                }
                PipelineError::Render(_)
                | PipelineError::Names(_)
                | PipelineError::Store(StoreError::Io { .. })
                | PipelineError::Store(StoreError::Json { .. }) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "trial request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "trial request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stimulus_engine::core::error::RenderError;

    fn status(err: PipelineError) -> StatusCode {
        ApiError::from(err).status()
    }

    #[test]
    fn client_errors() {
        assert_eq!(
            status(PipelineError::MissingParameter("materials".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(PipelineError::MaterialsCount {
                expected: 2,
                found: 3
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(StoreError::InvalidIdentifier("../x".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(PipelineError::UnknownVariant("10_x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(StoreError::NotFound("swarm-001".into()).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn rendering_failures_are_server_errors() {
        let err = RenderError::InsufficientMaterials {
            pool: "swarm-000".into(),
            requested: 18,
            available: 12,
        };
        assert_eq!(status(err.into()), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status(RenderError::EmptyConditionSpace.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
