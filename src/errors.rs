use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Participante não encontrado")]
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Caller-fixable input problem (missing columns, unknown match field).
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("missing multipart field 'file'")]
    MissingUpload,

    #[error("multipart error: {0}")]
    Upload(#[from] MultipartError),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("spreadsheet has no worksheets")]
    EmptyWorkbook,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::MissingUpload => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Upload(e) => e.status(),
            ServiceError::Spreadsheet(_)
            | ServiceError::EmptyWorkbook
            | ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    fn detail(&self) -> String {
        match self {
            ServiceError::Validation(msg) | ServiceError::NotFound(msg) => msg.clone(),
            ServiceError::MissingUpload => self.to_string(),
            ServiceError::Upload(e) => e.body_text(),
            _ => "Erro interno".to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.is_client_error() {
            tracing::warn!(status = %status, error = %self, "request_rejected");
        } else {
            tracing::error!(status = %status, error = %self, "request_failed");
        }
        let body = ErrorResponse {
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_statuses() {
        assert_eq!(
            ServiceError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::MissingUpload.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert!(ServiceError::Validation("x".into()).is_client_error());
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let e = ServiceError::Database(sqlx::Error::RowNotFound);
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!e.is_client_error());
        assert_eq!(e.detail(), "Erro interno");
    }

    #[test]
    fn test_validation_detail_is_the_message() {
        let e = ServiceError::Validation("Campo 'by' inválido".into());
        assert_eq!(e.detail(), "Campo 'by' inválido");
        assert_eq!(e.to_string(), "Campo 'by' inválido");
    }
}
