//! Service-layer error type
//!
//! `ServiceError` bridges repository errors and the API-layer `AppError`, so
//! services can use `?` on repository calls and handlers can use `?` on
//! service calls.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::repository::RepoError;

/// Service-layer error
///
/// - `Db`: storage failure (logged, mapped to DatabaseError)
/// - `App`: business-rule error, passed to the client as is
#[derive(Debug)]
pub enum ServiceError {
    Db(RepoError),
    App(AppError),
}

impl ServiceError {
    /// Error code the client will see
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Db(_) => ErrorCode::DatabaseError,
            ServiceError::App(e) => e.code,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => {
                ServiceError::App(AppError::with_message(ErrorCode::EmployeeNotFound, msg))
            }
            RepoError::Duplicate(msg) => {
                ServiceError::App(AppError::with_message(ErrorCode::EmployeeEmailExists, msg))
            }
            RepoError::Validation(msg) => ServiceError::App(AppError::validation(msg)),
            RepoError::Database(_) => ServiceError::Db(e),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let dup: ServiceError = RepoError::Duplicate("email".into()).into();
        assert_eq!(dup.code(), ErrorCode::EmployeeEmailExists);

        let missing: ServiceError = RepoError::NotFound("employee 1".into()).into();
        assert_eq!(missing.code(), ErrorCode::EmployeeNotFound);

        let invalid: ServiceError = RepoError::Validation("size".into()).into();
        assert_eq!(invalid.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_database_error_is_hidden() {
        let err: ServiceError = RepoError::Database("disk I/O error".into()).into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert!(!app.message.contains("disk"));
    }
}
