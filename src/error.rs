use crate::models::ApiResponse;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Marker carried by `DbErr::Custom` when the pre-save check on an
/// enrollment finds another active row for the same customer and menu.
pub const DUPLICATE_ACTIVE_ENROLLMENT: &str = "duplicate active enrollment";

/// Name of the partial unique index guarding active enrollments.
pub const ACTIVE_ENROLLMENT_INDEX: &str = "uq_enrollments_active_customer_menu";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Customer already holds an active subscription for this menu")]
    DuplicateActiveEnrollment,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Translates a write error on the enrollments table. Both the pre-save
    /// check and the storage-level index surface as
    /// `DuplicateActiveEnrollment`; anything else stays a database error.
    pub fn from_enrollment_write(err: DbErr) -> Self {
        if let DbErr::Custom(msg) = &err {
            if msg == DUPLICATE_ACTIVE_ENROLLMENT {
                return AppError::DuplicateActiveEnrollment;
            }
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
                if msg.contains(ACTIVE_ENROLLMENT_INDEX)
                    || msg.contains("enrollments.customer_id") =>
            {
                AppError::DuplicateActiveEnrollment
            }
            _ => AppError::DatabaseError(err),
        }
    }

    /// `true` when the error is a unique-key violation of any kind.
    pub fn is_unique_violation(err: &DbErr) -> bool {
        matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::DuplicateActiveEnrollment => {
                log::warn!("Duplicate active enrollment rejected");
                (
                    actix_web::http::StatusCode::CONFLICT,
                    "DUPLICATE_ACTIVE_ENROLLMENT",
                    self.to_string(),
                )
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    "Invalid token".to_string(),
                )
            }
            AppError::Unauthorized(msg) => {
                log::warn!("Unauthorized: {msg}");
                (
                    actix_web::http::StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                log::error!("Internal error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(ApiResponse::failure(error_code, message))
    }
}
