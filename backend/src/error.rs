//! Error handling for the ordering portal
//!
//! Rejections carry English and Thai messages so the request layer can
//! surface either language verbatim.

use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_th: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock: requested {requested_kg} kg, available {available_kg} kg")]
    InsufficientStock {
        requested_kg: i64,
        available_kg: i64,
    },

    // Data access errors
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    // Internal errors
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Shorthand for field-level validation failures.
    pub fn validation(field: &str, message: &str, message_th: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_th: message_th.to_string(),
        }
    }

    /// Serializable detail for the request layer's error envelope.
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation {
                field,
                message,
                message_th,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: message.clone(),
                message_th: message_th.clone(),
                field: Some(field.clone()),
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message_en: format!("{} not found", resource),
                message_th: format!("ไม่พบ {}", resource),
                field: None,
            },
            AppError::InsufficientStock {
                requested_kg,
                available_kg,
            } => ErrorDetail {
                code: "INSUFFICIENT_STOCK".to_string(),
                message_en: format!(
                    "Insufficient stock: requested {} kg, at most {} kg available",
                    requested_kg, available_kg
                ),
                message_th: format!(
                    "สินค้าคงคลังไม่เพียงพอ: ขอ {} กก. สั่งได้สูงสุด {} กก.",
                    requested_kg, available_kg
                ),
                field: Some("quantity_kg".to_string()),
            },
            AppError::Storage(err) => ErrorDetail {
                code: "STORAGE_ERROR".to_string(),
                message_en: format!("Storage error: {}", err),
                message_th: "เกิดข้อผิดพลาดในการจัดเก็บข้อมูล".to_string(),
                field: None,
            },
            AppError::Internal(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: "An internal error occurred".to_string(),
                message_th: "เกิดข้อผิดพลาดภายในเซิร์ฟเวอร์".to_string(),
                field: None,
            },
        }
    }
}

/// Error response structure
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_th: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Result type alias for portal operations
pub type AppResult<T> = Result<T, AppError>;
