//! JSON response envelope shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::Pagination;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Uniform response wrapper: `{status, message?, err?, data?, meta?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Envelope {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Pagination>,
}

impl Envelope {
    /// 200 with a payload
    pub fn ok<T: Serialize>(
        message: impl Into<String>,
        data: &T,
        meta: Option<Pagination>,
    ) -> AppResult<Self> {
        Self::with_status(StatusCode::OK, message, data, meta)
    }

    /// 201 with the created resource
    pub fn created<T: Serialize>(message: impl Into<String>, data: &T) -> AppResult<Self> {
        Self::with_status(StatusCode::CREATED, message, data, None)
    }

    fn with_status<T: Serialize>(
        status: StatusCode,
        message: impl Into<String>,
        data: &T,
        meta: Option<Pagination>,
    ) -> AppResult<Self> {
        let data = serde_json::to_value(data)
            .map_err(|e| AppError::internal(format!("response encoding failed: {}", e)))?;

        Ok(Self {
            status: status.as_u16(),
            message: Some(message.into()),
            err: None,
            data: Some(data),
            meta,
        })
    }

    /// Error envelope carrying the user-facing message
    pub fn from_error(err: &AppError) -> Self {
        Self {
            status: err.status().as_u16(),
            message: None,
            err: Some(err.user_message()),
            data: None,
            meta: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
