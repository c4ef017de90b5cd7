use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};
use serde::Serialize;
use thiserror::Error;

use crate::{bloglist_engine::types::StoreError, protocol::Format};

#[derive(Debug, Error)]
pub enum BlogListError {
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Validation(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("malformatted id: {0}")]
    MalformedId(String),
    #[error("Unsupported media type")]
    UnsupportedMediaType,
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
    #[error("Worker pool is shut down")]
    WorkerPoolClosed,
}

impl From<heed3::Error> for BlogListError {
    fn from(error: heed3::Error) -> Self {
        BlogListError::Store(StoreError::from(error))
    }
}

impl From<password_hash::Error> for BlogListError {
    fn from(error: password_hash::Error) -> Self {
        BlogListError::PasswordHash(error.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl BlogListError {
    pub fn status(&self) -> StatusCode {
        match self {
            BlogListError::Store(StoreError::BlogNotFound | StoreError::UserNotFound) => {
                StatusCode::NOT_FOUND
            }
            BlogListError::Store(StoreError::DuplicateKey(_))
            | BlogListError::Validation(_)
            | BlogListError::MalformedPayload(_)
            | BlogListError::MalformedId(_) => StatusCode::BAD_REQUEST,
            BlogListError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            BlogListError::Store(_)
            | BlogListError::PasswordHash(_)
            | BlogListError::WorkerPoolClosed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BlogListError {
    fn into_response(self) -> axum::response::Response {
        let body = sonic_rs::to_vec(&ErrorBody {
            error: self.to_string(),
        })
        .unwrap_or_default();

        (
            self.status(),
            [(CONTENT_TYPE, Format::Json.to_string())],
            body,
        )
            .into_response()
    }
}
