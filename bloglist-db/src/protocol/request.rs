use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::{
    protocol::{BlogListError, Format},
    utils::id::ID,
};

/// A request body decoded with the format named in its `Content-Type`.
///
/// A missing content type is treated as JSON.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BlogListError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let in_fmt = match req.headers().get(CONTENT_TYPE) {
            Some(v) => match v.to_str() {
                Ok(s) => s
                    .parse::<Format>()
                    .map_err(|_| BlogListError::UnsupportedMediaType)?,
                Err(_) => return Err(BlogListError::UnsupportedMediaType),
            },
            None => Format::default(),
        };

        let body = match Bytes::from_request(req, state).await {
            Ok(b) => b,
            Err(e) => {
                error!(?e, "Error getting bytes");
                return Err(BlogListError::MalformedPayload(e.to_string()));
            }
        };

        Ok(JsonBody(in_fmt.deserialize_owned(&body)?))
    }
}

/// Parses a path segment into an id.
pub fn parse_id(raw: &str) -> Result<ID, BlogListError> {
    raw.parse()
        .map_err(|_| BlogListError::MalformedId(raw.to_string()))
}
