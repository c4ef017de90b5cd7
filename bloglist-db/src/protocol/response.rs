use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};

use crate::protocol::Format;

#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub fmt: Format,
}

impl Response {
    /// An empty `204 No Content` response.
    pub fn no_content() -> Self {
        Response {
            status: StatusCode::NO_CONTENT,
            body: Vec::new(),
            fmt: Format::default(),
        }
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        if self.body.is_empty() {
            return self.status.into_response();
        }
        (
            self.status,
            [(CONTENT_TYPE, self.fmt.to_string())],
            self.body,
        )
            .into_response()
    }
}
