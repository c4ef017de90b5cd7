use std::{fmt::Display, str::FromStr};

use axum::http::StatusCode;
use serde::{Serialize, de::DeserializeOwned};

use crate::bloglist_engine::types::StoreError;
use crate::protocol::{BlogListError, Response};

/// The formats request and response bodies can be encoded in.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Format {
    /// JSON (JavaScript Object Notation)
    /// The current implementation uses sonic_rs
    #[default]
    Json,
}

impl Format {
    pub fn serialize<T: Serialize>(self, val: &T) -> Result<Vec<u8>, BlogListError> {
        match self {
            Format::Json => Ok(sonic_rs::to_vec(val).map_err(StoreError::from)?),
        }
    }

    pub fn create_response<T: Serialize>(
        self,
        status: StatusCode,
        val: &T,
    ) -> Result<Response, BlogListError> {
        Ok(Response {
            status,
            body: self.serialize(val)?,
            fmt: self,
        })
    }

    /// Decodes a request body. Malformed input and wrongly typed fields are
    /// reported as `MalformedPayload`.
    pub fn deserialize_owned<T: DeserializeOwned>(self, val: &[u8]) -> Result<T, BlogListError> {
        match self {
            Format::Json => sonic_rs::from_slice::<T>(val)
                .map_err(|e| BlogListError::MalformedPayload(e.to_string())),
        }
    }
}

impl FromStr for Format {
    type Err = ();

    /// Parses a media type, ignoring parameters such as `charset`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let media_type = s.split(';').next().unwrap_or_default().trim();
        match media_type {
            "application/json" => Ok(Format::Json),
            _ => Err(()),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "application/json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: u64,
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("application/json".parse::<Format>(), Ok(Format::Json));
        assert_eq!(
            "application/json; charset=utf-8".parse::<Format>(),
            Ok(Format::Json)
        );
        assert!("text/plain".parse::<Format>().is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(Format::Json.to_string(), "application/json");
    }

    #[test]
    fn test_create_response() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let response = Format::Json.create_response(StatusCode::CREATED, &data).unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, br#"{"name":"test","value":42}"#);
    }

    #[test]
    fn test_deserialize_owned() {
        let data: TestData = Format::Json
            .deserialize_owned(br#"{"name":"owned","value":99}"#)
            .unwrap();
        assert_eq!(data.value, 99);
    }

    #[test]
    fn test_deserialize_malformed() {
        let result: Result<TestData, _> = Format::Json.deserialize_owned(b"{not json");
        assert!(matches!(result, Err(BlogListError::MalformedPayload(_))));

        let result: Result<TestData, _> =
            Format::Json.deserialize_owned(br#"{"name":"x","value":-1}"#);
        assert!(matches!(result, Err(BlogListError::MalformedPayload(_))));
    }
}
