use serde::{Deserialize, Serialize};

/// A value that is rendered as `{}` when absent.
///
/// Clients of the stats endpoint always receive an object, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrEmpty<T> {
    Value(T),
    Empty {},
}

impl<T> OrEmpty<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            OrEmpty::Value(v) => Some(v),
            OrEmpty::Empty {} => None,
        }
    }
}

impl<T> From<Option<T>> for OrEmpty<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => OrEmpty::Value(v),
            None => OrEmpty::Empty {},
        }
    }
}
