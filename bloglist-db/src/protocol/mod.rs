pub mod error;
pub mod format;
pub mod request;
pub mod response;
pub mod sentinel;

pub use error::BlogListError;
pub use format::Format;
pub use request::JsonBody;
pub use response::Response;
pub use sentinel::OrEmpty;
