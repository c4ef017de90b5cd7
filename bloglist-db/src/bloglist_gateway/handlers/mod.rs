pub mod blogs;
pub mod stats;
pub mod users;
