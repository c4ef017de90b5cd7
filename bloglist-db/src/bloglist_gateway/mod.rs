pub mod gateway;
pub mod handlers;
pub mod worker_pool;
