pub mod bloglist_engine;
pub mod bloglist_gateway;
pub mod protocol;
pub mod utils;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
