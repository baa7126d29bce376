pub mod common_env;
pub mod consts;
pub mod key;
pub mod logging;
pub mod postgres_pool;
pub mod redis_pool;
